//! Flat float attribute buffers

use crate::error::{Error, Result};
use crate::point::{ColorRGBA, Point3f, Vector2f, Vector3f};
use serde::{Deserialize, Serialize};

/// A flat float buffer holding fixed-width tuples, one tuple per vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatBufferData {
    values: Vec<f32>,
    values_per_tuple: usize,
}

impl FloatBufferData {
    /// Wrap `values` as tuples of `values_per_tuple` floats.
    pub fn new(values: Vec<f32>, values_per_tuple: usize) -> Result<Self> {
        if values_per_tuple == 0 {
            return Err(Error::InvalidData(
                "Float buffer tuple width must be at least 1".to_string(),
            ));
        }
        if values.len() % values_per_tuple != 0 {
            return Err(Error::InvalidData(format!(
                "Float buffer of {} values is not a multiple of tuple width {}",
                values.len(),
                values_per_tuple
            )));
        }
        Ok(Self {
            values,
            values_per_tuple,
        })
    }

    /// Build a 3-wide buffer from points
    pub fn from_points(points: &[Point3f]) -> Self {
        Self {
            values: points.iter().flat_map(|p| [p.x, p.y, p.z]).collect(),
            values_per_tuple: 3,
        }
    }

    /// Build a 3-wide buffer from vectors
    pub fn from_vectors(vectors: &[Vector3f]) -> Self {
        Self {
            values: vectors.iter().flat_map(|v| [v.x, v.y, v.z]).collect(),
            values_per_tuple: 3,
        }
    }

    /// Build a 4-wide buffer from colors
    pub fn from_colors(colors: &[ColorRGBA]) -> Self {
        Self {
            values: colors.iter().flatten().copied().collect(),
            values_per_tuple: 4,
        }
    }

    /// Build a 2-wide buffer from texture coordinates
    pub fn from_uvs(uvs: &[Vector2f]) -> Self {
        Self {
            values: uvs.iter().flat_map(|t| [t.x, t.y]).collect(),
            values_per_tuple: 2,
        }
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn values_per_tuple(&self) -> usize {
        self.values_per_tuple
    }

    /// Number of complete tuples in the buffer
    pub fn tuple_count(&self) -> usize {
        self.values.len() / self.values_per_tuple
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The `index`-th tuple. Panics if out of range.
    pub fn tuple(&self, index: usize) -> &[f32] {
        let start = index * self.values_per_tuple;
        &self.values[start..start + self.values_per_tuple]
    }

    /// Read the buffer as points; requires a width of 3.
    pub fn to_points(&self) -> Result<Vec<Point3f>> {
        self.expect_width(3)?;
        Ok(self
            .values
            .chunks_exact(3)
            .map(|c| Point3f::new(c[0], c[1], c[2]))
            .collect())
    }

    /// Read the buffer as vectors; requires a width of 3.
    pub fn to_vectors(&self) -> Result<Vec<Vector3f>> {
        self.expect_width(3)?;
        Ok(self
            .values
            .chunks_exact(3)
            .map(|c| Vector3f::new(c[0], c[1], c[2]))
            .collect())
    }

    /// Read the buffer as colors; requires a width of 4.
    pub fn to_colors(&self) -> Result<Vec<ColorRGBA>> {
        self.expect_width(4)?;
        Ok(self
            .values
            .chunks_exact(4)
            .map(|c| [c[0], c[1], c[2], c[3]])
            .collect())
    }

    /// Read the buffer as texture coordinates; requires a width of 2.
    pub fn to_uvs(&self) -> Result<Vec<Vector2f>> {
        self.expect_width(2)?;
        Ok(self
            .values
            .chunks_exact(2)
            .map(|c| Vector2f::new(c[0], c[1]))
            .collect())
    }

    /// Copy one tuple per entry of `indices` into a new buffer of the same width.
    pub fn gather<I>(&self, indices: I) -> Result<FloatBufferData>
    where
        I: IntoIterator<Item = usize>,
    {
        let tuple_count = self.tuple_count();
        let indices = indices.into_iter();
        let mut values = Vec::with_capacity(indices.size_hint().0 * self.values_per_tuple);
        for index in indices {
            if index >= tuple_count {
                return Err(Error::IndexOutOfRange {
                    index,
                    vertex_count: tuple_count,
                });
            }
            values.extend_from_slice(self.tuple(index));
        }
        Ok(FloatBufferData {
            values,
            values_per_tuple: self.values_per_tuple,
        })
    }

    /// Overwrite tuple `to` with tuple `from`
    pub fn copy_tuple(&mut self, from: usize, to: usize) {
        let width = self.values_per_tuple;
        self.values
            .copy_within(from * width..(from + 1) * width, to * width);
    }

    /// Keep only the first `tuple_count` tuples
    pub fn truncate(&mut self, tuple_count: usize) {
        self.values.truncate(tuple_count * self.values_per_tuple);
    }

    fn expect_width(&self, width: usize) -> Result<()> {
        if self.values_per_tuple != width {
            return Err(Error::InvalidData(format!(
                "Expected {}-wide tuples, buffer holds {}-wide tuples",
                width, self.values_per_tuple
            )));
        }
        Ok(())
    }
}
