//! Mesh data structures and functionality

use crate::buffer::FloatBufferData;
use crate::error::{Error, Result};
use crate::index::IndexBufferData;
use crate::point::*;
use serde::{Deserialize, Serialize};

/// Per-vertex attribute buffers plus an optional index buffer.
///
/// Every present attribute buffer holds one tuple per vertex; the vertex
/// count is defined by the position buffer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshData {
    pub vertex_coords: Option<FloatBufferData>,
    pub normal_coords: Option<FloatBufferData>,
    pub color_coords: Option<FloatBufferData>,
    pub fog_coords: Option<FloatBufferData>,
    pub tangent_coords: Option<FloatBufferData>,
    /// One entry per texture unit; `None` marks an unused unit.
    pub texture_coords: Vec<Option<FloatBufferData>>,
    pub indices: Option<IndexBufferData>,
}

impl MeshData {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unindexed mesh holding only positions
    pub fn from_positions(positions: &[Point3f]) -> Self {
        Self {
            vertex_coords: Some(FloatBufferData::from_points(positions)),
            ..Self::default()
        }
    }

    /// Create a mesh from positions and triangle faces
    pub fn from_vertices_and_faces(vertices: &[Point3f], faces: &[[usize; 3]]) -> Result<Self> {
        let flat: Vec<usize> = faces.iter().flatten().copied().collect();
        let mut mesh = Self::from_positions(vertices);
        mesh.indices = Some(IndexBufferData::from_indices(&flat, vertices.len())?);
        mesh.validate()?;
        Ok(mesh)
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertex_coords
            .as_ref()
            .map_or(0, FloatBufferData::tuple_count)
    }

    /// Check if the mesh has no vertices
    pub fn is_empty(&self) -> bool {
        self.vertex_count() == 0
    }

    /// Number of texture units, used or not
    pub fn number_of_units(&self) -> usize {
        self.texture_coords.len()
    }

    pub fn texture_coords(&self, unit: usize) -> Option<&FloatBufferData> {
        self.texture_coords.get(unit).and_then(Option::as_ref)
    }

    /// Set texture coordinates for `unit`, growing the unit list as needed
    pub fn set_texture_coords(&mut self, unit: usize, coords: Option<FloatBufferData>) {
        if unit >= self.texture_coords.len() {
            self.texture_coords.resize(unit + 1, None);
        }
        self.texture_coords[unit] = coords;
    }

    pub fn set_normals(&mut self, normals: &[Vector3f]) {
        self.normal_coords = Some(FloatBufferData::from_vectors(normals));
    }

    pub fn set_colors(&mut self, colors: &[ColorRGBA]) {
        self.color_coords = Some(FloatBufferData::from_colors(colors));
    }

    pub fn set_uvs(&mut self, unit: usize, uvs: &[Vector2f]) {
        self.set_texture_coords(unit, Some(FloatBufferData::from_uvs(uvs)));
    }

    /// Check that every attribute buffer holds one tuple per vertex and that
    /// every index addresses an existing vertex.
    pub fn validate(&self) -> Result<()> {
        let expected = self.vertex_count();
        let check = |attribute: String, buffer: &Option<FloatBufferData>| -> Result<()> {
            match buffer {
                Some(buffer) if buffer.tuple_count() != expected => {
                    Err(Error::InconsistentBuffers {
                        attribute,
                        expected,
                        actual: buffer.tuple_count(),
                    })
                }
                _ => Ok(()),
            }
        };

        check("normals".to_string(), &self.normal_coords)?;
        check("colors".to_string(), &self.color_coords)?;
        check("fog coordinates".to_string(), &self.fog_coords)?;
        check("tangents".to_string(), &self.tangent_coords)?;
        for (unit, coords) in self.texture_coords.iter().enumerate() {
            check(format!("texture unit {}", unit), coords)?;
        }

        if let Some(indices) = &self.indices {
            if let Some(index) = indices.iter().find(|&i| i >= expected) {
                return Err(Error::IndexOutOfRange {
                    index,
                    vertex_count: expected,
                });
            }
        }
        Ok(())
    }
}
