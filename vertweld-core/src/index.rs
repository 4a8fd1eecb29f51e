//! Index buffers sized to the vertex count they address

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Vertex indices stored in the narrowest integer width that fits the mesh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexBufferData {
    Byte(Vec<u8>),
    Short(Vec<u16>),
    Int(Vec<u32>),
}

impl IndexBufferData {
    /// A zero-filled buffer of `len` entries able to address `vertex_count` vertices.
    pub fn for_vertex_count(len: usize, vertex_count: usize) -> Self {
        let max_index = vertex_count.saturating_sub(1);
        if max_index <= u8::MAX as usize {
            IndexBufferData::Byte(vec![0; len])
        } else if max_index <= u16::MAX as usize {
            IndexBufferData::Short(vec![0; len])
        } else {
            IndexBufferData::Int(vec![0; len])
        }
    }

    /// Build a buffer from plain indices for a mesh of `vertex_count` vertices.
    pub fn from_indices(indices: &[usize], vertex_count: usize) -> Result<Self> {
        let mut buffer = Self::for_vertex_count(indices.len(), vertex_count);
        for (slot, &index) in indices.iter().enumerate() {
            buffer.set(slot, index)?;
        }
        Ok(buffer)
    }

    pub fn len(&self) -> usize {
        match self {
            IndexBufferData::Byte(v) => v.len(),
            IndexBufferData::Short(v) => v.len(),
            IndexBufferData::Int(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes per stored index
    pub fn width(&self) -> usize {
        match self {
            IndexBufferData::Byte(_) => 1,
            IndexBufferData::Short(_) => 2,
            IndexBufferData::Int(_) => 4,
        }
    }

    /// The index stored at `slot`. Panics if out of range.
    pub fn get(&self, slot: usize) -> usize {
        match self {
            IndexBufferData::Byte(v) => v[slot] as usize,
            IndexBufferData::Short(v) => v[slot] as usize,
            IndexBufferData::Int(v) => v[slot] as usize,
        }
    }

    /// Store `index` at `slot`, failing if the value exceeds the buffer width.
    pub fn set(&mut self, slot: usize, index: usize) -> Result<()> {
        let overflow = |capacity: usize| Error::IndexOutOfRange {
            index,
            vertex_count: capacity,
        };
        match self {
            IndexBufferData::Byte(v) => {
                v[slot] = u8::try_from(index).map_err(|_| overflow(u8::MAX as usize + 1))?;
            }
            IndexBufferData::Short(v) => {
                v[slot] = u16::try_from(index).map_err(|_| overflow(u16::MAX as usize + 1))?;
            }
            IndexBufferData::Int(v) => {
                v[slot] = u32::try_from(index).map_err(|_| overflow(u32::MAX as usize + 1))?;
            }
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len()).map(move |slot| self.get(slot))
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}
