//! Vertex welding for flat mesh buffers
//!
//! This crate collapses duplicate vertices in place and reports where every
//! original vertex ended up:
//! - Match conditions and per-group condition sets
//! - Fixed-point vertex minimization with index remapping
//! - Expansion of indexed geometry into unindexed geometry

pub mod match_condition;
pub mod vert_group;
pub mod vert_key;
pub mod vert_map;
pub mod geometry_tool;
pub mod convert;

pub use match_condition::*;
pub use vert_group::*;
pub use vert_key::*;
pub use vert_map::*;
pub use geometry_tool::*;

use vertweld_core::{MeshData, Result};

/// Reduce the vertex count of a mesh in place
pub trait VertexReducer {
    /// Collapse duplicate vertices under the grouping in `group_data` and
    /// return the mapping from original to final vertex indices.
    fn reduce(&self, mesh: &mut MeshData, group_data: &VertGroupData) -> Result<VertMap>;
}
