//! Core data structures for vertweld
//!
//! This crate provides the mesh data model consumed by the welding tools:
//! flat per-vertex attribute buffers, width-adaptive index buffers and the
//! shared error type.

pub mod point;
pub mod buffer;
pub mod index;
pub mod mesh;
pub mod error;

pub use point::*;
pub use buffer::*;
pub use index::*;
pub use mesh::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector2, Vector3};
