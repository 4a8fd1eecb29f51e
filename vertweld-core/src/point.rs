//! Vector and color types used by the working arrays

use nalgebra::{Point3, Vector2, Vector3};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// A 2D vector, used for texture coordinates
pub type Vector2f = Vector2<f32>;

/// An RGBA color with floating point channels
pub type ColorRGBA = [f32; 4];

/// Opaque white, the color assumed for vertices without one
pub const WHITE: ColorRGBA = [1.0, 1.0, 1.0, 1.0];

/// Normalize `v` in place, leaving zero-length vectors untouched.
pub fn normalize_or_keep(v: &mut Vector3f) {
    v.try_normalize_mut(0.0);
}
