//! Hashable per-vertex keys built from the attributes a group matches on

use crate::match_condition::MatchConditions;
use smallvec::SmallVec;
use vertweld_core::{ColorRGBA, Point3f, Vector2f, Vector3f};

/// Texture units stored without a heap allocation
const INLINE_TEXTURE_UNITS: usize = 4;

/// Comparable snapshot of one vertex.
///
/// Position always takes part in equality. Normal, color, texture coordinates
/// and group id take part only when selected by the conditions and present on
/// the mesh; otherwise they are stored as `None` and compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertKey {
    position: [u64; 3],
    normal: Option<[u64; 3]>,
    color: Option<[u64; 4]>,
    uvs: SmallVec<[Option<[u64; 2]>; INLINE_TEXTURE_UNITS]>,
    group: Option<i64>,
}

impl VertKey {
    /// Build a key. A `tolerance` of `0.0` compares values exactly; a positive
    /// tolerance snaps values to cells of that size before comparing.
    pub fn new<'a, I>(
        position: &Point3f,
        normal: Option<&Vector3f>,
        color: Option<&ColorRGBA>,
        uvs: I,
        conditions: MatchConditions,
        group: i64,
        tolerance: f32,
    ) -> Self
    where
        I: IntoIterator<Item = Option<&'a Vector2f>>,
    {
        let c = |value: f32| canonical(value, tolerance);

        let normal = normal
            .filter(|_| conditions.contains(MatchConditions::NORMAL))
            .map(|n| [c(n.x), c(n.y), c(n.z)]);
        let color = color
            .filter(|_| conditions.contains(MatchConditions::COLOR))
            .map(|col| [c(col[0]), c(col[1]), c(col[2]), c(col[3])]);
        let uvs = if conditions.contains(MatchConditions::UVS) {
            uvs.into_iter()
                .map(|uv| uv.map(|t| [c(t.x), c(t.y)]))
                .collect()
        } else {
            SmallVec::new()
        };
        let group = conditions
            .contains(MatchConditions::GROUP)
            .then_some(group);

        Self {
            position: [c(position.x), c(position.y), c(position.z)],
            normal,
            color,
            uvs,
            group,
        }
    }
}

/// Bit pattern used for hashing and equality. `-0.0` folds into `0.0` so that
/// values equal under `==` share a hash.
fn canonical(value: f32, tolerance: f32) -> u64 {
    if tolerance > 0.0 {
        return (value / tolerance).round() as i64 as u64;
    }
    if value == 0.0 {
        0
    } else {
        value.to_bits() as u64
    }
}
