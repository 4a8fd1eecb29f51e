//! Vertex minimization
//!
//! Collapses vertices that share a position and match their group's
//! conditions. Each pass scans the live vertices once, swapping the last live
//! vertex into every slot it discards, then compacts the attribute buffers and
//! rewrites the index buffer. Passes repeat until one removes nothing and,
//! when normals take part in matching, leaves every normal as it found it.
//!
//! Only 2D texture coordinates are supported.

use crate::match_condition::MatchConditions;
use crate::vert_group::VertGroupData;
use crate::vert_key::VertKey;
use crate::vert_map::VertMap;
use crate::VertexReducer;
use std::collections::HashMap;
use std::time::Instant;
use vertweld_core::{
    normalize_or_keep, ColorRGBA, Error, FloatBufferData, IndexBufferData, MeshData, Point3f,
    Result, Vector2f, Vector3f,
};

// ============================================================
// Configuration
// ============================================================

/// Passes allowed to only renormalize normals before the loop gives up
const MAX_SETTLE_PASSES: usize = 8;

/// Reduces duplicate vertex data in meshes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryTool {
    /// Cell size for "close enough" matching. `0.0` matches exact values only.
    pub tolerance: f32,
}

impl Default for GeometryTool {
    fn default() -> Self {
        Self { tolerance: 0.0 }
    }
}

impl GeometryTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(tolerance: f32) -> Self {
        Self {
            tolerance: tolerance.max(0.0),
        }
    }

    /// Collapse duplicate vertices, treating every vertex as part of one group
    /// governed by `conditions`.
    ///
    /// Returns the mapping from original vertex indices to their final slots.
    pub fn minimize_verts(
        &self,
        mesh: &mut MeshData,
        conditions: MatchConditions,
    ) -> Result<VertMap> {
        self.minimize_verts_grouped(mesh, &VertGroupData::uniform(conditions))
    }

    /// Collapse duplicate vertices using per-vertex groups and per-group
    /// conditions.
    ///
    /// The mesh is validated before anything is modified. If it has no index
    /// buffer, one is created covering every original vertex.
    pub fn minimize_verts_grouped(
        &self,
        mesh: &mut MeshData,
        group_data: &VertGroupData,
    ) -> Result<VertMap> {
        let start = Instant::now();
        check_reducible(mesh)?;

        let old_count = mesh.vertex_count();
        let mut result = VertMap::new(old_count);
        let mut groups: Vec<i64> = (0..old_count)
            .map(|v| group_data.group_for_vertex(v))
            .collect();
        let matches_normals =
            mesh.normal_coords.is_some() && group_data.uses_conditions(MatchConditions::NORMAL);
        let mut passes = 0;
        let mut settle_passes = 0;

        let new_count = loop {
            let vert_count = mesh.vertex_count();
            let mut work = WorkingSet::from_mesh(mesh, groups)?;
            let (remap, normals_changed) = self.reduce_pass(&mut work, group_data);
            groups = work.write_back(mesh);
            rebuild_indices(mesh, &remap, old_count)?;
            result.apply_remapping(&remap);
            passes += 1;

            let new_count = mesh.vertex_count();
            log::debug!(
                "Vertex reduction pass {}: {} -> {} vertices",
                passes,
                vert_count,
                new_count
            );
            if new_count != vert_count {
                settle_passes = 0;
                continue;
            }
            // renormalized normals may now produce equal keys
            if !(matches_normals && normals_changed) {
                break new_count;
            }
            settle_passes += 1;
            if settle_passes >= MAX_SETTLE_PASSES {
                log::warn!(
                    "Normals still changing after {} passes without a merge, stopping",
                    settle_passes
                );
                break new_count;
            }
        };

        log::info!(
            "Vertex reduction complete, old vertex count: {} new vertex count: {} ({} passes in {} ms)",
            old_count,
            new_count,
            passes,
            start.elapsed().as_millis()
        );
        Ok(result)
    }

    /// One scan over the live vertices. Returns the slot remapping for the pass,
    /// where absent slots kept their position, and whether renormalization
    /// changed any stored normal.
    fn reduce_pass(
        &self,
        work: &mut WorkingSet,
        group_data: &VertGroupData,
    ) -> (HashMap<usize, usize>, bool) {
        let mut store: HashMap<VertKey, usize> = HashMap::with_capacity(work.len());
        let mut index_remap: HashMap<usize, usize> = HashMap::new();
        let mut max = work.len();
        let mut x = 0;

        while x < max {
            let conditions = group_data.group_conditions(work.groups[x]);
            let key = work.key(x, conditions, self.tolerance);

            let survivor = match store.get(&key) {
                Some(&survivor) => survivor,
                None => {
                    store.insert(key, x);
                    x += 1;
                    continue;
                }
            };

            // Slot x already gave up its own vertex and now holds the one moved
            // down from `max`, so it is that slot which gets redirected.
            if index_remap.contains_key(&x) {
                index_remap.insert(max, survivor);
            } else {
                index_remap.insert(x, survivor);
            }
            work.merge_normal(x, survivor);

            max -= 1;
            if x != max {
                index_remap.insert(max, x);
                work.move_slot(max, x);
            }
            // x is examined again with the moved vertex
        }

        let normals_changed = work.truncate(max);
        (index_remap, normals_changed)
    }
}

impl VertexReducer for GeometryTool {
    fn reduce(&self, mesh: &mut MeshData, group_data: &VertGroupData) -> Result<VertMap> {
        self.minimize_verts_grouped(mesh, group_data)
    }
}

// ============================================================
// Validation
// ============================================================

fn check_reducible(mesh: &MeshData) -> Result<()> {
    let positions = match &mesh.vertex_coords {
        Some(positions) if !positions.is_empty() => positions,
        _ => return Err(Error::InvalidData("Mesh has no vertex positions".to_string())),
    };
    check_width("positions", positions, 3)?;
    if let Some(normals) = &mesh.normal_coords {
        check_width("normals", normals, 3)?;
    }
    if let Some(colors) = &mesh.color_coords {
        check_width("colors", colors, 4)?;
    }
    for (unit, coords) in mesh.texture_coords.iter().enumerate() {
        if let Some(coords) = coords {
            if coords.values_per_tuple() != 2 {
                return Err(Error::Unsupported(format!(
                    "Texture unit {} holds {}D coordinates, only 2D coordinates can be welded",
                    unit,
                    coords.values_per_tuple()
                )));
            }
        }
    }
    mesh.validate()
}

fn check_width(attribute: &str, buffer: &FloatBufferData, width: usize) -> Result<()> {
    if buffer.values_per_tuple() != width {
        return Err(Error::InvalidData(format!(
            "{} must hold {} values per vertex, found {}",
            attribute,
            width,
            buffer.values_per_tuple()
        )));
    }
    Ok(())
}

// ============================================================
// Working Arrays
// ============================================================

/// Per-vertex copies of the mesh attributes for one pass.
struct WorkingSet {
    positions: Vec<Point3f>,
    normals: Option<Vec<Vector3f>>,
    colors: Option<Vec<ColorRGBA>>,
    uvs: Vec<Option<Vec<Vector2f>>>,
    /// Attributes that never take part in matching but must stay aligned
    fog: Option<FloatBufferData>,
    tangents: Option<FloatBufferData>,
    groups: Vec<i64>,
}

impl WorkingSet {
    fn from_mesh(mesh: &MeshData, groups: Vec<i64>) -> Result<Self> {
        let positions = mesh
            .vertex_coords
            .as_ref()
            .map(FloatBufferData::to_points)
            .transpose()?
            .unwrap_or_default();
        let normals = mesh
            .normal_coords
            .as_ref()
            .map(FloatBufferData::to_vectors)
            .transpose()?;
        let colors = mesh
            .color_coords
            .as_ref()
            .map(FloatBufferData::to_colors)
            .transpose()?;
        let uvs = mesh
            .texture_coords
            .iter()
            .map(|coords| coords.as_ref().map(FloatBufferData::to_uvs).transpose())
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            positions,
            normals,
            colors,
            uvs,
            fog: mesh.fog_coords.clone(),
            tangents: mesh.tangent_coords.clone(),
            groups,
        })
    }

    fn len(&self) -> usize {
        self.positions.len()
    }

    fn key(&self, slot: usize, conditions: MatchConditions, tolerance: f32) -> VertKey {
        VertKey::new(
            &self.positions[slot],
            self.normals.as_ref().map(|n| &n[slot]),
            self.colors.as_ref().map(|c| &c[slot]),
            self.uvs.iter().map(|unit| unit.as_ref().map(|t| &t[slot])),
            conditions,
            self.groups[slot],
            tolerance,
        )
    }

    /// Add the discarded vertex's direction to the survivor's normal
    fn merge_normal(&mut self, discarded: usize, survivor: usize) {
        if let Some(normals) = &mut self.normals {
            let mut n = normals[discarded];
            normalize_or_keep(&mut n);
            normals[survivor] += n;
        }
    }

    fn move_slot(&mut self, from: usize, to: usize) {
        self.positions[to] = self.positions[from];
        if let Some(normals) = &mut self.normals {
            normals[to] = normals[from];
        }
        if let Some(colors) = &mut self.colors {
            colors[to] = colors[from];
        }
        for unit in self.uvs.iter_mut().flatten() {
            unit[to] = unit[from];
        }
        if let Some(fog) = &mut self.fog {
            fog.copy_tuple(from, to);
        }
        if let Some(tangents) = &mut self.tangents {
            tangents.copy_tuple(from, to);
        }
        self.groups[to] = self.groups[from];
    }

    /// Drop everything past the surviving vertices and renormalize the
    /// accumulated normals. Returns whether any normal changed bit pattern.
    fn truncate(&mut self, good: usize) -> bool {
        let mut normals_changed = false;
        self.positions.truncate(good);
        if let Some(normals) = &mut self.normals {
            normals.truncate(good);
            for normal in normals.iter_mut() {
                let before = *normal;
                normalize_or_keep(normal);
                normals_changed |= normal
                    .iter()
                    .zip(before.iter())
                    .any(|(a, b)| a.to_bits() != b.to_bits());
            }
        }
        if let Some(colors) = &mut self.colors {
            colors.truncate(good);
        }
        for unit in self.uvs.iter_mut().flatten() {
            unit.truncate(good);
        }
        if let Some(fog) = &mut self.fog {
            fog.truncate(good);
        }
        if let Some(tangents) = &mut self.tangents {
            tangents.truncate(good);
        }
        self.groups.truncate(good);
        normals_changed
    }

    /// Store the compacted attributes on the mesh and hand back the group of
    /// every surviving slot.
    fn write_back(self, mesh: &mut MeshData) -> Vec<i64> {
        mesh.vertex_coords = Some(FloatBufferData::from_points(&self.positions));
        if let Some(normals) = &self.normals {
            mesh.normal_coords = Some(FloatBufferData::from_vectors(normals));
        }
        if let Some(colors) = &self.colors {
            mesh.color_coords = Some(FloatBufferData::from_colors(colors));
        }
        for (unit, uvs) in self.uvs.iter().enumerate() {
            if let Some(uvs) = uvs {
                mesh.set_uvs(unit, uvs);
            }
        }
        if self.fog.is_some() {
            mesh.fog_coords = self.fog;
        }
        if self.tangents.is_some() {
            mesh.tangent_coords = self.tangents;
        }
        self.groups
    }
}

// ============================================================
// Index Rewriting
// ============================================================

/// Point the index buffer at the compacted slots. A mesh without indices gets
/// one entry per original vertex.
fn rebuild_indices(
    mesh: &mut MeshData,
    remap: &HashMap<usize, usize>,
    old_count: usize,
) -> Result<()> {
    let remapped = |index: usize| remap.get(&index).copied().unwrap_or(index);

    let has_indices = mesh.indices.as_ref().is_some_and(|i| !i.is_empty());
    if has_indices {
        if let Some(indices) = mesh.indices.as_mut() {
            for slot in 0..indices.len() {
                let index = indices.get(slot);
                indices.set(slot, remapped(index))?;
            }
        }
    } else {
        let mut indices = IndexBufferData::for_vertex_count(old_count, old_count);
        for index in 0..old_count {
            indices.set(index, remapped(index))?;
        }
        mesh.indices = Some(indices);
    }
    Ok(())
}
