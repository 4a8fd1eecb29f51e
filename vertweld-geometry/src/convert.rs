//! Expansion of indexed geometry into unindexed geometry

use crate::geometry_tool::GeometryTool;
use vertweld_core::{FloatBufferData, MeshData, Result};

impl GeometryTool {
    /// Replace every attribute buffer with one tuple per index entry, then drop
    /// the index buffer. Meshes without indices are left as they are.
    ///
    /// Fails without modifying the mesh if an index addresses a missing tuple.
    pub fn convert_indexed_geometry_into_non_indexed_geometry(
        &self,
        mesh: &mut MeshData,
    ) -> Result<()> {
        let Some(indices) = &mesh.indices else {
            return Ok(());
        };
        let order = indices.to_vec();
        let expand = |buffer: &Option<FloatBufferData>| {
            buffer
                .as_ref()
                .map(|b| b.gather(order.iter().copied()))
                .transpose()
        };

        let vertex_coords = expand(&mesh.vertex_coords)?;
        let normal_coords = expand(&mesh.normal_coords)?;
        let color_coords = expand(&mesh.color_coords)?;
        let fog_coords = expand(&mesh.fog_coords)?;
        let tangent_coords = expand(&mesh.tangent_coords)?;
        let texture_coords = mesh
            .texture_coords
            .iter()
            .map(|coords| expand(coords))
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "Expanded {} indexed vertices into {} unindexed vertices",
            mesh.vertex_count(),
            order.len()
        );

        mesh.vertex_coords = vertex_coords;
        mesh.normal_coords = normal_coords;
        mesh.color_coords = color_coords;
        mesh.fog_coords = fog_coords;
        mesh.tangent_coords = tangent_coords;
        mesh.texture_coords = texture_coords;
        mesh.indices = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vertweld_core::{Error, IndexBufferData, Point3f, Vector2f, Vector3f};

    fn quad() -> MeshData {
        let mut mesh = MeshData::from_vertices_and_faces(
            &[
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(1.0, 1.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
            ],
            &[[0, 1, 2], [0, 2, 3]],
        )
        .unwrap();
        mesh.set_normals(&[Vector3f::z(); 4]);
        mesh.set_uvs(
            1,
            &[
                Vector2f::new(0.0, 0.0),
                Vector2f::new(1.0, 0.0),
                Vector2f::new(1.0, 1.0),
                Vector2f::new(0.0, 1.0),
            ],
        );
        mesh.fog_coords = Some(FloatBufferData::new(vec![0.0, 1.0, 2.0, 3.0], 1).unwrap());
        mesh
    }

    #[test]
    fn test_expands_every_attribute() {
        let mut mesh = quad();
        GeometryTool::new()
            .convert_indexed_geometry_into_non_indexed_geometry(&mut mesh)
            .unwrap();

        assert!(mesh.indices.is_none());
        assert_eq!(mesh.vertex_count(), 6);
        assert!(mesh.validate().is_ok());
        assert_eq!(
            mesh.fog_coords.as_ref().unwrap().values(),
            &[0.0, 1.0, 2.0, 0.0, 2.0, 3.0]
        );
        assert_eq!(mesh.number_of_units(), 2);
        assert!(mesh.texture_coords(0).is_none());
        let uvs = mesh.texture_coords(1).unwrap().to_uvs().unwrap();
        assert_eq!(uvs[4], Vector2f::new(1.0, 1.0));
        assert_eq!(mesh.normal_coords.as_ref().unwrap().tuple_count(), 6);
    }

    #[test]
    fn test_unindexed_mesh_is_untouched() {
        let mut mesh = MeshData::from_positions(&[Point3f::origin(), Point3f::new(1.0, 0.0, 0.0)]);
        let before = mesh.clone();
        GeometryTool::new()
            .convert_indexed_geometry_into_non_indexed_geometry(&mut mesh)
            .unwrap();
        assert_eq!(mesh, before);
    }

    #[test]
    fn test_bad_index_leaves_mesh_untouched() {
        let mut mesh = quad();
        mesh.indices = Some(IndexBufferData::from_indices(&[0, 1, 7], 8).unwrap());
        let before = mesh.clone();

        let result = GeometryTool::new().convert_indexed_geometry_into_non_indexed_geometry(&mut mesh);
        assert_eq!(
            result,
            Err(Error::IndexOutOfRange {
                index: 7,
                vertex_count: 4
            })
        );
        assert_eq!(mesh, before);
    }
}
