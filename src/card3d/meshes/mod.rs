//! Card geometry
//!
//! Builds the static meshes of a card: the paper body (an extruded rounded
//! rectangle or a plain box) and the printed face quads. Everything here is
//! deterministic: the same `CardSpec` always yields the same vertex data.

pub mod face;
pub mod rounded_rect;

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy_mesh::{Indices, PrimitiveTopology};

use crate::card3d::types::{CardBodyStyle, CardError, CardSpec, TextureSampling};

pub use face::face_quad;
pub use rounded_rect::{extrude_outline, rounded_rect_outline};

/// Raw triangle-list geometry, kept separate from `Mesh` so it can be
/// inspected in tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardMeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub tangents: Option<Vec<[f32; 4]>>,
    pub indices: Vec<u32>,
}

impl CardMeshData {
    pub fn push_vertex(&mut self, position: Vec3, normal: Vec3, uv: [f32; 2]) {
        self.positions.push(position.to_array());
        self.normals.push(normal.to_array());
        self.uvs.push(uv);
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn into_mesh(self) -> Mesh {
        let mesh = Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::default(),
        )
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, self.positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, self.normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, self.uvs)
        .with_inserted_indices(Indices::U32(self.indices));

        match self.tangents {
            Some(tangents) => mesh.with_inserted_attribute(Mesh::ATTRIBUTE_TANGENT, tangents),
            None => mesh,
        }
    }
}

/// Geometry of the card body for the given style.
pub fn card_body_data(spec: &CardSpec, style: CardBodyStyle, corner_segments: u32) -> CardMeshData {
    let radius = match style {
        CardBodyStyle::RoundedExtrusion => spec.corner_radius,
        CardBodyStyle::Box => 0.0,
    };
    let outline = rounded_rect_outline(spec.width, spec.height, radius, corner_segments);
    extrude_outline(&outline, spec.depth)
}

/// Build the card body mesh, with tangents so the paper normal map applies.
pub fn create_card_body(
    spec: &CardSpec,
    style: CardBodyStyle,
    corner_segments: u32,
) -> Result<Mesh, CardError> {
    spec.validate()?;
    card_body_data(spec, style, corner_segments)
        .into_mesh()
        .with_generated_tangents()
        .map_err(|err| CardError::InvalidCard(format!("cannot build body tangents: {}", err)))
}

/// Build one printed face of the card.
pub fn create_card_face(spec: &CardSpec, sampling: TextureSampling) -> Result<Mesh, CardError> {
    spec.validate()?;
    Ok(face_quad(spec.face_size(), sampling).into_mesh())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn weld_key(p: [f32; 3]) -> [i64; 3] {
        p.map(|c| (c as f64 * 1e7).round() as i64)
    }

    /// Every undirected edge of a closed, consistently wound surface is used
    /// exactly twice, once in each direction.
    fn assert_closed_manifold(data: &CardMeshData) {
        let keys: Vec<[i64; 3]> = data.positions.iter().copied().map(weld_key).collect();
        let mut directed: HashMap<([i64; 3], [i64; 3]), usize> = HashMap::new();
        for tri in data.indices.chunks(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                *directed
                    .entry((keys[a as usize], keys[b as usize]))
                    .or_default() += 1;
            }
        }
        for (&(a, b), &count) in &directed {
            assert_eq!(count, 1, "edge {:?}->{:?} used {} times", a, b, count);
            assert_eq!(
                directed.get(&(b, a)),
                Some(&1),
                "edge {:?}->{:?} has no opposite",
                a,
                b
            );
        }
    }

    #[test]
    fn test_rounded_body_is_closed_manifold() {
        let data = card_body_data(&CardSpec::default(), CardBodyStyle::RoundedExtrusion, 8);
        assert_closed_manifold(&data);
    }

    #[test]
    fn test_box_body_is_closed_manifold() {
        let data = card_body_data(&CardSpec::default(), CardBodyStyle::Box, 8);
        assert_eq!(data.triangle_count(), 4 * 4);
        assert_closed_manifold(&data);
    }

    #[test]
    fn test_body_is_deterministic() {
        let spec = CardSpec::default();
        let a = card_body_data(&spec, CardBodyStyle::RoundedExtrusion, 8);
        let b = card_body_data(&spec, CardBodyStyle::RoundedExtrusion, 8);
        assert_eq!(a, b);
    }

    #[test]
    fn test_body_preserves_aspect_ratio() {
        let spec = CardSpec::default();
        for style in [CardBodyStyle::RoundedExtrusion, CardBodyStyle::Box] {
            let data = card_body_data(&spec, style, 8);
            let (min, max) = data.positions.iter().fold(
                (Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)),
                |(min, max), p| {
                    let p = Vec3::from_array(*p);
                    (min.min(p), max.max(p))
                },
            );
            let extent = max - min;
            assert!(((extent.x / extent.y) - spec.aspect_ratio()).abs() < 1e-4);
            assert!((extent.z - spec.depth).abs() < 1e-7);
        }
    }

    #[test]
    fn test_side_normals_point_outwards() {
        let data = card_body_data(&CardSpec::default(), CardBodyStyle::RoundedExtrusion, 8);
        for (p, n) in data.positions.iter().zip(&data.normals) {
            let p = Vec3::from_array(*p);
            let n = Vec3::from_array(*n);
            if n.z == 0.0 {
                assert!(p.truncate().dot(n.truncate()) > 0.0);
            }
        }
    }

    #[test]
    fn test_box_mesh_is_the_checked_geometry() {
        let spec = CardSpec::default();
        let data = card_body_data(&spec, CardBodyStyle::Box, 8);
        let mesh = create_card_body(&spec, CardBodyStyle::Box, 8).expect("box body builds");
        let positions = mesh
            .attribute(Mesh::ATTRIBUTE_POSITION)
            .and_then(|values| values.as_float3())
            .expect("box body has positions");
        assert_eq!(positions, data.positions.as_slice());
        assert_eq!(mesh.indices().map(|indices| indices.len()), Some(data.indices.len()));
    }

    #[test]
    fn test_invalid_spec_is_rejected() {
        let spec = CardSpec {
            depth: -1.0,
            ..CardSpec::default()
        };
        assert!(create_card_body(&spec, CardBodyStyle::Box, 8).is_err());
    }
}
