use bevy::prelude::*;

use crate::card3d::types::TextureSampling;

use super::CardMeshData;

/// A single-sided quad in the XY plane facing +Z, with UVs laid out by the
/// card's texture sampling rules and an explicit tangent frame for normal
/// mapping.
pub fn face_quad(size: Vec2, sampling: TextureSampling) -> CardMeshData {
    let hw = size.x / 2.0;
    let hh = size.y / 2.0;
    let mut data = CardMeshData::default();

    // bottom-left, bottom-right, top-right, top-left
    let corners = [
        (Vec2::new(-hw, -hh), 0.0, 0.0),
        (Vec2::new(hw, -hh), 1.0, 0.0),
        (Vec2::new(hw, hh), 1.0, 1.0),
        (Vec2::new(-hw, hh), 0.0, 1.0),
    ];
    for (position, u, v_up) in corners {
        data.push_vertex(position.extend(0.0), Vec3::Z, sampling.uv(u, v_up));
    }
    data.tangents = Some(vec![[1.0, 0.0, 0.0, sampling.tangent_sign()]; 4]);
    data.indices.extend_from_slice(&[0, 1, 2, 0, 2, 3]);

    data
}
