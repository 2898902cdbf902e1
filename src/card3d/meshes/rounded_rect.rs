use bevy::prelude::*;

use super::CardMeshData;

/// Quadratic Bezier point between `start` and `end` with control point `control`.
fn quadratic(start: Vec2, control: Vec2, end: Vec2, t: f32) -> Vec2 {
    let inv = 1.0 - t;
    start * (inv * inv) + control * (2.0 * inv * t) + end * (t * t)
}

/// Closed counter-clockwise outline of a rounded rectangle centred on the origin.
///
/// Each corner is a quadratic curve whose control point is the sharp corner.
/// The first point is the start of the bottom edge; the closing edge back to
/// it is implicit. Consecutive duplicates are dropped, so a zero radius gives
/// the four corners of a plain rectangle.
pub fn rounded_rect_outline(width: f32, height: f32, radius: f32, segments: u32) -> Vec<Vec2> {
    let hw = width / 2.0;
    let hh = height / 2.0;
    let r = radius.clamp(0.0, hw.min(hh));
    let segments = segments.max(1);

    // (curve start, sharp corner, curve end), in drawing order
    let corners = [
        (Vec2::new(hw - r, -hh), Vec2::new(hw, -hh), Vec2::new(hw, -hh + r)),
        (Vec2::new(hw, hh - r), Vec2::new(hw, hh), Vec2::new(hw - r, hh)),
        (Vec2::new(-hw + r, hh), Vec2::new(-hw, hh), Vec2::new(-hw, hh - r)),
        (Vec2::new(-hw, -hh + r), Vec2::new(-hw, -hh), Vec2::new(-hw + r, -hh)),
    ];

    let mut outline: Vec<Vec2> = Vec::with_capacity(4 * (segments as usize + 1) + 1);
    outline.push(Vec2::new(-hw + r, -hh));
    for (start, control, end) in corners {
        for step in 0..=segments {
            let t = step as f32 / segments as f32;
            let point = quadratic(start, control, end, t);
            if outline
                .last()
                .is_none_or(|last| last.distance_squared(point) > f32::EPSILON * f32::EPSILON)
            {
                outline.push(point);
            }
        }
    }

    // The last corner ends where the outline started.
    while outline.len() > 1
        && outline[0].distance_squared(outline[outline.len() - 1]) <= f32::EPSILON * f32::EPSILON
    {
        outline.pop();
    }

    outline
}

/// Extrude a closed convex outline along Z into a solid of the given depth,
/// centred on z = 0. No bevel.
///
/// Caps are fan-triangulated around the outline's centroid and side walls
/// get one flat normal per edge, so vertices are duplicated per face.
pub fn extrude_outline(outline: &[Vec2], depth: f32) -> CardMeshData {
    let mut data = CardMeshData::default();
    let n = outline.len();
    if n < 3 {
        return data;
    }

    let half = depth / 2.0;
    let min = outline.iter().copied().fold(Vec2::splat(f32::MAX), Vec2::min);
    let max = outline.iter().copied().fold(Vec2::splat(f32::MIN), Vec2::max);
    let size = (max - min).max(Vec2::splat(f32::EPSILON));
    let centroid = outline.iter().copied().sum::<Vec2>() / n as f32;
    let cap_uv = |p: Vec2| -> [f32; 2] {
        let local = (p - min) / size;
        [local.x, 1.0 - local.y]
    };

    // Front cap (+Z)
    let base = data.positions.len() as u32;
    data.push_vertex(centroid.extend(half), Vec3::Z, cap_uv(centroid));
    for p in outline {
        data.push_vertex(p.extend(half), Vec3::Z, cap_uv(*p));
    }
    for i in 0..n as u32 {
        let next = (i + 1) % n as u32;
        data.indices
            .extend_from_slice(&[base, base + 1 + i, base + 1 + next]);
    }

    // Back cap (-Z), reversed winding
    let base = data.positions.len() as u32;
    data.push_vertex(centroid.extend(-half), Vec3::NEG_Z, cap_uv(centroid));
    for p in outline {
        data.push_vertex(p.extend(-half), Vec3::NEG_Z, cap_uv(*p));
    }
    for i in 0..n as u32 {
        let next = (i + 1) % n as u32;
        data.indices
            .extend_from_slice(&[base, base + 1 + next, base + 1 + i]);
    }

    // Side walls
    let perimeter: f32 = (0..n)
        .map(|i| outline[i].distance(outline[(i + 1) % n]))
        .sum::<f32>()
        .max(f32::EPSILON);
    let mut travelled = 0.0;
    for i in 0..n {
        let p0 = outline[i];
        let p1 = outline[(i + 1) % n];
        let edge = p1 - p0;
        let normal = Vec2::new(edge.y, -edge.x).normalize_or_zero().extend(0.0);
        let u0 = travelled / perimeter;
        travelled += edge.length();
        let u1 = travelled / perimeter;

        let base = data.positions.len() as u32;
        // a: p0 front, b: p1 front, c: p1 back, d: p0 back
        data.push_vertex(p0.extend(half), normal, [u0, 0.0]);
        data.push_vertex(p1.extend(half), normal, [u1, 0.0]);
        data.push_vertex(p1.extend(-half), normal, [u1, 1.0]);
        data.push_vertex(p0.extend(-half), normal, [u0, 1.0]);
        let (a, b, c, d) = (base, base + 1, base + 2, base + 3);
        data.indices.extend_from_slice(&[d, c, b, d, b, a]);
    }

    data
}
