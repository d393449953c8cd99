use crate::mesh::{MeshData, Topology};

/// Outward normals in face order: front, right, up, left, down, back.
pub const CUBE_FACE_NORMALS: [[f32; 3]; 6] = [
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, -1.0, 0.0],
    [0.0, 0.0, -1.0],
];

// Unit-cube corners per face, counter-clockwise seen from outside.
#[rustfmt::skip]
const FACE_CORNERS: [[[f32; 3]; 4]; 6] = [
    [[ 1.0,  1.0,  1.0], [-1.0,  1.0,  1.0], [-1.0, -1.0,  1.0], [ 1.0, -1.0,  1.0]], // front
    [[ 1.0,  1.0,  1.0], [ 1.0, -1.0,  1.0], [ 1.0, -1.0, -1.0], [ 1.0,  1.0, -1.0]], // right
    [[ 1.0,  1.0,  1.0], [ 1.0,  1.0, -1.0], [-1.0,  1.0, -1.0], [-1.0,  1.0,  1.0]], // up
    [[-1.0,  1.0,  1.0], [-1.0,  1.0, -1.0], [-1.0, -1.0, -1.0], [-1.0, -1.0,  1.0]], // left
    [[-1.0, -1.0, -1.0], [ 1.0, -1.0, -1.0], [ 1.0, -1.0,  1.0], [-1.0, -1.0,  1.0]], // down
    [[ 1.0, -1.0, -1.0], [-1.0, -1.0, -1.0], [-1.0,  1.0, -1.0], [ 1.0,  1.0, -1.0]], // back
];

/// Build an axis-aligned cube with one flat colour per face.
///
/// 24 vertices (four per face so colours and normals stay flat) and 36
/// indices. `face_colors` follows [`CUBE_FACE_NORMALS`] order.
pub fn cube(half_extent: f32, face_colors: [[f32; 4]; 6]) -> MeshData {
    let mut mesh = MeshData::new(Topology::TriangleList);
    let mut normals = Vec::with_capacity(24);

    for (face, corners) in FACE_CORNERS.iter().enumerate() {
        let base = mesh.positions.len() as u16;
        for corner in corners {
            mesh.positions.push(corner.map(|c| c * half_extent));
            mesh.colors.push(face_colors[face]);
            normals.push(CUBE_FACE_NORMALS[face]);
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    mesh.normals = Some(normals);
    mesh
}

/// Opaque pastel cube used by the four-cube showcase.
pub fn showcase_cube() -> MeshData {
    cube(
        0.5,
        [
            [0.4, 0.4, 1.0, 1.0],
            [0.4, 1.0, 0.4, 1.0],
            [1.0, 0.4, 0.4, 1.0],
            [1.0, 1.0, 0.4, 1.0],
            [1.0, 0.4, 1.0, 1.0],
            [0.4, 1.0, 1.0, 1.0],
        ],
    )
}

/// Translucent cube that encloses the bouncing ball.
pub fn glass_cube() -> MeshData {
    const ALPHA: f32 = 0.2;
    cube(
        1.0,
        [
            [1.0, 0.0, 0.0, ALPHA],
            [0.0, 1.0, 0.0, ALPHA],
            [0.0, 0.0, 1.0, ALPHA],
            [1.0, 1.0, 0.0, ALPHA],
            [1.0, 0.0, 1.0, ALPHA],
            [0.0, 1.0, 1.0, ALPHA],
        ],
    )
}
