use crate::mesh::{MeshData, Topology};

/// Clip-space depth of the sky quad, just inside the far plane.
pub const SKY_DEPTH: f32 = 0.999;

/// Full-screen textured quad, drawn with an identity MVP.
///
/// Texture coordinates put `v = 1` at the top edge; the texture loader flips
/// images vertically to match.
pub fn sky_quad() -> MeshData {
    let mut mesh = MeshData::new(Topology::TriangleStrip);
    mesh.positions = vec![
        [-1.0, 1.0, SKY_DEPTH],
        [1.0, 1.0, SKY_DEPTH],
        [-1.0, -1.0, SKY_DEPTH],
        [1.0, -1.0, SKY_DEPTH],
    ];
    mesh.colors = vec![[1.0, 1.0, 1.0, 1.0]; 4];
    mesh.normals = Some(vec![[0.0, 0.0, 1.0]; 4]);
    mesh.tex_coords = Some(vec![[0.0, 1.0], [1.0, 1.0], [0.0, 0.0], [1.0, 0.0]]);
    mesh.indices = vec![0, 1, 2, 3];
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sky_covers_clip_space() {
        let mesh = sky_quad();
        assert_eq!(mesh.validate(), Ok(()));
        assert_eq!(mesh.primitive_count(), 2);
        for p in &mesh.positions {
            assert_eq!(p[0].abs(), 1.0);
            assert_eq!(p[1].abs(), 1.0);
        }
    }
}
