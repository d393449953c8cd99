use std::f32::consts::PI;

use crate::mesh::{GeometryError, MeshData, Topology, check_vertex_count};

pub const BALL_COLOR: [f32; 4] = [1.0, 0.2, 0.2, 1.0];

/// Latitude/longitude sphere.
///
/// Emits `(segments + 1)^2` vertices; the pole rows are repeated once per
/// longitude rather than shared. Triangles face outward. Fails when the
/// vertex count outgrows 16-bit indices (`segments > 255`).
pub fn sphere(radius: f32, segments: u16, color: [f32; 4]) -> Result<MeshData, GeometryError> {
    let segments = usize::from(segments.max(1));
    let stride = segments + 1;
    check_vertex_count(stride * stride)?;
    let mut mesh = MeshData::new(Topology::TriangleList);
    let mut normals = Vec::with_capacity(stride * stride);

    for lat in 0..=segments {
        let theta = lat as f32 * PI / segments as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();
        for lon in 0..=segments {
            let phi = lon as f32 * 2.0 * PI / segments as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();
            let unit = [cos_phi * sin_theta, cos_theta, sin_phi * sin_theta];
            mesh.positions.push(unit.map(|c| c * radius));
            mesh.colors.push(color);
            normals.push(unit);
        }
    }

    for lat in 0..segments {
        for lon in 0..segments {
            let first = lat * stride + lon;
            let second = first + stride;
            mesh.indices.extend(
                [first, first + 1, second, second, first + 1, second + 1].map(|i| i as u16),
            );
        }
    }

    mesh.normals = Some(normals);
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn vertex_and_index_counts() {
        let mesh = sphere(0.23, 30, BALL_COLOR).unwrap();
        assert_eq!(mesh.vertex_count(), 31 * 31);
        assert_eq!(mesh.index_count(), 6 * 30 * 30);
        assert_eq!(mesh.validate(), Ok(()));
    }

    #[test]
    fn largest_sphere_fits_sixteen_bit_indices() {
        let mesh = sphere(1.0, 255, BALL_COLOR).unwrap();
        assert_eq!(mesh.vertex_count(), 256 * 256);
        assert_eq!(mesh.indices.iter().max(), Some(&u16::MAX));
        assert_eq!(mesh.validate(), Ok(()));
    }

    #[test]
    fn oversized_sphere_is_an_error() {
        assert_eq!(
            sphere(1.0, 256, BALL_COLOR),
            Err(GeometryError::TooManyVertices {
                count: 257 * 257,
                max: 65_536
            })
        );
    }

    #[test]
    fn vertices_lie_on_radius() {
        let mesh = sphere(2.0, 8, BALL_COLOR).unwrap();
        for p in &mesh.positions {
            assert!((Vec3::from(*p).length() - 2.0).abs() < 1e-5);
        }
    }

    #[test]
    fn triangles_face_outward() {
        let mesh = sphere(1.0, 12, BALL_COLOR).unwrap();
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] =
                [tri[0], tri[1], tri[2]].map(|i| Vec3::from(mesh.positions[i as usize]));
            let winding = (b - a).cross(c - a);
            // Pole rows collapse to a point and produce degenerate triangles.
            if winding.length() < 1e-6 {
                continue;
            }
            let centroid = (a + b + c) / 3.0;
            assert!(winding.dot(centroid) > 0.0, "triangle {tri:?} faces inward");
        }
    }
}
