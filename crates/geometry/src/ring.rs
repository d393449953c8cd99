use std::f32::consts::TAU;

use crate::mesh::{GeometryError, MeshData, Topology, check_vertex_count};

/// Flat annulus parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSpec {
    pub radius: f32,
    /// Half the band width: outer edge at `radius + thickness`, inner at
    /// `radius - thickness`.
    pub thickness: f32,
    pub segments: u16,
    pub color: [f32; 4],
}

impl Default for RingSpec {
    fn default() -> Self {
        Self {
            radius: 2.5,
            thickness: 0.2,
            segments: 50,
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

/// Ring in the XZ plane as a closed triangle strip.
///
/// `2 * (segments + 1)` vertices alternate outer and inner edge. The strip
/// walks indices `0..2 * segments` and then repeats `0, 1` to close the loop,
/// giving `2 * segments + 2` indices. Fails when the vertex count outgrows
/// 16-bit indices.
pub fn ring(spec: &RingSpec) -> Result<MeshData, GeometryError> {
    let segments = usize::from(spec.segments.max(1));
    check_vertex_count(2 * (segments + 1))?;
    let outer = spec.radius + spec.thickness;
    let inner = spec.radius - spec.thickness;
    let mut mesh = MeshData::new(Topology::TriangleStrip);

    for i in 0..=segments {
        let theta = i as f32 / segments as f32 * TAU;
        let (sin_theta, cos_theta) = theta.sin_cos();
        mesh.positions.push([cos_theta * outer, 0.0, sin_theta * outer]);
        mesh.positions.push([cos_theta * inner, 0.0, sin_theta * inner]);
        mesh.colors.extend_from_slice(&[spec.color; 2]);
    }

    mesh.indices = (0..segments * 2).map(|i| i as u16).collect();
    mesh.indices.extend_from_slice(&[0, 1]);
    mesh.normals = Some(vec![[0.0, 1.0, 0.0]; mesh.positions.len()]);
    Ok(mesh)
}

/// Same ring with its axes cycled `(x, y, z) -> (z, x, y)`.
pub fn ring_yz(spec: &RingSpec) -> Result<MeshData, GeometryError> {
    let mut mesh = ring(spec)?;
    mesh.map_positions(|[x, y, z]| [z, x, y]);
    Ok(mesh)
}
