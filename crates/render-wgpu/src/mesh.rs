use std::collections::BTreeMap;

use bytemuck::{Pod, Zeroable};
use showcase_geometry::{MeshData, Topology};
use showcase_render::MeshId;
use wgpu::util::DeviceExt;

use crate::error::RenderError;

const DEFAULT_NORMAL: [f32; 3] = [0.0, 0.0, 1.0];
const DEFAULT_TEX_COORD: [f32; 2] = [0.0, 0.0];

/// Interleaved vertex matching the `a_Position`, `a_Color`, `a_Normal`,
/// `a_TexCoord` attribute locations.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub normal: [f32; 3],
    pub tex_coord: [f32; 2],
}

impl GpuVertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x4,
        2 => Float32x3,
        3 => Float32x2,
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GpuVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Interleave a mesh, filling absent normals and texture coordinates.
pub fn pack_vertices(label: &'static str, mesh: &MeshData) -> Result<Vec<GpuVertex>, RenderError> {
    mesh.validate()
        .map_err(|source| RenderError::InvalidMesh { mesh: label, source })?;
    Ok((0..mesh.vertex_count())
        .map(|i| GpuVertex {
            position: mesh.positions[i],
            color: mesh.colors[i],
            normal: mesh.normals.as_ref().map_or(DEFAULT_NORMAL, |n| n[i]),
            tex_coord: mesh.tex_coords.as_ref().map_or(DEFAULT_TEX_COORD, |t| t[i]),
        })
        .collect())
}

pub fn primitive_topology(topology: Topology) -> wgpu::PrimitiveTopology {
    match topology {
        Topology::TriangleList => wgpu::PrimitiveTopology::TriangleList,
        Topology::TriangleStrip => wgpu::PrimitiveTopology::TriangleStrip,
        Topology::LineList => wgpu::PrimitiveTopology::LineList,
    }
}

/// Vertex and index buffers for one uploaded mesh.
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
    pub topology: Topology,
}

impl GpuMesh {
    pub fn upload(device: &wgpu::Device, id: MeshId, mesh: &MeshData) -> Result<Self, RenderError> {
        let vertices = pack_vertices(id.label(), mesh)?;

        // Index buffers must be a multiple of 4 bytes.
        let mut indices = mesh.indices.clone();
        if indices.len() % 2 == 1 {
            indices.push(0);
        }

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(id.label()),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(id.label()),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Ok(Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.index_count() as u32,
            topology: mesh.topology,
        })
    }

    pub fn destroy(&self) {
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
    }
}

/// Every mesh a frame plan can reference, uploaded once at startup.
pub struct MeshLibrary {
    meshes: BTreeMap<MeshId, GpuMesh>,
}

impl MeshLibrary {
    pub fn upload_all(device: &wgpu::Device) -> Result<Self, RenderError> {
        let mut meshes = BTreeMap::new();
        for id in MeshId::ALL {
            let data = id.build().map_err(|source| RenderError::InvalidMesh {
                mesh: id.label(),
                source,
            })?;
            let mesh = GpuMesh::upload(device, id, &data)?;
            tracing::debug!(
                mesh = id.label(),
                vertices = data.vertex_count(),
                indices = data.index_count(),
                topology = %data.topology,
                "mesh uploaded"
            );
            meshes.insert(id, mesh);
        }
        Ok(Self { meshes })
    }

    pub fn get(&self, id: MeshId) -> Option<&GpuMesh> {
        self.meshes.get(&id)
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    pub fn destroy(&mut self) {
        for mesh in self.meshes.values() {
            mesh.destroy();
        }
        self.meshes.clear();
    }
}
