use std::collections::HashMap;
use std::num::NonZeroU64;
use std::path::PathBuf;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use showcase_geometry::Topology;
use showcase_render::{BlendMode, DepthMode, DrawCall, FrameLighting, FramePlan, TextureState};

use crate::error::RenderError;
use crate::mesh::{GpuVertex, MeshLibrary, primitive_topology};
use crate::shaders;
use crate::texture::{SkyLoader, SkyTexture, check_sky_size};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Upper bound on draws per frame; sizes the dynamic uniform buffer.
pub const MAX_DRAWS: usize = 64;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct DrawUniforms {
    mvp: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    normal: [[f32; 4]; 4],
    use_texture: u32,
    pad: [u32; 3],
}

impl From<&DrawCall> for DrawUniforms {
    fn from(draw: &DrawCall) -> Self {
        Self {
            mvp: draw.mvp.to_cols_array_2d(),
            model: draw.model.to_cols_array_2d(),
            normal: draw.normal_matrix.to_cols_array_2d(),
            use_texture: u32::from(draw.use_texture),
            pad: [0; 3],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct FrameUniforms {
    light_color: [f32; 4],
    light_direction: [f32; 4],
    ambient: [f32; 4],
    point_light_position: [f32; 4],
}

impl From<&FrameLighting> for FrameUniforms {
    fn from(l: &FrameLighting) -> Self {
        let pad = |v: Vec3| v.extend(0.0).to_array();
        Self {
            light_color: pad(l.light_color),
            light_direction: pad(l.light_direction),
            ambient: pad(l.ambient),
            point_light_position: pad(l.point_light_position),
        }
    }
}

/// Round `size` up to the device's dynamic offset alignment.
fn aligned_stride(size: u64, alignment: u64) -> u64 {
    let alignment = alignment.max(1);
    size.div_ceil(alignment) * alignment
}

/// Which WGSL program the renderer draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderProgram {
    /// Vertex colours only.
    Unlit,
    /// Directional, point and ambient lighting plus the sky texture.
    Lit,
}

impl ShaderProgram {
    fn name(self) -> &'static str {
        match self {
            ShaderProgram::Unlit => "showcase",
            ShaderProgram::Lit => "scene",
        }
    }

    fn source(self) -> &'static str {
        match self {
            ShaderProgram::Unlit => shaders::SHOWCASE_SHADER,
            ShaderProgram::Lit => shaders::SCENE_SHADER,
        }
    }

    fn contract(self) -> &'static [&'static str] {
        match self {
            ShaderProgram::Unlit => shaders::SHOWCASE_CONTRACT,
            ShaderProgram::Lit => shaders::SCENE_CONTRACT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PipelineKey {
    topology: Topology,
    blend: BlendMode,
    depth: DepthMode,
}

/// wgpu-based frame plan renderer.
pub struct WgpuRenderer {
    program: ShaderProgram,
    shader: wgpu::ShaderModule,
    pipeline_layout: wgpu::PipelineLayout,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
    draw_buffer: wgpu::Buffer,
    draw_stride: u64,
    frame_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    sky_layout: wgpu::BindGroupLayout,
    sky: SkyTexture,
    sky_loader: SkyLoader,
    meshes: MeshLibrary,
    depth_texture: wgpu::Texture,
    depth_view: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
}

impl WgpuRenderer {
    /// Compile the program, upload every mesh and start the sky loader.
    ///
    /// Fails if the program is missing a contract name, does not validate,
    /// or a mesh is malformed.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        program: ShaderProgram,
        sky_path: Option<PathBuf>,
    ) -> Result<Self, RenderError> {
        shaders::verify_contract(program.name(), program.source(), program.contract())?;

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(program.name()),
            source: wgpu::ShaderSource::Wgsl(program.source().into()),
        });
        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(RenderError::ShaderValidation {
                program: program.name(),
                message: err.to_string(),
            });
        }

        let draw_size = std::mem::size_of::<DrawUniforms>() as u64;
        let alignment = u64::from(device.limits().min_uniform_buffer_offset_alignment);
        let draw_stride = aligned_stride(draw_size, alignment);
        let draw_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("draw_uniforms"),
            size: draw_stride * MAX_DRAWS as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame_uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: NonZeroU64::new(draw_size),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });
        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &uniform_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                        buffer: &draw_buffer,
                        offset: 0,
                        size: NonZeroU64::new(draw_size),
                    }),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: frame_buffer.as_entire_binding(),
                },
            ],
        });

        let sky_layout = SkyTexture::bind_group_layout(device);
        let mut sky = SkyTexture::placeholder(device, queue, &sky_layout);
        let sky_loader = match (program, sky_path) {
            (ShaderProgram::Lit, Some(path)) => {
                tracing::info!(path = %path.display(), "loading sky texture");
                SkyLoader::spawn(path)
            }
            (ShaderProgram::Lit, None) => {
                sky.mark_failed("no sky texture path given");
                SkyLoader::idle()
            }
            (ShaderProgram::Unlit, _) => SkyLoader::idle(),
        };

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&uniform_layout, &sky_layout],
            push_constant_ranges: &[],
        });

        let meshes = MeshLibrary::upload_all(device)?;
        let (depth_texture, depth_view) = Self::create_depth_texture(device, width, height);

        tracing::info!(
            program = program.name(),
            meshes = meshes.len(),
            draw_stride,
            "renderer ready"
        );

        Ok(Self {
            program,
            shader,
            pipeline_layout,
            pipelines: HashMap::new(),
            draw_buffer,
            draw_stride,
            frame_buffer,
            uniform_bind_group,
            sky_layout,
            sky,
            sky_loader,
            meshes,
            depth_texture,
            depth_view,
            surface_format,
        })
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture.destroy();
        let (texture, view) = Self::create_depth_texture(device, width, height);
        self.depth_texture = texture;
        self.depth_view = view;
    }

    pub fn sky_state(&self) -> TextureState {
        self.sky.state()
    }

    /// Move the sky texture out of `NotLoaded` once the loader answers.
    pub fn poll_sky(&mut self, device: &wgpu::Device, queue: &wgpu::Queue) {
        let Some(result) = self.sky_loader.poll() else {
            return;
        };
        let max_dimension = device.limits().max_texture_dimension_2d;
        let checked = result.and_then(|image| {
            let (width, height) = image.dimensions();
            check_sky_size(width, height, max_dimension).map(|()| image)
        });
        match checked {
            Ok(image) => self.sky.upload(device, queue, &self.sky_layout, &image),
            Err(reason) => self.sky.mark_failed(&reason),
        }
    }

    /// Render one planned frame into `view`.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        plan: &FramePlan,
    ) -> Result<(), RenderError> {
        if self.meshes.is_empty() {
            return Ok(());
        }
        if plan.draws.len() > MAX_DRAWS {
            return Err(RenderError::TooManyDraws {
                count: plan.draws.len(),
                max: MAX_DRAWS,
            });
        }

        let mut keys = Vec::with_capacity(plan.draws.len());
        for draw in &plan.draws {
            let key = self.meshes.get(draw.mesh).map(|mesh| PipelineKey {
                topology: mesh.topology,
                blend: draw.blend,
                depth: draw.depth,
            });
            if let Some(key) = key {
                self.ensure_pipeline(device, key)?;
            }
            keys.push(key);
        }

        let stride = self.draw_stride as usize;
        let mut draw_bytes = vec![0u8; stride * plan.draws.len().max(1)];
        for (slot, draw) in draw_bytes.chunks_mut(stride).zip(&plan.draws) {
            let uniforms = DrawUniforms::from(draw);
            let bytes = bytemuck::bytes_of(&uniforms);
            slot[..bytes.len()].copy_from_slice(bytes);
        }
        queue.write_buffer(&self.draw_buffer, 0, &draw_bytes);
        let frame_uniforms = FrameUniforms::from(&plan.lighting);
        queue.write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(&frame_uniforms));

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let [r, g, b, a] = plan.clear_color;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_bind_group(1, self.sky.bind_group(), &[]);

            for (i, (draw, key)) in plan.draws.iter().zip(&keys).enumerate() {
                let (Some(mesh), Some(key)) = (self.meshes.get(draw.mesh), key) else {
                    tracing::warn!(
                        mesh = draw.mesh.label(),
                        "draw references a mesh that was never uploaded"
                    );
                    continue;
                };
                let Some(pipeline) = self.pipelines.get(key) else {
                    continue;
                };
                let offset = (i as u64 * self.draw_stride) as u32;
                pass.set_pipeline(pipeline);
                pass.set_bind_group(0, &self.uniform_bind_group, &[offset]);
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                pass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
        Ok(())
    }

    /// Release GPU buffers and textures. Later `render` calls draw nothing.
    pub fn destroy(&mut self) {
        self.meshes.destroy();
        self.sky.destroy();
        self.draw_buffer.destroy();
        self.frame_buffer.destroy();
        self.depth_texture.destroy();
        self.pipelines.clear();
        tracing::debug!("renderer resources released");
    }

    fn ensure_pipeline(
        &mut self,
        device: &wgpu::Device,
        key: PipelineKey,
    ) -> Result<(), RenderError> {
        if self.pipelines.contains_key(&key) {
            return Ok(());
        }

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = self.create_pipeline(device, key);
        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(RenderError::ShaderValidation {
                program: self.program.name(),
                message: err.to_string(),
            });
        }

        tracing::debug!(
            topology = %key.topology,
            blend = ?key.blend,
            depth = ?key.depth,
            "pipeline created"
        );
        self.pipelines.insert(key, pipeline);
        Ok(())
    }

    fn create_pipeline(&self, device: &wgpu::Device, key: PipelineKey) -> wgpu::RenderPipeline {
        let blend = match key.blend {
            BlendMode::Opaque => wgpu::BlendState::REPLACE,
            BlendMode::Alpha => wgpu::BlendState::ALPHA_BLENDING,
        };
        let (depth_write_enabled, depth_compare) = match key.depth {
            DepthMode::ReadWrite => (true, wgpu::CompareFunction::Less),
            DepthMode::ReadOnly => (false, wgpu::CompareFunction::Less),
            DepthMode::Disabled => (false, wgpu::CompareFunction::Always),
        };
        let strip_index_format = match key.topology {
            Topology::TriangleStrip => Some(wgpu::IndexFormat::Uint16),
            Topology::TriangleList | Topology::LineList => None,
        };

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(self.program.name()),
            layout: Some(&self.pipeline_layout),
            vertex: wgpu::VertexState {
                module: &self.shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[GpuVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &self.shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.surface_format,
                    blend: Some(blend),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: primitive_topology(key.topology),
                strip_index_format,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled,
                depth_compare,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        })
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> (wgpu::Texture, wgpu::TextureView) {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&Default::default());
        (texture, view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat4;
    use showcase_render::MeshId;

    #[test]
    fn draw_uniforms_match_wgsl_layout() {
        // Three mat4x4 plus a u32 rounded up to the struct's 16-byte alignment.
        assert_eq!(std::mem::size_of::<DrawUniforms>(), 208);
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 64);
    }

    #[test]
    fn stride_rounds_to_alignment() {
        assert_eq!(aligned_stride(208, 256), 256);
        assert_eq!(aligned_stride(256, 256), 256);
        assert_eq!(aligned_stride(300, 256), 512);
        assert_eq!(aligned_stride(208, 0), 208);
    }

    #[test]
    fn draw_uniforms_carry_texture_flag_and_matrices() {
        let model = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let draw = DrawCall {
            mesh: MeshId::Sky,
            model,
            mvp: Mat4::IDENTITY,
            normal_matrix: Mat4::IDENTITY,
            blend: BlendMode::Opaque,
            depth: DepthMode::Disabled,
            use_texture: true,
        };
        let u = DrawUniforms::from(&draw);
        assert_eq!(u.use_texture, 1);
        assert_eq!(u.model[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(u.mvp, Mat4::IDENTITY.to_cols_array_2d());
    }

    #[test]
    fn frame_uniforms_pad_vectors() {
        let lighting = FrameLighting {
            light_color: Vec3::splat(0.55),
            light_direction: Vec3::Y,
            ambient: Vec3::splat(0.35),
            point_light_position: Vec3::new(2.0, 2.0, 2.0),
        };
        let u = FrameUniforms::from(&lighting);
        assert_eq!(u.light_direction, [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(u.point_light_position, [2.0, 2.0, 2.0, 0.0]);
    }

    #[test]
    fn programs_pair_with_their_contracts() {
        for program in [ShaderProgram::Unlit, ShaderProgram::Lit] {
            assert_eq!(
                shaders::verify_contract(program.name(), program.source(), program.contract()),
                Ok(())
            );
        }
    }
}
