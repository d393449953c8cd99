use std::path::{Path, PathBuf};

use crossbeam_channel::{Receiver, TryRecvError};
use image::RgbaImage;
use showcase_render::TextureState;

/// Decode an image file and flip it so row 0 is the bottom edge.
pub fn decode_sky(path: &Path) -> Result<RgbaImage, image::ImageError> {
    Ok(image::open(path)?.flipv().to_rgba8())
}

/// Reject images the device cannot hold in a single 2D texture.
pub fn check_sky_size(width: u32, height: u32, max_dimension: u32) -> Result<(), String> {
    if width == 0 || height == 0 {
        return Err(format!("sky image is empty ({width}x{height})"));
    }
    if width > max_dimension || height > max_dimension {
        return Err(format!(
            "sky image {width}x{height} exceeds the device limit of {max_dimension} per side"
        ));
    }
    Ok(())
}

/// Background decoder for the sky image.
///
/// The decode runs on its own thread; [`SkyLoader::poll`] is called once per
/// frame and yields the result exactly once.
pub struct SkyLoader {
    rx: Option<Receiver<Result<RgbaImage, String>>>,
}

impl SkyLoader {
    pub fn spawn(path: PathBuf) -> Self {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let spawned = std::thread::Builder::new()
            .name("sky-loader".into())
            .spawn(move || {
                let result = decode_sky(&path).map_err(|err| format!("{}: {err}", path.display()));
                let _ = tx.send(result);
            });
        if let Err(err) = spawned {
            tracing::error!(%err, "could not start sky loader thread");
        }
        Self { rx: Some(rx) }
    }

    /// Loader that has nothing to load.
    pub fn idle() -> Self {
        Self { rx: None }
    }

    pub fn is_pending(&self) -> bool {
        self.rx.is_some()
    }

    pub fn poll(&mut self) -> Option<Result<RgbaImage, String>> {
        let rx = self.rx.as_ref()?;
        let message = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => {
                Err("sky loader exited without a result".to_string())
            }
        };
        self.rx = None;
        Some(message)
    }
}

/// Sky texture bound at group 1, starting as a 1x1 black placeholder.
pub struct SkyTexture {
    texture: wgpu::Texture,
    sampler: wgpu::Sampler,
    bind_group: wgpu::BindGroup,
    state: TextureState,
}

impl SkyTexture {
    pub fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sky_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        })
    }

    pub fn placeholder(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("sky_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let texture = create_texture(device, queue, 1, 1, &[0, 0, 0, 255]);
        let bind_group = create_bind_group(device, layout, &texture, &sampler);
        Self {
            texture,
            sampler,
            bind_group,
            state: TextureState::NotLoaded,
        }
    }

    pub fn state(&self) -> TextureState {
        self.state
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    /// Replace the placeholder with a decoded image.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        image: &RgbaImage,
    ) {
        let (width, height) = image.dimensions();
        let texture = create_texture(device, queue, width, height, image.as_raw());
        self.bind_group = create_bind_group(device, layout, &texture, &self.sampler);
        self.texture.destroy();
        self.texture = texture;
        self.state = TextureState::Loaded;
        tracing::info!(width, height, "sky texture loaded");
    }

    /// Keep the placeholder; the sky stays undrawn.
    pub fn mark_failed(&mut self, reason: &str) {
        self.state = TextureState::Failed;
        tracing::warn!(reason, "sky texture unavailable, sky disabled");
    }

    pub fn destroy(&self) {
        self.texture.destroy();
    }
}

fn create_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    width: u32,
    height: u32,
    rgba: &[u8],
) -> wgpu::Texture {
    let size = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("sky_texture"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        size,
    );
    texture
}

fn create_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    texture: &wgpu::Texture,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    let view = texture.create_view(&Default::default());
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("sky_bind_group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}
