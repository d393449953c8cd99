//! wgpu render backend for the transform showcase.
//!
//! Uploads every scene mesh once, then draws planned frames with one
//! pipeline per (topology, blend, depth) combination and a dynamic-offset
//! uniform slot per draw.
//!
//! # Invariants
//! - Renderer never mutates scene state; it only consumes a `FramePlan`.
//! - Shader programs are checked against their binding names before use.
//! - The sky bind group is always bound; it holds a black placeholder until
//!   the image arrives.

mod error;
mod gpu;
mod mesh;
mod shaders;
mod texture;

pub use error::RenderError;
pub use gpu::{MAX_DRAWS, ShaderProgram, WgpuRenderer};
pub use mesh::{GpuMesh, GpuVertex, MeshLibrary, pack_vertices};
pub use shaders::{
    SCENE_CONTRACT, SCENE_SHADER, SHOWCASE_CONTRACT, SHOWCASE_SHADER, verify_contract,
};
pub use texture::{SkyLoader, SkyTexture, check_sky_size, decode_sky};
