//! Rendering adapter: turns scene state into an ordered list of draw calls.
//!
//! # Invariants
//! - Planning never mutates scene state.
//! - Every draw carries `mvp = view_projection * model`.
//! - Opaque draws precede blended draws; the sky, when drawn, comes first.
//!
//! Planning is pure so it can be tested without a GPU; backends consume a
//! [`FramePlan`] and only bind and submit.

mod frame;
mod planner;
mod renderer;
mod texture;

pub use frame::{BlendMode, DepthMode, DrawCall, FrameLighting, FramePlan, MeshId};
pub use planner::{SHOWCASE_CUBE_SLOTS, plan_road_frame, plan_showcase_frame};
pub use renderer::{DebugTextRenderer, Renderer};
pub use texture::TextureState;

pub fn crate_info() -> &'static str {
    "showcase-render v0.1.0"
}
