//! Scene kernel: explicit simulation state and the per-tick updater.
//!
//! # Invariants
//! - All state lives in scene structs owned by the caller; there are no globals.
//! - `step` advances by one frame, not by elapsed time.
//! - Given the same seed, a scene replays identically.
//! - Camera state changes only through its control methods.

pub mod ball;
pub mod camera;
pub mod jitter;
pub mod light;
pub mod road;
pub mod showcase;
pub mod spin;

pub use ball::{Ball, BallParams};
pub use camera::{CameraLimits, CameraRig, Projection};
pub use jitter::Jitter;
pub use light::{Lighting, PointLight};
pub use road::{ASSEMBLY_POSITION, ASSEMBLY_SCALE, RoadScene};
pub use showcase::CubeShowcase;
pub use spin::Spin;

/// A scene that advances one frame at a time.
pub trait Scene {
    /// Advance every animated quantity by one tick.
    fn step(&mut self);

    /// Number of ticks taken since construction.
    fn tick(&self) -> u64;

    /// Mutable camera, for control callbacks.
    fn camera_mut(&mut self) -> &mut CameraRig;

    fn camera(&self) -> &CameraRig;
}
