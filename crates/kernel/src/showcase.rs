use serde::Serialize;
use showcase_common::wrap_degrees;

use crate::Scene;
use crate::camera::CameraRig;

const SPIN_SPEED: f32 = 0.5;
const OFFSET_STEP: f32 = 0.01;
const OFFSET_LIMIT: f32 = 0.3;
const SCALE_STEP: f32 = 0.005;
const SCALE_MIN: f32 = 0.8;
const SCALE_MAX: f32 = 1.2;

/// Four-cube transform showcase: one cube per transform kind.
///
/// - top right spins about Y,
/// - top left slides back and forth along X,
/// - bottom left breathes along Z,
/// - bottom right spins about X.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CubeShowcase {
    pub y_angle: f32,
    pub x_angle: f32,
    pub x_offset: f32,
    move_direction: f32,
    pub z_scale: f32,
    scale_direction: f32,
    pub camera: CameraRig,
    tick: u64,
}

impl Default for CubeShowcase {
    fn default() -> Self {
        Self {
            y_angle: 0.0,
            x_angle: 0.0,
            x_offset: 0.0,
            move_direction: 1.0,
            z_scale: 1.0,
            scale_direction: 1.0,
            camera: CameraRig::front_on(),
            tick: 0,
        }
    }
}

impl CubeShowcase {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scene for CubeShowcase {
    fn step(&mut self) {
        self.y_angle = wrap_degrees(self.y_angle + SPIN_SPEED);
        self.x_angle = wrap_degrees(self.x_angle + SPIN_SPEED);

        self.x_offset += OFFSET_STEP * self.move_direction;
        if self.x_offset.abs() >= OFFSET_LIMIT {
            self.move_direction = -self.move_direction;
        }

        self.z_scale += SCALE_STEP * self.scale_direction;
        if self.z_scale >= SCALE_MAX || self.z_scale <= SCALE_MIN {
            self.scale_direction = -self.scale_direction;
        }

        self.tick += 1;
    }

    fn tick(&self) -> u64 {
        self.tick
    }

    fn camera_mut(&mut self) -> &mut CameraRig {
        &mut self.camera
    }

    fn camera(&self) -> &CameraRig {
        &self.camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angles_advance_half_a_degree() {
        let mut s = CubeShowcase::new();
        for _ in 0..4 {
            s.step();
        }
        assert_eq!(s.y_angle, 2.0);
        assert_eq!(s.x_angle, 2.0);
        assert_eq!(s.tick(), 4);
    }

    #[test]
    fn angles_wrap_after_full_turn() {
        let mut s = CubeShowcase::new();
        for _ in 0..721 {
            s.step();
        }
        assert_eq!(s.y_angle, 0.5);
    }

    #[test]
    fn oscillators_stay_in_band() {
        let mut s = CubeShowcase::new();
        let mut saw_negative = false;
        for _ in 0..1000 {
            s.step();
            // One step of overshoot is allowed before the direction flips.
            assert!(s.x_offset.abs() <= OFFSET_LIMIT + OFFSET_STEP + 1e-5);
            assert!(s.z_scale <= SCALE_MAX + SCALE_STEP + 1e-5);
            assert!(s.z_scale >= SCALE_MIN - SCALE_STEP - 1e-5);
            saw_negative |= s.x_offset < -0.1;
        }
        assert!(saw_negative, "offset never swung left");
    }

    #[test]
    fn front_on_camera() {
        let s = CubeShowcase::new();
        assert_eq!(s.camera.fov_degrees, 40.0);
        assert_eq!(s.camera.eye.z, 5.0);
    }
}
