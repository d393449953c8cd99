use glam::Vec3;
use serde::Serialize;
use showcase_common::EulerDegrees;

/// Rotation accumulator with an independent speed per axis (degrees/tick).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Spin {
    pub angles: EulerDegrees,
    pub speed: Vec3,
}

impl Spin {
    pub fn new(speed: Vec3) -> Self {
        Self {
            angles: EulerDegrees::ZERO,
            speed,
        }
    }

    pub fn advance(&mut self) {
        self.angles.advance(self.speed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showcase_common::wrap_degrees;

    #[test]
    fn angles_stay_in_range_and_track_closed_form() {
        let speed = Vec3::new(2.0, -1.0, 1.5);
        let mut spin = Spin::new(speed);
        for n in 1..=2000u32 {
            spin.advance();
            let a = spin.angles.0;
            for axis in 0..3 {
                assert!((0.0..360.0).contains(&a[axis]), "tick {n}: {a:?}");
                let expected = wrap_degrees(n as f32 * speed[axis]);
                assert!((a[axis] - expected).abs() < 1e-3, "tick {n} axis {axis}");
            }
        }
    }

    #[test]
    fn fractional_speed_drifts_only_slightly() {
        let mut spin = Spin::new(Vec3::new(0.8, 0.0, 0.0));
        for _ in 0..450 {
            spin.advance();
        }
        // 450 * 0.8 = 360 -> back to zero, modulo float rounding.
        let x = spin.angles.0.x;
        assert!(x < 1e-2 || x > 360.0 - 1e-2, "x = {x}");
    }
}
