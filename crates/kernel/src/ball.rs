use glam::Vec3;
use serde::Serialize;

use crate::jitter::Jitter;

/// Tunables for the bouncing ball.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BallParams {
    pub radius: f32,
    /// Half extent of the box the ball bounces in, in ball-local units.
    pub cube_half_extent: f32,
    /// Subtracted from the vertical velocity every tick.
    pub gravity: f32,
    /// Fraction of speed kept on the bouncing axis.
    pub damping: f32,
    /// Full width of the random kick added to the other two axes on impact.
    pub jitter: f32,
    pub min_speed: f32,
    pub max_speed: f32,
}

impl Default for BallParams {
    fn default() -> Self {
        Self {
            radius: 0.23,
            cube_half_extent: 0.55,
            gravity: 0.001,
            damping: 0.95,
            jitter: 0.02,
            min_speed: 0.04,
            max_speed: 0.08,
        }
    }
}

impl BallParams {
    /// Largest distance from the origin the ball centre may reach per axis.
    pub fn bound(&self) -> f32 {
        self.cube_half_extent - self.radius
    }
}

/// Ball physics state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ball {
    pub position: Vec3,
    pub velocity: Vec3,
    pub params: BallParams,
}

impl Default for Ball {
    fn default() -> Self {
        Self::new(BallParams::default())
    }
}

impl Ball {
    pub fn new(params: BallParams) -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::new(0.01, 0.015, 0.02),
            params,
        }
    }

    /// Advance one tick: gravity, per-axis integration with bounce, speed band.
    ///
    /// Axes are resolved in X, Y, Z order. A bounce clamps the position onto
    /// the wall, reverses and damps that axis, and kicks the other two axes by
    /// a bounded random amount. Afterwards X and Z are floored to
    /// `min_speed` (keeping their sign, positive when zero) and every axis is
    /// clamped to `max_speed`.
    pub fn step(&mut self, jitter: &mut Jitter) {
        let p = self.params;
        let bound = p.bound();

        self.velocity.y -= p.gravity;

        for axis in 0..3 {
            self.position[axis] += self.velocity[axis];
            if self.position[axis].abs() > bound {
                self.position[axis] = self.position[axis].signum() * bound;
                self.velocity[axis] = -self.velocity[axis] * p.damping;
                for other in (0..3).filter(|&o| o != axis) {
                    self.velocity[other] += jitter.centered(p.jitter);
                }
                tracing::trace!(axis, position = ?self.position, "ball bounced");
            }
        }

        for axis in [0, 2] {
            let v = self.velocity[axis];
            if v.abs() < p.min_speed {
                let sign = if v == 0.0 { 1.0 } else { v.signum() };
                self.velocity[axis] = sign * p.min_speed;
            }
        }
        self.velocity = self
            .velocity
            .clamp(Vec3::splat(-p.max_speed), Vec3::splat(p.max_speed));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_step_applies_gravity_and_speed_floor() {
        let mut ball = Ball::default();
        let mut jitter = Jitter::with_seed(1);
        ball.step(&mut jitter);
        assert!((ball.position.x - 0.01).abs() < 1e-7);
        assert!((ball.position.y - 0.014).abs() < 1e-7);
        assert!((ball.position.z - 0.02).abs() < 1e-7);
        // x and z were below the floor and get lifted to it.
        assert_eq!(ball.velocity.x, 0.04);
        assert_eq!(ball.velocity.z, 0.04);
        assert!((ball.velocity.y - 0.014).abs() < 1e-7);
    }

    #[test]
    fn wall_contact_clamps_and_reverses() {
        let mut ball = Ball::default();
        let bound = ball.params.bound();
        ball.position = Vec3::new(bound - 0.01, 0.0, 0.0);
        ball.velocity = Vec3::new(0.06, 0.0, 0.05);
        ball.step(&mut Jitter::with_seed(3));
        assert_eq!(ball.position.x, bound);
        assert!(ball.velocity.x < 0.0);
        assert!((ball.velocity.x + 0.06 * 0.95).abs() < 1e-6);
    }

    #[test]
    fn zero_velocity_is_floored_positive() {
        let mut ball = Ball::default();
        ball.velocity = Vec3::new(0.0, 0.0, -0.0);
        ball.step(&mut Jitter::with_seed(5));
        assert_eq!(ball.velocity.x, 0.04);
        assert_eq!(ball.velocity.z, 0.04);
    }

    #[test]
    fn negative_slow_axis_keeps_sign() {
        let mut ball = Ball::default();
        ball.velocity = Vec3::new(-0.01, 0.0, -0.02);
        ball.step(&mut Jitter::with_seed(5));
        assert_eq!(ball.velocity.x, -0.04);
        assert_eq!(ball.velocity.z, -0.04);
    }

    #[test]
    fn boundary_and_speed_band_hold_for_long_runs() {
        let mut ball = Ball::default();
        let mut jitter = Jitter::with_seed(99);
        let p = ball.params;
        for tick in 0..20_000 {
            ball.step(&mut jitter);
            for axis in 0..3 {
                assert!(ball.position[axis].abs() <= p.bound() + 1e-6, "tick {tick}");
                assert!(ball.velocity[axis].abs() <= p.max_speed, "tick {tick}");
            }
            for axis in [0, 2] {
                assert!(ball.velocity[axis].abs() >= p.min_speed, "tick {tick}");
            }
        }
    }
}
