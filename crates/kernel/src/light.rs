use glam::Vec3;
use serde::Serialize;

/// Directional + ambient lighting with a user-controlled intensity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Lighting {
    intensity: f32,
    pub base_light_color: Vec3,
    pub base_ambient: Vec3,
    /// Unit vector towards the directional light.
    pub direction: Vec3,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            intensity: 0.5,
            base_light_color: Vec3::splat(0.5),
            base_ambient: Vec3::splat(0.3),
            direction: Vec3::new(0.5, 3.0, 4.0).normalize(),
        }
    }
}

impl Lighting {
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Set intensity as a fraction, clamped to `[0, 1]`.
    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = if intensity.is_finite() {
            intensity.clamp(0.0, 1.0)
        } else {
            0.0
        };
    }

    /// Set intensity from a slider percentage `0..=100`.
    pub fn set_intensity_percent(&mut self, percent: f32) {
        self.set_intensity(percent / 100.0);
    }

    /// Directional light colour. Never drops below 0.3 so the scene stays visible.
    pub fn light_color(&self) -> Vec3 {
        (self.base_light_color * self.intensity + Vec3::splat(0.3)).min(Vec3::ONE)
    }

    pub fn ambient(&self) -> Vec3 {
        (self.base_ambient * self.intensity + Vec3::splat(0.2)).min(Vec3::ONE)
    }
}

/// Point light orbiting the scene on a circle in the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointLight {
    pub angle: f32,
    pub position: Vec3,
    pub radius: f32,
    pub height: f32,
    pub bob: f32,
    /// Radians advanced per tick.
    pub angular_speed: f32,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            angle: 0.0,
            position: Vec3::splat(2.0),
            radius: 3.0,
            height: 2.0,
            bob: 0.5,
            angular_speed: 0.02,
        }
    }
}

impl PointLight {
    pub fn advance(&mut self) {
        self.angle += self.angular_speed;
        let (sin, cos) = self.angle.sin_cos();
        self.position = Vec3::new(
            cos * self.radius,
            self.height + sin * self.bob,
            sin * self.radius,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_colors_at_half_intensity() {
        let l = Lighting::default();
        assert!((l.light_color() - Vec3::splat(0.55)).abs().max_element() < 1e-6);
        assert!((l.ambient() - Vec3::splat(0.35)).abs().max_element() < 1e-6);
        assert!((l.direction.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn intensity_is_clamped() {
        let mut l = Lighting::default();
        l.set_intensity_percent(150.0);
        assert_eq!(l.intensity(), 1.0);
        l.set_intensity(-2.0);
        assert_eq!(l.intensity(), 0.0);
        l.set_intensity(f32::NAN);
        assert_eq!(l.intensity(), 0.0);
        assert!((l.light_color() - Vec3::splat(0.3)).abs().max_element() < 1e-6);
    }

    #[test]
    fn point_light_orbits_at_fixed_radius() {
        let mut light = PointLight::default();
        assert_eq!(light.position, Vec3::splat(2.0));
        for _ in 0..500 {
            light.advance();
            let horizontal = Vec3::new(light.position.x, 0.0, light.position.z).length();
            assert!((horizontal - 3.0).abs() < 1e-4);
            assert!((light.position.y - 2.0).abs() <= 0.5 + 1e-6);
        }
    }
}
