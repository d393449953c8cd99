use glam::{Mat4, Vec3};
use serde::Serialize;

/// Projection mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Projection {
    Perspective,
    Orthographic,
}

/// Step sizes and ranges for camera controls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraLimits {
    pub look_step: f32,
    pub eye_step: f32,
    pub min_eye_y: f32,
    pub max_eye_y: f32,
    pub zoom_step: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub ortho_step: f32,
    pub min_ortho_scale: f32,
    pub max_ortho_scale: f32,
}

impl Default for CameraLimits {
    fn default() -> Self {
        Self {
            look_step: 0.8,
            eye_step: 0.5,
            min_eye_y: 1.0,
            max_eye_y: 10.0,
            zoom_step: 0.1,
            min_zoom: 0.5,
            max_zoom: 2.0,
            ortho_step: 1.0,
            min_ortho_scale: 5.0,
            max_ortho_scale: 20.0,
        }
    }
}

/// Look-at camera with a zoom factor and switchable projection.
///
/// The zoom factor scales the eye position away from the origin, so smaller
/// values bring the camera closer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraRig {
    pub eye: Vec3,
    pub target: Vec3,
    zoom: f32,
    projection: Projection,
    pub fov_degrees: f32,
    base_fov_degrees: f32,
    ortho_scale: f32,
    pub near: f32,
    pub far: f32,
    pub limits: CameraLimits,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            eye: Vec3::new(3.0, 3.0, 7.0),
            target: Vec3::ZERO,
            zoom: 1.0,
            projection: Projection::Perspective,
            fov_degrees: 50.0,
            base_fov_degrees: 50.0,
            ortho_scale: 10.0,
            near: 1.0,
            far: 100.0,
            limits: CameraLimits::default(),
        }
    }
}

impl CameraRig {
    /// Fixed front-on camera used by the four-cube showcase.
    pub fn front_on() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 5.0),
            fov_degrees: 40.0,
            base_fov_degrees: 40.0,
            ..Self::default()
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn is_orthographic(&self) -> bool {
        self.projection == Projection::Orthographic
    }

    pub fn ortho_scale(&self) -> f32 {
        self.ortho_scale
    }

    pub fn look_left(&mut self) {
        self.target.x -= self.limits.look_step;
    }

    pub fn look_right(&mut self) {
        self.target.x += self.limits.look_step;
    }

    pub fn look_up(&mut self) {
        self.target.y += self.limits.look_step;
    }

    pub fn look_down(&mut self) {
        self.target.y -= self.limits.look_step;
    }

    pub fn raise_eye(&mut self) {
        self.eye.y = (self.eye.y + self.limits.eye_step).min(self.limits.max_eye_y);
    }

    pub fn lower_eye(&mut self) {
        self.eye.y = (self.eye.y - self.limits.eye_step).max(self.limits.min_eye_y);
    }

    /// Look back at the origin and restore the base field of view.
    pub fn reset_look(&mut self) {
        self.target = Vec3::ZERO;
        self.fov_degrees = self.base_fov_degrees;
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(self.limits.min_zoom, self.limits.max_zoom);
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom - self.limits.zoom_step);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom + self.limits.zoom_step);
    }

    pub fn toggle_projection(&mut self) {
        self.projection = match self.projection {
            Projection::Perspective => Projection::Orthographic,
            Projection::Orthographic => Projection::Perspective,
        };
        tracing::debug!(projection = ?self.projection, "projection toggled");
    }

    pub fn ortho_scale_up(&mut self) {
        self.ortho_scale =
            (self.ortho_scale + self.limits.ortho_step).min(self.limits.max_ortho_scale);
    }

    pub fn ortho_scale_down(&mut self) {
        self.ortho_scale =
            (self.ortho_scale - self.limits.ortho_step).max(self.limits.min_ortho_scale);
    }

    /// Eye position after the zoom factor is applied.
    pub fn effective_eye(&self) -> Vec3 {
        self.eye * self.zoom
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.effective_eye(), self.target, Vec3::Y)
    }

    /// Projection for the current mode. Depth maps to `[0, 1]`.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
        match self.projection {
            Projection::Perspective => {
                Mat4::perspective_rh(self.fov_degrees.to_radians(), aspect, self.near, self.far)
            }
            Projection::Orthographic => {
                let half_width = self.ortho_scale * aspect / 2.0;
                let half_height = self.ortho_scale / 2.0;
                Mat4::orthographic_rh(
                    -half_width,
                    half_width,
                    -half_height,
                    half_height,
                    self.near,
                    self.far,
                )
            }
        }
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_perspective_matrix_is_valid() {
        let cam = CameraRig::default();
        assert_eq!(cam.eye, Vec3::new(3.0, 3.0, 7.0));
        assert_eq!(cam.target, Vec3::ZERO);
        assert_eq!(cam.zoom(), 1.0);
        assert!(!cam.is_orthographic());

        let aspect = 800.0 / 600.0;
        let proj = cam.projection_matrix(aspect);
        let expected = Mat4::perspective_rh(50f32.to_radians(), aspect, 1.0, 100.0);
        assert_eq!(proj, expected);
        assert!(proj.is_finite());
        assert!(proj.determinant().abs() > 1e-6);

        let vp = cam.view_projection(aspect);
        assert!(vp.is_finite());
        assert!(vp.determinant().abs() > 1e-6);
        // The look-at target projects to the centre of the screen.
        let centre = vp.project_point3(Vec3::ZERO);
        assert!(centre.x.abs() < 1e-5 && centre.y.abs() < 1e-5);
    }

    #[test]
    fn toggle_twice_restores_mode() {
        let mut cam = CameraRig::default();
        cam.toggle_projection();
        assert!(cam.is_orthographic());
        cam.toggle_projection();
        assert!(!cam.is_orthographic());
    }

    #[test]
    fn projection_follows_mode() {
        let mut cam = CameraRig::default();
        let perspective = cam.projection_matrix(2.0);
        cam.toggle_projection();
        let ortho = cam.projection_matrix(2.0);
        assert_ne!(perspective, ortho);
        assert_eq!(ortho, Mat4::orthographic_rh(-10.0, 10.0, -5.0, 5.0, 1.0, 100.0));
    }

    #[test]
    fn controls_respect_limits() {
        let mut cam = CameraRig::default();
        for _ in 0..50 {
            cam.raise_eye();
            cam.zoom_out();
            cam.ortho_scale_up();
        }
        assert_eq!(cam.eye.y, 10.0);
        assert_eq!(cam.zoom(), 2.0);
        assert_eq!(cam.ortho_scale(), 20.0);
        for _ in 0..50 {
            cam.lower_eye();
            cam.zoom_in();
            cam.ortho_scale_down();
        }
        assert_eq!(cam.eye.y, 1.0);
        assert_eq!(cam.zoom(), 0.5);
        assert_eq!(cam.ortho_scale(), 5.0);
    }

    #[test]
    fn look_moves_target_and_reset_restores() {
        let mut cam = CameraRig::default();
        cam.look_left();
        cam.look_up();
        cam.look_up();
        assert!((cam.target - Vec3::new(-0.8, 1.6, 0.0)).length() < 1e-6);
        cam.fov_degrees = 70.0;
        cam.reset_look();
        assert_eq!(cam.target, Vec3::ZERO);
        assert_eq!(cam.fov_degrees, 50.0);
    }

    #[test]
    fn zoom_scales_eye() {
        let mut cam = CameraRig::default();
        cam.zoom_in();
        assert!((cam.effective_eye() - Vec3::new(2.7, 2.7, 6.3)).length() < 1e-5);
    }

    #[test]
    fn degenerate_aspect_falls_back() {
        let cam = CameraRig::default();
        assert!(cam.projection_matrix(0.0).is_finite());
        assert!(cam.projection_matrix(f32::NAN).is_finite());
    }
}
