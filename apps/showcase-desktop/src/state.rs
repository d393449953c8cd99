use std::time::Instant;

use clap::ValueEnum;
use egui::Context as EguiContext;
use showcase_kernel::{CubeShowcase, RoadScene, Scene};
use showcase_render::{FramePlan, TextureState, plan_road_frame, plan_showcase_frame};
use showcase_render_wgpu::ShaderProgram;
use winit::keyboard::KeyCode;

/// Which scene the window shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// Four cubes, one per transform kind.
    Cubes,
    /// Road, sky and the floating ball/cube/rings assembly.
    Road,
}

pub enum ActiveScene {
    Cubes(CubeShowcase),
    Road(RoadScene),
}

impl ActiveScene {
    pub fn new(kind: SceneKind, seed: u64) -> Self {
        match kind {
            SceneKind::Cubes => ActiveScene::Cubes(CubeShowcase::new()),
            SceneKind::Road => ActiveScene::Road(RoadScene::with_seed(seed)),
        }
    }

    pub fn scene(&self) -> &dyn Scene {
        match self {
            ActiveScene::Cubes(s) => s,
            ActiveScene::Road(s) => s,
        }
    }

    pub fn scene_mut(&mut self) -> &mut dyn Scene {
        match self {
            ActiveScene::Cubes(s) => s,
            ActiveScene::Road(s) => s,
        }
    }

    pub fn program(&self) -> ShaderProgram {
        match self {
            ActiveScene::Cubes(_) => ShaderProgram::Unlit,
            ActiveScene::Road(_) => ShaderProgram::Lit,
        }
    }

    pub fn plan(&self, aspect: f32, sky: TextureState) -> FramePlan {
        match self {
            ActiveScene::Cubes(s) => plan_showcase_frame(s, aspect),
            ActiveScene::Road(s) => plan_road_frame(s, aspect, sky),
        }
    }
}

/// Application state outside the GPU: scene, controls and frame pacing.
pub struct AppState {
    pub scene: ActiveScene,
    pub aspect: f32,
    pub show_panel: bool,
    light_percent: f32,
    last_frame: Instant,
    tick_accumulator: f64,
    tick_rate: f64,
}

impl AppState {
    pub fn new(scene: ActiveScene, width: u32, height: u32) -> Self {
        let light_percent = match &scene {
            ActiveScene::Road(road) => road.lighting.intensity() * 100.0,
            ActiveScene::Cubes(_) => 50.0,
        };
        Self {
            scene,
            aspect: width as f32 / height.max(1) as f32,
            show_panel: true,
            light_percent,
            last_frame: Instant::now(),
            tick_accumulator: 0.0,
            tick_rate: 1.0 / 60.0,
        }
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// Advance the scene at a fixed 60 Hz, however fast frames arrive.
    pub fn update(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f64().min(0.1);
        self.last_frame = now;
        let steps = self.advance(dt);
        if steps > 1 {
            tracing::trace!(steps, "caught up on scene ticks");
        }
    }

    fn advance(&mut self, dt: f64) -> u32 {
        self.tick_accumulator += dt;
        let mut steps = 0;
        while self.tick_accumulator >= self.tick_rate {
            self.tick_accumulator -= self.tick_rate;
            self.scene.scene_mut().step();
            steps += 1;
        }
        steps
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        if key == KeyCode::F1 {
            self.show_panel = !self.show_panel;
            return;
        }
        let camera = self.scene.scene_mut().camera_mut();
        match key {
            KeyCode::ArrowLeft => camera.look_left(),
            KeyCode::ArrowRight => camera.look_right(),
            KeyCode::ArrowUp => camera.look_up(),
            KeyCode::ArrowDown => camera.look_down(),
            KeyCode::PageUp => camera.raise_eye(),
            KeyCode::PageDown => camera.lower_eye(),
            KeyCode::Equal | KeyCode::NumpadAdd => camera.zoom_in(),
            KeyCode::Minus | KeyCode::NumpadSubtract => camera.zoom_out(),
            KeyCode::KeyP => camera.toggle_projection(),
            KeyCode::BracketRight => camera.ortho_scale_up(),
            KeyCode::BracketLeft => camera.ortho_scale_down(),
            KeyCode::KeyR => camera.reset_look(),
            _ => {}
        }
    }

    fn set_light_percent(&mut self, percent: f32) {
        if let ActiveScene::Road(road) = &mut self.scene {
            road.lighting.set_intensity_percent(percent);
            self.light_percent = road.lighting.intensity() * 100.0;
        }
    }

    pub fn draw_ui(&mut self, ctx: &EguiContext, sky: TextureState) {
        if !self.show_panel {
            return;
        }

        egui::SidePanel::left("controls")
            .default_width(240.0)
            .show(ctx, |ui| {
                ui.heading("Transform Showcase");
                ui.separator();

                let scene = self.scene.scene();
                let camera = scene.camera();
                ui.label(format!("Tick: {}", scene.tick()));
                ui.label(format!(
                    "Eye: ({:.1}, {:.1}, {:.1})  zoom {:.1}",
                    camera.eye.x,
                    camera.eye.y,
                    camera.eye.z,
                    camera.zoom()
                ));
                ui.label(format!(
                    "Target: ({:.1}, {:.1}, {:.1})",
                    camera.target.x, camera.target.y, camera.target.z
                ));
                let mode = if camera.is_orthographic() {
                    format!("Orthographic (scale {:.0})", camera.ortho_scale())
                } else {
                    format!("Perspective ({:.0}°)", camera.fov_degrees)
                };
                ui.label(mode);
                if let ActiveScene::Road(_) = self.scene {
                    ui.label(format!("Sky: {sky}"));
                }
                ui.separator();

                ui.heading("Camera");
                let mut pressed = None;
                ui.horizontal(|ui| {
                    if ui.button("Look ←").clicked() {
                        pressed = Some(KeyCode::ArrowLeft);
                    }
                    if ui.button("Look →").clicked() {
                        pressed = Some(KeyCode::ArrowRight);
                    }
                    if ui.button("Look ↑").clicked() {
                        pressed = Some(KeyCode::ArrowUp);
                    }
                    if ui.button("Look ↓").clicked() {
                        pressed = Some(KeyCode::ArrowDown);
                    }
                });
                ui.horizontal(|ui| {
                    if ui.button("Eye up").clicked() {
                        pressed = Some(KeyCode::PageUp);
                    }
                    if ui.button("Eye down").clicked() {
                        pressed = Some(KeyCode::PageDown);
                    }
                });
                ui.horizontal(|ui| {
                    if ui.button("Zoom in").clicked() {
                        pressed = Some(KeyCode::Equal);
                    }
                    if ui.button("Zoom out").clicked() {
                        pressed = Some(KeyCode::Minus);
                    }
                });
                ui.horizontal(|ui| {
                    if ui.button("Toggle projection").clicked() {
                        pressed = Some(KeyCode::KeyP);
                    }
                    if ui.button("Reset").clicked() {
                        pressed = Some(KeyCode::KeyR);
                    }
                });
                ui.horizontal(|ui| {
                    if ui.button("Ortho +").clicked() {
                        pressed = Some(KeyCode::BracketRight);
                    }
                    if ui.button("Ortho -").clicked() {
                        pressed = Some(KeyCode::BracketLeft);
                    }
                });
                if let Some(key) = pressed {
                    self.handle_key(key);
                }

                if let ActiveScene::Road(_) = self.scene {
                    ui.separator();
                    ui.heading("Light");
                    let mut percent = self.light_percent;
                    ui.add(egui::Slider::new(&mut percent, 0.0..=100.0).text("intensity %"));
                    if percent != self.light_percent {
                        self.set_light_percent(percent);
                    }
                }

                ui.separator();
                ui.small(concat!(
                    "F1: panel | arrows: look | PgUp/PgDn: eye | +/-: zoom | ",
                    "P: projection | [ ]: ortho | R: reset"
                ));
            });
    }
}
