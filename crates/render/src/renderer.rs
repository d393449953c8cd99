use std::fmt::Write;

use crate::frame::{BlendMode, DepthMode, FramePlan};

/// Renderer-agnostic interface. All backends implement this trait.
///
/// A backend consumes a planned frame and produces output. It never touches
/// scene state; everything it needs is in the [`FramePlan`].
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Draw one planned frame.
    fn render(&mut self, plan: &FramePlan) -> Self::Output;
}

/// Text renderer for CLI output, logging and tests.
///
/// Lists every draw of the frame in submission order.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    frames: u64,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&mut self, plan: &FramePlan) -> String {
        let mut out = String::new();
        let [r, g, b, a] = plan.clear_color;
        let _ = writeln!(
            out,
            "=== Frame {} ({} draws, clear=({r:.2}, {g:.2}, {b:.2}, {a:.2})) ===",
            self.frames,
            plan.draws.len()
        );
        let l = &plan.lighting;
        let _ = writeln!(
            out,
            concat!(
                "Light: color=({:.2}, {:.2}, {:.2}) ",
                "ambient=({:.2}, {:.2}, {:.2}) point=({:.2}, {:.2}, {:.2})"
            ),
            l.light_color.x,
            l.light_color.y,
            l.light_color.z,
            l.ambient.x,
            l.ambient.y,
            l.ambient.z,
            l.point_light_position.x,
            l.point_light_position.y,
            l.point_light_position.z
        );

        for (i, d) in plan.draws.iter().enumerate() {
            let origin = d.model.w_axis;
            let blend = match d.blend {
                BlendMode::Opaque => "opaque",
                BlendMode::Alpha => "alpha",
            };
            let depth = match d.depth {
                DepthMode::ReadWrite => "rw",
                DepthMode::ReadOnly => "ro",
                DepthMode::Disabled => "off",
            };
            let _ = writeln!(
                out,
                "  {i:>2} {:<13} at=({:.2}, {:.2}, {:.2}) blend={blend} depth={depth}{}",
                d.mesh.label(),
                origin.x,
                origin.y,
                origin.z,
                if d.use_texture { " textured" } else { "" }
            );
        }

        self.frames += 1;
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TextureState, plan_road_frame, plan_showcase_frame};
    use showcase_kernel::{CubeShowcase, RoadScene};

    #[test]
    fn lists_showcase_draws() {
        let plan = plan_showcase_frame(&CubeShowcase::new(), 1.0);
        let mut renderer = DebugTextRenderer::new();
        let output = renderer.render(&plan);

        assert!(output.contains("Frame 0 (4 draws"));
        assert_eq!(output.matches("showcase_cube").count(), 4);
        assert_eq!(renderer.frames(), 1);
    }

    #[test]
    fn marks_textured_and_blended_draws() {
        let plan = plan_road_frame(&RoadScene::default(), 1.0, TextureState::Loaded);
        let mut renderer = DebugTextRenderer::new();
        let output = renderer.render(&plan);

        let sky_line = output.lines().find(|l| l.contains("sky")).expect("sky line");
        assert!(sky_line.ends_with("textured"));
        assert!(sky_line.contains("depth=off"));
        let ring_line = output.lines().find(|l| l.contains("ring_yz")).expect("ring line");
        assert!(ring_line.contains("blend=alpha depth=ro"));
    }
}
