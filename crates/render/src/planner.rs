use glam::{Mat4, Vec3};
use showcase_common::{EulerDegrees, Transform, normal_matrix};
use showcase_kernel::{ASSEMBLY_POSITION, ASSEMBLY_SCALE, CubeShowcase, RoadScene, Scene};

use crate::frame::{BlendMode, DepthMode, DrawCall, FrameLighting, FramePlan, MeshId};
use crate::texture::TextureState;

/// Cube centres in the four-cube showcase, clockwise from top right.
pub const SHOWCASE_CUBE_SLOTS: [Vec3; 4] = [
    Vec3::new(0.8, 0.8, 0.0),
    Vec3::new(-0.8, 0.8, 0.0),
    Vec3::new(-0.8, -0.8, 0.0),
    Vec3::new(0.8, -0.8, 0.0),
];

const SHOWCASE_SCALE: f32 = 0.8;
const SHOWCASE_CLEAR: [f64; 4] = [0.5, 0.5, 0.5, 1.0];
const ROAD_CLEAR: [f64; 4] = [0.0, 0.0, 0.0, 1.0];

fn draw(
    mesh: MeshId,
    model: Mat4,
    view_projection: Mat4,
    blend: BlendMode,
    depth: DepthMode,
) -> DrawCall {
    DrawCall {
        mesh,
        model,
        mvp: view_projection * model,
        normal_matrix: normal_matrix(&model),
        blend,
        depth,
        use_texture: false,
    }
}

/// Plan one frame of the four-cube showcase.
pub fn plan_showcase_frame(scene: &CubeShowcase, aspect: f32) -> FramePlan {
    let view_projection = scene.camera().view_projection(aspect);
    let [top_right, top_left, bottom_left, bottom_right] = SHOWCASE_CUBE_SLOTS;

    let models = [
        Transform::from_translation(top_right)
            .with_uniform_scale(SHOWCASE_SCALE)
            .with_rotation(EulerDegrees::new(0.0, scene.y_angle, 0.0)),
        Transform::from_translation(top_left + Vec3::new(scene.x_offset, 0.0, 0.0))
            .with_uniform_scale(SHOWCASE_SCALE),
        Transform::from_translation(bottom_left).with_scale(Vec3::new(
            SHOWCASE_SCALE,
            SHOWCASE_SCALE,
            SHOWCASE_SCALE * scene.z_scale,
        )),
        Transform::from_translation(bottom_right)
            .with_uniform_scale(SHOWCASE_SCALE)
            .with_rotation(EulerDegrees::new(scene.x_angle, 0.0, 0.0)),
    ];

    let draws = models
        .iter()
        .map(|t| {
            draw(
                MeshId::ShowcaseCube,
                t.model_matrix(),
                view_projection,
                BlendMode::Opaque,
                DepthMode::ReadWrite,
            )
        })
        .collect();

    FramePlan {
        clear_color: SHOWCASE_CLEAR,
        lighting: FrameLighting::default(),
        view_projection,
        draws,
    }
}

/// Plan one frame of the road scene.
///
/// The sky is drawn only once its texture is `Loaded`. Blended draws use a
/// read-only depth test so they never occlude each other.
pub fn plan_road_frame(scene: &RoadScene, aspect: f32, sky: TextureState) -> FramePlan {
    let view_projection = scene.camera().view_projection(aspect);
    let mut draws = Vec::with_capacity(MeshId::ALL.len());

    if sky.is_ready() {
        draws.push(DrawCall {
            mesh: MeshId::Sky,
            model: Mat4::IDENTITY,
            mvp: Mat4::IDENTITY,
            normal_matrix: Mat4::IDENTITY,
            blend: BlendMode::Opaque,
            depth: DepthMode::Disabled,
            use_texture: true,
        });
    }

    for mesh in [MeshId::Ground, MeshId::Road, MeshId::EdgeLines, MeshId::Dashes] {
        draws.push(draw(
            mesh,
            Mat4::IDENTITY,
            view_projection,
            BlendMode::Opaque,
            DepthMode::ReadWrite,
        ));
    }

    let assembly =
        Mat4::from_translation(ASSEMBLY_POSITION) * Mat4::from_scale(Vec3::splat(ASSEMBLY_SCALE));

    draws.push(draw(
        MeshId::Ball,
        assembly * Mat4::from_translation(scene.ball.position),
        view_projection,
        BlendMode::Opaque,
        DepthMode::ReadWrite,
    ));

    let glass = [
        (MeshId::GlassCube, scene.cube_spin.angles.rotation_matrix()),
        (MeshId::RingXz, scene.ring_xz_spin.angles.rotation_matrix()),
        (
            MeshId::RingYz,
            Mat4::from_rotation_x(90f32.to_radians()) * scene.ring_yz_spin.angles.rotation_matrix(),
        ),
    ];
    for (mesh, local) in glass {
        draws.push(draw(
            mesh,
            assembly * local,
            view_projection,
            BlendMode::Alpha,
            DepthMode::ReadOnly,
        ));
    }

    let lighting = &scene.lighting;
    FramePlan {
        clear_color: ROAD_CLEAR,
        lighting: FrameLighting {
            light_color: lighting.light_color(),
            light_direction: lighting.direction,
            ambient: lighting.ambient(),
            point_light_position: scene.point_light.position,
        },
        view_projection,
        draws,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Mat4, b: Mat4) -> bool {
        a.abs_diff_eq(b, 1e-5)
    }

    fn order(plan: &FramePlan) -> Vec<MeshId> {
        plan.draws.iter().map(|d| d.mesh).collect()
    }

    #[test]
    fn road_order_with_sky() {
        let plan = plan_road_frame(&RoadScene::default(), 1.5, TextureState::Loaded);
        assert_eq!(
            order(&plan),
            vec![
                MeshId::Sky,
                MeshId::Ground,
                MeshId::Road,
                MeshId::EdgeLines,
                MeshId::Dashes,
                MeshId::Ball,
                MeshId::GlassCube,
                MeshId::RingXz,
                MeshId::RingYz,
            ]
        );
        let sky = &plan.draws[0];
        assert!(sky.use_texture);
        assert_eq!(sky.mvp, Mat4::IDENTITY);
        assert_eq!(sky.depth, DepthMode::Disabled);
    }

    #[test]
    fn sky_is_skipped_until_loaded() {
        for state in [TextureState::NotLoaded, TextureState::Failed] {
            let plan = plan_road_frame(&RoadScene::default(), 1.5, state);
            assert_eq!(plan.draws_of(MeshId::Sky).count(), 0, "sky drawn while {state}");
            assert_eq!(plan.draws[0].mesh, MeshId::Ground);
        }
    }

    #[test]
    fn blended_draws_follow_opaque_ones() {
        let plan = plan_road_frame(&RoadScene::default(), 1.0, TextureState::Loaded);
        let first_blend = plan
            .draws
            .iter()
            .position(|d| d.blend == BlendMode::Alpha)
            .expect("no blended draw");
        assert!(plan.draws[..first_blend].iter().all(|d| d.blend == BlendMode::Opaque));
        assert!(
            plan.draws[first_blend..]
                .iter()
                .all(|d| d.blend == BlendMode::Alpha && d.depth == DepthMode::ReadOnly)
        );
    }

    #[test]
    fn mvp_is_view_projection_times_model() {
        let mut scene = RoadScene::with_seed(3);
        for _ in 0..40 {
            scene.step();
        }
        let plan = plan_road_frame(&scene, 16.0 / 9.0, TextureState::NotLoaded);
        let vp = scene.camera.view_projection(16.0 / 9.0);
        assert_eq!(plan.view_projection, vp);
        for d in &plan.draws {
            assert!(approx(d.mvp, vp * d.model), "{} mvp mismatch", d.mesh.label());
            assert!(approx(d.normal_matrix, d.model.inverse().transpose()));
        }
    }

    #[test]
    fn ball_sits_inside_the_assembly() {
        let mut scene = RoadScene::with_seed(9);
        scene.step();
        let plan = plan_road_frame(&scene, 1.0, TextureState::NotLoaded);
        let ball = plan.draws_of(MeshId::Ball).next().expect("ball draw");
        let centre = ball.model.transform_point3(Vec3::ZERO);
        let expected = ASSEMBLY_POSITION + scene.ball.position * ASSEMBLY_SCALE;
        assert!((centre - expected).length() < 1e-5);
    }

    #[test]
    fn yz_ring_is_tilted_a_quarter_turn() {
        let plan = plan_road_frame(&RoadScene::default(), 1.0, TextureState::NotLoaded);
        let ring = plan.draws_of(MeshId::RingYz).next().expect("ring draw");
        let assembly = Mat4::from_translation(ASSEMBLY_POSITION)
            * Mat4::from_scale(Vec3::splat(ASSEMBLY_SCALE));
        assert!(approx(ring.model, assembly * Mat4::from_rotation_x(90f32.to_radians())));
    }

    #[test]
    fn planned_projection_follows_camera_mode() {
        let mut scene = RoadScene::default();
        let perspective = plan_road_frame(&scene, 2.0, TextureState::NotLoaded).view_projection;
        scene.camera.toggle_projection();
        let ortho = plan_road_frame(&scene, 2.0, TextureState::NotLoaded).view_projection;
        assert_ne!(perspective, ortho);
        assert_eq!(ortho, scene.camera.projection_matrix(2.0) * scene.camera.view_matrix());
    }

    #[test]
    fn road_lighting_comes_from_scene() {
        let mut scene = RoadScene::default();
        scene.lighting.set_intensity(1.0);
        let plan = plan_road_frame(&scene, 1.0, TextureState::NotLoaded);
        assert!(plan.lighting.light_color.abs_diff_eq(Vec3::splat(0.8), 1e-6));
        assert_eq!(plan.lighting.point_light_position, Vec3::splat(2.0));
        assert_eq!(plan.clear_color, ROAD_CLEAR);
    }

    #[test]
    fn showcase_cubes_follow_their_animators() {
        let mut scene = CubeShowcase::new();
        for _ in 0..10 {
            scene.step();
        }
        let plan = plan_showcase_frame(&scene, 1.0);
        assert_eq!(plan.draws.len(), 4);
        assert_eq!(plan.clear_color, SHOWCASE_CLEAR);

        let expected = Mat4::from_translation(Vec3::new(0.8, 0.8, 0.0))
            * Mat4::from_scale(Vec3::splat(0.8))
            * Mat4::from_rotation_y(scene.y_angle.to_radians());
        assert!(approx(plan.draws[0].model, expected));

        let slid = plan.draws[1].model.transform_point3(Vec3::ZERO);
        assert!((slid.x - (-0.8 + scene.x_offset)).abs() < 1e-6);

        let stretched = plan.draws[2].model.transform_vector3(Vec3::Z);
        assert!((stretched.z - 0.8 * scene.z_scale).abs() < 1e-6);

        for d in &plan.draws {
            assert!(approx(d.mvp, plan.view_projection * d.model));
        }
    }
}
