//! Long-run invariants of both scenes, driven through the public API only.

use showcase_kernel::{BallParams, CubeShowcase, RoadScene, Scene};

const TICKS: u32 = 50_000;

#[test]
fn road_scene_holds_ball_and_angle_invariants() {
    for seed in [0u64, 1, 42, 0xdead_beef] {
        let mut scene = RoadScene::with_seed(seed);
        let p = scene.ball.params;
        for tick in 0..TICKS {
            scene.step();
            let pos = scene.ball.position;
            let vel = scene.ball.velocity;
            assert!(
                pos.abs().max_element() <= p.bound() + 1e-6,
                "seed {seed} tick {tick}: ball escaped at {pos:?}"
            );
            assert!(vel.x.abs() >= p.min_speed && vel.x.abs() <= p.max_speed);
            assert!(vel.z.abs() >= p.min_speed && vel.z.abs() <= p.max_speed);
            assert!(vel.y.abs() <= p.max_speed);
            for spin in [scene.cube_spin, scene.ring_xz_spin, scene.ring_yz_spin] {
                assert!(spin.angles.0.cmpge(glam::Vec3::ZERO).all());
                assert!(spin.angles.0.cmplt(glam::Vec3::splat(360.0)).all());
            }
        }
        assert_eq!(scene.tick(), TICKS as u64);
    }
}

#[test]
fn tighter_box_still_contains_ball() {
    let params = BallParams {
        cube_half_extent: 0.3,
        ..BallParams::default()
    };
    let mut scene = RoadScene::with_params(9, params);
    for _ in 0..TICKS {
        scene.step();
        assert!(scene.ball.position.abs().max_element() <= params.bound() + 1e-6);
    }
}

#[test]
fn showcase_angles_stay_wrapped() {
    let mut scene = CubeShowcase::new();
    for _ in 0..TICKS {
        scene.step();
        assert!((0.0..360.0).contains(&scene.y_angle));
        assert!((0.0..360.0).contains(&scene.x_angle));
    }
}
