use clap::{Parser, Subcommand, ValueEnum};
use glam::Vec3;
use serde::Serialize;
use showcase_kernel::{CubeShowcase, RoadScene, Scene};
use showcase_render::{
    DebugTextRenderer, MeshId, Renderer, TextureState, plan_road_frame, plan_showcase_frame,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "showcase-cli", about = "Headless tools for the transform showcase")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SceneArg {
    Cubes,
    Road,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Run a scene headless and report its state
    Simulate {
        /// Scene to run
        #[arg(long, value_enum, default_value_t = SceneArg::Road)]
        scene: SceneArg,
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "600")]
        ticks: u64,
        /// Seed for the ball's bounce jitter
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Print one JSON object per tick instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Print vertex and index counts for every mesh
    Geometry,
}

/// Per-tick state dump for `simulate --json`.
#[derive(Serialize)]
#[serde(untagged)]
enum TickReport<'a> {
    Road {
        tick: u64,
        ball_position: Vec3,
        ball_velocity: Vec3,
        cube_angles: Vec3,
        point_light: Vec3,
    },
    Cubes {
        tick: u64,
        scene: &'a CubeShowcase,
    },
}

fn simulate_road(ticks: u64, seed: u64, json: bool) -> anyhow::Result<()> {
    let mut scene = RoadScene::with_seed(seed);
    let mut max_speed = 0.0f32;
    let bound = scene.ball.params.bound();
    let mut worst = 0.0f32;

    for _ in 0..ticks {
        scene.step();
        max_speed = max_speed.max(scene.ball.velocity.abs().max_element());
        worst = worst.max(scene.ball.position.abs().max_element());
        if json {
            let report = TickReport::Road {
                tick: scene.tick(),
                ball_position: scene.ball.position,
                ball_velocity: scene.ball.velocity,
                cube_angles: scene.cube_spin.angles.0,
                point_light: scene.point_light.position,
            };
            println!("{}", serde_json::to_string(&report)?);
        }
    }

    if !json {
        let p = scene.ball.position;
        println!("Road scene: seed={}, ticks={}", scene.seed(), scene.tick());
        println!("Ball: pos=({:.3}, {:.3}, {:.3})", p.x, p.y, p.z);
        println!("Max |p| = {worst:.4} (bound {bound:.4}), max |v| = {max_speed:.4}");
        let plan = plan_road_frame(&scene, 16.0 / 9.0, TextureState::NotLoaded);
        print!("{}", DebugTextRenderer::new().render(&plan));
    }
    tracing::debug!(ticks, seed, "road simulation finished");
    Ok(())
}

fn simulate_cubes(ticks: u64, json: bool) -> anyhow::Result<()> {
    let mut scene = CubeShowcase::new();
    for _ in 0..ticks {
        scene.step();
        if json {
            let report = TickReport::Cubes {
                tick: scene.tick(),
                scene: &scene,
            };
            println!("{}", serde_json::to_string(&report)?);
        }
    }

    if !json {
        println!("Cube showcase: ticks={}", scene.tick());
        println!(
            "y_angle={:.1} x_angle={:.1} x_offset={:.2} z_scale={:.3}",
            scene.y_angle, scene.x_angle, scene.x_offset, scene.z_scale
        );
        let plan = plan_showcase_frame(&scene, 16.0 / 9.0);
        print!("{}", DebugTextRenderer::new().render(&plan));
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            println!("showcase-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", showcase_render::crate_info());
            println!("meshes: {}", MeshId::ALL.len());
            let road = RoadScene::default();
            println!(
                "road: ball bound {:.2}, assembly at {:?}",
                road.ball.params.bound(),
                showcase_kernel::ASSEMBLY_POSITION
            );
        }
        Commands::Simulate {
            scene,
            ticks,
            seed,
            json,
        } => match scene {
            SceneArg::Road => simulate_road(ticks, seed, json)?,
            SceneArg::Cubes => simulate_cubes(ticks, json)?,
        },
        Commands::Geometry => {
            println!(
                "{:<13} {:>8} {:>8} {:>10}  topology",
                "mesh", "vertices", "indices", "primitives"
            );
            for id in MeshId::ALL {
                let mesh = match id.build() {
                    Ok(mesh) => mesh,
                    Err(err) => {
                        println!("{:<13} INVALID: {err}", id.label());
                        continue;
                    }
                };
                let status = match mesh.validate() {
                    Ok(()) => String::new(),
                    Err(err) => format!("  INVALID: {err}"),
                };
                println!(
                    "{:<13} {:>8} {:>8} {:>10}  {}{status}",
                    id.label(),
                    mesh.vertex_count(),
                    mesh.index_count(),
                    mesh.primitive_count(),
                    mesh.topology
                );
            }
            println!(
                "dashes: {}",
                showcase_geometry::dash_count(&showcase_geometry::DashLayout::default())
            );
        }
    }

    Ok(())
}
