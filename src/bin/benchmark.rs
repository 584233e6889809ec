//! Headless throughput check: scribble a random track, drop the sled on it and
//! time a fixed number of physics steps. No window is opened.

use std::time::{Duration, Instant};

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use rand::prelude::*;
use rand::rngs::StdRng;
use tracing::info;

use linebox::config::{PHYSICS_HZ, SimSettings};
use linebox::physics::surface::Surface;

const SEED: u64 = 42;
const STROKES: usize = 20;
const DRAGS_PER_STROKE: usize = 200;
const FRAMES: u32 = 2_000;

#[derive(Resource, Default)]
struct Bench {
    frames: u32,
    started: Option<Instant>,
}

fn scribble(mut surface: ResMut<Surface>) {
    let mut rng = StdRng::seed_from_u64(SEED);
    for _ in 0..STROKES {
        surface.pointer_down();
        let mut cursor = Vec2::new(rng.random_range(0.0..800.0), rng.random_range(100.0..500.0));
        for _ in 0..DRAGS_PER_STROKE {
            cursor += Vec2::new(rng.random_range(-4.0..12.0), rng.random_range(-6.0..6.0));
            surface.pointer_drag(cursor);
        }
    }
    info!(
        strokes = surface.strokes().len(),
        points = surface.strokes().point_count(),
        obstacles = surface.obstacle_count(),
        "track drawn"
    );
}

fn step(mut surface: ResMut<Surface>, mut bench: ResMut<Bench>, mut exit: MessageWriter<AppExit>) {
    let started = *bench.started.get_or_insert_with(Instant::now);
    surface.advance((1.0 / PHYSICS_HZ) as f32);
    bench.frames += 1;

    if bench.frames == FRAMES {
        let elapsed = started.elapsed();
        let per_step = elapsed / FRAMES;
        info!(frames = FRAMES, ?elapsed, ?per_step, "done");
        if let Some(slider) = surface.frame().slider {
            info!(position = ?slider.pose.position, angle = slider.pose.angle, "slider final pose");
        }
        exit.write(AppExit::Success);
    }
}

fn main() {
    App::new()
        .add_plugins((
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::ZERO)),
            LogPlugin::default(),
        ))
        .insert_resource(Surface::new(SimSettings::default()))
        .init_resource::<Bench>()
        .add_systems(Startup, scribble)
        .add_systems(Update, step)
        .run();
}
