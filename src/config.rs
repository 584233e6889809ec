use bevy::prelude::*;
use bevy::window::PresentMode;

use crate::physics::sled::{BoxSpec, JointSpec};

/// Physics timing (only used with `FramePacing::FixedHz`)
pub const PHYSICS_HZ: f64 = 120.0;

/// Gravity in screen units per second squared (+Y down)
pub const GRAVITY: Vec2 = Vec2::new(0.0, 100.0);

/// Solver iteration counts handed to the engine every step
pub const VELOCITY_ITERATIONS: usize = 6;
pub const POSITION_ITERATIONS: usize = 2;

/// Characteristic length of the world; the engine scales its tolerances by it.
pub const LENGTH_UNIT: f32 = 20.0;

/// Drag points closer than this to the previous point are dropped.
pub const MIN_SEGMENT_LENGTH: f32 = 10.0;

/// Slider: the long box that rides the track
pub const SLIDER_HALF_SIZE: Vec2 = Vec2::new(30.0, 10.0);
pub const SLIDER_SPAWN: Vec2 = Vec2::new(100.0, 100.0);
pub const SLIDER_DENSITY: f32 = 0.2;
pub const SLIDER_FRICTION: f32 = 0.0;
pub const SLIDER_RESTITUTION: f32 = 0.1;

/// Rider: the small box sitting on the slider
pub const RIDER_HALF_SIZE: Vec2 = Vec2::new(5.0, 10.0);
pub const RIDER_SPAWN: Vec2 = Vec2::new(100.0, 80.0);
pub const RIDER_DENSITY: f32 = 0.1;
pub const RIDER_FRICTION: f32 = 1.0;
pub const RIDER_RESTITUTION: f32 = 0.1;

/// Slider-rider spring
pub const JOINT_FREQUENCY_HZ: f32 = 4.0;
pub const JOINT_DAMPING_RATIO: f32 = 0.5;
pub const JOINT_LENGTH_OFFSET: f32 = 5.0;

/// Window
pub const WINDOW_TITLE: &str = "linebox";
pub const WINDOW_SIZE: UVec2 = UVec2::new(800, 500);

/// How often the world is stepped relative to rendering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FramePacing {
    /// One step per rendered frame, by the wall-clock time since the last frame.
    /// Frames are presented without vsync.
    Unthrottled,
    /// Steps of `1 / hz` seconds on the fixed clock, independent of rendering.
    FixedHz(f64),
}

impl FramePacing {
    pub fn present_mode(self) -> PresentMode {
        match self {
            FramePacing::Unthrottled => PresentMode::AutoNoVsync,
            FramePacing::FixedHz(_) => PresentMode::AutoVsync,
        }
    }
}

/// Every tunable of the simulation. `Default` reproduces the constants above.
#[derive(Clone, Debug)]
pub struct SimSettings {
    pub gravity: Vec2,
    pub velocity_iterations: usize,
    pub position_iterations: usize,
    pub length_unit: f32,
    pub min_segment_length: f32,
    pub slider: BoxSpec,
    pub rider: BoxSpec,
    pub joint: JointSpec,
    pub pacing: FramePacing,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            velocity_iterations: VELOCITY_ITERATIONS,
            position_iterations: POSITION_ITERATIONS,
            length_unit: LENGTH_UNIT,
            min_segment_length: MIN_SEGMENT_LENGTH,
            slider: BoxSpec {
                half_size: SLIDER_HALF_SIZE,
                position: SLIDER_SPAWN,
                density: SLIDER_DENSITY,
                friction: SLIDER_FRICTION,
                restitution: SLIDER_RESTITUTION,
            },
            rider: BoxSpec {
                half_size: RIDER_HALF_SIZE,
                position: RIDER_SPAWN,
                density: RIDER_DENSITY,
                friction: RIDER_FRICTION,
                restitution: RIDER_RESTITUTION,
            },
            joint: JointSpec {
                frequency_hz: JOINT_FREQUENCY_HZ,
                damping_ratio: JOINT_DAMPING_RATIO,
                length_offset: JOINT_LENGTH_OFFSET,
            },
            pacing: FramePacing::Unthrottled,
        }
    }
}
