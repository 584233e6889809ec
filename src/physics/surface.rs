use bevy::prelude::*;
use tracing::debug;

use super::sled::Sled;
use super::track::{Extend, Strokes};
use super::world::{PhysicsWorld, Pose, SolverIterations};
use crate::config::SimSettings;

/// A box to draw: where it is and how big it is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxView {
    pub pose: Pose,
    pub half_size: Vec2,
}

/// Everything one frame draws, in screen space.
#[derive(Clone, Debug)]
pub struct Frame<'a> {
    pub strokes: &'a Strokes,
    pub slider: Option<BoxView>,
    pub rider: Option<BoxView>,
}

/// The whole simulation: physics world, the sled riding in it, and the track the
/// user drew. Lives in the ECS as a resource, so input and stepping never touch
/// it at the same time.
#[derive(Resource)]
pub struct Surface {
    world: PhysicsWorld,
    sled: Option<Sled>,
    strokes: Strokes,
    settings: SimSettings,
}

impl Surface {
    pub fn new(settings: SimSettings) -> Self {
        let mut world = PhysicsWorld::new(
            settings.gravity,
            SolverIterations {
                velocity: settings.velocity_iterations,
                position: settings.position_iterations,
                length_unit: settings.length_unit,
            },
        );
        let sled = Sled::spawn(
            &mut world,
            &settings.slider,
            &settings.rider,
            &settings.joint,
        );

        Self {
            world,
            sled,
            strokes: Strokes::default(),
            settings,
        }
    }

    /// A button went down: later drags go into a fresh polyline.
    pub fn pointer_down(&mut self) {
        self.strokes.begin();
    }

    /// The pointer moved with a button held. Each confirmed segment becomes one
    /// immovable obstacle.
    pub fn pointer_drag(&mut self, point: Vec2) -> Extend {
        let outcome = self
            .strokes
            .extend(point, self.settings.min_segment_length);
        if let Extend::Segment(seg) = outcome {
            self.world.create_segment(seg.a, seg.b);
            debug!(a = ?seg.a, b = ?seg.b, "track segment added");
        }
        outcome
    }

    /// Step the world by `dt` seconds of wall-clock (or fixed) time.
    pub fn advance(&mut self, dt: f32) {
        self.world.step(dt);
    }

    pub fn frame(&self) -> Frame<'_> {
        let view = |handle, half_size| {
            self.world
                .pose(handle)
                .map(|pose| BoxView { pose, half_size })
        };
        Frame {
            strokes: &self.strokes,
            slider: self
                .sled
                .and_then(|s| view(s.slider, self.settings.slider.half_size)),
            rider: self
                .sled
                .and_then(|s| view(s.rider, self.settings.rider.half_size)),
        }
    }

    pub fn sled(&self) -> Option<&Sled> {
        self.sled.as_ref()
    }

    pub fn strokes(&self) -> &Strokes {
        &self.strokes
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn settings(&self) -> &SimSettings {
        &self.settings
    }

    /// Static obstacles created from the drawn track.
    pub fn obstacle_count(&self) -> usize {
        self.world.fixed_body_count()
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(SimSettings::default())
    }
}
