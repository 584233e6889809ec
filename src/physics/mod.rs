use bevy::prelude::*;
use tracing::info;

pub mod render;
pub mod sled;
pub mod surface;
pub mod systems;
pub mod track;
pub mod world;

use crate::config::{FramePacing, SimSettings};
use surface::Surface;

/// Plug this into your App with `.add_plugins(LinePlugin::default())`.
#[derive(Default)]
pub struct LinePlugin {
    pub settings: SimSettings,
}

impl Plugin for LinePlugin {
    fn build(&self, app: &mut App) {
        let surface = Surface::new(self.settings.clone());
        if let Some(sled) = surface.sled() {
            info!(rest_length = sled.rest_length, "sled spawned");
        }
        info!(
            gravity = ?self.settings.gravity,
            pacing = ?self.settings.pacing,
            min_segment_length = self.settings.min_segment_length,
            "simulation ready"
        );

        app.insert_resource(surface)
            .add_systems(Startup, (render::spawn_camera, systems::maximize_window));

        // Input, then the step, then the frame: every frame sees the track as of
        // this frame's input and the world as of this frame's step.
        match self.settings.pacing {
            FramePacing::Unthrottled => {
                app.add_systems(
                    Update,
                    (
                        systems::track_pointer,
                        systems::advance_by_wall_clock,
                        render::draw_scene,
                    )
                        .chain(),
                );
            }
            FramePacing::FixedHz(hz) => {
                app.insert_resource(Time::<Fixed>::from_hz(hz))
                    .add_systems(FixedUpdate, systems::advance_by_fixed_tick)
                    .add_systems(
                        Update,
                        (systems::track_pointer, render::draw_scene).chain(),
                    );
            }
        }
    }
}
