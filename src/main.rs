use bevy::prelude::*;
use bevy::window::WindowResolution;

use linebox::config::{SimSettings, WINDOW_SIZE, WINDOW_TITLE};
use linebox::physics::LinePlugin;

fn main() {
    let settings = SimSettings::default();

    App::new()
        // Solid black background
        .insert_resource(ClearColor(Color::BLACK))
        // Bevy's core engine features; closing the window exits
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: WINDOW_TITLE.into(),
                resolution: WindowResolution::new(WINDOW_SIZE.x, WINDOW_SIZE.y),
                resizable: true,
                present_mode: settings.pacing.present_mode(),
                ..default()
            }),
            ..default()
        }))
        // Track drawing, physics stepping and rendering
        .add_plugins(LinePlugin { settings })
        .run();
}
