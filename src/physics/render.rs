use bevy::math::{Isometry2d, Rot2};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use tracing::error;

use crate::physics::surface::{BoxView, Surface};
use crate::physics::systems::WorldBounds;

const TRACK_COLOR: Color = Color::WHITE;
const SLIDER_COLOR: Color = Color::srgb(0.2, 0.7, 1.0);
const RIDER_COLOR: Color = Color::srgb(1.0, 0.6, 0.2);

/// 2D camera; it multisamples by default, which smooths the gizmo lines.
pub fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Draw the track and both boxes at their current pose.
///
/// The primary window is the canvas. Without it there is nothing this app can
/// draw into, so the error is returned and the default handler stops the app.
pub fn draw_scene(
    mut gizmos: Gizmos,
    windows: Query<&Window, With<PrimaryWindow>>,
    surface: Res<Surface>,
) -> Result {
    let window = windows
        .single()
        .inspect_err(|e| error!("no primary window to draw into: {e}"))?;
    let bounds = WorldBounds::of(window);
    let frame = surface.frame();

    for line in frame.strokes.iter() {
        gizmos.linestrip_2d(line.iter().map(|&p| bounds.to_world(p)), TRACK_COLOR);
    }

    if let Some(slider) = frame.slider {
        draw_box(&mut gizmos, &bounds, slider, SLIDER_COLOR);
    }
    if let Some(rider) = frame.rider {
        draw_box(&mut gizmos, &bounds, rider, RIDER_COLOR);
    }

    Ok(())
}

fn draw_box(gizmos: &mut Gizmos, bounds: &WorldBounds, view: BoxView, color: Color) {
    let isometry = Isometry2d::new(
        bounds.to_world(view.pose.position),
        Rot2::radians(bounds.angle_to_world(view.pose.angle)),
    );
    gizmos.rect_2d(isometry, 2.0 * view.half_size, color);
}
