use bevy::prelude::*;
use bevy::window::{CursorMoved, PrimaryWindow};

use crate::physics::surface::Surface;

/// Window half-extents, for mapping screen space (origin top-left, +Y down) to
/// the 2D camera's world space (origin at the window centre, +Y up).
#[derive(Default, Copy, Clone, Debug, PartialEq)]
pub struct WorldBounds {
    pub half: Vec2,
}

impl WorldBounds {
    pub fn of(window: &Window) -> Self {
        Self {
            half: 0.5 * window.size(),
        }
    }

    pub fn to_world(&self, screen: Vec2) -> Vec2 {
        Vec2::new(screen.x - self.half.x, self.half.y - screen.y)
    }

    /// Flipping Y mirrors the plane, so a rotation changes sign.
    pub fn angle_to_world(&self, screen_angle: f32) -> f32 {
        -screen_angle
    }
}

/// Open maximised, like a desktop app; the configured size applies when restored.
pub fn maximize_window(mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    for mut window in &mut windows {
        window.set_maximized(true);
    }
}

/// Feed mouse input to the surface: any button press starts a stroke, every
/// cursor move while a button is held is a drag point.
pub fn track_pointer(
    buttons: Res<ButtonInput<MouseButton>>,
    mut moves: MessageReader<CursorMoved>,
    primary: Query<Entity, With<PrimaryWindow>>,
    mut surface: ResMut<Surface>,
) {
    if buttons.get_just_pressed().next().is_some() {
        surface.pointer_down();
    }

    let held = buttons.get_pressed().next().is_some();
    for moved in moves.read() {
        // cursor positions are already in screen space
        if held && primary.contains(moved.window) {
            surface.pointer_drag(moved.position);
        }
    }
}

/// Step by the real time since the previous frame. `Time<Real>` is used instead of
/// the virtual clock so long stalls are not clamped.
pub fn advance_by_wall_clock(time: Res<Time<Real>>, mut surface: ResMut<Surface>) {
    surface.advance(time.delta_secs());
}

/// Step by the fixed timestep (set in `LinePlugin` via `Time::<Fixed>`).
pub fn advance_by_fixed_tick(time: Res<Time<Fixed>>, mut surface: ResMut<Surface>) {
    surface.advance(time.delta_secs());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_corners_map_to_world_corners() {
        let b = WorldBounds {
            half: Vec2::new(400.0, 250.0),
        };
        assert_eq!(b.to_world(Vec2::ZERO), Vec2::new(-400.0, 250.0));
        assert_eq!(b.to_world(Vec2::new(800.0, 500.0)), Vec2::new(400.0, -250.0));
        assert_eq!(b.to_world(Vec2::new(400.0, 250.0)), Vec2::ZERO);
    }

    #[test]
    fn clockwise_on_screen_is_clockwise_in_world() {
        let b = WorldBounds::default();
        assert_eq!(b.angle_to_world(0.5), -0.5);
    }
}
