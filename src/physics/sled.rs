use std::f32::consts::TAU;

use bevy::prelude::*;

use super::world::{BodyHandle, PhysicsWorld};

/// A dynamic box: size, spawn point and contact material.
#[derive(Clone, Copy, Debug)]
pub struct BoxSpec {
    pub half_size: Vec2,
    /// Centre at spawn, screen space.
    pub position: Vec2,
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
}

impl BoxSpec {
    pub fn mass(&self) -> f32 {
        self.density * 4.0 * self.half_size.x * self.half_size.y
    }
}

/// Damped distance joint, described the soft-constraint way.
#[derive(Clone, Copy, Debug)]
pub struct JointSpec {
    pub frequency_hz: f32,
    pub damping_ratio: f32,
    /// Added to the spawn distance between the two bodies to get the rest length.
    pub length_offset: f32,
}

impl JointSpec {
    /// Spring stiffness and damping for two bodies of mass `ma` and `mb`:
    /// k = m * w^2, c = 2 * m * zeta * w with m the effective mass and w = 2*pi*f.
    pub fn coefficients(&self, ma: f32, mb: f32) -> (f32, f32) {
        let total = ma + mb;
        if total <= 0.0 {
            return (0.0, 0.0);
        }
        let effective_mass = ma * mb / total;
        let omega = TAU * self.frequency_hz;
        let stiffness = effective_mass * omega * omega;
        let damping = 2.0 * effective_mass * self.damping_ratio * omega;
        (stiffness, damping)
    }
}

/// The slider, the rider, and the spring between them.
#[derive(Clone, Copy, Debug)]
pub struct Sled {
    pub slider: BodyHandle,
    pub rider: BodyHandle,
    pub rest_length: f32,
}

impl Sled {
    /// Create both boxes and join them. `None` only if the world lost a body it
    /// was just handed, which rapier never does.
    pub fn spawn(
        world: &mut PhysicsWorld,
        slider: &BoxSpec,
        rider: &BoxSpec,
        joint: &JointSpec,
    ) -> Option<Self> {
        let slider_handle = world.create_box(slider);
        let rider_handle = world.create_box(rider);
        let rest_length = world.create_spring(
            slider_handle,
            slider.mass(),
            rider_handle,
            rider.mass(),
            joint,
        )?;

        Some(Self {
            slider: slider_handle,
            rider: rider_handle,
            rest_length,
        })
    }
}
