//! Draw a track with the mouse and watch a spring-linked pair of boxes ride it.
//!
//! [`physics::surface::Surface`] holds the simulation and is usable without a
//! window; [`physics::LinePlugin`] wires it into a Bevy app.

pub mod config;
pub mod physics;
