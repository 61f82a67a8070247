//! Tile-grid collision for axis-aligned hitboxes, with ramp-following slopes.
//!
//! The core lives in [`physics`]: [`physics::hitbox::Hitbox`] owns a body and
//! its probe nodes, [`physics::collision_result`] probes the grid for one
//! movement attempt and [`physics::slope`] rewrites the result so bodies ride
//! along ramps. [`physics::PhysicsPlugin`] wires it into a Bevy app.

pub mod math;
pub mod physics;
pub mod registry;
pub mod sets;
pub mod world;

#[cfg(test)]
mod test_helpers;
