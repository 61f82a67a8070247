use bevy::prelude::*;

/// Global physics parameters, built from the loaded
/// [`PhysicsConfigAsset`](super::assets::PhysicsConfigAsset).
///
/// Inserted once before the simulation starts and only ever read afterwards;
/// every physics call takes it by reference.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct PhysicsConfig {
    /// Downward acceleration in world units per second squared.
    pub gravity: f32,
    /// Per-millisecond speed decay while grounded.
    pub ground_friction: f32,
    /// Per-millisecond horizontal speed decay while airborne.
    pub air_friction_x: f32,
    /// Per-millisecond vertical speed decay while airborne.
    pub air_friction_y: f32,
    /// Speeds below this (units per second) snap to zero.
    pub min_moving_speed: f32,
    /// Longest frame the physics step will simulate.
    pub max_delta_ms: u32,
    /// Render scale: screen pixels per world unit.
    pub pixels_per_tile: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 30.0,
            ground_friction: 0.99,
            air_friction_x: 0.999,
            air_friction_y: 0.9995,
            min_moving_speed: 0.01,
            max_delta_ms: 50,
            pixels_per_tile: 32.0,
        }
    }
}
