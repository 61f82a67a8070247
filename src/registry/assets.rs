use bevy::prelude::*;
use bevy::reflect::TypePath;
use serde::Deserialize;

use super::physics::PhysicsConfig;
use super::tile::TileDef;

/// Asset loaded from tiles.registry.ron
#[derive(Asset, TypePath, Debug, Deserialize)]
pub struct TileRegistryAsset {
    pub tiles: Vec<TileDef>,
}

/// Asset loaded from physics.config.ron
#[derive(Asset, TypePath, Debug, Deserialize)]
pub struct PhysicsConfigAsset {
    pub gravity: f32,
    pub ground_friction: f32,
    pub air_friction_x: f32,
    pub air_friction_y: f32,
    pub min_moving_speed: f32,
    pub max_delta_ms: u32,
    pub pixels_per_tile: f32,
}

impl From<&PhysicsConfigAsset> for PhysicsConfig {
    fn from(asset: &PhysicsConfigAsset) -> Self {
        Self {
            gravity: asset.gravity,
            ground_friction: asset.ground_friction,
            air_friction_x: asset.air_friction_x,
            air_friction_y: asset.air_friction_y,
            min_moving_speed: asset.min_moving_speed,
            max_delta_ms: asset.max_delta_ms,
            pixels_per_tile: asset.pixels_per_tile,
        }
    }
}
