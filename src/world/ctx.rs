use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use thiserror::Error;

use crate::registry::physics::PhysicsConfig;
use crate::registry::tile::{TileId, TileRegistry};
use crate::world::layer::TileLayer;
use crate::world::tile::TileKind;

/// Raised when physics runs before the level it probes exists.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PhysicsError {
    #[error("no tile layer loaded")]
    MissingLevel,
    #[error("no tile registry loaded")]
    MissingRegistry,
    #[error("no physics config loaded")]
    MissingConfig,
}

/// Bevy SystemParam bundling the read-only world resources physics needs.
/// Use `as_ref()` to obtain a lightweight [`WorldCtxRef`] for passing into
/// regular functions and methods.
#[derive(SystemParam)]
pub struct WorldCtx<'w> {
    pub layer: Option<Res<'w, TileLayer>>,
    pub registry: Option<Res<'w, TileRegistry>>,
    pub config: Option<Res<'w, PhysicsConfig>>,
}

impl WorldCtx<'_> {
    pub fn as_ref(&self) -> Result<WorldCtxRef<'_>, PhysicsError> {
        Ok(WorldCtxRef {
            layer: self.layer.as_deref().ok_or(PhysicsError::MissingLevel)?,
            registry: self.registry.as_deref().ok_or(PhysicsError::MissingRegistry)?,
            config: self.config.as_deref().ok_or(PhysicsError::MissingConfig)?,
        })
    }
}

/// Lightweight reference bundle for passing world resources into regular
/// functions and methods without requiring ECS system parameters.
#[derive(Clone, Copy)]
pub struct WorldCtxRef<'a> {
    pub layer: &'a TileLayer,
    pub registry: &'a TileRegistry,
    pub config: &'a PhysicsConfig,
}

impl WorldCtxRef<'_> {
    /// Id and behaviour of the tile at absolute tile coordinates.
    pub fn tile_at(&self, tile_x: i32, tile_y: i32) -> (TileId, TileKind) {
        let id = self.layer.tile_id_at(tile_x, tile_y);
        (id, self.registry.tile_for(id))
    }
}
