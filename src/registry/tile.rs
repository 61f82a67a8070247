use std::collections::HashMap;

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use crate::world::tile::TileKind;

/// Compact tile identifier. Index into TileRegistry.defs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub struct TileId(pub u16);

impl TileId {
    pub const AIR: TileId = TileId(0);
    /// Returned by the grid for cells left of, right of and above the level.
    pub const SOLID: TileId = TileId(1);
}

#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("tile 0 must be air")]
    MissingAir,
    #[error("tile 1 must be a solid block")]
    MissingSolid,
    #[error("{0} tiles do not fit in a TileId")]
    TooManyTiles(usize),
    #[error("unknown tile: {0}")]
    UnknownTile(String),
}

/// A single tile type, deserialized from RON.
#[derive(Debug, Clone, Deserialize)]
pub struct TileDef {
    pub id: String,
    pub kind: TileKind,
}

/// Registry of all tile definitions. Inserted as a Resource after asset loading.
#[derive(Resource, Debug)]
pub struct TileRegistry {
    defs: Vec<TileDef>,
    name_to_id: HashMap<String, TileId>,
}

impl TileRegistry {
    /// Build registry from a list of TileDefs. Order = TileId index.
    ///
    /// The grid hands out [`TileId::AIR`] and [`TileId::SOLID`] for cells
    /// outside the level, so the first two definitions must match them.
    pub fn from_defs(defs: Vec<TileDef>) -> Result<Self, RegistryError> {
        match defs.first() {
            Some(def) if def.kind == TileKind::Air => {}
            _ => return Err(RegistryError::MissingAir),
        }
        match defs.get(1) {
            Some(def) if def.kind == TileKind::Solid => {}
            _ => return Err(RegistryError::MissingSolid),
        }
        if defs.len() > u16::MAX as usize {
            return Err(RegistryError::TooManyTiles(defs.len()));
        }
        let name_to_id = defs
            .iter()
            .enumerate()
            .map(|(i, d)| (d.id.clone(), TileId(i as u16)))
            .collect();
        Ok(Self { defs, name_to_id })
    }

    /// Definition for `id`. Unknown ids resolve to air.
    pub fn get(&self, id: TileId) -> &TileDef {
        self.defs.get(id.0 as usize).unwrap_or(&self.defs[0])
    }

    /// Behaviour of the tile with the given id.
    pub fn tile_for(&self, id: TileId) -> TileKind {
        self.get(id).kind
    }

    pub fn by_name(&self, name: &str) -> Result<TileId, RegistryError> {
        self.name_to_id
            .get(name)
            .copied()
            .ok_or_else(|| RegistryError::UnknownTile(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}
