use bevy::prelude::*;

use crate::math::{Aabb, TILE_SIZE};
use crate::registry::tile::TileId;

/// Grid of tile ids for one level. Row-major: index = y * width + x.
///
/// Read-only while a physics pass runs.
#[derive(Resource, Debug, Clone)]
pub struct TileLayer {
    width: i32,
    height: i32,
    tiles: Vec<TileId>,
}

impl TileLayer {
    /// Empty (all air) layer of the given size in tiles.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
            tiles: vec![TileId::AIR; (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn contains(&self, tile_x: i32, tile_y: i32) -> bool {
        tile_x >= 0 && tile_x < self.width && tile_y >= 0 && tile_y < self.height
    }

    /// Tile id at absolute tile coordinates.
    ///
    /// Cells left of, right of and above the level read as solid; cells
    /// below it read as air so falling bodies can leave the level.
    pub fn tile_id_at(&self, tile_x: i32, tile_y: i32) -> TileId {
        if !self.contains(tile_x, tile_y) {
            if tile_y >= self.height && tile_x >= 0 && tile_x < self.width {
                return TileId::AIR;
            }
            return TileId::SOLID;
        }
        self.tiles[(tile_y * self.width + tile_x) as usize]
    }

    /// Set the tile at absolute tile coordinates. Writes outside the level
    /// are logged and dropped.
    pub fn set_tile(&mut self, tile_x: i32, tile_y: i32, id: TileId) {
        if !self.contains(tile_x, tile_y) {
            warn!(
                "Ignoring tile write outside the level at ({tile_x}, {tile_y}), level is {}x{}",
                self.width, self.height
            );
            return;
        }
        self.tiles[(tile_y * self.width + tile_x) as usize] = id;
    }

    /// Level extent in world units.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_top_left(
            0.0,
            0.0,
            self.width as f32 * TILE_SIZE,
            self.height as f32 * TILE_SIZE,
        )
    }
}
