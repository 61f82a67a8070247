use crate::math::TILE_SIZE;
use crate::physics::node::Edge;
use crate::physics::result::{Collision, CollisionSource, TileHit};
use crate::world::tile::TileKind;

/// One leading-edge node probing the tile at its destination.
#[derive(Debug, Clone, Copy)]
pub struct Probe {
    pub hit: TileHit,
    /// Edge of the hitbox doing the probing.
    pub edge: Edge,
    /// Node coordinate on the probed axis before the move.
    pub from: f32,
}

impl Probe {
    /// Face of the probed tile that the leading edge runs into.
    fn facing_side(&self) -> f32 {
        let (tx, ty) = (self.hit.tile_x as f32, self.hit.tile_y as f32);
        match self.edge {
            Edge::Right => tx * TILE_SIZE,
            Edge::Left => (tx + 1.0) * TILE_SIZE,
            Edge::Bottom => ty * TILE_SIZE,
            Edge::Top => (ty + 1.0) * TILE_SIZE,
        }
    }

    /// Collide with the whole cell. A face behind the node (it was already
    /// past it before moving) is not a collision.
    fn block(&self) -> Option<Collision> {
        let collision = Collision::new(
            self.hit,
            self.edge,
            self.facing_side(),
            self.from,
            CollisionSource::Probe,
        );
        if collision.distance() * self.edge.sign() < 0.0 {
            return None;
        }
        Some(collision)
    }
}

impl TileKind {
    /// Primary x-axis contract. Slopes block like solid cells here and
    /// correct themselves during post-processing.
    pub fn check_x(self, probe: &Probe) -> Option<Collision> {
        match self {
            TileKind::Air | TileKind::Platform => None,
            TileKind::Solid | TileKind::Slope(_) => probe.block(),
        }
    }

    /// Primary y-axis contract.
    pub fn check_y(self, probe: &Probe) -> Option<Collision> {
        match self {
            TileKind::Air => None,
            TileKind::Solid | TileKind::Slope(_) => probe.block(),
            // Only from above, and only if the node started above the top.
            TileKind::Platform if probe.edge == Edge::Bottom => probe.block(),
            TileKind::Platform => None,
        }
    }
}
