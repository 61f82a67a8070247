use std::cell::Cell;

use bevy::prelude::*;

use crate::math::SMALLEST_DISTANCE;
use crate::physics::hitbox::Hitbox;
use crate::physics::node::{CollisionNode, Edge};
use crate::registry::tile::TileId;
use crate::world::tile::{SlopeKind, TileKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

/// Who registered a collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionSource {
    /// Primary grid probe along the leading edge.
    Probe,
    /// Ramp surface added by slope post-processing.
    Slope,
}

/// One candidate outcome on one axis.
///
/// Collisions are never removed from a result, only invalidated, so the
/// full list still shows why a body ended up where it did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    position: f32,
    distance: f32,
    node: CollisionNode,
    node_index: usize,
    edge: Edge,
    tile: TileId,
    kind: TileKind,
    tile_x: i32,
    tile_y: i32,
    source: CollisionSource,
    valid: bool,
}

/// Which tile a node hit and where.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileHit {
    pub node: CollisionNode,
    pub node_index: usize,
    pub tile: TileId,
    pub kind: TileKind,
    pub tile_x: i32,
    pub tile_y: i32,
}

impl Collision {
    /// `position` is the absolute coordinate of the surface the `edge` of the
    /// hitbox ends up touching; `from` is the node's pre-move coordinate.
    pub fn new(hit: TileHit, edge: Edge, position: f32, from: f32, source: CollisionSource) -> Self {
        Self {
            position,
            distance: position - from,
            node: hit.node,
            node_index: hit.node_index,
            edge,
            tile: hit.tile,
            kind: hit.kind,
            tile_x: hit.tile_x,
            tile_y: hit.tile_y,
            source,
            valid: true,
        }
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    /// Signed distance from the node's pre-move coordinate.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn node(&self) -> &CollisionNode {
        &self.node
    }

    pub fn node_index(&self) -> usize {
        self.node_index
    }

    pub fn edge(&self) -> Edge {
        self.edge
    }

    pub fn tile(&self) -> TileId {
        self.tile
    }

    pub fn kind(&self) -> TileKind {
        self.kind
    }

    pub fn tile_x(&self) -> i32 {
        self.tile_x
    }

    pub fn tile_y(&self) -> i32 {
        self.tile_y
    }

    pub fn source(&self) -> CollisionSource {
        self.source
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Hitbox left (x collisions) or top (y collisions) this collision implies.
    fn resolved_origin(&self) -> f32 {
        match self.edge {
            Edge::Left => self.position - self.node.x(),
            Edge::Right => self.position - SMALLEST_DISTANCE - self.node.x(),
            Edge::Top => self.position - self.node.y(),
            Edge::Bottom => self.position - SMALLEST_DISTANCE - self.node.y(),
        }
    }
}

/// A node touching a tile that rewrites the result once probing is done.
#[derive(Debug, Clone, Copy)]
pub struct PostProcessCollision {
    pub hit: TileHit,
}

impl PartialEq for PostProcessCollision {
    fn eq(&self, other: &Self) -> bool {
        self.hit.tile == other.hit.tile
            && self.hit.tile_x == other.hit.tile_x
            && self.hit.tile_y == other.hit.tile_y
            && self.hit.node_index == other.hit.node_index
    }
}

#[derive(Debug, Clone, Copy)]
struct Resolution {
    x: Option<usize>,
    y: Option<usize>,
    left: f32,
    top: f32,
}

/// Candidate collisions for one movement attempt of one hitbox.
///
/// Built fresh per attempt and dropped afterwards. Position queries resolve
/// lazily; adding or (in)validating a collision forces exactly one new pass.
#[derive(Debug)]
pub struct CollisionResult {
    origin_x: f32,
    origin_y: f32,
    width: f32,
    height: f32,
    dx: f32,
    dy: f32,
    x_collisions: Vec<Collision>,
    y_collisions: Vec<Collision>,
    post_process: Vec<PostProcessCollision>,
    resolution: Cell<Option<Resolution>>,
    passes: Cell<u32>,
    finished: bool,
    slope_node_released: bool,
}

impl CollisionResult {
    pub fn new(hitbox: &Hitbox, dx: f32, dy: f32) -> Self {
        Self {
            origin_x: hitbox.x(),
            origin_y: hitbox.y(),
            width: hitbox.width(),
            height: hitbox.height(),
            dx,
            dy,
            x_collisions: Vec::new(),
            y_collisions: Vec::new(),
            post_process: Vec::new(),
            resolution: Cell::new(None),
            passes: Cell::new(0),
            finished: false,
            slope_node_released: false,
        }
    }

    pub fn origin_x(&self) -> f32 {
        self.origin_x
    }

    pub fn origin_y(&self) -> f32 {
        self.origin_y
    }

    /// Attempted (already clamped) displacement.
    pub fn dx(&self) -> f32 {
        self.dx
    }

    pub fn dy(&self) -> f32 {
        self.dy
    }

    pub fn collisions(&self, axis: Axis) -> &[Collision] {
        match axis {
            Axis::X => &self.x_collisions,
            Axis::Y => &self.y_collisions,
        }
    }

    fn list_mut(&mut self, axis: Axis) -> &mut Vec<Collision> {
        match axis {
            Axis::X => &mut self.x_collisions,
            Axis::Y => &mut self.y_collisions,
        }
    }

    fn mark_dirty(&self) {
        self.resolution.set(None);
    }

    pub fn add_collision(&mut self, axis: Axis, collision: Collision) -> usize {
        let list = self.list_mut(axis);
        list.push(collision);
        let index = list.len() - 1;
        self.mark_dirty();
        index
    }

    pub fn add_collision_x(&mut self, collision: Collision) -> usize {
        self.add_collision(Axis::X, collision)
    }

    pub fn add_collision_y(&mut self, collision: Collision) -> usize {
        self.add_collision(Axis::Y, collision)
    }

    /// Mark a collision invalid.
    ///
    /// Invalidating an x collision does not re-run y probing, which used the
    /// attempted x position; the result may then disagree with a fresh probe.
    pub fn invalidate(&mut self, axis: Axis, index: usize) {
        self.set_valid(axis, index, false);
    }

    pub fn validate(&mut self, axis: Axis, index: usize) {
        self.set_valid(axis, index, true);
    }

    fn set_valid(&mut self, axis: Axis, index: usize, valid: bool) {
        if let Some(collision) = self.list_mut(axis).get_mut(index) {
            if collision.valid != valid {
                collision.valid = valid;
                self.mark_dirty();
            }
        }
    }

    /// Record a node touching a post-processing tile. Returns false if the
    /// same node already registered this tile.
    pub fn add_post_process(&mut self, entry: PostProcessCollision) -> bool {
        if self.post_process.contains(&entry) {
            return false;
        }
        self.post_process.push(entry);
        true
    }

    pub fn post_process_collisions(&self) -> &[PostProcessCollision] {
        &self.post_process
    }

    /// Set once a ramp lets go of the slope node past its low end. Only the
    /// ramp in the node's column may claim it afterwards.
    pub(crate) fn release_slope_node(&mut self) {
        self.slope_node_released = true;
    }

    pub fn is_slope_node_released(&self) -> bool {
        self.slope_node_released
    }

    /// Hand every registered post-processing entry to its tile, then drop the
    /// cached resolution so queries see the rewritten result.
    pub fn finish(&mut self) {
        if self.finished {
            warn!("CollisionResult::finish called twice, ignoring");
            return;
        }
        self.finished = true;

        let entries = self.post_process.clone();
        // Each slope first discards the primary collisions its own cell
        // produced, so no slope reads another's stale block collisions.
        for entry in &entries {
            if let TileKind::Slope(kind) = entry.hit.kind {
                kind.filter_own_collisions(self, entry.hit.tile_x, entry.hit.tile_y);
            }
        }
        for entry in &entries {
            if let TileKind::Slope(kind) = entry.hit.kind {
                kind.post_process(self, entry);
            }
        }
        self.mark_dirty();
    }

    /// Number of resolution passes run so far.
    pub fn resolve_passes(&self) -> u32 {
        self.passes.get()
    }

    fn resolve(&self) -> Resolution {
        if let Some(resolution) = self.resolution.get() {
            return resolution;
        }
        self.passes.set(self.passes.get() + 1);

        let x = nearest_valid(&self.x_collisions);
        let y = nearest_valid(&self.y_collisions);
        let resolution = Resolution {
            x,
            y,
            left: x.map_or(self.origin_x + self.dx, |i| {
                self.x_collisions[i].resolved_origin()
            }),
            top: y.map_or(self.origin_y + self.dy, |i| {
                self.y_collisions[i].resolved_origin()
            }),
        };
        self.resolution.set(Some(resolution));
        resolution
    }

    /// Nearest valid collision on `axis`, the one the body stops at.
    pub fn nearest(&self, axis: Axis) -> Option<&Collision> {
        let resolution = self.resolve();
        match axis {
            Axis::X => resolution.x.map(|i| &self.x_collisions[i]),
            Axis::Y => resolution.y.map(|i| &self.y_collisions[i]),
        }
    }

    pub fn collided_x(&self) -> bool {
        self.resolve().x.is_some()
    }

    pub fn collided_y(&self) -> bool {
        self.resolve().y.is_some()
    }

    pub fn left(&self) -> f32 {
        self.resolve().left
    }

    pub fn top(&self) -> f32 {
        self.resolve().top
    }

    pub fn right(&self) -> f32 {
        self.left() + self.width - SMALLEST_DISTANCE
    }

    pub fn bottom(&self) -> f32 {
        self.top() + self.height - SMALLEST_DISTANCE
    }

    /// Slope the body ended up resting against, if the y axis resolved on one.
    pub fn resolved_slope(&self) -> Option<SlopeKind> {
        self.nearest(Axis::Y)
            .filter(|c| c.source == CollisionSource::Slope)
            .and_then(|c| c.kind.slope())
    }
}

/// Index of the valid collision closest to its node. Ties keep the earliest.
fn nearest_valid(collisions: &[Collision]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, collision) in collisions.iter().enumerate() {
        if !collision.valid {
            continue;
        }
        let distance = collision.distance.abs();
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((i, distance));
        }
    }
    best.map(|(i, _)| i)
}
