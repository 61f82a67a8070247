//! Ramp tiles.
//!
//! Primary probing treats a slope cell like a solid block. Once both axes
//! are probed, each slope rewrites the result:
//!
//! 1. It drops the block collisions its own cell produced through the ramp
//!    side ([`SlopeKind::filter_own_collisions`]).
//! 2. For the body's slope node (bottom-centre on floor ramps, top-centre on
//!    ceiling ramps) it adds a collision on the ramp surface, or at the
//!    summit level right after the node cleared the high end
//!    ([`SlopeKind::post_process`]).
//! 3. While it holds the body it hides the collisions the ramp replaces:
//!    y collisions further into the ramp than its surface and x collisions
//!    against the summit row.
//!
//! Only the slope node is aligned with the ramp; the body's corners may
//! overlap the ramp's solid triangle or float above it.

use bevy::prelude::*;

use crate::math::{SMALLEST_DISTANCE, TILE_SIZE, tile_coord};
use crate::physics::node::{CollisionNode, Edge};
use crate::physics::result::{
    Axis, Collision, CollisionResult, CollisionSource, PostProcessCollision,
};
use crate::world::tile::SlopeKind;

impl SlopeKind {
    /// Depth of the ramp surface below the tile's top at `x_into_tile`.
    pub fn calculate_y(self, x_into_tile: f32) -> f32 {
        let x = x_into_tile.clamp(0.0, TILE_SIZE);
        let y = match self {
            SlopeKind::RightFloor | SlopeKind::RightCeiling => x,
            SlopeKind::LeftFloor | SlopeKind::LeftCeiling => TILE_SIZE - x,
        };
        // Ceiling ramps clamp to the full tile height, not the exclusive
        // edge: rounding at TILE_SIZE - ε leaves the top node inside the
        // cell above.
        y.clamp(0.0, TILE_SIZE)
    }

    /// Absolute y of the ramp surface in tile `(tile_x, tile_y)` at world `x`.
    pub fn surface_y(self, tile_x: i32, tile_y: i32, x: f32) -> f32 {
        tile_y as f32 * TILE_SIZE + self.calculate_y(x - tile_x as f32 * TILE_SIZE)
    }

    pub fn is_node_valid_for_slope(self, node: &CollisionNode) -> bool {
        if self.is_floor() {
            node.is_floor_slope_node()
        } else {
            node.is_ceiling_slope_node()
        }
    }

    /// Horizontal direction from the ramp toward its summit, where a floor
    /// ramp is highest and a ceiling ramp lowest.
    fn summit_dir(self) -> i32 {
        match self {
            SlopeKind::RightFloor | SlopeKind::LeftCeiling => -1,
            SlopeKind::LeftFloor | SlopeKind::RightCeiling => 1,
        }
    }

    /// Toward the low end of a floor ramp. The cell's full-height face is on
    /// the summit side, so only travel in this direction meets a wall.
    fn base_dir(self) -> i32 {
        -self.summit_dir()
    }

    fn summit_level(self, tile_y: i32) -> f32 {
        if self.is_floor() {
            tile_y as f32 * TILE_SIZE
        } else {
            (tile_y + 1) as f32 * TILE_SIZE
        }
    }

    fn base_level(self, tile_y: i32) -> f32 {
        if self.is_floor() {
            (tile_y + 1) as f32 * TILE_SIZE
        } else {
            tile_y as f32 * TILE_SIZE
        }
    }

    /// Hitbox edge that presses into the ramp.
    fn ramp_edge(self) -> Edge {
        if self.is_floor() { Edge::Bottom } else { Edge::Top }
    }

    /// `a` lies at or past `b` going into the solid part.
    fn is_past(self, a: f32, b: f32) -> bool {
        if self.is_floor() { a >= b } else { a <= b }
    }

    /// Inside the ramp's solid part, extended below (floor) or above
    /// (ceiling) the cell by `reach`.
    pub fn is_point_in_slope_region(self, tile_x: i32, tile_y: i32, x: f32, y: f32, reach: f32) -> bool {
        if tile_coord(x) != tile_x {
            return false;
        }
        let surface = self.surface_y(tile_x, tile_y, x);
        if self.is_floor() {
            y >= surface && y < (tile_y + 1) as f32 * TILE_SIZE + reach
        } else {
            y <= surface && y > tile_y as f32 * TILE_SIZE - reach
        }
    }

    /// Just past the high end, within `reach` of the summit level. Without
    /// this the summit's neighbour would stop the body before it tops out.
    pub fn is_point_inside_summit(self, tile_x: i32, tile_y: i32, x: f32, y: f32, reach: f32) -> bool {
        if tile_coord(x) != tile_x + self.summit_dir() {
            return false;
        }
        let level = self.summit_level(tile_y);
        self.is_past(y, level) && (y - level).abs() < reach
    }

    /// Just past the low end, within `reach` of the base level. The ramp lets
    /// go of the body here, so a body running off into a drop falls instead
    /// of being pulled back onto the ramp.
    pub fn is_point_inside_base(self, tile_x: i32, tile_y: i32, x: f32, y: f32, reach: f32) -> bool {
        if tile_coord(x) != tile_x + self.base_dir() {
            return false;
        }
        (y - self.base_level(tile_y)).abs() < reach
    }

    /// Whether a body riding the ramp loses its y speed on contact. Rising
    /// into a ceiling ramp stops it; a floor ramp keeps it so the body can
    /// follow the surface down.
    pub fn should_remove_speed_on_collision(self) -> bool {
        self.is_ceiling()
    }

    /// Signs applied to the swapped `(speed_y, speed_x)` when bouncing.
    pub fn bounce_multipliers(self) -> (f32, f32) {
        match self {
            SlopeKind::RightFloor | SlopeKind::RightCeiling => (1.0, 1.0),
            SlopeKind::LeftFloor | SlopeKind::LeftCeiling => (-1.0, -1.0),
        }
    }

    /// Drop block collisions against this cell that the ramp doesn't back up:
    /// x collisions from a node already inside the cell or coming through
    /// the ramp side, and y collisions pressing into the ramp.
    pub(crate) fn filter_own_collisions(self, result: &mut CollisionResult, tile_x: i32, tile_y: i32) {
        let own_cell = |c: &Collision| {
            c.is_valid()
                && c.source() == CollisionSource::Probe
                && c.tile_x() == tile_x
                && c.tile_y() == tile_y
        };

        let wall_sign = self.base_dir() as f32;
        let origin_x = result.origin_x();
        let stale_x: Vec<usize> = indices(result, Axis::X, |c| {
            let started_inside = tile_coord(origin_x + c.node().x()) == tile_x;
            own_cell(c) && (started_inside || c.edge().sign() != wall_sign)
        });
        for i in stale_x {
            result.invalidate(Axis::X, i);
        }

        let ramp_edge = self.ramp_edge();
        let stale_y: Vec<usize> = indices(result, Axis::Y, |c| own_cell(c) && c.edge() == ramp_edge);
        for i in stale_y {
            result.invalidate(Axis::Y, i);
        }
    }

    /// Post-processing hook for one node touching this slope's cell.
    pub(crate) fn post_process(self, result: &mut CollisionResult, entry: &PostProcessCollision) {
        let node = entry.hit.node;
        if !self.is_node_valid_for_slope(&node) {
            return;
        }
        let (tile_x, tile_y) = (entry.hit.tile_x, entry.hit.tile_y);
        let start_x = result.origin_x() + node.x();
        let start_y = result.origin_y() + node.y();
        let x = result.left() + node.x();
        let y = start_y + result.dy();
        let reach = result.dx().abs() + result.dy().abs() + SMALLEST_DISTANCE;
        let came_from_ramp = tile_coord(start_x) == tile_x;
        let column = tile_coord(x);

        if self.is_point_in_slope_region(tile_x, tile_y, x, y, reach) {
            let surface = self.surface_y(tile_x, tile_y, x);
            trace!("{self:?} at ({tile_x}, {tile_y}) holds slope node, surface {surface}");
            if self.claim(result, entry, surface, start_y, column) {
                self.filter_ramp_y(result, tile_x, surface);
                self.filter_summit_x(result, tile_y);
                self.revalidate_walls(result, tile_y);
            }
        } else if came_from_ramp && self.is_point_inside_summit(tile_x, tile_y, x, y, reach) {
            trace!("{self:?} at ({tile_x}, {tile_y}) lifts slope node over the summit");
            if self.claim(result, entry, self.summit_level(tile_y), start_y, column) {
                self.filter_summit_x(result, tile_y);
            }
        } else if came_from_ramp && self.is_point_inside_base(tile_x, tile_y, x, y, reach) {
            trace!("{self:?} at ({tile_x}, {tile_y}) releases slope node past the base");
            self.release(result, column);
        }
    }

    /// Add the ramp collision for the slope node now in `column`.
    ///
    /// The slope whose cell is in that column always wins. Any other slope
    /// yields to it, and among those the last one processed wins. That last
    /// rule can make bodies jitter in one-tile diagonal tunnels where two
    /// ramps claim the same node on alternate frames.
    fn claim(
        self,
        result: &mut CollisionResult,
        entry: &PostProcessCollision,
        position: f32,
        from: f32,
        column: i32,
    ) -> bool {
        let owning = entry.hit.tile_x == column;
        let slope_claims = |c: &Collision| c.is_valid() && c.source() == CollisionSource::Slope;
        if !owning && result.is_slope_node_released() {
            trace!("{self:?} skips released slope node in column {column}");
            return false;
        }
        if !owning
            && result
                .collisions(Axis::Y)
                .iter()
                .any(|c| slope_claims(c) && c.tile_x() == column)
        {
            trace!("{self:?} yields to the slope in column {column}");
            return false;
        }
        let superseded = indices(result, Axis::Y, |c| slope_claims(c) && c.tile_x() != column);
        for i in superseded {
            result.invalidate(Axis::Y, i);
        }
        result.add_collision_y(Collision::new(
            entry.hit,
            self.ramp_edge(),
            position,
            from,
            CollisionSource::Slope,
        ));
        true
    }

    /// Drop claims on the slope node from ramps outside its new column, so
    /// nothing later this frame pulls it back up onto the ramp it just left.
    fn release(self, result: &mut CollisionResult, column: i32) {
        let stale = indices(result, Axis::Y, |c| {
            c.is_valid() && c.source() == CollisionSource::Slope && c.tile_x() != column
        });
        for i in stale {
            result.invalidate(Axis::Y, i);
        }
        result.release_slope_node();
    }

    /// Hide probe collisions the ramp replaces: anything on the summit side
    /// and anything further into the ramp than its surface. Floor continuing
    /// from the low end and wall corners rising past the ramp stay.
    fn filter_ramp_y(self, result: &mut CollisionResult, tile_x: i32, surface: f32) {
        let ramp_edge = self.ramp_edge();
        let summit = self.summit_dir();
        let hidden = indices(result, Axis::Y, |c| {
            if !c.is_valid() || c.source() != CollisionSource::Probe || c.edge() != ramp_edge {
                return false;
            }
            let summit_side = (c.tile_x() - tile_x) * summit > 0;
            let beyond_surface = if self.is_floor() {
                c.position() > surface + SMALLEST_DISTANCE
            } else {
                c.position() < surface - SMALLEST_DISTANCE
            };
            summit_side || beyond_surface
        });
        for i in hidden {
            result.invalidate(Axis::Y, i);
        }
    }

    /// Nodes in the ramp's own row hit the summit's neighbour before the
    /// slope node gets there; those are not walls.
    fn filter_summit_x(self, result: &mut CollisionResult, tile_y: i32) {
        let summit = self.summit_dir() as f32;
        let premature = indices(result, Axis::X, |c| {
            c.is_valid()
                && c.source() == CollisionSource::Probe
                && c.kind().slope().is_none()
                && c.edge().sign() == summit
                && c.tile_y() == tile_y
        });
        for i in premature {
            result.invalidate(Axis::X, i);
        }
    }

    /// Walls in rows past the ramp's high side are real even if a
    /// neighbouring ramp dropped them.
    fn revalidate_walls(self, result: &mut CollisionResult, tile_y: i32) {
        let floor = self.is_floor();
        let walls = indices(result, Axis::X, |c| {
            !c.is_valid()
                && c.source() == CollisionSource::Probe
                && c.kind().slope().is_none()
                && if floor { c.tile_y() < tile_y } else { c.tile_y() > tile_y }
        });
        for i in walls {
            result.validate(Axis::X, i);
        }
    }
}

fn indices(result: &CollisionResult, axis: Axis, pred: impl Fn(&Collision) -> bool) -> Vec<usize> {
    result
        .collisions(axis)
        .iter()
        .enumerate()
        .filter(|(_, c)| pred(c))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::hitbox::Hitbox;
    use crate::physics::node::generate_nodes;
    use crate::physics::probe::collision_result;
    use crate::physics::result::TileHit;
    use crate::registry::tile::TileId;
    use crate::test_helpers::fixtures::{TestWorld, assert_near};
    use crate::world::tile::TileKind;

    #[test]
    fn ramp_heights() {
        assert_eq!(SlopeKind::RightFloor.calculate_y(0.25), 0.25);
        assert_eq!(SlopeKind::LeftFloor.calculate_y(0.25), 0.75);
        assert_eq!(SlopeKind::RightCeiling.calculate_y(0.6), 0.6);
        assert_eq!(SlopeKind::LeftCeiling.calculate_y(0.6), 1.0 - 0.6);
        // out of the tile clamps to its edges
        assert_eq!(SlopeKind::RightFloor.calculate_y(-0.5), 0.0);
        assert_eq!(SlopeKind::LeftFloor.calculate_y(1.5), 0.0);
        assert_eq!(SlopeKind::RightCeiling.calculate_y(7.0), TILE_SIZE);
    }

    #[test]
    fn surface_is_absolute() {
        assert_eq!(SlopeKind::RightFloor.surface_y(3, 2, 3.5), 2.5);
        assert_eq!(SlopeKind::LeftFloor.surface_y(3, 2, 3.25), 2.75);
    }

    #[test]
    fn slope_node_choice() {
        let nodes = generate_nodes(1.0, 1.0);
        let floor: Vec<usize> = (0..nodes.len())
            .filter(|&i| SlopeKind::LeftFloor.is_node_valid_for_slope(&nodes[i]))
            .collect();
        let ceiling: Vec<usize> = (0..nodes.len())
            .filter(|&i| SlopeKind::RightCeiling.is_node_valid_for_slope(&nodes[i]))
            .collect();
        assert_eq!(floor, vec![4]);
        assert_eq!(ceiling, vec![1]);
    }

    #[test]
    fn region_summit_and_base() {
        let kind = SlopeKind::RightFloor;
        let reach = 0.2;
        // on or under the ramp in its own column
        assert!(kind.is_point_in_slope_region(2, 1, 2.5, 1.5, reach));
        assert!(kind.is_point_in_slope_region(2, 1, 2.5, 2.1, reach));
        assert!(!kind.is_point_in_slope_region(2, 1, 2.5, 1.4, reach));
        assert!(!kind.is_point_in_slope_region(2, 1, 2.5, 2.3, reach));
        assert!(!kind.is_point_in_slope_region(2, 1, 3.1, 1.9, reach));
        // summit is up-left, base down-right
        assert!(kind.is_point_inside_summit(2, 1, 1.9, 1.1, reach));
        assert!(!kind.is_point_inside_summit(2, 1, 1.9, 0.9, reach));
        assert!(!kind.is_point_inside_summit(2, 1, 3.1, 1.1, reach));
        assert!(kind.is_point_inside_base(2, 1, 3.1, 1.9, reach));
        assert!(kind.is_point_inside_base(2, 1, 3.1, 2.1, reach));
        assert!(!kind.is_point_inside_base(2, 1, 1.9, 1.9, reach));

        let kind = SlopeKind::LeftCeiling;
        assert!(kind.is_point_in_slope_region(2, 1, 2.25, 1.5, reach));
        assert!(kind.is_point_in_slope_region(2, 1, 2.25, 0.9, reach));
        assert!(!kind.is_point_in_slope_region(2, 1, 2.25, 1.8, reach));
        assert!(kind.is_point_inside_summit(2, 1, 1.9, 1.95, reach));
        assert!(kind.is_point_inside_base(2, 1, 3.1, 1.05, reach));
    }

    #[test]
    fn only_ceilings_remove_speed() {
        assert!(!SlopeKind::RightFloor.should_remove_speed_on_collision());
        assert!(!SlopeKind::LeftFloor.should_remove_speed_on_collision());
        assert!(SlopeKind::LeftCeiling.should_remove_speed_on_collision());
        assert!(SlopeKind::RightCeiling.should_remove_speed_on_collision());
    }

    #[test]
    fn bounce_signs() {
        assert_eq!(SlopeKind::RightFloor.bounce_multipliers(), (1.0, 1.0));
        assert_eq!(SlopeKind::RightCeiling.bounce_multipliers(), (1.0, 1.0));
        assert_eq!(SlopeKind::LeftFloor.bounce_multipliers(), (-1.0, -1.0));
        assert_eq!(SlopeKind::LeftCeiling.bounce_multipliers(), (-1.0, -1.0));
    }

    /// Drop a 1x1 body onto a lone ramp at (2, 2) so its bottom-centre node
    /// lands at `p` into the tile; returns the resolved bottom edge.
    fn land_on(kind: char, p: f32) -> f32 {
        let row = format!("..{kind}..");
        let world = TestWorld::new(&[".....", ".....", row.as_str(), "#####"]);
        let surface = match kind {
            'r' => SlopeKind::RightFloor.surface_y(2, 2, 2.0 + p),
            _ => SlopeKind::LeftFloor.surface_y(2, 2, 2.0 + p),
        };
        let hitbox = Hitbox::new(1.5 + p, surface - 1.05, 1.0, 1.0);
        let result = collision_result(&world.ctx(), &hitbox, 0.0, 0.1);
        assert_eq!(result.resolved_slope().map(|k| k.is_floor()), Some(true));
        result.bottom()
    }

    #[test]
    fn floor_ramps_hold_the_slope_node_on_the_surface() {
        for p in [0.25, 0.5, 0.75] {
            assert_near(land_on('r', p), 2.0 + p);
            assert_near(land_on('l', p), 3.0 - p);
        }
    }

    #[test]
    fn full_height_face_is_a_wall() {
        let world = TestWorld::new(&[".....", "..r..", "#####"]);
        let walker = Hitbox::new(0.9, 1.0, 1.0, 1.0);
        let result = collision_result(&world.ctx(), &walker, 0.3, 0.0);
        assert!(result.collided_x());
        assert_near(result.left(), 1.0);
    }

    #[test]
    fn ramp_side_is_open() {
        let world = TestWorld::new(&[".....", "..r..", "#####"]);
        let walker = Hitbox::new(3.1, 1.0, 1.0, 1.0);
        let result = collision_result(&world.ctx(), &walker, -0.3, 0.0);
        assert!(!result.collided_x());
        // both left nodes entered the ramp's cell through the ramp side
        assert_eq!(result.collisions(Axis::X).len(), 2);
        assert!(result.collisions(Axis::X).iter().all(|c| !c.is_valid()));
        assert_near(result.left(), 2.8);
    }

    fn entry(kind: SlopeKind, tile_x: i32) -> PostProcessCollision {
        let nodes = generate_nodes(1.0, 1.0);
        PostProcessCollision {
            hit: TileHit {
                node: nodes[4],
                node_index: 4,
                tile: TileId(3),
                kind: TileKind::Slope(kind),
                tile_x,
                tile_y: 1,
            },
        }
    }

    #[test]
    fn owning_slope_beats_neighbours() {
        let kind = SlopeKind::RightFloor;
        let mut result = CollisionResult::new(&Hitbox::new(1.5, 0.0, 1.0, 1.0), 0.1, 0.1);
        assert!(kind.claim(&mut result, &entry(kind, 2), 1.5, 1.0, 2));
        assert!(!kind.claim(&mut result, &entry(kind, 1), 1.0, 1.0, 2));
        assert_eq!(result.collisions(Axis::Y).len(), 1);
        assert_eq!(result.nearest(Axis::Y).unwrap().tile_x(), 2);
    }

    #[test]
    fn last_neighbour_wins_until_owner_claims() {
        let kind = SlopeKind::RightFloor;
        let mut result = CollisionResult::new(&Hitbox::new(1.5, 0.0, 1.0, 1.0), 0.1, 0.1);
        assert!(kind.claim(&mut result, &entry(kind, 1), 1.0, 1.0, 2));
        assert!(kind.claim(&mut result, &entry(kind, 3), 1.2, 1.0, 2));
        assert_eq!(result.nearest(Axis::Y).unwrap().tile_x(), 3);
        assert!(!result.collisions(Axis::Y)[0].is_valid());

        assert!(kind.claim(&mut result, &entry(kind, 2), 1.5, 1.0, 2));
        assert_eq!(result.nearest(Axis::Y).unwrap().tile_x(), 2);
        assert_eq!(
            result.collisions(Axis::Y).iter().filter(|c| c.is_valid()).count(),
            1
        );
    }

    #[test]
    fn base_releases_the_slope_node() {
        let (ramp, neighbour) = (SlopeKind::RightFloor, SlopeKind::LeftFloor);
        // slope node goes from (1.1, 1.5) on the ramp to (1.6, 2.0), just
        // past its low end
        let mut result = CollisionResult::new(&Hitbox::new(0.6, 0.5, 1.0, 1.0), 0.5, 0.5);
        assert!(neighbour.claim(&mut result, &entry(neighbour, 3), 1.8, 1.5, 2));
        assert!(result.collided_y());

        ramp.post_process(&mut result, &entry(ramp, 1));
        assert!(result.is_slope_node_released());
        assert!(!result.collisions(Axis::Y)[0].is_valid());
        assert!(!result.collided_y());

        // later neighbours can't pull it back, the ramp below it still can
        assert!(!neighbour.claim(&mut result, &entry(neighbour, 3), 1.8, 1.5, 2));
        assert!(ramp.claim(&mut result, &entry(ramp, 2), 2.1, 1.5, 2));
        assert_eq!(result.nearest(Axis::Y).unwrap().tile_x(), 2);
    }

    fn wall(tile_y: i32) -> Collision {
        let nodes = generate_nodes(1.0, 1.0);
        let hit = TileHit {
            node: nodes[2],
            node_index: 2,
            tile: TileId::SOLID,
            kind: TileKind::Solid,
            tile_x: 4,
            tile_y,
        };
        Collision::new(hit, Edge::Right, 4.0, 3.6999, CollisionSource::Probe)
    }

    /// A ramp at (3, 2) holding the slope node drops the summit row's wall
    /// and brings back a neighbour-dropped wall in `wall_row`.
    fn summit_walls(kind: SlopeKind, node_index: usize, origin_y: f32, dy: f32, wall_row: i32) {
        let nodes = generate_nodes(1.0, 1.0);
        let mut result = CollisionResult::new(&Hitbox::new(2.7, origin_y, 1.0, 1.0), 0.4, dy);
        let dropped = result.add_collision_x(wall(wall_row));
        result.invalidate(Axis::X, dropped);
        let summit_row = result.add_collision_x(wall(2));

        let entry = PostProcessCollision {
            hit: TileHit {
                node: nodes[node_index],
                node_index,
                tile: TileId(3),
                kind: TileKind::Slope(kind),
                tile_x: 3,
                tile_y: 2,
            },
        };
        kind.post_process(&mut result, &entry);

        assert_eq!(result.resolved_slope(), Some(kind));
        assert!(result.collisions(Axis::X)[dropped].is_valid());
        assert!(!result.collisions(Axis::X)[summit_row].is_valid());
        assert_near(result.left(), 3.0);
    }

    #[test]
    fn walls_above_a_floor_summit_come_back() {
        summit_walls(SlopeKind::LeftFloor, 4, 1.75, 0.1, 1);
    }

    #[test]
    fn walls_below_a_ceiling_summit_come_back() {
        summit_walls(SlopeKind::RightCeiling, 1, 2.45, -0.1, 3);
    }

    /// Walk a 1x2 body right for 40 frames of 20 ms.
    fn walk_right(hitbox: &mut Hitbox, world: &TestWorld) {
        for _ in 0..40 {
            hitbox.set_speed_x(5.0, &world.config);
            hitbox.apply_gravity(&world.config, 20);
            hitbox.move_with_collision(&world.ctx(), 20, &mut ());
        }
    }

    #[test]
    fn wall_over_floor_summit_stops_climb() {
        let world = TestWorld::new(&[
            "........",
            "....####",
            "....####",
            "...l####",
            "########",
        ]);
        let mut hitbox = Hitbox::new(1.0, 2.0, 1.0, 2.0);
        walk_right(&mut hitbox, &world);
        assert_near(hitbox.x(), 3.0);
        // slope node at the ramp's midpoint
        assert_near(hitbox.y(), 1.5);
        assert!(hitbox.is_grounded());
    }

    #[test]
    fn wall_under_ceiling_summit_stops_slide() {
        let world = TestWorld::new(&[
            "########",
            "...R####",
            "....####",
            "........",
        ]);
        let mut hitbox = Hitbox::new(1.0, 1.0, 1.0, 2.0);
        hitbox.gravity_multiplier = -1.0;
        walk_right(&mut hitbox, &world);
        assert_near(hitbox.x(), 3.0);
        assert_near(hitbox.y(), 1.5);
        assert_eq!(hitbox.speed_y(), 0.0);
    }

    #[test]
    fn rising_into_left_ceiling_ramp() {
        let world = TestWorld::new(&[".....", "..L..", ".....", "#####"]);
        let mut hitbox = Hitbox::new(3.0, 1.9, 1.0, 1.0);
        hitbox.set_speed_x(-37.5, &world.config);
        hitbox.set_speed_y(-37.5, &world.config);
        let outcome = hitbox.move_with_collision(&world.ctx(), 20, &mut ());

        assert_eq!(outcome.slope, Some(SlopeKind::LeftCeiling));
        // top-centre node at 0.75 into the cell, where the ramp is 0.25 deep
        assert_near(hitbox.top(), 1.25);
        assert_near(hitbox.left(), 2.25);
        assert_eq!(hitbox.speed_y(), 0.0);
        assert_near(hitbox.speed_x(), -37.5);
        assert!(!hitbox.is_grounded());
    }
}
