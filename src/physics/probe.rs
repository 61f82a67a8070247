use bevy::prelude::*;

use crate::math::{MAX_STEP, tile_coord};
use crate::physics::block::Probe;
use crate::physics::hitbox::Hitbox;
use crate::physics::node::{CollisionNode, Edge};
use crate::physics::result::{CollisionResult, PostProcessCollision, TileHit};
use crate::world::ctx::WorldCtxRef;
use crate::world::tile::TileKind;

/// Limit a displacement to [`MAX_STEP`] per axis, keeping its direction.
///
/// Larger steps could skip a whole tile. This only happens on lag spikes and
/// costs accuracy, so it is logged rather than treated as an error.
pub fn clamp_displacement(dx: f32, dy: f32) -> (f32, f32) {
    let (mut cx, mut cy) = (dx, dy);
    if cx.abs() > MAX_STEP {
        cy *= MAX_STEP / cx.abs();
        cx = MAX_STEP.copysign(cx);
    }
    if cy.abs() > MAX_STEP {
        cx *= MAX_STEP / cy.abs();
        cy = MAX_STEP.copysign(cy);
    }
    if (cx, cy) != (dx, dy) {
        warn!("Clamped hitbox displacement ({dx}, {dy}) to ({cx}, {cy})");
    }
    (cx, cy)
}

/// Probe the grid for `hitbox` attempting to move by `(dx, dy)`.
///
/// The x axis is probed first from the pre-move position. The y axis is
/// probed at the *attempted* x, not the resolved one. Slope tiles then get
/// to rewrite the result in [`CollisionResult::finish`].
pub fn collision_result(ctx: &WorldCtxRef, hitbox: &Hitbox, dx: f32, dy: f32) -> CollisionResult {
    let (dx, dy) = clamp_displacement(dx, dy);
    let mut result = CollisionResult::new(hitbox, dx, dy);
    if hitbox.flags().solid {
        probe_x(ctx, hitbox, dx, &mut result);
        probe_y(ctx, hitbox, dx, dy, &mut result);
        detect_post_processing(ctx, hitbox, dx, dy, &mut result);
    }
    result.finish();
    result
}

fn tile_hit(ctx: &WorldCtxRef, node: CollisionNode, node_index: usize, px: f32, py: f32) -> TileHit {
    let (tile_x, tile_y) = (tile_coord(px), tile_coord(py));
    let (tile, kind) = ctx.tile_at(tile_x, tile_y);
    TileHit {
        node,
        node_index,
        tile,
        kind,
        tile_x,
        tile_y,
    }
}

fn probe_x(ctx: &WorldCtxRef, hitbox: &Hitbox, dx: f32, result: &mut CollisionResult) {
    if dx == 0.0 {
        return;
    }
    let edge = Edge::leading_x(dx);
    for (i, node) in hitbox.nodes().iter().enumerate() {
        if !node.is_on(edge) {
            continue;
        }
        let from = hitbox.x() + node.x();
        let hit = tile_hit(ctx, *node, i, from + dx, hitbox.y() + node.y());
        if !hit.kind.is_collidable() {
            continue;
        }
        let probe = Probe { hit, edge, from };
        if let Some(collision) = hit.kind.check_x(&probe) {
            result.add_collision_x(collision);
        }
    }
}

fn probe_y(ctx: &WorldCtxRef, hitbox: &Hitbox, dx: f32, dy: f32, result: &mut CollisionResult) {
    if dy == 0.0 {
        return;
    }
    let edge = Edge::leading_y(dy);
    for (i, node) in hitbox.nodes().iter().enumerate() {
        if !node.is_on(edge) {
            continue;
        }
        let from = hitbox.y() + node.y();
        let hit = tile_hit(ctx, *node, i, hitbox.x() + node.x() + dx, from + dy);
        if !hit.kind.is_collidable() {
            continue;
        }
        let probe = Probe { hit, edge, from };
        if let Some(collision) = hit.kind.check_y(&probe) {
            result.add_collision_y(collision);
        }
    }
}

/// Register every node touching a post-processing tile before moving, after
/// the x step only, and after both steps.
fn detect_post_processing(
    ctx: &WorldCtxRef,
    hitbox: &Hitbox,
    dx: f32,
    dy: f32,
    result: &mut CollisionResult,
) {
    for (step_x, step_y) in [(0.0, 0.0), (dx, 0.0), (dx, dy)] {
        for (i, node) in hitbox.nodes().iter().enumerate() {
            let px = hitbox.x() + node.x() + step_x;
            let py = hitbox.y() + node.y() + step_y;
            let hit = tile_hit(ctx, *node, i, px, py);
            if hit.kind.needs_post_processing() {
                result.add_post_process(PostProcessCollision { hit });
            }

            // A slope node just under a floor ramp (or over a ceiling ramp)
            // still belongs to it: this is how one ramp hands over to the
            // next one up.
            let neighbour_row = if node.is_floor_slope_node() {
                Some(hit.tile_y - 1)
            } else if node.is_ceiling_slope_node() {
                Some(hit.tile_y + 1)
            } else {
                None
            };
            if let Some(row) = neighbour_row {
                let (tile, kind) = ctx.tile_at(hit.tile_x, row);
                let matches = match kind {
                    TileKind::Slope(slope) => slope.is_floor() == node.is_floor_slope_node(),
                    _ => false,
                };
                if matches {
                    result.add_post_process(PostProcessCollision {
                        hit: TileHit {
                            tile,
                            kind,
                            tile_y: row,
                            ..hit
                        },
                    });
                }
            }
        }
    }
}
