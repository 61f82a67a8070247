use bevy::prelude::*;
use serde::Deserialize;

use crate::math::{Aabb, SMALLEST_DISTANCE};
use crate::physics::node::{CollisionNode, Edge, generate_nodes};
use crate::physics::probe::collision_result;
use crate::physics::result::Axis;
use crate::registry::physics::PhysicsConfig;
use crate::world::ctx::WorldCtxRef;
use crate::world::tile::SlopeKind;

/// Named collision switches of a hitbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CollisionFlags {
    /// Collides with the tile grid at all.
    pub solid: bool,
    /// Rides along ramps instead of bouncing off them.
    pub traverses_slopes: bool,
}

impl Default for CollisionFlags {
    fn default() -> Self {
        Self {
            solid: true,
            traverses_slopes: true,
        }
    }
}

/// Receives state changes from [`Hitbox::move_with_collision`].
pub trait HitboxListener {
    fn hitbox_moved(&mut self, _hitbox: &Hitbox) {}
    fn hitbox_landed(&mut self, _hitbox: &Hitbox) {}
    fn hitbox_left_ground(&mut self, _hitbox: &Hitbox) {}
    /// Bottom edge below the level, top edge still inside.
    fn hitbox_falling_out_of_bounds(&mut self, _hitbox: &Hitbox) {}
    /// Whole hitbox below the level.
    fn hitbox_fallen_out_of_bounds(&mut self, _hitbox: &Hitbox) {}
}

impl HitboxListener for () {}

/// What one movement attempt did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementOutcome {
    pub moved: bool,
    pub collided_x: bool,
    pub collided_y: bool,
    pub grounded: bool,
    pub slope: Option<SlopeKind>,
}

/// Axis-aligned body moving through the tile grid.
///
/// Position is the top-left corner in world units, speeds are world units
/// per second. The probe nodes are fixed when the hitbox is built.
#[derive(Component, Debug, Clone)]
pub struct Hitbox {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    speed_x: f32,
    speed_y: f32,
    max_speed_x: f32,
    max_speed_y: f32,
    flags: CollisionFlags,
    grounded: bool,
    ms_since_grounded: u32,
    pub friction_multiplier: f32,
    pub gravity_multiplier: f32,
    pub bounce_coefficient: f32,
    nodes: Box<[CollisionNode]>,
}

impl Hitbox {
    /// Sizes below two [`SMALLEST_DISTANCE`]s are raised to it.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        let width = width.max(2.0 * SMALLEST_DISTANCE);
        let height = height.max(2.0 * SMALLEST_DISTANCE);
        Self {
            x,
            y,
            width,
            height,
            speed_x: 0.0,
            speed_y: 0.0,
            max_speed_x: f32::INFINITY,
            max_speed_y: f32::INFINITY,
            flags: CollisionFlags::default(),
            grounded: false,
            ms_since_grounded: 0,
            friction_multiplier: 1.0,
            gravity_multiplier: 1.0,
            bounce_coefficient: 1.0,
            nodes: generate_nodes(width, height).into_boxed_slice(),
        }
    }

    pub fn with_flags(mut self, flags: CollisionFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_max_speed(mut self, max_x: f32, max_y: f32) -> Self {
        self.max_speed_x = max_x.abs();
        self.max_speed_y = max_y.abs();
        self
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn right(&self) -> f32 {
        self.x + self.width - SMALLEST_DISTANCE
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height - SMALLEST_DISTANCE
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_top_left(self.x, self.y, self.width, self.height)
    }

    pub fn nodes(&self) -> &[CollisionNode] {
        &self.nodes
    }

    pub fn flags(&self) -> CollisionFlags {
        self.flags
    }

    pub fn speed_x(&self) -> f32 {
        self.speed_x
    }

    pub fn speed_y(&self) -> f32 {
        self.speed_y
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn ms_since_grounded(&self) -> u32 {
        self.ms_since_grounded
    }

    /// Speeds slower than the config's moving threshold snap to zero.
    pub fn set_speed_x(&mut self, speed: f32, config: &PhysicsConfig) {
        self.speed_x = clamp_speed(speed, self.max_speed_x, config.min_moving_speed);
    }

    pub fn set_speed_y(&mut self, speed: f32, config: &PhysicsConfig) {
        self.speed_y = clamp_speed(speed, self.max_speed_y, config.min_moving_speed);
    }

    pub fn apply_gravity(&mut self, config: &PhysicsConfig, delta_ms: u32) {
        let gain = config.gravity * self.gravity_multiplier * delta_ms as f32 / 1000.0;
        self.set_speed_y(self.speed_y + gain, config);
    }

    pub fn apply_ground_friction(&mut self, config: &PhysicsConfig, delta_ms: u32) {
        let decay = config.ground_friction.powf(delta_ms as f32 * self.friction_multiplier);
        self.set_speed_x(self.speed_x * decay, config);
    }

    pub fn apply_air_friction_x(&mut self, config: &PhysicsConfig, delta_ms: u32) {
        let decay = config.air_friction_x.powf(delta_ms as f32 * self.friction_multiplier);
        self.set_speed_x(self.speed_x * decay, config);
    }

    pub fn apply_air_friction_y(&mut self, config: &PhysicsConfig, delta_ms: u32) {
        let decay = config.air_friction_y.powf(delta_ms as f32 * self.friction_multiplier);
        self.set_speed_y(self.speed_y * decay, config);
    }

    /// Accelerate by `(ax, ay)` world units per second squared.
    pub fn apply_acceleration(&mut self, config: &PhysicsConfig, delta_ms: u32, ax: f32, ay: f32) {
        let seconds = delta_ms as f32 / 1000.0;
        self.set_speed_x(self.speed_x + ax * seconds, config);
        self.set_speed_y(self.speed_y + ay * seconds, config);
    }

    /// Switch between grounded and airborne, notifying on actual changes.
    pub fn set_grounded(&mut self, grounded: bool, listener: &mut dyn HitboxListener) {
        if self.grounded == grounded {
            return;
        }
        self.grounded = grounded;
        self.ms_since_grounded = 0;
        if grounded {
            listener.hitbox_landed(self);
        } else {
            listener.hitbox_left_ground(self);
        }
    }

    /// Move by the current speed over `delta_ms`, stopping at the grid.
    pub fn move_with_collision(
        &mut self,
        ctx: &WorldCtxRef,
        delta_ms: u32,
        listener: &mut dyn HitboxListener,
    ) -> MovementOutcome {
        let dx = self.speed_x * delta_ms as f32 / 1000.0;
        let dy = self.speed_y * delta_ms as f32 / 1000.0;
        let result = collision_result(ctx, self, dx, dy);

        let (old_x, old_y) = (self.x, self.y);
        let (speed_x, speed_y) = (self.speed_x, self.speed_y);
        self.x = result.left();
        self.y = result.top();
        let moved = self.x != old_x || self.y != old_y;

        let collided_x = result.collided_x();
        let collided_y = result.collided_y();
        let slope = result.resolved_slope();
        if collided_x {
            self.speed_x = 0.0;
        }
        if collided_y {
            match slope {
                Some(kind) if !self.flags.traverses_slopes => {
                    self.bounce_off(kind, speed_x, speed_y, ctx.config)
                }
                Some(kind) if kind.should_remove_speed_on_collision() => self.speed_y = 0.0,
                // A 45 degree ramp never drops faster than the body walks, so
                // falling speed beyond that would only build up while resting.
                Some(_) => self.speed_y = self.speed_y.min(self.speed_x.abs()),
                None => self.speed_y = 0.0,
            }
        }

        let landed = result
            .nearest(Axis::Y)
            .is_some_and(|c| c.edge() == Edge::Bottom);
        if !landed && !self.grounded {
            self.ms_since_grounded = self.ms_since_grounded.saturating_add(delta_ms);
        }
        self.set_grounded(landed, listener);

        if moved {
            listener.hitbox_moved(self);
        }
        let level_bottom = ctx.layer.bounds().max_y;
        if self.top() > level_bottom {
            listener.hitbox_fallen_out_of_bounds(self);
        } else if self.bottom() > level_bottom {
            listener.hitbox_falling_out_of_bounds(self);
        }

        MovementOutcome {
            moved,
            collided_x,
            collided_y,
            grounded: self.grounded,
            slope,
        }
    }

    /// Reflect the pre-move speed off a ramp: axes swap, signs follow the
    /// ramp's orientation.
    fn bounce_off(&mut self, kind: SlopeKind, speed_x: f32, speed_y: f32, config: &PhysicsConfig) {
        let (mx, my) = kind.bounce_multipliers();
        self.set_speed_x(mx * speed_y * self.bounce_coefficient, config);
        self.set_speed_y(my * speed_x * self.bounce_coefficient, config);
    }
}

fn clamp_speed(speed: f32, max: f32, min_moving: f32) -> f32 {
    if speed.abs() < min_moving {
        return 0.0;
    }
    speed.clamp(-max, max)
}
