use bevy::prelude::*;

use crate::physics::hitbox::{Hitbox, HitboxListener};
use crate::registry::physics::PhysicsConfig;
use crate::world::ctx::WorldCtx;

/// State change reported by a hitbox during the last movement step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitboxEvent {
    Moved,
    Landed,
    LeftGround,
    FallingOutOfBounds,
    FallenOutOfBounds,
}

/// Events of the current frame. Cleared before every movement step.
#[derive(Component, Debug, Default)]
pub struct HitboxEvents(pub Vec<HitboxEvent>);

impl HitboxEvents {
    pub fn contains(&self, event: HitboxEvent) -> bool {
        self.0.contains(&event)
    }
}

impl HitboxListener for HitboxEvents {
    fn hitbox_moved(&mut self, _: &Hitbox) {
        self.0.push(HitboxEvent::Moved);
    }

    fn hitbox_landed(&mut self, _: &Hitbox) {
        self.0.push(HitboxEvent::Landed);
    }

    fn hitbox_left_ground(&mut self, _: &Hitbox) {
        self.0.push(HitboxEvent::LeftGround);
    }

    fn hitbox_falling_out_of_bounds(&mut self, _: &Hitbox) {
        self.0.push(HitboxEvent::FallingOutOfBounds);
    }

    fn hitbox_fallen_out_of_bounds(&mut self, _: &Hitbox) {
        self.0.push(HitboxEvent::FallenOutOfBounds);
    }
}

/// Frame time in whole milliseconds, capped so a stall doesn't launch bodies.
pub fn frame_delta_ms(time: &Time, config: &PhysicsConfig) -> u32 {
    let ms = (time.delta_secs() * 1000.0).round() as u32;
    ms.min(config.max_delta_ms)
}

pub fn apply_forces(time: Res<Time>, config: Res<PhysicsConfig>, mut query: Query<&mut Hitbox>) {
    let delta_ms = frame_delta_ms(&time, &config);
    for mut hitbox in &mut query {
        hitbox.apply_gravity(&config, delta_ms);
        if hitbox.is_grounded() {
            hitbox.apply_ground_friction(&config, delta_ms);
        } else {
            hitbox.apply_air_friction_x(&config, delta_ms);
            hitbox.apply_air_friction_y(&config, delta_ms);
        }
    }
}

pub fn move_hitboxes(
    time: Res<Time>,
    ctx: WorldCtx,
    mut query: Query<(&mut Hitbox, Option<&mut HitboxEvents>)>,
) {
    let ctx = match ctx.as_ref() {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Skipping hitbox movement: {e}");
            return;
        }
    };
    let delta_ms = frame_delta_ms(&time, ctx.config);
    if delta_ms == 0 {
        return;
    }
    for (mut hitbox, events) in &mut query {
        match events {
            Some(mut events) => {
                events.0.clear();
                hitbox.move_with_collision(&ctx, delta_ms, &mut *events);
            }
            None => {
                hitbox.move_with_collision(&ctx, delta_ms, &mut ());
            }
        }
    }
}

/// Place sprites at their hitbox centre. World y grows down, screen y up.
pub fn sync_transforms(
    config: Res<PhysicsConfig>,
    mut query: Query<(&Hitbox, &mut Transform), Changed<Hitbox>>,
) {
    let scale = config.pixels_per_tile;
    for (hitbox, mut transform) in &mut query {
        transform.translation.x = (hitbox.x() + hitbox.width() / 2.0) * scale;
        transform.translation.y = -(hitbox.y() + hitbox.height() / 2.0) * scale;
    }
}
