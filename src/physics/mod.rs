pub mod block;
pub mod hitbox;
pub mod node;
pub mod probe;
pub mod result;
pub mod slope;
pub mod systems;

use bevy::prelude::*;

use crate::registry::AppState;
use crate::sets::PhysicsSet;

pub use probe::{clamp_displacement, collision_result};

pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (PhysicsSet::Forces, PhysicsSet::Movement, PhysicsSet::Sync)
                .chain()
                .run_if(in_state(AppState::InGame)),
        )
        .add_systems(Update, systems::apply_forces.in_set(PhysicsSet::Forces))
        .add_systems(Update, systems::move_hitboxes.in_set(PhysicsSet::Movement))
        .add_systems(Update, systems::sync_transforms.in_set(PhysicsSet::Sync));
    }
}
