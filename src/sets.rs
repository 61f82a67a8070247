use bevy::prelude::*;

/// System ordering for one physics tick.
///
/// Configured as a chain: Forces → Movement → Sync.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PhysicsSet {
    Forces,
    Movement,
    Sync,
}
