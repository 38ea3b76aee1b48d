//! Cleanup system: removes retired projectiles and dead hostiles.
//!
//! The player entity is never despawned here; a dead player stays in the
//! world so the final snapshot can still describe it.

use hecs::{Entity, World};

use arena_core::components::{Combatant, Hostile, Projectile};
use arena_core::enums::{LifeState, ProjectileState};

/// Despawn finished entities. Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, projectile) in world.query_mut::<&Projectile>() {
        if projectile.state == ProjectileState::Retired {
            despawn_buffer.push(entity);
        }
    }

    for (entity, (_hostile, combatant)) in world.query_mut::<(&Hostile, &Combatant)>() {
        if combatant.life == LifeState::Dead {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
