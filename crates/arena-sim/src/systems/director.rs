//! Encounter director: initial hostiles and the periodic spawn.
//!
//! The periodic spawn is a self-rescheduling `SpawnHostile` event. Each time
//! it comes due one hostile is added, but only while fewer than the cap are
//! alive.

use hecs::World;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use arena_combat::fsm;
use arena_core::components::{Combatant, Hostile};

use crate::config::ArenaConfig;
use crate::scheduler::{ScheduledAction, Scheduler};
use crate::world_setup;

/// Spawn the opening hostiles and schedule the first periodic spawn.
pub fn start_match(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    scheduler: &mut Scheduler,
    config: &ArenaConfig,
    now_ms: u64,
) {
    for _ in 0..config.encounter.initial_hostiles {
        spawn_at_perimeter(world, rng, config);
    }
    scheduler.schedule(
        now_ms + config.encounter.spawn_interval_ms,
        ScheduledAction::SpawnHostile,
    );
}

/// Handle `spawn_requests` due periodic spawns and reschedule the next one.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    scheduler: &mut Scheduler,
    config: &ArenaConfig,
    spawn_requests: u32,
    now_ms: u64,
) {
    if spawn_requests == 0 {
        return;
    }

    for _ in 0..spawn_requests {
        let alive = alive_hostiles(world);
        if alive < config.encounter.max_hostiles {
            spawn_at_perimeter(world, rng, config);
        } else {
            debug!(alive, cap = config.encounter.max_hostiles, "hostile spawn skipped");
        }
    }

    scheduler.schedule(
        now_ms + config.encounter.spawn_interval_ms,
        ScheduledAction::SpawnHostile,
    );
}

/// Hostiles still alive.
pub fn alive_hostiles(world: &World) -> usize {
    world
        .query::<(&Hostile, &Combatant)>()
        .iter()
        .filter(|(_, (_, c))| !fsm::is_dead(c))
        .count()
}

fn spawn_at_perimeter(world: &mut World, rng: &mut ChaCha8Rng, config: &ArenaConfig) {
    let position = world_setup::perimeter_point(rng);
    let entity = world_setup::spawn_hostile(world, rng, &config.hostile, position);
    let weapon = world.get::<&Combatant>(entity).map(|c| c.weapon).ok();
    info!(
        entity = ?entity,
        x = position.x,
        y = position.y,
        ?weapon,
        "hostile spawned"
    );
}
