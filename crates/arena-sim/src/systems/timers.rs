//! Scheduled event dispatch.
//!
//! Runs every due scheduler record in fire-time order. Periodic hostile
//! spawns are handed back to the encounter director, which runs next.

use hecs::{Entity, World};

use arena_combat::fsm;
use arena_core::components::{Combatant, Hostile, Player};
use arena_core::events::CombatEvent;

use crate::scheduler::{ScheduledAction, ScheduledEvent};
use crate::score::ScoreState;
use crate::systems::{damage, hostile_ai, pickups, player_control, weapons};

/// Dispatch `due` events. Returns the number of hostile spawn ticks that came due.
pub fn run(
    world: &mut World,
    due: Vec<ScheduledEvent>,
    score: &mut ScoreState,
    events: &mut Vec<CombatEvent>,
    now_ms: u64,
) -> u32 {
    let mut spawn_requests = 0;

    for event in due {
        match event.action {
            ScheduledAction::BurstShot {
                side,
                weapon,
                origin,
                angle,
            } => {
                weapons::launch(world, events, score, side, weapon, origin, angle);
            }
            ScheduledAction::EndInvulnerability { entity } => {
                damage::end_invulnerability(world, entity, now_ms);
            }
            ScheduledAction::EndDash { entity } => end_dash(world, entity),
            ScheduledAction::RespawnPickup { pickup } => {
                pickups::respawn(world, pickup, events);
            }
            ScheduledAction::SpawnHostile => spawn_requests += 1,
        }
    }

    spawn_requests
}

/// Leave the Dashing state and hand the body back to its controller.
fn end_dash(world: &mut World, entity: Entity) {
    let ended = match world.get::<&mut Combatant>(entity) {
        Ok(mut combatant) => fsm::end_dash(&mut combatant),
        Err(_) => false,
    };
    if !ended {
        return;
    }

    if world.satisfies::<&Player>(entity).unwrap_or(false) {
        player_control::resume_after_dash(world, entity);
    } else if world.satisfies::<&Hostile>(entity).unwrap_or(false) {
        hostile_ai::resume_after_dash(world, entity);
    }
}
