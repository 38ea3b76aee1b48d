//! Player control: walking, auto-aim, dash and fire requests.
//!
//! Targeting is recomputed before the dash and fire requests are evaluated,
//! so a trigger pull always sees this tick's lock.

use glam::DVec2;
use hecs::{Entity, World};
use tracing::debug;

use arena_combat::fsm::{self, DashOutcome};
use arena_combat::targeting::{Candidate, TargetingSystem};
use arena_core::components::{Combatant, Hostile, Player, PlayerInput};
use arena_core::enums::LifeState;
use arena_core::events::CombatEvent;
use arena_core::types::{Position, Velocity};

use crate::scheduler::{ScheduledAction, Scheduler};
use crate::score::ScoreState;
use crate::systems::weapons::{self, TriggerPull};

/// Run player control for this tick.
pub fn run(
    world: &mut World,
    targeting: &mut TargetingSystem<Entity>,
    scheduler: &mut Scheduler,
    score: &mut ScoreState,
    events: &mut Vec<CombatEvent>,
    now_ms: u64,
) {
    let candidates = hostile_candidates(world);

    let mut pull = None;
    for (entity, (_player, pos, vel, combatant, input)) in world.query_mut::<(
        &Player,
        &Position,
        &mut Velocity,
        &mut Combatant,
        &mut PlayerInput,
    )>() {
        let fire_requested = std::mem::take(&mut input.fire_requested);
        let dash_requested = std::mem::take(&mut input.dash_requested);

        if fsm::is_dead(combatant) {
            targeting.clear();
            continue;
        }

        if !fsm::is_dashing(combatant) {
            *vel = walk_velocity(input.move_dir, combatant.move_speed);
        }

        targeting.find_target(*pos, &candidates, combatant.weapon);

        if dash_requested {
            let direction = fsm::resolve_dash_direction(input.move_dir, *pos, input.pointer)
                .unwrap_or(DVec2::ZERO);
            match fsm::try_dash(combatant, now_ms, direction) {
                DashOutcome::Started {
                    velocity,
                    ends_at_ms,
                } => {
                    *vel = velocity;
                    scheduler.schedule(ends_at_ms, ScheduledAction::EndDash { entity });
                    events.push(CombatEvent::Dash {
                        side: combatant.side,
                        position: *pos,
                    });
                    debug!(x = pos.x, y = pos.y, "player dash");
                }
                DashOutcome::Rejected(reason) => {
                    debug!(?reason, "player dash rejected");
                }
            }
        }

        if fire_requested {
            match fsm::try_fire(combatant, now_ms, targeting.has_target()) {
                Ok(()) => {
                    pull = targeting.aim_angle().map(|angle| TriggerPull {
                        side: combatant.side,
                        weapon: combatant.weapon,
                        origin: *pos,
                        angle,
                    });
                }
                Err(reason) => debug!(?reason, "player fire rejected"),
            }
        }
    }

    if let Some(pull) = pull {
        weapons::release(world, scheduler, events, score, pull, now_ms);
    }
}

/// Walking velocity for a held direction; diagonals are normalized.
pub fn walk_velocity(move_dir: DVec2, speed: f64) -> Velocity {
    Velocity::from(move_dir.normalize_or_zero() * speed)
}

/// Every hostile as a targeting candidate.
fn hostile_candidates(world: &World) -> Vec<Candidate<Entity>> {
    world
        .query::<(&Hostile, &Position, &Combatant)>()
        .iter()
        .map(|(entity, (_, pos, c))| Candidate {
            id: entity,
            position: *pos,
            alive: c.life == LifeState::Alive,
        })
        .collect()
}

/// Restore walking velocity when a player dash ends.
pub fn resume_after_dash(world: &mut World, entity: Entity) {
    if let Ok((vel, combatant, input)) =
        world.query_one_mut::<(&mut Velocity, &Combatant, &PlayerInput)>(entity)
    {
        *vel = walk_velocity(input.move_dir, combatant.move_speed);
    }
}
