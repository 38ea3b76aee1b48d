//! Hostile behavior: patrol the arena, chase and shoot the player when near.
//!
//! Patrol: walk toward a random waypoint, pick a new one on arrival.
//! Chase: walk toward the player, shoot when in fire range, and sometimes
//! dash in from mid range.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use arena_combat::fsm::{self, DashOutcome};
use arena_core::components::{Combatant, Hostile, HostileBrain, Player};
use arena_core::enums::AiState;
use arena_core::events::CombatEvent;
use arena_core::types::{Position, Velocity};

use crate::config::HostileAiConfig;
use crate::scheduler::{ScheduledAction, Scheduler};
use crate::score::ScoreState;
use crate::systems::weapons::{self, TriggerPull};
use crate::world_setup::random_arena_point;

/// Run hostile AI for every living hostile.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    scheduler: &mut Scheduler,
    score: &mut ScoreState,
    events: &mut Vec<CombatEvent>,
    ai: &HostileAiConfig,
    now_ms: u64,
) {
    let Some(player_pos) = living_player_position(world) else {
        return;
    };

    let mut pulls = Vec::new();
    for (entity, (_hostile, pos, vel, combatant, brain)) in world.query_mut::<(
        &Hostile,
        &Position,
        &mut Velocity,
        &mut Combatant,
        &mut HostileBrain,
    )>() {
        if fsm::is_dead(combatant) {
            continue;
        }

        let distance = pos.distance_to(&player_pos);
        if distance < ai.detection_range {
            brain.state = AiState::Chase;

            if !fsm::is_dashing(combatant) {
                *vel = chase_velocity(*pos, player_pos, combatant.move_speed);

                let in_dash_band = distance > ai.dash_min_range && distance < ai.dash_max_range;
                if in_dash_band
                    && rng.gen::<f64>() < ai.dash_chance
                    && fsm::can_dash(combatant, now_ms)
                {
                    let direction = player_pos.as_vec() - pos.as_vec();
                    if let DashOutcome::Started {
                        velocity,
                        ends_at_ms,
                    } = fsm::try_dash(combatant, now_ms, direction)
                    {
                        *vel = velocity;
                        scheduler.schedule(ends_at_ms, ScheduledAction::EndDash { entity });
                        events.push(CombatEvent::Dash {
                            side: combatant.side,
                            position: *pos,
                        });
                        debug!(entity = ?entity, distance, "hostile dash");
                    }
                }
            }

            if distance < ai.fire_range && fsm::try_fire(combatant, now_ms, true).is_ok() {
                pulls.push(TriggerPull {
                    side: combatant.side,
                    weapon: combatant.weapon,
                    origin: *pos,
                    angle: pos.angle_to(&player_pos),
                });
            }
        } else {
            if brain.state != AiState::Patrol {
                debug!(entity = ?entity, "hostile lost the player");
            }
            brain.state = AiState::Patrol;
            if pos.distance_to(&brain.patrol_target) < ai.patrol_arrival_radius {
                brain.patrol_target = random_arena_point(rng);
            }
            *vel = chase_velocity(*pos, brain.patrol_target, combatant.move_speed);
        }
    }

    for pull in pulls {
        weapons::release(world, scheduler, events, score, pull, now_ms);
    }
}

/// Velocity of magnitude `speed` from `from` toward `to`.
pub fn chase_velocity(from: Position, to: Position, speed: f64) -> Velocity {
    Velocity::from_angle(from.angle_to(&to), speed)
}

/// Resume chasing at walking speed when a hostile dash ends.
pub fn resume_after_dash(world: &mut World, entity: Entity) {
    let Some(player_pos) = living_player_position(world) else {
        return;
    };
    if let Ok((pos, vel, combatant, brain)) = world
        .query_one_mut::<(&Position, &mut Velocity, &Combatant, &HostileBrain)>(entity)
    {
        if brain.state == AiState::Chase && !fsm::is_dead(combatant) {
            *vel = chase_velocity(*pos, player_pos, combatant.move_speed);
        }
    }
}

fn living_player_position(world: &World) -> Option<Position> {
    world
        .query::<(&Player, &Position, &Combatant)>()
        .iter()
        .find(|(_, (_, _, c))| !fsm::is_dead(c))
        .map(|(_, (_, pos, _))| *pos)
}
