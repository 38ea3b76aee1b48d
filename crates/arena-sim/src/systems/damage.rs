//! Damage application: routes a hit through the victim's state machine and
//! handles what follows (invulnerability timer, death, reward).

use hecs::{Entity, World};
use tracing::{debug, info};

use arena_combat::fsm::{self, DamageOutcome};
use arena_core::components::Combatant;
use arena_core::enums::{Side, WeaponKind};
use arena_core::events::CombatEvent;
use arena_core::types::Position;

use crate::config::EncounterConfig;
use crate::scheduler::{ScheduledAction, Scheduler};
use crate::score::ScoreState;

/// Apply a projectile hit of `amount` damage to `victim`.
///
/// Emits a `Hit` event whose `is_kill` is decided before damage lands.
/// Returns `None` if the victim no longer exists.
#[allow(clippy::too_many_arguments)]
pub fn apply_hit(
    world: &mut World,
    scheduler: &mut Scheduler,
    score: &mut ScoreState,
    events: &mut Vec<CombatEvent>,
    encounter: &EncounterConfig,
    victim: Entity,
    amount: i32,
    weapon: WeaponKind,
    now_ms: u64,
) -> Option<DamageOutcome> {
    let Ok((position, combatant)) = world.query_one_mut::<(&Position, &mut Combatant)>(victim)
    else {
        return None;
    };
    let position = *position;

    let is_kill = amount > 0 && fsm::would_kill(combatant, amount);
    events.push(CombatEvent::Hit {
        position,
        weapon_kind: weapon,
        victim_side: combatant.side,
        is_kill,
    });

    let outcome = fsm::take_damage(combatant, amount, now_ms);
    match outcome {
        DamageOutcome::Wounded {
            invulnerable_until_ms: Some(until),
            ..
        } => {
            if let Some(previous) = combatant.invulnerability_timer.take() {
                scheduler.cancel(previous);
            }
            combatant.invulnerability_timer = Some(
                scheduler.schedule(until, ScheduledAction::EndInvulnerability { entity: victim }),
            );
        }
        DamageOutcome::Killed => {
            if let Some(pending) = combatant.invulnerability_timer.take() {
                scheduler.cancel(pending);
            }
            let side = combatant.side;
            events.push(CombatEvent::Death {
                entity: victim.to_bits().get(),
                side,
                position,
            });
            match side {
                Side::Hostile => {
                    let total = score.record_kill(encounter.kill_reward);
                    events.push(CombatEvent::Reward {
                        amount: encounter.kill_reward,
                        total,
                    });
                    info!(
                        entity = ?victim,
                        ?weapon,
                        kills = score.kills,
                        earned = total,
                        "hostile killed"
                    );
                }
                Side::Friendly => {
                    info!(?weapon, x = position.x, y = position.y, "player killed");
                }
            }
        }
        DamageOutcome::Wounded { .. } | DamageOutcome::Ignored(_) => {}
    }

    Some(outcome)
}

/// Scheduled invulnerability expiry.
pub fn end_invulnerability(world: &mut World, entity: Entity, now_ms: u64) {
    if let Ok(mut combatant) = world.get::<&mut Combatant>(entity) {
        if fsm::end_invulnerability(&mut combatant, now_ms) {
            debug!(entity = ?entity, "invulnerability ended");
        }
    }
}
