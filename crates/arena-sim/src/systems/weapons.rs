//! Projectile emission: turns a trigger pull into projectiles and scheduled
//! burst rounds.

use hecs::{Entity, World};

use arena_combat::emission::{plan_shots, projectile_velocity};
use arena_core::components::Projectile;
use arena_core::enums::{ProjectileState, Side, WeaponKind};
use arena_core::events::CombatEvent;
use arena_core::types::Position;
use arena_core::weapons::config_for;

use crate::scheduler::{ScheduledAction, Scheduler};
use crate::score::ScoreState;

/// A trigger pull that already passed its fire gate.
#[derive(Debug, Clone, Copy)]
pub struct TriggerPull {
    pub side: Side,
    pub weapon: WeaponKind,
    pub origin: Position,
    pub angle: f64,
}

/// Release every projectile of a trigger pull: immediate rounds now, later
/// burst rounds through the scheduler.
pub fn release(
    world: &mut World,
    scheduler: &mut Scheduler,
    events: &mut Vec<CombatEvent>,
    score: &mut ScoreState,
    pull: TriggerPull,
    now_ms: u64,
) {
    for shot in plan_shots(pull.weapon, pull.origin, pull.angle) {
        if shot.delay_ms == 0 {
            launch(world, events, score, pull.side, pull.weapon, shot.origin, shot.angle);
        } else {
            scheduler.schedule(
                now_ms + shot.delay_ms,
                ScheduledAction::BurstShot {
                    side: pull.side,
                    weapon: pull.weapon,
                    origin: shot.origin,
                    angle: shot.angle,
                },
            );
        }
    }
}

/// Spawn one projectile and report it.
pub fn launch(
    world: &mut World,
    events: &mut Vec<CombatEvent>,
    score: &mut ScoreState,
    side: Side,
    weapon: WeaponKind,
    origin: Position,
    angle: f64,
) -> Entity {
    let entity = spawn_projectile(world, side, weapon, origin, angle);
    if side == Side::Friendly {
        score.shots_fired += 1;
    }
    events.push(CombatEvent::ShotFired {
        side,
        weapon_kind: weapon,
        position: origin,
        angle,
    });
    entity
}

/// Spawn an Active projectile carrying the archetype's damage and range.
pub fn spawn_projectile(
    world: &mut World,
    side: Side,
    weapon: WeaponKind,
    origin: Position,
    angle: f64,
) -> Entity {
    let archetype = config_for(weapon);
    world.spawn((
        origin,
        projectile_velocity(weapon, angle),
        Projectile {
            side,
            weapon,
            damage: archetype.damage,
            range: archetype.range,
            spawn: origin,
            state: ProjectileState::Active,
            retire_reason: None,
        },
    ))
}
