//! Projectile resolution: retires projectiles on walls, range and distance
//! from the player, and resolves hits against opposing combatants.
//!
//! Runs after movement. Each Active projectile is checked in order:
//! obstacle, range, hit, out of bounds. The first check that triggers retires
//! it; a Retired projectile is never checked again.

use hecs::{Entity, World};

use arena_combat::fsm;
use arena_core::components::{Combatant, Player, Projectile, Wall};
use arena_core::constants::{HIT_RADIUS, PROJECTILE_CULL_DISTANCE};
use arena_core::enums::{ProjectileState, RetireReason, Side, WeaponKind};
use arena_core::events::CombatEvent;
use arena_core::types::Position;

use crate::config::EncounterConfig;
use crate::scheduler::Scheduler;
use crate::score::ScoreState;
use crate::systems::{damage, movement};

/// Copy of the fields a projectile check needs, taken before any mutation.
struct InFlight {
    entity: Entity,
    position: Position,
    side: Side,
    weapon: WeaponKind,
    damage: i32,
    spawn: Position,
    range: f64,
}

/// Run the projectile resolver.
pub fn run(
    world: &mut World,
    scheduler: &mut Scheduler,
    score: &mut ScoreState,
    events: &mut Vec<CombatEvent>,
    encounter: &EncounterConfig,
    now_ms: u64,
) {
    let walls = movement::collect_walls(world);
    let player_pos = world
        .query::<(&Player, &Position)>()
        .iter()
        .next()
        .map(|(_, (_, pos))| *pos);

    let in_flight: Vec<InFlight> = world
        .query::<(&Position, &Projectile)>()
        .iter()
        .filter(|(_, (_, p))| p.state == ProjectileState::Active)
        .map(|(entity, (pos, p))| InFlight {
            entity,
            position: *pos,
            side: p.side,
            weapon: p.weapon,
            damage: p.damage,
            spawn: p.spawn,
            range: p.range,
        })
        .collect();

    for shot in in_flight {
        let reason = resolve(
            world, scheduler, score, events, encounter, &walls, player_pos, &shot, now_ms,
        );
        if let Some(reason) = reason {
            retire(world, shot.entity, reason);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn resolve(
    world: &mut World,
    scheduler: &mut Scheduler,
    score: &mut ScoreState,
    events: &mut Vec<CombatEvent>,
    encounter: &EncounterConfig,
    walls: &[(Position, Wall)],
    player_pos: Option<Position>,
    shot: &InFlight,
    now_ms: u64,
) -> Option<RetireReason> {
    if movement::inside_wall(shot.position, walls) {
        return Some(RetireReason::Obstacle);
    }

    if shot.spawn.distance_to(&shot.position) > shot.range {
        return Some(RetireReason::RangeExpired);
    }

    if let Some(victim) = find_victim(world, shot.side, shot.position) {
        damage::apply_hit(
            world,
            scheduler,
            score,
            events,
            encounter,
            victim,
            shot.damage,
            shot.weapon,
            now_ms,
        );
        return Some(RetireReason::Hit);
    }

    match player_pos {
        Some(player) if player.distance_to(&shot.position) > PROJECTILE_CULL_DISTANCE => {
            Some(RetireReason::OutOfBounds)
        }
        _ => None,
    }
}

/// First live, damage-accepting combatant of the opposing side within hit
/// distance. Invulnerable combatants are passed through.
pub fn find_victim(world: &World, shooter: Side, at: Position) -> Option<Entity> {
    let target_side = shooter.opponent();
    world
        .query::<(&Position, &Combatant)>()
        .iter()
        .find(|(_, (pos, c))| {
            c.side == target_side
                && !fsm::is_dead(c)
                && !c.invulnerable
                && pos.distance_to(&at) < HIT_RADIUS
        })
        .map(|(entity, _)| entity)
}

fn retire(world: &mut World, entity: Entity, reason: RetireReason) {
    if let Ok(mut projectile) = world.get::<&mut Projectile>(entity) {
        projectile.state = ProjectileState::Retired;
        projectile.retire_reason = Some(reason);
    }
}
