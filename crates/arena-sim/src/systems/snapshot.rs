//! Snapshot system: queries the ECS world and builds a complete ArenaSnapshot.
//!
//! This system is read-only: it never modifies the world.

use hecs::{Entity, World};

use arena_combat::fsm;
use arena_combat::targeting::TargetingSystem;
use arena_core::components::*;
use arena_core::enums::*;
use arena_core::events::CombatEvent;
use arena_core::state::*;
use arena_core::types::{Position, SimTime, Velocity};
use arena_core::weapons::config_for;

use crate::score::ScoreState;
use crate::systems::director;

/// Build a complete ArenaSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    events: Vec<CombatEvent>,
    score: &ScoreState,
    targeting: &TargetingSystem<Entity>,
    elimination: Option<&EliminationSummary>,
) -> ArenaSnapshot {
    ArenaSnapshot {
        time: *time,
        phase,
        player: build_player(world, time.now_ms, targeting),
        hostiles: build_hostiles(world),
        projectiles: build_projectiles(world),
        pickups: build_pickups(world),
        walls: build_walls(world),
        events,
        score: ScoreView {
            kills: score.kills,
            earned: score.earned,
            shots_fired: score.shots_fired,
            hostiles_alive: director::alive_hostiles(world) as u32,
            survival_secs: time.elapsed_secs(),
        },
        elimination: elimination.cloned(),
    }
}

fn build_player(
    world: &World,
    now_ms: u64,
    targeting: &TargetingSystem<Entity>,
) -> Option<PlayerView> {
    world
        .query::<(&Player, &Position, &Combatant)>()
        .iter()
        .next()
        .map(|(entity, (_, pos, c))| PlayerView {
            entity: entity.to_bits().get(),
            position: *pos,
            hp: c.hp,
            max_hp: c.max_hp,
            weapon: c.weapon,
            state: fsm::state(c),
            invulnerable: c.invulnerable,
            dashing: fsm::is_dashing(c),
            dash_ready: fsm::can_dash(c, now_ms),
            fire_cooldown_pct: fsm::fire_cooldown_percent(c, now_ms),
            dash_cooldown_pct: fsm::dash_cooldown_percent(c, now_ms),
            aim_angle: targeting.aim_angle(),
            locked_targets: targeting
                .targets()
                .iter()
                .map(|e| e.to_bits().get())
                .collect(),
            lock_range: config_for(c.weapon).targeting.effective_range,
        })
}

fn build_hostiles(world: &World) -> Vec<HostileView> {
    world
        .query::<(&Hostile, &Position, &Velocity, &Combatant, &HostileBrain)>()
        .iter()
        .filter(|(_, (_, _, _, c, _))| !fsm::is_dead(c))
        .map(|(entity, (_, pos, vel, c, brain))| HostileView {
            entity: entity.to_bits().get(),
            position: *pos,
            heading: vel.heading(),
            hp: c.hp,
            max_hp: c.max_hp,
            weapon: c.weapon,
            ai_state: brain.state,
            dashing: fsm::is_dashing(c),
        })
        .collect()
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<(&Position, &Velocity, &Projectile)>()
        .iter()
        .filter(|(_, (_, _, p))| p.state == ProjectileState::Active)
        .map(|(entity, (pos, vel, p))| ProjectileView {
            entity: entity.to_bits().get(),
            position: *pos,
            heading: vel.heading(),
            side: p.side,
            weapon: p.weapon,
        })
        .collect()
}

fn build_pickups(world: &World) -> Vec<PickupView> {
    world
        .query::<(&Position, &WeaponPickup)>()
        .iter()
        .map(|(_, (pos, pickup))| PickupView {
            position: *pos,
            weapon: pickup.weapon,
            status: pickup.status,
        })
        .collect()
}

fn build_walls(world: &World) -> Vec<WallView> {
    world
        .query::<(&Position, &Wall)>()
        .iter()
        .map(|(_, (pos, wall))| WallView {
            position: *pos,
            width: wall.width,
            height: wall.height,
        })
        .collect()
}
