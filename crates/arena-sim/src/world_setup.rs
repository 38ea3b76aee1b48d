//! Entity spawn factories for setting up the arena.
//!
//! Creates the player, hostiles, weapon pickups and walls with the
//! appropriate component bundles.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use arena_core::components::*;
use arena_core::constants::SPAWN_HALF_EXTENT;
use arena_core::enums::*;
use arena_core::types::{Position, Velocity};

use crate::config::{ArenaConfig, CombatantTuning};

/// Pickup spawn points of the default arena: (x, y, weapon).
pub const DEFAULT_PICKUPS: [(f64, f64, WeaponKind); 12] = [
    (0.0, 400.0, WeaponKind::Sniper),
    (0.0, -400.0, WeaponKind::Shotgun),
    (400.0, 0.0, WeaponKind::Burst),
    (-400.0, 0.0, WeaponKind::Sniper),
    (700.0, 700.0, WeaponKind::Sniper),
    (-700.0, 700.0, WeaponKind::Shotgun),
    (700.0, -700.0, WeaponKind::Burst),
    (-700.0, -700.0, WeaponKind::Shotgun),
    (500.0, 500.0, WeaponKind::Shotgun),
    (-500.0, -500.0, WeaponKind::Sniper),
    (500.0, -500.0, WeaponKind::Burst),
    (-500.0, 500.0, WeaponKind::Burst),
];

/// Walls on the axes: (x, y, width, height).
const AXIS_WALLS: [(f64, f64, f64, f64); 8] = [
    (0.0, 200.0, 150.0, 40.0),
    (0.0, -200.0, 150.0, 40.0),
    (200.0, 0.0, 40.0, 150.0),
    (-200.0, 0.0, 40.0, 150.0),
    (0.0, 750.0, 200.0, 40.0),
    (0.0, -750.0, 200.0, 40.0),
    (750.0, 0.0, 40.0, 200.0),
    (-750.0, 0.0, 40.0, 200.0),
];

/// Walls of one quadrant, mirrored into the other three.
const QUADRANT_WALLS: [(f64, f64, f64, f64); 11] = [
    (400.0, 300.0, 300.0, 40.0),
    (600.0, 100.0, 40.0, 300.0),
    (200.0, 600.0, 200.0, 40.0),
    (300.0, 500.0, 40.0, 200.0),
    (900.0, 900.0, 250.0, 40.0),
    (1100.0, 700.0, 40.0, 250.0),
    (800.0, 1100.0, 200.0, 40.0),
    (500.0, 800.0, 180.0, 40.0),
    (800.0, 500.0, 40.0, 180.0),
    (1200.0, 1200.0, 150.0, 40.0),
    (1200.0, 1100.0, 40.0, 150.0),
];

/// The default symmetric wall layout as (center, wall) pairs.
pub fn default_walls() -> Vec<(Position, Wall)> {
    let mut walls = Vec::with_capacity(AXIS_WALLS.len() + QUADRANT_WALLS.len() * 4);
    for &(x, y, width, height) in &AXIS_WALLS {
        walls.push((Position::new(x, y), Wall { width, height }));
    }
    for (sx, sy) in [(1.0, 1.0), (-1.0, 1.0), (1.0, -1.0), (-1.0, -1.0)] {
        for &(x, y, width, height) in &QUADRANT_WALLS {
            walls.push((Position::new(x * sx, y * sy), Wall { width, height }));
        }
    }
    walls
}

/// Populate a fresh match: walls, pickups, the player. Hostiles come from the
/// encounter director. Returns the player entity.
pub fn setup_match(world: &mut World, config: &ArenaConfig) -> Entity {
    spawn_walls(world);
    spawn_pickups(world);
    spawn_player(world, &config.player)
}

/// Spawn the player at the arena center holding the default weapon.
pub fn spawn_player(world: &mut World, tuning: &CombatantTuning) -> Entity {
    world.spawn((
        Player,
        Position::new(0.0, 0.0),
        Velocity::default(),
        build_combatant(Side::Friendly, tuning, WeaponKind::default()),
        PlayerInput::default(),
    ))
}

/// Spawn a hostile at `position` with a uniformly random weapon.
pub fn spawn_hostile(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    tuning: &CombatantTuning,
    position: Position,
) -> Entity {
    let weapon = WeaponKind::ALL[rng.gen_range(0..WeaponKind::ALL.len())];
    let brain = HostileBrain {
        state: AiState::Patrol,
        patrol_target: random_arena_point(rng),
    };

    world.spawn((
        Hostile,
        position,
        Velocity::default(),
        build_combatant(Side::Hostile, tuning, weapon),
        brain,
    ))
}

/// Spawn one pickup per default spawn point, all available.
pub fn spawn_pickups(world: &mut World) {
    for &(x, y, weapon) in &DEFAULT_PICKUPS {
        world.spawn((
            Position::new(x, y),
            WeaponPickup {
                weapon,
                status: PickupStatus::Available,
                respawn_timer: None,
            },
        ));
    }
}

pub fn spawn_walls(world: &mut World) {
    for (position, wall) in default_walls() {
        world.spawn((position, wall));
    }
}

fn build_combatant(side: Side, tuning: &CombatantTuning, weapon: WeaponKind) -> Combatant {
    Combatant {
        side,
        hp: tuning.max_hp,
        max_hp: tuning.max_hp,
        life: LifeState::Alive,
        weapon,
        last_fired_ms: None,
        invulnerability_ms: tuning.invulnerability_ms,
        invulnerable: false,
        invulnerable_until_ms: None,
        invulnerability_timer: None,
        move_speed: tuning.move_speed,
        dash: DashState::Idle,
        last_dash_ms: None,
        dash_speed: tuning.dash_speed,
        dash_duration_ms: tuning.dash_duration_ms,
        dash_cooldown_ms: tuning.dash_cooldown_ms,
    }
}

/// A random point on the spawn perimeter: pick a side, then an offset along it.
pub fn perimeter_point(rng: &mut ChaCha8Rng) -> Position {
    let edge = SPAWN_HALF_EXTENT;
    let side = rng.gen_range(0..4);
    let along = random_coordinate(rng);
    match side {
        0 => Position::new(along, -edge),
        1 => Position::new(edge, along),
        2 => Position::new(along, edge),
        _ => Position::new(-edge, along),
    }
}

/// A random whole-unit point inside the spawn square (patrol waypoints).
pub fn random_arena_point(rng: &mut ChaCha8Rng) -> Position {
    let x = random_coordinate(rng);
    let y = random_coordinate(rng);
    Position::new(x, y)
}

fn random_coordinate(rng: &mut ChaCha8Rng) -> f64 {
    let edge = SPAWN_HALF_EXTENT as i32;
    f64::from(rng.gen_range(-edge..=edge))
}
