//! Kinematic integration system.
//!
//! Updates Position from Velocity each tick: position += velocity * dt.
//! Combatants are kept inside the world bounds and out of walls; projectiles
//! fly free and are retired by the projectile resolver.

use hecs::World;

use arena_core::components::{Combatant, Projectile, Wall};
use arena_core::constants::{BODY_RADIUS, WORLD_HALF_EXTENT};
use arena_core::enums::{LifeState, ProjectileState};
use arena_core::types::{Position, Velocity};

/// Run kinematic integration for all moving entities.
pub fn run(world: &mut World, dt: f64, walls: &[(Position, Wall)]) {
    for (_entity, (pos, vel, combatant)) in
        world.query_mut::<(&mut Position, &Velocity, &Combatant)>()
    {
        if combatant.life == LifeState::Dead {
            continue;
        }
        *pos = step_body(*pos, *vel, dt, walls);
    }

    for (_entity, (pos, vel, projectile)) in
        world.query_mut::<(&mut Position, &Velocity, &Projectile)>()
    {
        if projectile.state == ProjectileState::Active {
            pos.x += vel.x * dt;
            pos.y += vel.y * dt;
        }
    }
}

/// Move a body one step. Each axis is reverted on its own when the move would
/// overlap a wall, so bodies slide along walls.
pub fn step_body(pos: Position, vel: Velocity, dt: f64, walls: &[(Position, Wall)]) -> Position {
    let mut next = pos;

    let moved_x = Position::new(pos.x + vel.x * dt, pos.y);
    if !body_blocked(moved_x, walls) {
        next.x = moved_x.x;
    }
    let moved_y = Position::new(next.x, pos.y + vel.y * dt);
    if !body_blocked(moved_y, walls) {
        next.y = moved_y.y;
    }

    next.x = next.x.clamp(-WORLD_HALF_EXTENT, WORLD_HALF_EXTENT);
    next.y = next.y.clamp(-WORLD_HALF_EXTENT, WORLD_HALF_EXTENT);
    next
}

/// Whether a body centered at `pos` overlaps any wall.
pub fn body_blocked(pos: Position, walls: &[(Position, Wall)]) -> bool {
    walls
        .iter()
        .any(|(center, wall)| overlaps(pos, center, wall, BODY_RADIUS))
}

/// Whether a point lies inside any wall (projectile test).
pub fn inside_wall(pos: Position, walls: &[(Position, Wall)]) -> bool {
    walls
        .iter()
        .any(|(center, wall)| overlaps(pos, center, wall, 0.0))
}

fn overlaps(pos: Position, center: &Position, wall: &Wall, margin: f64) -> bool {
    (pos.x - center.x).abs() < wall.width / 2.0 + margin
        && (pos.y - center.y).abs() < wall.height / 2.0 + margin
}

/// Wall rectangles in the world.
pub fn collect_walls(world: &World) -> Vec<(Position, Wall)> {
    world
        .query::<(&Position, &Wall)>()
        .iter()
        .map(|(_, (pos, wall))| (*pos, *wall))
        .collect()
}
