//! ECS systems that operate on the arena world each tick.
//!
//! Systems are free functions that take `&mut World` (or `&World` for
//! read-only). They do not own state: entity state lives in components,
//! match-wide state is passed in by the engine.

pub mod cleanup;
pub mod damage;
pub mod director;
pub mod hostile_ai;
pub mod movement;
pub mod pickups;
pub mod player_control;
pub mod projectiles;
pub mod snapshot;
pub mod timers;
pub mod weapons;
