//! Combat decision logic for ARENA.
//!
//! Weapon-specific auto-aim target selection, the combatant state machine,
//! and shot emission patterns. Pure functions over plain data with no ECS
//! dependency.

pub mod emission;
pub mod fsm;
pub mod targeting;

pub use arena_core as core;

#[cfg(test)]
mod tests;
