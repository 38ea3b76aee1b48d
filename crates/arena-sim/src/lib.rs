//! Simulation engine for ARENA.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick length,
//! and produces ArenaSnapshots for the presentation shell.

pub mod config;
pub mod engine;
pub mod scheduler;
pub mod score;
pub mod systems;
pub mod world_setup;

pub use arena_core as core;
pub use config::ArenaConfig;
pub use engine::ArenaEngine;
