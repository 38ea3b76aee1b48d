//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in `arena-combat` and the sim systems, not here.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{Position, TimerId};

/// Marks the player-controlled entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

/// Marks a hostile entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hostile;

/// Health, weapon, cooldown, invulnerability and dash state of a combatant.
///
/// Mutated only through `arena_combat::fsm`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub side: Side,
    pub hp: i32,
    pub max_hp: i32,
    pub life: LifeState,
    /// Currently held weapon (a catalog reference, never owned).
    pub weapon: WeaponKind,
    /// Match time of the last trigger pull, `None` if never fired.
    pub last_fired_ms: Option<u64>,

    // --- Invulnerability ---
    /// Post-damage invulnerability window. `None` means the entity has none.
    pub invulnerability_ms: Option<u64>,
    pub invulnerable: bool,
    pub invulnerable_until_ms: Option<u64>,
    /// Pending expiry timer; at most one is ever scheduled.
    pub invulnerability_timer: Option<TimerId>,

    // --- Movement / dash ---
    pub move_speed: f64,
    pub dash: DashState,
    pub last_dash_ms: Option<u64>,
    pub dash_speed: f64,
    pub dash_duration_ms: u64,
    pub dash_cooldown_ms: u64,
}

/// Raw control input for the player, written by commands.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerInput {
    /// Held movement direction (unnormalized, e.g. (-1, 1) for up-left keys).
    pub move_dir: DVec2,
    /// Pointer position in world space (dash fallback direction).
    pub pointer: Position,
    pub fire_requested: bool,
    pub dash_requested: bool,
}

/// Hostile behavior state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostileBrain {
    pub state: AiState,
    pub patrol_target: Position,
}

/// Projectile in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    /// Side that fired it; it may only hit the opposing side.
    pub side: Side,
    pub weapon: WeaponKind,
    pub damage: i32,
    pub range: f64,
    pub spawn: Position,
    pub state: ProjectileState,
    pub retire_reason: Option<RetireReason>,
}

/// World-placed weapon swap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponPickup {
    pub weapon: WeaponKind,
    pub status: PickupStatus,
    pub respawn_timer: Option<TimerId>,
}

/// Axis-aligned wall centered on the entity's Position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Wall {
    pub width: f64,
    pub height: f64,
}
