//! Arena state snapshot: the complete visible state sent to the shell each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::CombatEvent;
use crate::types::{Position, SimTime};

/// Complete arena state broadcast to the presentation shell after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArenaSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub player: Option<PlayerView>,
    pub hostiles: Vec<HostileView>,
    pub projectiles: Vec<ProjectileView>,
    pub pickups: Vec<PickupView>,
    pub walls: Vec<WallView>,
    pub events: Vec<CombatEvent>,
    pub score: ScoreView,
    /// Set once the player has been eliminated.
    pub elimination: Option<EliminationSummary>,
}

/// Player state queries for HUD and cooldown indicators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub entity: u64,
    pub position: Position,
    pub hp: i32,
    pub max_hp: i32,
    pub weapon: WeaponKind,
    pub state: CombatState,
    pub invulnerable: bool,
    pub dashing: bool,
    pub dash_ready: bool,
    /// 0..=100, 100 when the weapon can fire again.
    pub fire_cooldown_pct: f64,
    /// 0..=100, 100 when a dash is available.
    pub dash_cooldown_pct: f64,
    /// Facing toward the primary lock (radians), if any.
    pub aim_angle: Option<f64>,
    /// Entities currently locked on, primary first.
    pub locked_targets: Vec<u64>,
    /// Weapon lock-on range, for the range ring.
    pub lock_range: f64,
}

/// A hostile combatant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostileView {
    pub entity: u64,
    pub position: Position,
    pub heading: f64,
    pub hp: i32,
    pub max_hp: i32,
    pub weapon: WeaponKind,
    pub ai_state: AiState,
    pub dashing: bool,
}

/// A projectile in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub entity: u64,
    pub position: Position,
    pub heading: f64,
    pub side: Side,
    pub weapon: WeaponKind,
}

/// A weapon pickup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupView {
    pub position: Position,
    pub weapon: WeaponKind,
    pub status: PickupStatus,
}

/// A wall rectangle, centered on `position`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallView {
    pub position: Position,
    pub width: f64,
    pub height: f64,
}

/// Running score.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub kills: u32,
    pub earned: f64,
    pub shots_fired: u32,
    pub hostiles_alive: u32,
    pub survival_secs: f64,
}

/// End-of-match summary shown on elimination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EliminationSummary {
    pub survival_secs: f64,
    pub kills: u32,
    pub earned: f64,
    pub final_weapon: WeaponKind,
}
