//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Weapon archetype selector. Closed set; see `weapons::config_for`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Balanced all-rounder; every combatant starts with it.
    #[default]
    RapidFire,
    /// Slow, hard-hitting, long range.
    Sniper,
    /// Five-pellet fan at close range.
    Shotgun,
    /// Three-round burst per trigger pull.
    Burst,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 4] = [
        WeaponKind::RapidFire,
        WeaponKind::Sniper,
        WeaponKind::Shotgun,
        WeaponKind::Burst,
    ];

    /// Parse the shell's short weapon names. Unknown names fall back to RapidFire.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "sniper" => WeaponKind::Sniper,
            "shotgun" => WeaponKind::Shotgun,
            "burst" => WeaponKind::Burst,
            _ => WeaponKind::RapidFire,
        }
    }

    /// Short name used by the presentation shell.
    pub fn short_name(self) -> &'static str {
        match self {
            WeaponKind::RapidFire => "rapid",
            WeaponKind::Sniper => "sniper",
            WeaponKind::Shotgun => "shotgun",
            WeaponKind::Burst => "burst",
        }
    }
}

/// Which side an actor or projectile fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Friendly,
    Hostile,
}

impl Side {
    /// The side this side's projectiles may hit.
    pub fn opponent(self) -> Side {
        match self {
            Side::Friendly => Side::Hostile,
            Side::Hostile => Side::Friendly,
        }
    }
}

/// Target selection policy of a weapon's targeting profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionPolicy {
    /// Single closest candidate.
    Closest,
    /// Single furthest candidate.
    Furthest,
    /// Up to `max_targets` closest candidates, primary first.
    MultiClosest,
    /// Closest member of the largest cluster, else closest.
    Cluster,
}

/// Nominal scan pattern. Metadata only: every weapon scans the full circle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanPattern {
    #[default]
    Omni,
}

/// Combatant life state. Dead is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeState {
    #[default]
    Alive,
    Dead,
}

/// Dash state of a mobile combatant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DashState {
    #[default]
    Idle,
    /// Dashing until the given match time (ms).
    Dashing { until_ms: u64 },
}

/// Combat state as seen from outside, derived from the combatant's fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatState {
    AliveVulnerable,
    AliveInvulnerable,
    Dashing,
    Dead,
}

/// Hostile behavior state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiState {
    #[default]
    Patrol,
    Chase,
}

/// Projectile lifecycle. Retired is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileState {
    #[default]
    Active,
    Retired,
}

/// Why a projectile was retired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetireReason {
    Hit,
    RangeExpired,
    Obstacle,
    OutOfBounds,
}

/// Weapon pickup availability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupStatus {
    #[default]
    Available,
    CoolingDown,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Menu,
    Active,
    Paused,
    /// Player died; the match is over.
    Eliminated,
}
