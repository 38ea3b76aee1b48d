//! Weapon catalog: the immutable archetype table every other system reads.
//!
//! Entries are `'static` and referenced by `WeaponKind`; nothing ever owns or
//! mutates an archetype.

use serde::Serialize;

use crate::enums::{ScanPattern, SelectionPolicy, WeaponKind};

/// How a weapon picks what to lock onto.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TargetingProfile {
    /// Lock-on range (inclusive).
    pub effective_range: f64,
    pub policy: SelectionPolicy,
    pub max_targets: usize,
    pub pattern: ScanPattern,
}

/// Ballistic and targeting parameters of one weapon archetype.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeaponArchetype {
    pub kind: WeaponKind,
    pub name: &'static str,
    /// Minimum time between trigger pulls.
    pub fire_rate_ms: u64,
    pub projectile_speed: f64,
    pub damage: i32,
    /// Maximum travel distance of a projectile (strictly greater retires).
    pub range: f64,
    pub pellet_count: u32,
    /// Shotgun spread in degrees.
    pub spread_deg: f64,
    pub burst_count: u32,
    pub burst_delay_ms: u64,
    pub targeting: TargetingProfile,
    /// Projectile tint, 0xRRGGBB.
    pub color: u32,
    pub description: &'static str,
}

pub const RAPID_FIRE: WeaponArchetype = WeaponArchetype {
    kind: WeaponKind::RapidFire,
    name: "Rapid Fire",
    fire_rate_ms: 800,
    projectile_speed: 500.0,
    damage: 1,
    range: 500.0,
    pellet_count: 1,
    spread_deg: 0.0,
    burst_count: 1,
    burst_delay_ms: 0,
    targeting: TargetingProfile {
        effective_range: 500.0,
        policy: SelectionPolicy::Closest,
        max_targets: 1,
        pattern: ScanPattern::Omni,
    },
    color: 0x00FF00,
    description: "Balanced weapon, good all-around",
};

pub const SNIPER: WeaponArchetype = WeaponArchetype {
    kind: WeaponKind::Sniper,
    name: "Sniper",
    fire_rate_ms: 2000,
    projectile_speed: 800.0,
    damage: 2,
    range: 900.0,
    pellet_count: 1,
    spread_deg: 0.0,
    burst_count: 1,
    burst_delay_ms: 0,
    targeting: TargetingProfile {
        effective_range: 900.0,
        policy: SelectionPolicy::Furthest,
        max_targets: 1,
        pattern: ScanPattern::Omni,
    },
    color: 0x00FFFF,
    description: "High damage, slow fire rate, long range",
};

pub const SHOTGUN: WeaponArchetype = WeaponArchetype {
    kind: WeaponKind::Shotgun,
    name: "Shotgun",
    fire_rate_ms: 1500,
    projectile_speed: 350.0,
    damage: 1,
    range: 350.0,
    pellet_count: 5,
    spread_deg: 15.0,
    burst_count: 1,
    burst_delay_ms: 0,
    targeting: TargetingProfile {
        effective_range: 350.0,
        policy: SelectionPolicy::MultiClosest,
        max_targets: 5,
        pattern: ScanPattern::Omni,
    },
    color: 0xFF6600,
    description: "Close-range devastation, multiple pellets",
};

pub const BURST: WeaponArchetype = WeaponArchetype {
    kind: WeaponKind::Burst,
    name: "Burst Rifle",
    fire_rate_ms: 1200,
    projectile_speed: 600.0,
    damage: 1,
    range: 600.0,
    pellet_count: 1,
    spread_deg: 0.0,
    burst_count: 3,
    burst_delay_ms: 100,
    targeting: TargetingProfile {
        effective_range: 600.0,
        policy: SelectionPolicy::Cluster,
        max_targets: 1,
        pattern: ScanPattern::Omni,
    },
    color: 0xFF00FF,
    description: "3-round burst, can kill in one trigger pull",
};

/// Look up the archetype for a weapon kind.
pub fn config_for(kind: WeaponKind) -> &'static WeaponArchetype {
    match kind {
        WeaponKind::RapidFire => &RAPID_FIRE,
        WeaponKind::Sniper => &SNIPER,
        WeaponKind::Shotgun => &SHOTGUN,
        WeaponKind::Burst => &BURST,
    }
}

/// Look up by the shell's weapon name; unknown names resolve to Rapid Fire.
pub fn config_for_name(name: &str) -> &'static WeaponArchetype {
    config_for(WeaponKind::from_name(name))
}
