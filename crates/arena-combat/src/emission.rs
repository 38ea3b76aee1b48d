//! Shot emission patterns: single shot, pellet fan, timed burst.

use arena_core::enums::WeaponKind;
use arena_core::types::{Position, Velocity};
use arena_core::weapons::config_for;

/// One projectile a trigger pull will release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedShot {
    /// Delay after the trigger pull. Burst shots keep the trigger's origin and angle.
    pub delay_ms: u64,
    pub origin: Position,
    pub angle: f64,
}

/// Expand one trigger pull into the projectiles it releases.
///
/// Burst weapons take precedence over pellet fans; a fan spaces pellets by
/// `spread / pellets` around the aim angle.
pub fn plan_shots(kind: WeaponKind, origin: Position, aim_angle: f64) -> Vec<PlannedShot> {
    let archetype = config_for(kind);

    if archetype.burst_count > 1 {
        return (0..archetype.burst_count)
            .map(|i| PlannedShot {
                delay_ms: u64::from(i) * archetype.burst_delay_ms,
                origin,
                angle: aim_angle,
            })
            .collect();
    }

    if archetype.pellet_count > 1 {
        let pellets = f64::from(archetype.pellet_count);
        let step = archetype.spread_deg.to_radians() / pellets;
        return (0..archetype.pellet_count)
            .map(|i| PlannedShot {
                delay_ms: 0,
                origin,
                angle: aim_angle + (f64::from(i) - (pellets - 1.0) / 2.0) * step,
            })
            .collect();
    }

    vec![PlannedShot {
        delay_ms: 0,
        origin,
        angle: aim_angle,
    }]
}

/// Muzzle velocity of a projectile of `kind` fired along `angle`.
pub fn projectile_velocity(kind: WeaponKind, angle: f64) -> Velocity {
    Velocity::from_angle(angle, config_for(kind).projectile_speed)
}
