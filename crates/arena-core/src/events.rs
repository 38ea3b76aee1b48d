//! Events emitted by the simulation for effects, audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

/// Combat feedback consumed by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatEvent {
    /// A projectile struck a combatant. `is_kill` is decided before damage lands.
    Hit {
        position: Position,
        weapon_kind: WeaponKind,
        victim_side: Side,
        is_kill: bool,
    },
    /// A combatant died.
    Death {
        entity: u64,
        side: Side,
        position: Position,
    },
    /// The player collected a weapon pickup.
    Pickup {
        weapon_kind: WeaponKind,
        previous: WeaponKind,
    },
    /// A collected pickup became available again.
    PickupRespawned {
        weapon_kind: WeaponKind,
        position: Position,
    },
    /// A projectile left a muzzle.
    ShotFired {
        side: Side,
        weapon_kind: WeaponKind,
        position: Position,
        angle: f64,
    },
    /// A combatant started a dash.
    Dash { side: Side, position: Position },
    /// Kill reward credited.
    Reward { amount: f64, total: f64 },
}
