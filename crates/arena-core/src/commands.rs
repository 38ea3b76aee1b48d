//! Player commands sent from the presentation shell to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Match control ---
    /// Start a new match from the menu or after elimination.
    StartMatch,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Leave the current match and return to the menu.
    ReturnToMenu,

    // --- Player control ---
    /// Held movement direction (keyboard axes or joystick vector).
    SetMoveInput { x: f64, y: f64 },
    /// Pointer position in world space.
    SetPointer { x: f64, y: f64 },
    /// Pull the trigger (auto-aimed at the current lock).
    Fire,
    /// Dash along the held direction, or toward the pointer when standing still.
    Dash,
    /// Restore health, capped at max hp.
    Heal { amount: i32 },
}
