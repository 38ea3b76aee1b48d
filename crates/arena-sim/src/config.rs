//! Engine configuration.
//!
//! Every field has a default equal to the tuning constants in
//! `arena_core::constants`, so a config file only needs to name what it
//! overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use arena_core::constants::*;

/// Configuration for starting a new arena engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// RNG seed for determinism. Same seed and commands = same match.
    pub seed: u64,
    /// Milliseconds simulated per tick.
    pub tick_ms: u64,
    pub encounter: EncounterConfig,
    pub player: CombatantTuning,
    pub hostile: CombatantTuning,
    pub hostile_ai: HostileAiConfig,
}

/// Spawn cadence, pickup timing and rewards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterConfig {
    pub initial_hostiles: u32,
    /// Periodic spawns are skipped while this many hostiles are alive.
    pub max_hostiles: usize,
    pub spawn_interval_ms: u64,
    pub pickup_respawn_ms: u64,
    pub kill_reward: f64,
}

/// Body tuning for one side. A block given in a config file must be complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantTuning {
    pub max_hp: i32,
    pub move_speed: f64,
    /// Post-damage invulnerability window, `None` for no window.
    pub invulnerability_ms: Option<u64>,
    pub dash_speed: f64,
    pub dash_duration_ms: u64,
    pub dash_cooldown_ms: u64,
}

/// Hostile behavior ranges and odds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostileAiConfig {
    pub detection_range: f64,
    pub fire_range: f64,
    pub dash_min_range: f64,
    pub dash_max_range: f64,
    pub dash_chance: f64,
    pub patrol_arrival_radius: f64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tick_ms: DEFAULT_TICK_MS,
            encounter: EncounterConfig::default(),
            player: CombatantTuning::player(),
            hostile: CombatantTuning::hostile(),
            hostile_ai: HostileAiConfig::default(),
        }
    }
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            initial_hostiles: INITIAL_HOSTILES,
            max_hostiles: MAX_HOSTILES,
            spawn_interval_ms: HOSTILE_SPAWN_INTERVAL_MS,
            pickup_respawn_ms: PICKUP_RESPAWN_MS,
            kill_reward: KILL_REWARD,
        }
    }
}

impl CombatantTuning {
    pub fn player() -> Self {
        Self {
            max_hp: PLAYER_MAX_HP,
            move_speed: PLAYER_SPEED,
            invulnerability_ms: Some(PLAYER_INVULNERABILITY_MS),
            dash_speed: PLAYER_DASH_SPEED,
            dash_duration_ms: PLAYER_DASH_DURATION_MS,
            dash_cooldown_ms: PLAYER_DASH_COOLDOWN_MS,
        }
    }

    pub fn hostile() -> Self {
        Self {
            max_hp: HOSTILE_MAX_HP,
            move_speed: HOSTILE_SPEED,
            invulnerability_ms: None,
            dash_speed: HOSTILE_DASH_SPEED,
            dash_duration_ms: HOSTILE_DASH_DURATION_MS,
            dash_cooldown_ms: HOSTILE_DASH_COOLDOWN_MS,
        }
    }
}

impl Default for HostileAiConfig {
    fn default() -> Self {
        Self {
            detection_range: HOSTILE_DETECTION_RANGE,
            fire_range: HOSTILE_FIRE_RANGE,
            dash_min_range: HOSTILE_DASH_MIN_RANGE,
            dash_max_range: HOSTILE_DASH_MAX_RANGE,
            dash_chance: HOSTILE_DASH_CHANCE,
            patrol_arrival_radius: PATROL_ARRIVAL_RADIUS,
        }
    }
}

impl ArenaConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, String> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| format!("Invalid arena config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_json_str(&json)
    }

    fn validate(&self) -> Result<(), String> {
        if self.tick_ms == 0 {
            return Err("tick_ms must be positive".into());
        }
        if self.player.max_hp <= 0 || self.hostile.max_hp <= 0 {
            return Err("max_hp must be positive".into());
        }
        if !(0.0..=1.0).contains(&self.hostile_ai.dash_chance) {
            return Err(format!(
                "dash_chance must be within 0..=1, got {}",
                self.hostile_ai.dash_chance
            ));
        }
        Ok(())
    }
}
