//! Simulation constants and tuning parameters.
//!
//! Distances are world units (one unit is one arena pixel), times are
//! milliseconds unless a name says otherwise.

/// Default tick length (ms), ~60 Hz.
pub const DEFAULT_TICK_MS: u64 = 16;

// --- World bounds ---

/// Half extent of the square world (world spans -1500..1500 on both axes).
pub const WORLD_HALF_EXTENT: f64 = 1500.0;

/// Half extent of the square on whose perimeter hostiles spawn and patrol.
pub const SPAWN_HALF_EXTENT: f64 = 1400.0;

/// Collision radius of a combatant body against walls.
pub const BODY_RADIUS: f64 = 16.0;

// --- Targeting ---

/// Neighbor radius for burst cluster detection (inclusive).
pub const CLUSTER_RADIUS: f64 = 150.0;

/// Neighbors a candidate needs to anchor a cluster.
pub const CLUSTER_MIN_NEIGHBORS: usize = 2;

// --- Projectiles ---

/// Proximity below which a projectile hits a combatant (strict).
pub const HIT_RADIUS: f64 = 30.0;

/// Distance from the player beyond which projectiles are culled (strict).
pub const PROJECTILE_CULL_DISTANCE: f64 = 800.0;

// --- Player ---

pub const PLAYER_MAX_HP: i32 = 3;
pub const PLAYER_SPEED: f64 = 250.0;
pub const PLAYER_INVULNERABILITY_MS: u64 = 1000;
pub const PLAYER_DASH_SPEED: f64 = 750.0;
pub const PLAYER_DASH_DURATION_MS: u64 = 200;
pub const PLAYER_DASH_COOLDOWN_MS: u64 = 5000;

// --- Hostiles ---

pub const HOSTILE_MAX_HP: i32 = 2;
pub const HOSTILE_SPEED: f64 = 180.0;
pub const HOSTILE_DASH_SPEED: f64 = 750.0;
pub const HOSTILE_DASH_DURATION_MS: u64 = 200;
pub const HOSTILE_DASH_COOLDOWN_MS: u64 = 8000;

/// Range within which a hostile notices and chases the player.
pub const HOSTILE_DETECTION_RANGE: f64 = 600.0;

/// Range within which a chasing hostile opens fire (strict).
pub const HOSTILE_FIRE_RANGE: f64 = 500.0;

/// Distance band (exclusive) in which a chasing hostile may dash.
pub const HOSTILE_DASH_MIN_RANGE: f64 = 200.0;
pub const HOSTILE_DASH_MAX_RANGE: f64 = 400.0;

/// Per-tick probability of a dash attempt inside the dash band.
pub const HOSTILE_DASH_CHANCE: f64 = 0.3;

/// Distance at which a patrol waypoint counts as reached.
pub const PATROL_ARRIVAL_RADIUS: f64 = 50.0;

// --- Encounter director ---

/// Hostiles spawned when a match starts.
pub const INITIAL_HOSTILES: u32 = 2;

/// Soft cap on concurrently alive hostiles.
pub const MAX_HOSTILES: usize = 6;

/// Interval between spawn attempts.
pub const HOSTILE_SPAWN_INTERVAL_MS: u64 = 15_000;

/// Delay before a collected pickup becomes available again.
pub const PICKUP_RESPAWN_MS: u64 = 30_000;

/// Distance within which the player collects a pickup (strict).
pub const PICKUP_COLLECT_RADIUS: f64 = 40.0;

/// Reward credited per hostile kill.
pub const KILL_REWARD: f64 = 0.5;
