//! Arena engine, the core of the game.
//!
//! `ArenaEngine` owns the hecs ECS world, processes player commands, runs
//! all systems, and produces `ArenaSnapshot`s. Completely headless, enabling
//! deterministic testing.

use std::collections::VecDeque;

use glam::DVec2;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use arena_combat::fsm;
use arena_combat::targeting::TargetingSystem;
use arena_core::commands::PlayerCommand;
use arena_core::components::{Combatant, PlayerInput};
use arena_core::enums::GamePhase;
use arena_core::events::CombatEvent;
use arena_core::state::{ArenaSnapshot, EliminationSummary};
use arena_core::types::{Position, SimTime};

use crate::config::ArenaConfig;
use crate::scheduler::Scheduler;
use crate::score::ScoreState;
use crate::systems;
use crate::world_setup;

/// The arena engine. Owns the ECS world and all match state.
pub struct ArenaEngine {
    world: World,
    config: ArenaConfig,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    scheduler: Scheduler,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<CombatEvent>,
    score: ScoreState,
    targeting: TargetingSystem<Entity>,
    player: Option<Entity>,
    elimination: Option<EliminationSummary>,
}

impl Default for ArenaEngine {
    fn default() -> Self {
        Self::new(ArenaConfig::default())
    }
}

impl ArenaEngine {
    /// Create a new engine with the given config. The match starts in the menu.
    pub fn new(config: ArenaConfig) -> Self {
        Self {
            world: World::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            time: SimTime::default(),
            phase: GamePhase::default(),
            scheduler: Scheduler::new(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            score: ScoreState::default(),
            targeting: TargetingSystem::new(),
            player: None,
            elimination: None,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the match by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> ArenaSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems();
            self.time.advance(self.config.tick_ms);
            self.check_elimination();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            events,
            &self.score,
            &self.targeting,
            self.elimination.as_ref(),
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current match time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The player entity of the current match.
    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    /// Get a read-only reference to the scheduler.
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Get a read-only reference to the score state.
    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    /// Mutable world access for test setups.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Spawn a hostile at a fixed position (for tests needing exact layouts).
    #[cfg(test)]
    pub fn spawn_test_hostile(&mut self, position: Position) -> Entity {
        let hostile = self.config.hostile.clone();
        world_setup::spawn_hostile(&mut self.world, &mut self.rng, &hostile, position)
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartMatch => {
                if matches!(self.phase, GamePhase::Menu | GamePhase::Eliminated) {
                    self.start_match();
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                    info!(tick = self.time.tick, "match paused");
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                    info!(tick = self.time.tick, "match resumed");
                }
            }
            PlayerCommand::ReturnToMenu => {
                if self.phase != GamePhase::Menu {
                    self.reset_match();
                    self.phase = GamePhase::Menu;
                    info!("returned to menu");
                }
            }
            PlayerCommand::SetMoveInput { x, y } => {
                self.with_input(|input| {
                    input.move_dir = if x.is_finite() && y.is_finite() {
                        DVec2::new(x, y)
                    } else {
                        DVec2::ZERO
                    };
                });
            }
            PlayerCommand::SetPointer { x, y } => {
                if x.is_finite() && y.is_finite() {
                    self.with_input(|input| input.pointer = Position::new(x, y));
                }
            }
            PlayerCommand::Fire => self.with_input(|input| input.fire_requested = true),
            PlayerCommand::Dash => self.with_input(|input| input.dash_requested = true),
            PlayerCommand::Heal { amount } => {
                if let Some(player) = self.player {
                    if let Ok(mut combatant) = self.world.get::<&mut Combatant>(player) {
                        let hp = fsm::heal(&mut combatant, amount);
                        debug!(amount, hp, "player healed");
                    }
                }
            }
        }
    }

    /// Apply `f` to the player's input, if there is a player.
    fn with_input(&mut self, f: impl FnOnce(&mut PlayerInput)) {
        let Some(player) = self.player else {
            return;
        };
        if let Ok(mut input) = self.world.get::<&mut PlayerInput>(player) {
            f(&mut *input);
        }
    }

    /// Clear everything left from a previous match.
    fn reset_match(&mut self) {
        self.world.clear();
        self.scheduler.clear();
        self.events.clear();
        self.score = ScoreState::default();
        self.targeting.clear();
        self.player = None;
        self.elimination = None;
        self.time = SimTime::default();
    }

    fn start_match(&mut self) {
        self.reset_match();
        self.player = Some(world_setup::setup_match(&mut self.world, &self.config));
        systems::director::start_match(
            &mut self.world,
            &mut self.rng,
            &mut self.scheduler,
            &self.config,
            self.time.now_ms,
        );
        self.phase = GamePhase::Active;
        info!(
            seed = self.config.seed,
            hostiles = self.config.encounter.initial_hostiles,
            "match started"
        );
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let now_ms = self.time.now_ms;

        // 1. Due scheduled events (burst rounds, timers, respawns)
        let due = self.scheduler.drain_due(now_ms);
        let spawn_requests = systems::timers::run(
            &mut self.world,
            due,
            &mut self.score,
            &mut self.events,
            now_ms,
        );
        // 2. Encounter director (periodic spawn)
        systems::director::run(
            &mut self.world,
            &mut self.rng,
            &mut self.scheduler,
            &self.config,
            spawn_requests,
            now_ms,
        );
        // 3. Player control (targeting, then dash and fire)
        systems::player_control::run(
            &mut self.world,
            &mut self.targeting,
            &mut self.scheduler,
            &mut self.score,
            &mut self.events,
            now_ms,
        );
        // 4. Hostile AI
        systems::hostile_ai::run(
            &mut self.world,
            &mut self.rng,
            &mut self.scheduler,
            &mut self.score,
            &mut self.events,
            &self.config.hostile_ai,
            now_ms,
        );
        // 5. Movement integration
        let walls = systems::movement::collect_walls(&self.world);
        systems::movement::run(&mut self.world, SimTime::dt(self.config.tick_ms), &walls);
        // 6. Projectile resolution (walls, range, hits, culling)
        systems::projectiles::run(
            &mut self.world,
            &mut self.scheduler,
            &mut self.score,
            &mut self.events,
            &self.config.encounter,
            now_ms,
        );
        // 7. Pickup collection
        systems::pickups::run(
            &mut self.world,
            &mut self.scheduler,
            &mut self.events,
            self.config.encounter.pickup_respawn_ms,
            now_ms,
        );
        // 8. Cleanup (retired projectiles, dead hostiles)
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }

    /// End the match if the player died this tick.
    fn check_elimination(&mut self) {
        let Some(player) = self.player else {
            return;
        };
        let Ok(combatant) = self.world.get::<&Combatant>(player) else {
            return;
        };
        if !fsm::is_dead(&combatant) {
            return;
        }

        let summary = EliminationSummary {
            survival_secs: self.time.elapsed_secs(),
            kills: self.score.kills,
            earned: self.score.earned,
            final_weapon: combatant.weapon,
        };
        drop(combatant);

        info!(
            survival_secs = summary.survival_secs,
            kills = summary.kills,
            earned = summary.earned,
            "player eliminated"
        );
        self.elimination = Some(summary);
        self.phase = GamePhase::Eliminated;
        self.scheduler.clear();
    }
}
