//! Game loop thread: runs the arena engine and streams snapshots back.
//!
//! The engine is created inside this thread because it's cleaner for
//! ownership. Commands arrive via an `mpsc` channel; snapshots leave through a
//! rendezvous-sized channel, so a slow consumer paces the loop.

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use anyhow::Context;
use tracing::debug;

use arena_core::commands::PlayerCommand;
use arena_core::state::ArenaSnapshot;
use arena_sim::{ArenaConfig, ArenaEngine};

/// Commands sent from the driver to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Handles to a running game loop.
pub struct GameLoop {
    pub commands: mpsc::Sender<GameLoopCommand>,
    pub snapshots: mpsc::Receiver<ArenaSnapshot>,
    pub handle: JoinHandle<()>,
}

/// Spawns the game loop in a new thread.
///
/// With `realtime` the loop sleeps to hold one tick per `tick_ms`; otherwise
/// it runs as fast as the snapshot consumer allows.
pub fn spawn_game_loop(config: ArenaConfig, realtime: bool) -> anyhow::Result<GameLoop> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let (snap_tx, snap_rx) = mpsc::sync_channel::<ArenaSnapshot>(1);

    let tick_duration = if realtime {
        Duration::from_millis(config.tick_ms)
    } else {
        Duration::ZERO
    };

    let handle = std::thread::Builder::new()
        .name("arena-game-loop".into())
        .spawn(move || run_game_loop(ArenaEngine::new(config), cmd_rx, snap_tx, tick_duration))
        .context("failed to spawn game loop thread")?;

    Ok(GameLoop {
        commands: cmd_tx,
        snapshots: snap_rx,
        handle,
    })
}

/// The game loop. Runs until Shutdown, or until either channel disconnects.
fn run_game_loop(
    mut engine: ArenaEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    snap_tx: mpsc::SyncSender<ArenaSnapshot>,
    tick_duration: Duration,
) {
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) => {
                    debug!(tick = engine.time().tick, "game loop shutdown");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick();

        // 3. Hand the snapshot to the driver
        if snap_tx.send(snapshot).is_err() {
            return;
        }

        // 4. Sleep until next tick
        if tick_duration.is_zero() {
            continue;
        }
        next_tick_time += tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > tick_duration * 2 {
            // Too far behind, reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::enums::GamePhase;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartMatch))
            .unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Pause))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let commands: Vec<_> = rx.try_iter().collect();
        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::StartMatch)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_loop_starts_match_and_shuts_down() {
        let game = spawn_game_loop(ArenaConfig::default(), false).unwrap();
        game.commands
            .send(GameLoopCommand::PlayerCommand(PlayerCommand::StartMatch))
            .unwrap();

        let active = game
            .snapshots
            .iter()
            .take(20)
            .any(|snap| snap.phase == GamePhase::Active);
        assert!(active, "match should become active");

        game.commands.send(GameLoopCommand::Shutdown).unwrap();
        // Drain so a blocked send can observe the shutdown.
        while game.snapshots.recv().is_ok() {}
        game.handle.join().unwrap();
    }
}
