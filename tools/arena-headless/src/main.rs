//! arena-headless: runs an arena match without a presentation shell.
//!
//! Usage:
//!   arena-headless [--config arena.json] [--seed N] [--seconds N] [--weapon NAME] [--realtime]
//!
//! A scripted pilot plays until it is eliminated or the time limit is hit;
//! the final score is printed to stdout as JSON.

mod game_loop;
mod pilot;

use std::path::PathBuf;
use std::sync::mpsc;

use anyhow::{anyhow, bail, Context};
use tracing::{debug, info};

use arena_core::commands::PlayerCommand;
use arena_core::enums::{GamePhase, WeaponKind};
use arena_core::events::CombatEvent;
use arena_core::state::ArenaSnapshot;
use arena_core::weapons::config_for_name;
use arena_sim::ArenaConfig;

use crate::game_loop::GameLoopCommand;
use crate::pilot::Pilot;

struct Options {
    config: Option<PathBuf>,
    seed: Option<u64>,
    seconds: u64,
    weapon: Option<WeaponKind>,
    realtime: bool,
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let options = parse_args(std::env::args().skip(1))?;
    let mut config = match &options.config {
        Some(path) => ArenaConfig::from_json_file(path)
            .map_err(|e| anyhow!(e))
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ArenaConfig::default(),
    };
    if let Some(seed) = options.seed {
        config.seed = seed;
    }

    info!(
        seed = config.seed,
        tick_ms = config.tick_ms,
        seconds = options.seconds,
        weapon = options.weapon.map(WeaponKind::short_name),
        realtime = options.realtime,
        "starting headless match"
    );

    let limit_ms = time_limit_ms(options.seconds);
    let game = game_loop::spawn_game_loop(config, options.realtime)?;
    send(&game.commands, PlayerCommand::StartMatch)?;

    let mut pilot = Pilot::new(options.weapon);
    let mut last = None;
    for snapshot in game.snapshots.iter() {
        log_events(&snapshot);

        let finished = snapshot.phase == GamePhase::Eliminated
            || (snapshot.phase == GamePhase::Active && snapshot.time.now_ms >= limit_ms);
        if finished {
            last = Some(snapshot);
            break;
        }

        if snapshot.phase == GamePhase::Active {
            for command in pilot.decide(&snapshot) {
                send(&game.commands, command)?;
            }
        }
    }

    game.commands
        .send(GameLoopCommand::Shutdown)
        .context("game loop stopped before shutdown")?;
    // Unblock a pending snapshot send so the loop sees the shutdown.
    while game.snapshots.recv().is_ok() {}
    game.handle
        .join()
        .map_err(|_| anyhow!("game loop thread panicked"))?;

    let last = last.context("game loop ended without a final snapshot")?;
    report(&last)
}

fn send(tx: &mpsc::Sender<GameLoopCommand>, command: PlayerCommand) -> anyhow::Result<()> {
    tx.send(GameLoopCommand::PlayerCommand(command))
        .context("game loop is gone")
}

fn log_events(snapshot: &ArenaSnapshot) {
    for event in &snapshot.events {
        match event {
            CombatEvent::Hit { .. } | CombatEvent::ShotFired { .. } | CombatEvent::Dash { .. } => {
                debug!(now_ms = snapshot.time.now_ms, ?event, "event");
            }
            CombatEvent::Pickup {
                weapon_kind,
                previous,
            } => info!(
                now_ms = snapshot.time.now_ms,
                weapon = weapon_kind.short_name(),
                previous = previous.short_name(),
                "weapon swapped"
            ),
            _ => info!(now_ms = snapshot.time.now_ms, ?event, "event"),
        }
    }
}

fn time_limit_ms(seconds: u64) -> u64 {
    seconds.saturating_mul(1000)
}

fn report(snapshot: &ArenaSnapshot) -> anyhow::Result<()> {
    info!(
        phase = ?snapshot.phase,
        kills = snapshot.score.kills,
        earned = snapshot.score.earned,
        shots = snapshot.score.shots_fired,
        survival_secs = snapshot.score.survival_secs,
        "match finished"
    );

    let summary = serde_json::json!({
        "phase": snapshot.phase,
        "weapon": snapshot.player.as_ref().map(|p| p.weapon.short_name()),
        "score": snapshot.score,
        "elimination": snapshot.elimination,
    });
    let text = serde_json::to_string_pretty(&summary).context("serializing summary")?;
    println!("{text}");
    Ok(())
}

fn parse_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<Options> {
    let mut options = Options {
        config: None,
        seed: None,
        seconds: 120,
        weapon: None,
        realtime: false,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().context("--config needs a path")?;
                options.config = Some(PathBuf::from(path));
            }
            "--seed" => {
                let value = args.next().context("--seed needs a value")?;
                let seed = value.parse().with_context(|| format!("bad seed: {value}"))?;
                options.seed = Some(seed);
            }
            "--seconds" => {
                let value = args.next().context("--seconds needs a value")?;
                options.seconds = value
                    .parse()
                    .with_context(|| format!("bad seconds: {value}"))?;
            }
            "--weapon" => {
                let name = args.next().context("--weapon needs a name")?;
                options.weapon = Some(config_for_name(&name).kind);
            }
            "--realtime" => options.realtime = true,
            "help" | "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                print_usage();
                bail!("unknown argument: {other}");
            }
        }
    }

    Ok(options)
}

fn print_usage() {
    eprintln!(
        "arena-headless: run an arena match with a scripted pilot\n\
         \n\
           --config <path>  JSON arena config (missing fields use defaults)\n\
           --seed <N>       Override the RNG seed\n\
           --seconds <N>    Match time limit in seconds (default: 120)\n\
           --weapon <name>  Pickup the pilot holds out for: rapid, sniper, shotgun, burst\n\
           --realtime       Pace ticks at wall-clock speed\n\
         \n\
         Logging: RUST_LOG=debug for per-shot events, LOG_FORMAT=json for JSON lines.\n"
    );
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}
