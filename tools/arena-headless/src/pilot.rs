//! Scripted pilot: turns each snapshot into the next player commands.
//!
//! Keeps the trigger pulled while anything is locked, trades the starting
//! weapon for the nearest pickup (or only the preferred kind, when one is
//! set), backs away from close hostiles and dashes
//! out when one gets very close.

use arena_core::commands::PlayerCommand;
use arena_core::enums::{PickupStatus, WeaponKind};
use arena_core::state::{ArenaSnapshot, PlayerView};
use arena_core::types::Position;

/// Hostiles closer than this trigger an escape dash.
const PANIC_RANGE: f64 = 120.0;
/// Hostiles closer than this are kited away from.
const KITE_RANGE: f64 = 300.0;

#[derive(Debug, Default)]
pub struct Pilot {
    last_move: (f64, f64),
    preferred: Option<WeaponKind>,
}

impl Pilot {
    pub fn new(preferred: Option<WeaponKind>) -> Self {
        Self {
            preferred,
            ..Self::default()
        }
    }

    /// Commands for the next tick. Empty when there is no living player.
    pub fn decide(&mut self, snap: &ArenaSnapshot) -> Vec<PlayerCommand> {
        let Some(player) = snap.player.as_ref() else {
            return Vec::new();
        };
        let mut commands = Vec::new();

        if !player.locked_targets.is_empty() && player.fire_cooldown_pct >= 100.0 {
            commands.push(PlayerCommand::Fire);
        }

        let nearest_hostile = snap
            .hostiles
            .iter()
            .map(|h| h.position)
            .min_by(|a, b| {
                player
                    .position
                    .distance_to(a)
                    .total_cmp(&player.position.distance_to(b))
            });

        let heading = match nearest_hostile {
            Some(threat) if player.position.distance_to(&threat) < KITE_RANGE => {
                if player.position.distance_to(&threat) < PANIC_RANGE && player.dash_ready {
                    commands.push(PlayerCommand::Dash);
                }
                away_from(player.position, threat)
            }
            _ => self.toward_pickup(snap, player),
        };

        if heading != self.last_move {
            self.last_move = heading;
            commands.push(PlayerCommand::SetMoveInput {
                x: heading.0,
                y: heading.1,
            });
        }
        commands
    }

    fn toward_pickup(&self, snap: &ArenaSnapshot, player: &PlayerView) -> (f64, f64) {
        let settled = match self.preferred {
            Some(kind) => player.weapon == kind,
            None => player.weapon != WeaponKind::RapidFire,
        };
        if settled {
            return (0.0, 0.0);
        }
        snap.pickups
            .iter()
            .filter(|p| p.status == PickupStatus::Available)
            .filter(|p| self.preferred.map_or(true, |kind| p.weapon == kind))
            .map(|p| p.position)
            .min_by(|a, b| {
                player
                    .position
                    .distance_to(a)
                    .total_cmp(&player.position.distance_to(b))
            })
            .map(|target| toward(player.position, target))
            .unwrap_or((0.0, 0.0))
    }
}

/// Axis-snapped direction like a held key pair.
fn toward(from: Position, to: Position) -> (f64, f64) {
    let axis = |d: f64| if d.abs() < 5.0 { 0.0 } else { d.signum() };
    (axis(to.x - from.x), axis(to.y - from.y))
}

fn away_from(from: Position, threat: Position) -> (f64, f64) {
    let (x, y) = toward(threat, from);
    if x == 0.0 && y == 0.0 {
        (1.0, 0.0)
    } else {
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::enums::{AiState, CombatState};
    use arena_core::state::{HostileView, PickupView};

    fn snapshot_with_player(position: Position) -> ArenaSnapshot {
        ArenaSnapshot {
            player: Some(PlayerView {
                entity: 1,
                position,
                hp: 3,
                max_hp: 3,
                weapon: WeaponKind::RapidFire,
                state: CombatState::AliveVulnerable,
                invulnerable: false,
                dashing: false,
                dash_ready: true,
                fire_cooldown_pct: 100.0,
                dash_cooldown_pct: 100.0,
                aim_angle: None,
                locked_targets: Vec::new(),
                lock_range: 500.0,
            }),
            ..Default::default()
        }
    }

    fn hostile_at(position: Position) -> HostileView {
        HostileView {
            entity: 9,
            position,
            heading: 0.0,
            hp: 2,
            max_hp: 2,
            weapon: WeaponKind::Sniper,
            ai_state: AiState::Chase,
            dashing: false,
        }
    }

    #[test]
    fn test_fires_only_with_lock() {
        let mut pilot = Pilot::new(None);
        let mut snap = snapshot_with_player(Position::new(0.0, 0.0));
        assert!(!pilot.decide(&snap).iter().any(|c| matches!(c, PlayerCommand::Fire)));

        if let Some(p) = snap.player.as_mut() {
            p.locked_targets = vec![9];
        }
        assert!(pilot.decide(&snap).iter().any(|c| matches!(c, PlayerCommand::Fire)));
    }

    #[test]
    fn test_dashes_away_from_close_hostile() {
        let mut pilot = Pilot::new(None);
        let mut snap = snapshot_with_player(Position::new(0.0, 0.0));
        snap.hostiles.push(hostile_at(Position::new(50.0, 0.0)));

        let commands = pilot.decide(&snap);
        assert!(commands.iter().any(|c| matches!(c, PlayerCommand::Dash)));
        assert!(commands
            .iter()
            .any(|c| matches!(c, PlayerCommand::SetMoveInput { x, .. } if *x < 0.0)));
    }

    #[test]
    fn test_seeks_only_preferred_pickup() {
        let mut pilot = Pilot::new(Some(WeaponKind::Sniper));
        let mut snap = snapshot_with_player(Position::new(0.0, 0.0));
        snap.pickups.push(PickupView {
            position: Position::new(100.0, 0.0),
            weapon: WeaponKind::Shotgun,
            status: PickupStatus::Available,
        });
        snap.pickups.push(PickupView {
            position: Position::new(-400.0, 0.0),
            weapon: WeaponKind::Sniper,
            status: PickupStatus::Available,
        });

        let commands = pilot.decide(&snap);
        assert!(commands
            .iter()
            .any(|c| matches!(c, PlayerCommand::SetMoveInput { x, .. } if *x < 0.0)));

        if let Some(p) = snap.player.as_mut() {
            p.weapon = WeaponKind::Sniper;
        }
        let commands = pilot.decide(&snap);
        assert!(commands
            .iter()
            .any(|c| matches!(c, PlayerCommand::SetMoveInput { x, y } if *x == 0.0 && *y == 0.0)));
    }

    #[test]
    fn test_no_player_no_commands() {
        let mut pilot = Pilot::new(None);
        assert!(pilot.decide(&ArenaSnapshot::default()).is_empty());
    }
}
