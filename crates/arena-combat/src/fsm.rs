//! Combatant state machine.
//!
//! States: AliveVulnerable, AliveInvulnerable, Dashing, Dead (terminal).
//! Every function is a policy check first: calls that are not allowed in the
//! current state leave the combatant untouched and report why.

use glam::DVec2;

use arena_core::components::Combatant;
use arena_core::enums::{CombatState, DashState, LifeState, WeaponKind};
use arena_core::types::{Position, Velocity};
use arena_core::weapons::config_for;

/// Result of a damage application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Nothing changed.
    Ignored(DamageIgnored),
    /// Survived. `invulnerable_until_ms` is set when a window opened.
    Wounded {
        hp: i32,
        invulnerable_until_ms: Option<u64>,
    },
    /// hp reached zero; the combatant is now Dead.
    Killed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageIgnored {
    Dead,
    Invulnerable,
    NonPositive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireRejection {
    Dead,
    Cooldown,
    NoLock,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DashOutcome {
    Started { velocity: Velocity, ends_at_ms: u64 },
    Rejected(DashRejection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashRejection {
    Dead,
    AlreadyDashing,
    Cooldown,
    NoDirection,
}

/// Externally visible state.
pub fn state(c: &Combatant) -> CombatState {
    if c.life == LifeState::Dead {
        CombatState::Dead
    } else if is_dashing(c) {
        CombatState::Dashing
    } else if c.invulnerable {
        CombatState::AliveInvulnerable
    } else {
        CombatState::AliveVulnerable
    }
}

pub fn is_dead(c: &Combatant) -> bool {
    c.life == LifeState::Dead
}

pub fn is_dashing(c: &Combatant) -> bool {
    matches!(c.dash, DashState::Dashing { .. })
}

/// Whether `amount` damage would kill, evaluated before it is applied.
pub fn would_kill(c: &Combatant, amount: i32) -> bool {
    c.hp - amount <= 0
}

// ---- Damage / heal ----

/// Apply `amount` damage at match time `now_ms`.
pub fn take_damage(c: &mut Combatant, amount: i32, now_ms: u64) -> DamageOutcome {
    if is_dead(c) {
        return DamageOutcome::Ignored(DamageIgnored::Dead);
    }
    if c.invulnerable {
        return DamageOutcome::Ignored(DamageIgnored::Invulnerable);
    }
    if amount <= 0 {
        return DamageOutcome::Ignored(DamageIgnored::NonPositive);
    }

    c.hp = (c.hp - amount).max(0);

    if c.hp == 0 {
        c.life = LifeState::Dead;
        c.invulnerable = false;
        c.invulnerable_until_ms = None;
        c.dash = DashState::Idle;
        return DamageOutcome::Killed;
    }

    let invulnerable_until_ms = c.invulnerability_ms.map(|window| now_ms + window);
    if invulnerable_until_ms.is_some() {
        c.invulnerable = true;
        c.invulnerable_until_ms = invulnerable_until_ms;
    }

    DamageOutcome::Wounded {
        hp: c.hp,
        invulnerable_until_ms,
    }
}

/// Close the invulnerability window if it has expired. Returns true on change.
pub fn end_invulnerability(c: &mut Combatant, now_ms: u64) -> bool {
    if !c.invulnerable {
        return false;
    }
    match c.invulnerable_until_ms {
        Some(until) if now_ms < until => false,
        _ => {
            c.invulnerable = false;
            c.invulnerable_until_ms = None;
            c.invulnerability_timer = None;
            true
        }
    }
}

/// Restore up to `amount` hp, capped at `max_hp`. Returns the new hp.
pub fn heal(c: &mut Combatant, amount: i32) -> i32 {
    if !is_dead(c) && amount > 0 {
        c.hp = c.hp.saturating_add(amount).min(c.max_hp);
    }
    c.hp
}

// ---- Weapon ----

/// Check the fire gate without consuming it.
///
/// `has_lock` is the targeting lock for the player; hostiles pass their own
/// range check instead.
pub fn check_fire(c: &Combatant, now_ms: u64, has_lock: bool) -> Result<(), FireRejection> {
    if is_dead(c) {
        return Err(FireRejection::Dead);
    }
    if let Some(last) = c.last_fired_ms {
        if now_ms.saturating_sub(last) < config_for(c.weapon).fire_rate_ms {
            return Err(FireRejection::Cooldown);
        }
    }
    if !has_lock {
        return Err(FireRejection::NoLock);
    }
    Ok(())
}

/// Pass the fire gate and start the cooldown.
pub fn try_fire(c: &mut Combatant, now_ms: u64, has_lock: bool) -> Result<(), FireRejection> {
    check_fire(c, now_ms, has_lock)?;
    c.last_fired_ms = Some(now_ms);
    Ok(())
}

/// Fire readiness as 0..=100.
pub fn fire_cooldown_percent(c: &Combatant, now_ms: u64) -> f64 {
    cooldown_percent(c.last_fired_ms, config_for(c.weapon).fire_rate_ms, now_ms)
}

/// Swap the held weapon. Returns the previously held kind.
pub fn switch_weapon(c: &mut Combatant, kind: WeaponKind) -> WeaponKind {
    std::mem::replace(&mut c.weapon, kind)
}

// ---- Dash ----

pub fn can_dash(c: &Combatant, now_ms: u64) -> bool {
    !is_dead(c) && !is_dashing(c) && dash_cooled_down(c, now_ms)
}

fn dash_cooled_down(c: &Combatant, now_ms: u64) -> bool {
    c.last_dash_ms
        .map_or(true, |last| now_ms.saturating_sub(last) >= c.dash_cooldown_ms)
}

/// Dash readiness as 0..=100.
pub fn dash_cooldown_percent(c: &Combatant, now_ms: u64) -> f64 {
    cooldown_percent(c.last_dash_ms, c.dash_cooldown_ms, now_ms)
}

/// Dash direction: the held movement direction, else toward the pointer.
pub fn resolve_dash_direction(move_dir: DVec2, from: Position, pointer: Position) -> Option<DVec2> {
    if move_dir.length_squared() > 0.0 {
        return Some(move_dir.normalize());
    }
    let to_pointer = pointer.as_vec() - from.as_vec();
    to_pointer.try_normalize()
}

/// Start a dash along `direction` (need not be normalized).
pub fn try_dash(c: &mut Combatant, now_ms: u64, direction: DVec2) -> DashOutcome {
    if is_dead(c) {
        return DashOutcome::Rejected(DashRejection::Dead);
    }
    if is_dashing(c) {
        return DashOutcome::Rejected(DashRejection::AlreadyDashing);
    }
    if !dash_cooled_down(c, now_ms) {
        return DashOutcome::Rejected(DashRejection::Cooldown);
    }
    let Some(dir) = direction.try_normalize() else {
        return DashOutcome::Rejected(DashRejection::NoDirection);
    };

    let ends_at_ms = now_ms + c.dash_duration_ms;
    c.dash = DashState::Dashing { until_ms: ends_at_ms };
    c.last_dash_ms = Some(now_ms);

    DashOutcome::Started {
        velocity: Velocity::from(dir * c.dash_speed),
        ends_at_ms,
    }
}

/// Leave the Dashing state. Returns true if the combatant was dashing.
pub fn end_dash(c: &mut Combatant) -> bool {
    let was_dashing = is_dashing(c);
    c.dash = DashState::Idle;
    was_dashing
}

fn cooldown_percent(last_ms: Option<u64>, cooldown_ms: u64, now_ms: u64) -> f64 {
    match last_ms {
        None => 100.0,
        Some(_) if cooldown_ms == 0 => 100.0,
        Some(last) => {
            let elapsed = now_ms.saturating_sub(last) as f64;
            (elapsed / cooldown_ms as f64 * 100.0).min(100.0)
        }
    }
}
