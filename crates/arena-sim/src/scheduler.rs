//! Delayed work polled once per tick.
//!
//! Burst follow-up shots, invulnerability expiry, dash end, pickup respawn
//! and the periodic hostile spawn are all `ScheduledEvent` records here
//! rather than callbacks. Due events come out ordered by fire time, then by
//! scheduling order.

use hecs::Entity;

use arena_core::enums::{Side, WeaponKind};
use arena_core::types::{Position, TimerId};

/// What happens when a scheduled event comes due.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduledAction {
    /// A follow-up burst shot. Fires from the trigger pull's origin and angle,
    /// whatever became of the shooter.
    BurstShot {
        side: Side,
        weapon: WeaponKind,
        origin: Position,
        angle: f64,
    },
    EndInvulnerability { entity: Entity },
    EndDash { entity: Entity },
    RespawnPickup { pickup: Entity },
    SpawnHostile,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledEvent {
    pub fire_at_ms: u64,
    pub id: TimerId,
    pub action: ScheduledAction,
}

/// Pending events, unordered until drained.
#[derive(Debug, Default)]
pub struct Scheduler {
    pending: Vec<ScheduledEvent>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` at match time `fire_at_ms`.
    pub fn schedule(&mut self, fire_at_ms: u64, action: ScheduledAction) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(ScheduledEvent {
            fire_at_ms,
            id,
            action,
        });
        id
    }

    /// Cancel a pending event. Returns false if it already fired or never existed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|e| e.id != id);
        self.pending.len() != before
    }

    /// Remove and return every event due at or before `now_ms`, oldest first.
    pub fn drain_due(&mut self, now_ms: u64) -> Vec<ScheduledEvent> {
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|e| e.fire_at_ms <= now_ms);
        self.pending = pending;
        due.sort_by_key(|e| (e.fire_at_ms, e.id));
        due
    }

    /// Pending events, in no particular order.
    pub fn pending(&self) -> &[ScheduledEvent] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop everything; ids keep increasing.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
