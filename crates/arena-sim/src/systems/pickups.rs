//! Weapon pickups: collection by the player and scheduled respawn.

use hecs::{Entity, World};
use tracing::info;

use arena_combat::fsm;
use arena_core::components::{Combatant, Player, WeaponPickup};
use arena_core::constants::PICKUP_COLLECT_RADIUS;
use arena_core::enums::PickupStatus;
use arena_core::events::CombatEvent;
use arena_core::types::Position;

use crate::scheduler::{ScheduledAction, Scheduler};

/// Collect every available pickup the living player stands on.
pub fn run(
    world: &mut World,
    scheduler: &mut Scheduler,
    events: &mut Vec<CombatEvent>,
    respawn_ms: u64,
    now_ms: u64,
) {
    let Some((player, player_pos)) = world
        .query::<(&Player, &Position, &Combatant)>()
        .iter()
        .find(|(_, (_, _, c))| !fsm::is_dead(c))
        .map(|(entity, (_, pos, _))| (entity, *pos))
    else {
        return;
    };

    let in_reach: Vec<Entity> = world
        .query::<(&Position, &WeaponPickup)>()
        .iter()
        .filter(|(_, (pos, pickup))| {
            pickup.status == PickupStatus::Available
                && pos.distance_to(&player_pos) < PICKUP_COLLECT_RADIUS
        })
        .map(|(entity, _)| entity)
        .collect();

    for pickup_entity in in_reach {
        let Ok(mut pickup) = world.get::<&mut WeaponPickup>(pickup_entity) else {
            continue;
        };
        let Ok(mut combatant) = world.get::<&mut Combatant>(player) else {
            return;
        };

        let previous = fsm::switch_weapon(&mut combatant, pickup.weapon);
        pickup.status = PickupStatus::CoolingDown;
        pickup.respawn_timer = Some(scheduler.schedule(
            now_ms + respawn_ms,
            ScheduledAction::RespawnPickup {
                pickup: pickup_entity,
            },
        ));

        events.push(CombatEvent::Pickup {
            weapon_kind: pickup.weapon,
            previous,
        });
        info!(weapon = ?pickup.weapon, ?previous, "weapon picked up");
    }
}

/// Scheduled respawn: make a cooling-down pickup available again.
pub fn respawn(world: &mut World, pickup_entity: Entity, events: &mut Vec<CombatEvent>) {
    let Ok((pos, pickup)) = world.query_one_mut::<(&Position, &mut WeaponPickup)>(pickup_entity)
    else {
        return;
    };
    if pickup.status != PickupStatus::CoolingDown {
        return;
    }

    pickup.status = PickupStatus::Available;
    pickup.respawn_timer = None;
    events.push(CombatEvent::PickupRespawned {
        weapon_kind: pickup.weapon,
        position: *pos,
    });
    info!(weapon = ?pickup.weapon, x = pos.x, y = pos.y, "weapon pickup respawned");
}
