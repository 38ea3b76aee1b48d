#[cfg(test)]
mod tests {
    use crate::commands::PlayerCommand;
    use crate::enums::*;
    use crate::events::CombatEvent;
    use crate::state::ArenaSnapshot;
    use crate::types::{Position, SimTime, Velocity};
    use crate::weapons::{config_for, config_for_name};

    // ---- Weapon catalog ----

    #[test]
    fn test_catalog_table() {
        let rapid = config_for(WeaponKind::RapidFire);
        assert_eq!(rapid.fire_rate_ms, 800);
        assert_eq!(rapid.projectile_speed, 500.0);
        assert_eq!(rapid.damage, 1);
        assert_eq!(rapid.range, 500.0);

        let sniper = config_for(WeaponKind::Sniper);
        assert_eq!(sniper.fire_rate_ms, 2000);
        assert_eq!(sniper.projectile_speed, 800.0);
        assert_eq!(sniper.damage, 2);
        assert_eq!(sniper.range, 900.0);

        let shotgun = config_for(WeaponKind::Shotgun);
        assert_eq!(shotgun.fire_rate_ms, 1500);
        assert_eq!(shotgun.pellet_count, 5);
        assert_eq!(shotgun.spread_deg, 15.0);
        assert_eq!(shotgun.targeting.max_targets, 5);

        let burst = config_for(WeaponKind::Burst);
        assert_eq!(burst.fire_rate_ms, 1200);
        assert_eq!(burst.burst_count, 3);
        assert_eq!(burst.burst_delay_ms, 100);
        assert_eq!(burst.targeting.policy, SelectionPolicy::Cluster);
    }

    #[test]
    fn test_catalog_kinds_match_entries() {
        for kind in WeaponKind::ALL {
            let archetype = config_for(kind);
            assert_eq!(archetype.kind, kind);
            assert_eq!(archetype.targeting.pattern, ScanPattern::Omni);
            assert_eq!(
                archetype.targeting.effective_range, archetype.range,
                "{kind:?} lock range should equal projectile range"
            );
        }
    }

    #[test]
    fn test_unknown_weapon_name_falls_back_to_rapid() {
        assert_eq!(WeaponKind::from_name("laser"), WeaponKind::RapidFire);
        assert_eq!(WeaponKind::from_name(""), WeaponKind::RapidFire);
        assert_eq!(WeaponKind::from_name(" Sniper "), WeaponKind::Sniper);
        assert_eq!(config_for_name("plasma").kind, WeaponKind::RapidFire);
        for kind in WeaponKind::ALL {
            assert_eq!(WeaponKind::from_name(kind.short_name()), kind);
        }
    }

    // ---- Geometry ----

    #[test]
    fn test_distance_and_angle() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);

        let east = Position::new(10.0, 0.0);
        assert!(a.angle_to(&east).abs() < 1e-12);

        let down = Position::new(0.0, 10.0);
        assert!((a.angle_to(&down) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_velocity_from_angle() {
        let v = Velocity::from_angle(std::f64::consts::PI, 500.0);
        assert!((v.x + 500.0).abs() < 1e-9);
        assert!(v.y.abs() < 1e-9);
        assert!((v.speed() - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..50 {
            time.advance(20);
        }
        assert_eq!(time.tick, 50);
        assert_eq!(time.now_ms, 1000);
        assert!((time.elapsed_secs() - 1.0).abs() < 1e-12);
        assert!((SimTime::dt(20) - 0.02).abs() < 1e-12);
    }

    // ---- Wire shapes ----

    #[test]
    fn test_command_tagging() {
        let json = serde_json::to_string(&PlayerCommand::SetMoveInput { x: 1.0, y: 0.0 }).unwrap();
        assert!(json.contains("\"type\":\"SetMoveInput\""), "got {json}");

        let cmd: PlayerCommand = serde_json::from_str(r#"{"type":"Fire"}"#).unwrap();
        assert!(matches!(cmd, PlayerCommand::Fire));

        let cmd: PlayerCommand = serde_json::from_str(r#"{"type":"Heal","amount":2}"#).unwrap();
        assert!(matches!(cmd, PlayerCommand::Heal { amount: 2 }));
    }

    #[test]
    fn test_hit_event_shape() {
        let event = CombatEvent::Hit {
            position: Position::new(1.0, 2.0),
            weapon_kind: WeaponKind::Sniper,
            victim_side: Side::Hostile,
            is_kill: true,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "Hit");
        assert_eq!(value["weapon_kind"], "Sniper");
        assert_eq!(value["is_kill"], true);
    }

    #[test]
    fn test_default_snapshot_serializes() {
        let snap = ArenaSnapshot::default();
        let json = serde_json::to_string(&snap).unwrap();
        let back: ArenaSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.phase, GamePhase::Menu);
        assert!(back.player.is_none());
        assert!(back.hostiles.is_empty());
    }

    #[test]
    fn test_side_opponent() {
        assert_eq!(Side::Friendly.opponent(), Side::Hostile);
        assert_eq!(Side::Hostile.opponent(), Side::Friendly);
    }
}
