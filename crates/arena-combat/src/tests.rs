#[cfg(test)]
mod tests {
    use glam::DVec2;

    use arena_core::components::Combatant;
    use arena_core::constants::*;
    use arena_core::enums::*;
    use arena_core::types::Position;

    use crate::emission::{plan_shots, projectile_velocity};
    use crate::fsm::{self, DamageIgnored, DamageOutcome, DashOutcome, DashRejection, FireRejection};
    use crate::targeting::{select_targets, Candidate, TargetingSystem};

    fn make_player() -> Combatant {
        Combatant {
            side: Side::Friendly,
            hp: PLAYER_MAX_HP,
            max_hp: PLAYER_MAX_HP,
            life: LifeState::Alive,
            weapon: WeaponKind::RapidFire,
            last_fired_ms: None,
            invulnerability_ms: Some(PLAYER_INVULNERABILITY_MS),
            invulnerable: false,
            invulnerable_until_ms: None,
            invulnerability_timer: None,
            move_speed: PLAYER_SPEED,
            dash: DashState::Idle,
            last_dash_ms: None,
            dash_speed: PLAYER_DASH_SPEED,
            dash_duration_ms: PLAYER_DASH_DURATION_MS,
            dash_cooldown_ms: PLAYER_DASH_COOLDOWN_MS,
        }
    }

    fn make_hostile() -> Combatant {
        Combatant {
            side: Side::Hostile,
            hp: HOSTILE_MAX_HP,
            max_hp: HOSTILE_MAX_HP,
            invulnerability_ms: None,
            move_speed: HOSTILE_SPEED,
            dash_cooldown_ms: HOSTILE_DASH_COOLDOWN_MS,
            ..make_player()
        }
    }

    fn candidate(id: u32, x: f64, y: f64) -> Candidate<u32> {
        Candidate {
            id,
            position: Position::new(x, y),
            alive: true,
        }
    }

    fn ids(selected: &[Candidate<u32>]) -> Vec<u32> {
        selected.iter().map(|c| c.id).collect()
    }

    const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    // ---- Targeting: range filter ----

    #[test]
    fn test_no_candidates_in_range_is_empty() {
        let candidates = vec![candidate(1, 600.0, 0.0), candidate(2, 0.0, -700.0)];
        let mut targeting = TargetingSystem::new();
        assert_eq!(targeting.find_target(ORIGIN, &candidates, WeaponKind::RapidFire), None);
        assert!(!targeting.has_target());
        assert!(targeting.targets().is_empty());
        assert!(targeting.aim_angle().is_none());
    }

    #[test]
    fn test_range_is_inclusive() {
        let candidates = vec![candidate(1, 500.0, 0.0)];
        let selected = select_targets(ORIGIN, &candidates, WeaponKind::RapidFire);
        assert_eq!(ids(&selected), vec![1], "candidate exactly at range should lock");

        let candidates = vec![candidate(1, 500.001, 0.0)];
        assert!(select_targets(ORIGIN, &candidates, WeaponKind::RapidFire).is_empty());
    }

    #[test]
    fn test_dead_candidates_ignored() {
        let mut dead = candidate(1, 10.0, 0.0);
        dead.alive = false;
        let candidates = vec![dead, candidate(2, 300.0, 0.0)];
        let selected = select_targets(ORIGIN, &candidates, WeaponKind::RapidFire);
        assert_eq!(ids(&selected), vec![2]);
    }

    // ---- Targeting: policies ----

    #[test]
    fn test_rapid_fire_locks_closest() {
        let candidates = vec![
            candidate(1, 400.0, 0.0),
            candidate(2, 0.0, 120.0),
            candidate(3, -250.0, 0.0),
            candidate(4, 50.0, 900.0),
        ];
        let selected = select_targets(ORIGIN, &candidates, WeaponKind::RapidFire);
        assert_eq!(ids(&selected), vec![2]);
    }

    #[test]
    fn test_closest_tie_keeps_first_encountered() {
        let candidates = vec![candidate(7, 100.0, 0.0), candidate(3, -100.0, 0.0)];
        let selected = select_targets(ORIGIN, &candidates, WeaponKind::RapidFire);
        assert_eq!(ids(&selected), vec![7]);
    }

    #[test]
    fn test_sniper_locks_furthest_in_range() {
        let candidates = vec![
            candidate(1, 400.0, 0.0),
            candidate(2, 0.0, 850.0),
            candidate(3, 950.0, 0.0), // beyond 900
            candidate(4, 100.0, 100.0),
        ];
        let selected = select_targets(ORIGIN, &candidates, WeaponKind::Sniper);
        assert_eq!(ids(&selected), vec![2]);
    }

    #[test]
    fn test_shotgun_locks_up_to_five_ascending() {
        let candidates: Vec<_> = (1..=7)
            .map(|i| candidate(i, 0.0, 340.0 - f64::from(i) * 40.0))
            .collect();
        let selected = select_targets(ORIGIN, &candidates, WeaponKind::Shotgun);
        // Distances: id 7 → 60, id 6 → 100, ... id 3 → 220
        assert_eq!(ids(&selected), vec![7, 6, 5, 4, 3]);

        let few = vec![candidate(1, 300.0, 0.0), candidate(2, 100.0, 0.0)];
        let selected = select_targets(ORIGIN, &few, WeaponKind::Shotgun);
        assert_eq!(ids(&selected), vec![2, 1]);
    }

    #[test]
    fn test_shotgun_primary_drives_aim() {
        let candidates = vec![candidate(1, 0.0, 200.0), candidate(2, 100.0, 0.0)];
        let mut targeting = TargetingSystem::new();
        let primary = targeting.find_target(ORIGIN, &candidates, WeaponKind::Shotgun);
        assert_eq!(primary, Some(2));
        assert_eq!(targeting.targets(), &[2, 1]);
        assert!(targeting.aim_angle().unwrap().abs() < 1e-12, "aim should point east at the primary");
    }

    #[test]
    fn test_burst_prefers_largest_cluster() {
        // Two isolated candidates close to the origin, a 4-cluster further out.
        let candidates = vec![
            candidate(1, 80.0, 0.0),
            candidate(2, -90.0, 0.0),
            candidate(10, 300.0, 300.0),
            candidate(11, 350.0, 300.0),
            candidate(12, 300.0, 350.0),
            candidate(13, 260.0, 280.0),
        ];
        let selected = select_targets(ORIGIN, &candidates, WeaponKind::Burst);
        assert_eq!(selected.len(), 1);
        assert!(
            [10, 11, 12, 13].contains(&selected[0].id),
            "burst should lock into the cluster, got {}",
            selected[0].id
        );
        // Closest cluster member to the origin.
        assert_eq!(selected[0].id, 13);
    }

    #[test]
    fn test_burst_falls_back_to_closest_without_cluster() {
        let candidates = vec![
            candidate(1, 300.0, 0.0),
            candidate(2, 350.0, 0.0), // one neighbor only
            candidate(3, 0.0, -200.0),
        ];
        let selected = select_targets(ORIGIN, &candidates, WeaponKind::Burst);
        assert_eq!(ids(&selected), vec![3]);
    }

    #[test]
    fn test_burst_cluster_tie_first_found() {
        // Two disjoint 3-clusters; the one listed first wins.
        let candidates = vec![
            candidate(1, 500.0, 0.0),
            candidate(2, 520.0, 20.0),
            candidate(3, 540.0, 0.0),
            candidate(4, 0.0, 200.0),
            candidate(5, 20.0, 220.0),
            candidate(6, -20.0, 220.0),
        ];
        let selected = select_targets(ORIGIN, &candidates, WeaponKind::Burst);
        assert_eq!(ids(&selected), vec![1]);
    }

    #[test]
    fn test_lock_retained_until_next_call() {
        let mut targeting = TargetingSystem::new();
        let candidates = vec![candidate(1, 100.0, 0.0)];
        targeting.find_target(ORIGIN, &candidates, WeaponKind::RapidFire);
        assert!(targeting.has_target());
        assert_eq!(targeting.target(), Some(1));
        assert_eq!(targeting.primary_position(), Some(Position::new(100.0, 0.0)));

        targeting.find_target(ORIGIN, &[], WeaponKind::RapidFire);
        assert!(!targeting.has_target());

        targeting.find_target(ORIGIN, &candidates, WeaponKind::RapidFire);
        targeting.clear();
        assert!(!targeting.has_target());
        assert!(targeting.target().is_none());
    }

    // ---- FSM: damage ----

    #[test]
    fn test_damage_ignored_when_dead_or_invulnerable() {
        let mut c = make_player();
        c.life = LifeState::Dead;
        c.hp = 0;
        assert_eq!(
            fsm::take_damage(&mut c, 1, 0),
            DamageOutcome::Ignored(DamageIgnored::Dead)
        );
        assert_eq!(c.hp, 0);

        let mut c = make_player();
        c.invulnerable = true;
        c.invulnerable_until_ms = Some(1000);
        assert_eq!(
            fsm::take_damage(&mut c, 2, 10),
            DamageOutcome::Ignored(DamageIgnored::Invulnerable)
        );
        assert_eq!(c.hp, PLAYER_MAX_HP);
        assert_eq!(fsm::state(&c), CombatState::AliveInvulnerable);
    }

    #[test]
    fn test_non_lethal_damage_opens_invulnerability() {
        let mut c = make_player();
        let outcome = fsm::take_damage(&mut c, 1, 500);
        assert_eq!(
            outcome,
            DamageOutcome::Wounded {
                hp: 2,
                invulnerable_until_ms: Some(1500)
            }
        );
        assert!(c.invulnerable);
        assert_eq!(fsm::state(&c), CombatState::AliveInvulnerable);

        // Second hit inside the window is a no-op.
        assert_eq!(
            fsm::take_damage(&mut c, 1, 900),
            DamageOutcome::Ignored(DamageIgnored::Invulnerable)
        );
        assert_eq!(c.hp, 2);

        assert!(!fsm::end_invulnerability(&mut c, 1499), "window still open");
        assert!(fsm::end_invulnerability(&mut c, 1500));
        assert_eq!(fsm::state(&c), CombatState::AliveVulnerable);
    }

    #[test]
    fn test_lethal_damage_kills_and_clamps() {
        for amount in [3, 4, 100] {
            let mut c = make_player();
            assert!(fsm::would_kill(&c, amount));
            assert_eq!(fsm::take_damage(&mut c, amount, 0), DamageOutcome::Killed);
            assert_eq!(c.hp, 0);
            assert!(fsm::is_dead(&c));
            assert_eq!(fsm::state(&c), CombatState::Dead);
            assert!(!c.invulnerable);
        }
    }

    #[test]
    fn test_hostile_has_no_invulnerability_window() {
        let mut c = make_hostile();
        assert_eq!(
            fsm::take_damage(&mut c, 1, 0),
            DamageOutcome::Wounded {
                hp: 1,
                invulnerable_until_ms: None
            }
        );
        assert!(!c.invulnerable);
        assert_eq!(fsm::take_damage(&mut c, 1, 16), DamageOutcome::Killed);
        assert_eq!(
            fsm::take_damage(&mut c, 1, 32),
            DamageOutcome::Ignored(DamageIgnored::Dead)
        );
    }

    #[test]
    fn test_non_positive_damage_ignored() {
        let mut c = make_player();
        assert_eq!(
            fsm::take_damage(&mut c, 0, 0),
            DamageOutcome::Ignored(DamageIgnored::NonPositive)
        );
        assert_eq!(
            fsm::take_damage(&mut c, -2, 0),
            DamageOutcome::Ignored(DamageIgnored::NonPositive)
        );
        assert_eq!(c.hp, PLAYER_MAX_HP);
    }

    #[test]
    fn test_heal_caps_at_max_and_skips_dead() {
        let mut c = make_player();
        c.hp = 1;
        assert_eq!(fsm::heal(&mut c, 1), 2);
        assert_eq!(fsm::heal(&mut c, 10), PLAYER_MAX_HP);

        c.hp = 0;
        c.life = LifeState::Dead;
        assert_eq!(fsm::heal(&mut c, 2), 0);
    }

    #[test]
    fn test_heal_huge_amount_caps_without_overflow() {
        let mut c = make_player();
        assert_eq!(fsm::heal(&mut c, i32::MAX), PLAYER_MAX_HP);

        c.hp = 1;
        assert_eq!(fsm::heal(&mut c, i32::MAX), PLAYER_MAX_HP);
        assert_eq!(c.hp, PLAYER_MAX_HP);
    }

    // ---- FSM: firing ----

    #[test]
    fn test_fire_rate_gate() {
        let mut c = make_player();
        assert_eq!(fsm::try_fire(&mut c, 1000, true), Ok(()));
        assert_eq!(fsm::try_fire(&mut c, 1799, true), Err(FireRejection::Cooldown));
        assert_eq!(c.last_fired_ms, Some(1000));
        assert_eq!(fsm::try_fire(&mut c, 1800, true), Ok(()));
    }

    #[test]
    fn test_fire_requires_lock() {
        let mut c = make_player();
        assert_eq!(fsm::try_fire(&mut c, 0, false), Err(FireRejection::NoLock));
        assert!(c.last_fired_ms.is_none(), "rejected fire must not start the cooldown");
    }

    #[test]
    fn test_dead_cannot_fire() {
        let mut c = make_player();
        fsm::take_damage(&mut c, 10, 0);
        assert_eq!(fsm::try_fire(&mut c, 5000, true), Err(FireRejection::Dead));
    }

    #[test]
    fn test_fire_cooldown_percent() {
        let mut c = make_player();
        assert_eq!(fsm::fire_cooldown_percent(&c, 0), 100.0);
        fsm::try_fire(&mut c, 0, true).unwrap();
        assert!((fsm::fire_cooldown_percent(&c, 400) - 50.0).abs() < 1e-9);
        assert_eq!(fsm::fire_cooldown_percent(&c, 5000), 100.0);
    }

    #[test]
    fn test_switch_weapon_returns_previous() {
        let mut c = make_player();
        c.hp = 2;
        c.last_fired_ms = Some(123);
        let previous = fsm::switch_weapon(&mut c, WeaponKind::Shotgun);
        assert_eq!(previous, WeaponKind::RapidFire);
        assert_eq!(c.weapon, WeaponKind::Shotgun);
        assert_eq!(c.hp, 2);
        assert_eq!(c.last_fired_ms, Some(123));
    }

    // ---- FSM: dash ----

    #[test]
    fn test_dash_cooldown() {
        let mut c = make_player();
        let outcome = fsm::try_dash(&mut c, 1000, DVec2::new(1.0, 0.0));
        let DashOutcome::Started { velocity, ends_at_ms } = outcome else {
            panic!("dash should start, got {outcome:?}");
        };
        assert!((velocity.x - PLAYER_DASH_SPEED).abs() < 1e-9);
        assert_eq!(ends_at_ms, 1000 + PLAYER_DASH_DURATION_MS);
        assert_eq!(fsm::state(&c), CombatState::Dashing);

        assert_eq!(
            fsm::try_dash(&mut c, 1100, DVec2::X),
            DashOutcome::Rejected(DashRejection::AlreadyDashing)
        );
        assert!(fsm::end_dash(&mut c));
        assert_eq!(
            fsm::try_dash(&mut c, 1000 + PLAYER_DASH_COOLDOWN_MS - 1, DVec2::X),
            DashOutcome::Rejected(DashRejection::Cooldown)
        );
        assert!(!fsm::can_dash(&c, 5999));
        assert!(fsm::can_dash(&c, 6000));
        assert!(matches!(
            fsm::try_dash(&mut c, 1000 + PLAYER_DASH_COOLDOWN_MS, DVec2::X),
            DashOutcome::Started { .. }
        ));
    }

    #[test]
    fn test_dash_normalizes_diagonal() {
        let mut c = make_player();
        let DashOutcome::Started { velocity, .. } = fsm::try_dash(&mut c, 0, DVec2::new(1.0, 1.0))
        else {
            panic!("dash should start");
        };
        assert!((velocity.speed() - PLAYER_DASH_SPEED).abs() < 1e-9);
    }

    #[test]
    fn test_dash_direction_fallback_to_pointer() {
        let from = Position::new(100.0, 100.0);
        let pointer = Position::new(100.0, 0.0);
        let dir = fsm::resolve_dash_direction(DVec2::ZERO, from, pointer).unwrap();
        assert!((dir - DVec2::new(0.0, -1.0)).length() < 1e-12);

        let dir = fsm::resolve_dash_direction(DVec2::new(-1.0, 0.0), from, pointer).unwrap();
        assert!((dir - DVec2::new(-1.0, 0.0)).length() < 1e-12);

        assert!(fsm::resolve_dash_direction(DVec2::ZERO, from, from).is_none());

        let mut c = make_player();
        assert_eq!(
            fsm::try_dash(&mut c, 0, DVec2::ZERO),
            DashOutcome::Rejected(DashRejection::NoDirection)
        );
        assert!(c.last_dash_ms.is_none());
    }

    #[test]
    fn test_dead_cannot_dash() {
        let mut c = make_hostile();
        fsm::take_damage(&mut c, 5, 0);
        assert_eq!(
            fsm::try_dash(&mut c, 0, DVec2::X),
            DashOutcome::Rejected(DashRejection::Dead)
        );
    }

    // ---- Emission ----

    #[test]
    fn test_single_shot() {
        let shots = plan_shots(WeaponKind::Sniper, ORIGIN, 1.0);
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].delay_ms, 0);
        assert_eq!(shots[0].angle, 1.0);
    }

    #[test]
    fn test_shotgun_fan_centered_on_aim() {
        let shots = plan_shots(WeaponKind::Shotgun, ORIGIN, 0.5);
        assert_eq!(shots.len(), 5);
        let step = 15f64.to_radians() / 5.0;
        for (i, shot) in shots.iter().enumerate() {
            let expected = 0.5 + (i as f64 - 2.0) * step;
            assert!((shot.angle - expected).abs() < 1e-12);
            assert_eq!(shot.delay_ms, 0);
        }
        assert!((shots[2].angle - 0.5).abs() < 1e-12, "middle pellet on the aim line");
    }

    #[test]
    fn test_burst_schedule() {
        let origin = Position::new(5.0, 5.0);
        let shots = plan_shots(WeaponKind::Burst, origin, -1.0);
        let delays: Vec<u64> = shots.iter().map(|s| s.delay_ms).collect();
        assert_eq!(delays, vec![0, 100, 200]);
        assert!(shots.iter().all(|s| s.origin == origin && s.angle == -1.0));
    }

    #[test]
    fn test_projectile_velocity_uses_catalog_speed() {
        let v = projectile_velocity(WeaponKind::Shotgun, 0.0);
        assert!((v.x - 350.0).abs() < 1e-9);
        assert!(v.y.abs() < 1e-9);
    }
}
