#[cfg(test)]
mod tests {
    use glam::Vec2;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use skyfire_core::components::{MovementPattern, ShieldState};
    use skyfire_core::config::PlayField;
    use skyfire_core::constants::{BOSS_HEIGHT, BOSS_Y_LOWER_BOUND};
    use skyfire_core::types::Body;

    use crate::fsm::*;

    fn always() -> StepRng {
        // Every Bernoulli trial succeeds; every shuffle/range draw picks the low end.
        StepRng::new(0, 0)
    }

    fn fixed_pattern(moves: Vec<f32>) -> MovementPattern {
        MovementPattern {
            moves,
            cursor: 0,
            same_move_count: 0,
        }
    }

    fn boss_body(y: f32) -> Body {
        Body::new(Vec2::new(1000.0, y), Vec2::new(300.0, 150.0))
    }

    // ---- Movement pattern ----

    #[test]
    fn test_new_pattern_has_equal_counts() {
        let tuning = BossTuning::default();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let pattern = new_pattern(&tuning, &mut rng);
        let v = tuning.vertical_velocity;
        let up = pattern.moves.iter().filter(|&&m| m == -v).count();
        let down = pattern.moves.iter().filter(|&&m| m == v).count();
        let still = pattern.moves.iter().filter(|&&m| m == 0.0).count();
        assert_eq!(up, tuning.moves_per_cycle);
        assert_eq!(down, tuning.moves_per_cycle);
        assert_eq!(still, tuning.moves_per_cycle);
        assert_eq!(pattern.cursor, 0);
        assert_eq!(pattern.same_move_count, 0);
    }

    #[test]
    fn test_cursor_holds_until_threshold() {
        let mut pattern = fixed_pattern(vec![8.0, -8.0, 0.0]);
        let mut rng = always();
        for i in 1..4 {
            let m = next_move(&mut pattern, 4, &mut rng);
            assert_eq!(m, 8.0);
            assert_eq!(pattern.cursor, 0, "Cursor must hold before the threshold");
            assert_eq!(pattern.same_move_count, i);
        }
    }

    #[test]
    fn test_cursor_advances_and_reshuffles_at_threshold() {
        let mut pattern = fixed_pattern(vec![8.0, -8.0, 0.0, 8.0, -8.0, 0.0]);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let threshold = 3;
        let mut last = 0.0;
        for _ in 0..threshold {
            last = next_move(&mut pattern, threshold, &mut rng);
        }
        assert_eq!(last, 8.0, "Threshold pick still returns the pre-shuffle move");
        assert_eq!(pattern.cursor, 1);
        assert_eq!(pattern.same_move_count, 0);

        let mut sorted = pattern.moves.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(sorted, vec![-8.0, -8.0, 0.0, 0.0, 8.0, 8.0], "Shuffle keeps the multiset");
    }

    #[test]
    fn test_cursor_wraps_to_zero() {
        let mut pattern = fixed_pattern(vec![8.0, -8.0, 0.0]);
        pattern.cursor = 2;
        pattern.same_move_count = 1;
        let mut rng = always();
        next_move(&mut pattern, 2, &mut rng);
        assert_eq!(pattern.cursor, 0, "Cursor wraps from len-1 to 0");
        assert_eq!(pattern.same_move_count, 0);
    }

    #[test]
    fn test_empty_pattern_is_still() {
        let mut pattern = fixed_pattern(Vec::new());
        assert_eq!(next_move(&mut pattern, 3, &mut always()), 0.0);
    }

    #[test]
    fn test_vertical_move_within_band() {
        let mut body = boss_body(300.0);
        assert!(apply_vertical_move(&mut body, 8.0, 0.0, 600.0));
        assert_eq!(body.position().y, 308.0);
    }

    #[test]
    fn test_vertical_move_rejected_outside_band() {
        let mut body = boss_body(4.0);
        assert!(!apply_vertical_move(&mut body, -8.0, 0.0, 600.0));
        assert_eq!(body.position().y, 4.0, "Rejected move reverts displacement");

        let mut body = boss_body(596.0);
        assert!(!apply_vertical_move(&mut body, 8.0, 0.0, 600.0));
        assert_eq!(body.position().y, 596.0);
    }

    // ---- Shield ----

    #[test]
    fn test_shield_waits_for_cooldown() {
        let tuning = BossTuning {
            shield_probability: 1.0,
            shield_cooldown_frames: 5,
            ..Default::default()
        };
        let mut shield = ShieldState::default();
        let mut rng = always();
        for _ in 0..4 {
            assert_eq!(update_shield(&mut shield, &tuning, &mut rng), ShieldTransition::Unchanged);
        }
        assert_eq!(shield.frames_since_deactivated, 4);
        assert_eq!(update_shield(&mut shield, &tuning, &mut rng), ShieldTransition::Activated);
        assert!(shield.active);
        assert_eq!(shield.frames_active, 0);
        assert_eq!(shield.frames_since_deactivated, 0);
    }

    #[test]
    fn test_shield_needs_successful_trial() {
        let tuning = BossTuning {
            shield_probability: 0.0,
            shield_cooldown_frames: 1,
            ..Default::default()
        };
        let mut shield = ShieldState::default();
        let mut rng = always();
        for _ in 0..50 {
            assert_eq!(update_shield(&mut shield, &tuning, &mut rng), ShieldTransition::Unchanged);
        }
        assert!(!shield.active);
    }

    #[test]
    fn test_shield_expires_after_max_duration() {
        let tuning = BossTuning {
            max_frames_with_shield: 3,
            ..Default::default()
        };
        let mut shield = ShieldState {
            active: true,
            frames_active: 0,
            frames_since_deactivated: 0,
        };
        let mut rng = always();
        assert_eq!(update_shield(&mut shield, &tuning, &mut rng), ShieldTransition::Unchanged);
        assert_eq!(update_shield(&mut shield, &tuning, &mut rng), ShieldTransition::Unchanged);
        assert_eq!(update_shield(&mut shield, &tuning, &mut rng), ShieldTransition::Deactivated);
        assert_eq!(shield, ShieldState::default());
    }

    #[test]
    fn test_shield_cycle_restarts_cooldown() {
        let tuning = BossTuning {
            shield_probability: 1.0,
            shield_cooldown_frames: 2,
            max_frames_with_shield: 2,
            ..Default::default()
        };
        let mut shield = ShieldState::default();
        let mut rng = always();
        let transitions: Vec<_> = (0..8)
            .map(|_| update_shield(&mut shield, &tuning, &mut rng))
            .collect();
        assert_eq!(
            transitions,
            vec![
                ShieldTransition::Unchanged,
                ShieldTransition::Activated,
                ShieldTransition::Unchanged,
                ShieldTransition::Deactivated,
                ShieldTransition::Unchanged,
                ShieldTransition::Activated,
                ShieldTransition::Unchanged,
                ShieldTransition::Deactivated,
            ]
        );
    }

    // ---- Fire + step ----

    #[test]
    fn test_fire_trial_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!((0..100).all(|_| should_fire(1.0, &mut rng)));
        assert!((0..100).all(|_| !should_fire(0.0, &mut rng)));
    }

    #[test]
    fn test_step_moves_and_updates_shield() {
        let tuning = BossTuning {
            shield_probability: 0.0,
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut boss = new_boss_state(&tuning, &mut rng);
        boss.movement = fixed_pattern(vec![tuning.vertical_velocity]);
        let mut body = boss_body(300.0);

        let update = step(&mut boss, &mut body, &tuning, &mut rng);
        assert_eq!(update.requested_dy, tuning.vertical_velocity);
        assert!(update.moved);
        assert_eq!(update.shield, ShieldTransition::Unchanged);
        assert_eq!(body.position().y, 300.0 + tuning.vertical_velocity);
        assert_eq!(boss.shield.frames_since_deactivated, 1);
    }

    #[test]
    fn test_boss_stays_in_band_over_long_run() {
        let tuning = BossTuning::default();
        let mut rng = ChaCha8Rng::seed_from_u64(77);
        let mut boss = new_boss_state(&tuning, &mut rng);
        let mut body = boss_body(300.0);
        for _ in 0..5_000 {
            step(&mut boss, &mut body, &tuning, &mut rng);
            let y = body.position().y;
            assert!(y >= tuning.y_upper_bound && y <= tuning.y_lower_bound);
        }
    }

    #[test]
    fn test_band_follows_field_height() {
        assert_eq!(
            BossTuning::for_field(&PlayField::default()).y_lower_bound,
            BOSS_Y_LOWER_BOUND
        );

        let short = PlayField {
            width: 800.0,
            height: 400.0,
        };
        let tuning = BossTuning::for_field(&short);
        assert_eq!(tuning.y_lower_bound, 400.0 - BOSS_HEIGHT);
        assert_eq!(tuning.y_upper_bound, BossTuning::default().y_upper_bound);
        assert_eq!(tuning.fire_rate, BossTuning::default().fire_rate);

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut boss = new_boss_state(&tuning, &mut rng);
        let mut body = boss_body(100.0);
        for _ in 0..2_000 {
            step(&mut boss, &mut body, &tuning, &mut rng);
            assert!(body.position().y + BOSS_HEIGHT <= short.height);
        }
    }
}
