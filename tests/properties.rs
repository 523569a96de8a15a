use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use adaptive_arcade::ai::{AiData, MOVEMENT_WINDOW, MetricsSnapshot, RuleEngine, assist};
use adaptive_arcade::consts::{MAX_SUBSTEPS, TICK_MS};
use adaptive_arcade::platform::{FrameClock, InputLatch, InputState, MemoryStore};
use adaptive_arcade::sim::SessionStats;
use adaptive_arcade::tuning::{MIN_OBSTACLE_FREQUENCY, MIN_SPEED};
use adaptive_arcade::{Game, GameParameters};

fn metrics() -> impl Strategy<Value = MetricsSnapshot> {
    (0.0f64..120.0, 0.0f64..2.0, 0u64..6000).prop_map(|(survival, error_rate, score)| {
        MetricsSnapshot {
            survival_seconds: survival,
            error_rate,
            average_reaction_ms: TICK_MS,
            score,
        }
    })
}

fn held_keys() -> impl Strategy<Value = InputState> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(move_left, move_right, jump)| {
        InputState {
            move_left,
            move_right,
            jump,
        }
    })
}

proptest! {
    #[test]
    fn rules_never_break_parameter_bounds(
        seed in any::<u64>(),
        rounds in prop::collection::vec(metrics(), 1..60),
        hits in 0u32..6,
    ) {
        let engine = RuleEngine::new();
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut params = GameParameters::DEFAULT;
        let mut level = 1;

        for (i, snapshot) in rounds.iter().enumerate() {
            let before = level;
            engine.evaluate(snapshot, &mut params, &mut level, &mut rng);
            prop_assert!(params.speed >= MIN_SPEED);
            prop_assert!((0.0..=1.0).contains(&params.obstacle_frequency));
            prop_assert!(level == before || level == before + 1);

            if i as u32 == hits {
                assist(&mut params, 3);
                prop_assert!(params.speed >= MIN_SPEED);
                prop_assert!(params.obstacle_frequency >= MIN_OBSTACLE_FREQUENCY);
            }
        }
    }

    #[test]
    fn movement_window_keeps_newest_in_order(times in prop::collection::vec(0.0f64..1e6, 0..400)) {
        let mut data = AiData::new();
        for &t in &times {
            data.record_movement(Vec2::ZERO, t);
        }
        let kept: Vec<f64> = data.movement_patterns.iter().map(|s| s.time_ms).collect();
        let expected = &times[times.len().saturating_sub(MOVEMENT_WINDOW)..];
        prop_assert_eq!(kept.as_slice(), expected);
    }

    #[test]
    fn jump_fires_once_per_press(presses in prop::collection::vec(any::<bool>(), 1..200)) {
        let mut latch = InputLatch::new();
        let mut previous = false;
        for held in presses {
            let input = latch.sample(InputState { jump: held, ..InputState::default() });
            prop_assert_eq!(input.jump, held && !previous);
            previous = held;
        }
    }

    #[test]
    fn frame_clock_never_exceeds_substep_cap(deltas in prop::collection::vec(0.0f64..500.0, 1..100)) {
        let mut clock = FrameClock::new();
        let mut now = 0.0;
        clock.advance(now);
        for dt in deltas {
            now += dt;
            prop_assert!(clock.advance(now) <= MAX_SUBSTEPS);
        }
    }

    #[test]
    fn start_restores_a_clean_session(
        seed in any::<u64>(),
        inputs in prop::collection::vec(held_keys(), 0..400),
    ) {
        let mut game = Game::new(seed, Box::new(MemoryStore::new()));
        game.start();
        for held in inputs {
            game.update(held, TICK_MS);
        }

        game.start();
        prop_assert_eq!(*game.params(), GameParameters::DEFAULT);
        prop_assert_eq!(game.stats(), &SessionStats::default());
        prop_assert_eq!(game.ai_data().error_count, 0);
        prop_assert!(game.ai_data().movement_patterns.is_empty());
        prop_assert!(game.ai_data().adaptation_history.is_empty());
        prop_assert!(game.state().obstacles.is_empty());
        prop_assert!(game.state().collectibles.is_empty());
        prop_assert!(game.state().particles.is_empty());
    }
}
