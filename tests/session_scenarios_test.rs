//! Integration test: session behaviour over many frames
//!
//! Drives `Session` with a seeded RNG the way a host scheduler would and
//! checks physics, spawning, expiry, scoring, and restart.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use skyhop::game::{
    CrashCause, DeviceProfile, Obstacle, Phase, Session, StepEvent, Tuning, Viewport,
};

const VIEW: Viewport = Viewport {
    width: 1000.0,
    height: 600.0,
};

fn tuning() -> Tuning {
    DeviceProfile::Standard.tuning()
}

/// Tuning with gravity off so the player hovers in place.
fn hover_tuning(spawn_interval: u64) -> Tuning {
    Tuning {
        gravity: 0.0,
        spawn_interval,
        ..tuning()
    }
}

fn spawned(events: &[StepEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, StepEvent::Spawned { .. }))
        .count()
}

// =============================================================================
// Physics
// =============================================================================

#[test]
fn test_single_step_scenario() {
    let mut session = Session::with_tuning(VIEW, tuning());
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    session.step(&mut rng);
    assert!((session.player.velocity - 0.6).abs() < 1e-9);
    assert!((session.player.y - (VIEW.height / 2.0 + 0.6)).abs() < 1e-9);

    session.request_flap();
    session.step(&mut rng);
    assert!((session.player.velocity - (-9.4)).abs() < 1e-9);
}

#[test]
fn test_velocity_grows_by_gravity_each_frame() {
    let mut session = Session::with_tuning(VIEW, tuning());
    let mut rng = ChaCha8Rng::seed_from_u64(2);

    let mut previous = session.player.velocity;
    while session.phase == Phase::Playing {
        session.step(&mut rng);
        if session.phase == Phase::Playing {
            assert!((session.player.velocity - previous - 0.6).abs() < 1e-9);
        }
        previous = session.player.velocity;
    }
    assert_eq!(session.crash, Some(CrashCause::Floor));
    assert!((session.player.y - (VIEW.height - 50.0)).abs() < f64::EPSILON);
}

#[test]
fn test_held_input_flaps_once() {
    let mut session = Session::with_tuning(VIEW, tuning());
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    // A burst of requests between two frames is one press.
    for _ in 0..5 {
        session.request_flap();
    }
    let first = session.step(&mut rng);
    let second = session.step(&mut rng);
    let flaps = first
        .events
        .iter()
        .chain(second.events.iter())
        .filter(|e| **e == StepEvent::Flapped)
        .count();
    assert_eq!(flaps, 1);
}

// =============================================================================
// Spawning and expiry
// =============================================================================

#[test]
fn test_spawn_interval_scenario() {
    let mut session = Session::with_tuning(VIEW, hover_tuning(100));
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    session.player.y = 275.0;

    let mut total = 0;
    for _ in 0..250 {
        let report = session.step(&mut rng);
        total += spawned(&report.events);
        if session.is_over() {
            break;
        }
    }
    assert_eq!(total, 3);
}

#[test]
fn test_obstacles_expire_in_creation_order() {
    let mut t = hover_tuning(40);
    t.scroll_speed = 10.0;
    let mut session = Session::with_tuning(VIEW, t);
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    // Park the player far from any obstacle column.
    session.player.x = -1000.0;

    let mut created = 0;
    let mut expired = 0;
    for frame in 0..400u64 {
        let ids_before: Vec<f64> = session.obstacles.iter().map(|o| o.gap_top).collect();
        let report = session.step(&mut rng);
        created += spawned(&report.events);
        expired += report
            .events
            .iter()
            .filter(|e| **e == StepEvent::Expired)
            .count();

        // Whatever left the queue left from the front.
        let remaining = session.obstacles.len();
        let gone = ids_before.len() + spawned(&report.events) - remaining;
        assert!(gone <= ids_before.len());
        let survivors: Vec<f64> = session.obstacles.iter().map(|o| o.gap_top).collect();
        assert_eq!(
            &ids_before[gone..],
            &survivors[..ids_before.len() - gone],
            "frame {}",
            frame
        );
    }
    assert!(expired > 0);
    assert!(created > expired);

    // Queue stays sorted left to right.
    let xs: Vec<f64> = session.obstacles.iter().map(|o| o.x).collect();
    assert!(xs.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_seeded_runs_repeat_exactly() {
    let run = |seed: u64| {
        let mut session = Session::with_tuning(VIEW, hover_tuning(30));
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        session.player.x = -1000.0;
        let mut gaps = Vec::new();
        for _ in 0..300 {
            for event in session.step(&mut rng).events {
                if let StepEvent::Spawned { gap_top, .. } = event {
                    gaps.push(gap_top);
                }
            }
        }
        gaps
    };

    assert_eq!(run(99), run(99));
    assert_ne!(run(99), run(100));
}

// =============================================================================
// Collision and scoring
// =============================================================================

#[test]
fn test_collision_scenario() {
    let obstacle = Obstacle {
        x: 60.0,
        width: 90.0,
        gap_top: 50.0,
        gap_bottom: 250.0,
        scored: false,
    };

    let mut session = Session::with_tuning(VIEW, tuning());
    session.player.y = 40.0;
    assert!(obstacle.collides_with(&session.player));

    session.player.y = 100.0;
    assert!(!obstacle.collides_with(&session.player));
}

#[test]
fn test_fast_scroll_still_collides() {
    // Even at a speed close to the obstacle width, some frame overlaps.
    for speed in [1.0, 7.5, 40.0, 89.0] {
        let mut t = hover_tuning(10_000);
        t.scroll_speed = speed;
        let mut session = Session::with_tuning(VIEW, t);
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        session.frame = 1;
        session.player.y = 10.0;
        session.obstacles.push_back(Obstacle {
            x: 400.0,
            width: 90.0,
            gap_top: 200.0,
            gap_bottom: 400.0,
            scored: false,
        });

        for _ in 0..2000 {
            session.step(&mut rng);
            if session.is_over() {
                break;
            }
        }
        assert_eq!(session.crash, Some(CrashCause::Obstacle), "speed {}", speed);
        assert_eq!(session.score, 0);
    }
}

#[test]
fn test_each_obstacle_scores_once() {
    let mut session = Session::with_tuning(VIEW, hover_tuning(100));
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    session.player.y = 275.0;

    let mut points = 0;
    let mut frames = 0;
    while !session.is_over() && frames < 1500 {
        let report = session.step(&mut rng);
        points += report.points();
        frames += 1;
    }

    assert_eq!(points, session.score);
    let scored = session.obstacles.iter().filter(|o| o.scored).count();
    assert!(scored as u32 <= session.score);
}

#[test]
fn test_hovering_in_a_guaranteed_gap_scores() {
    // Gap top is always in 50..200 and the gap is 200 tall, so a player
    // spanning 200..250 is inside every gap.
    let mut session = Session::with_tuning(VIEW, hover_tuning(100));
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    session.player.y = 200.0;

    for _ in 0..1200 {
        session.step(&mut rng);
    }
    assert_eq!(session.phase, Phase::Playing);
    assert!(session.score >= 5);
}

// =============================================================================
// Restart and time-driven stepping
// =============================================================================

#[test]
fn test_restart_after_game_over() {
    let mut session = Session::with_tuning(VIEW, tuning());
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    while !session.is_over() {
        session.step(&mut rng);
    }
    session.request_flap();

    session.restart();
    assert_eq!(session.phase, Phase::Playing);
    assert_eq!(session.score, 0);
    assert_eq!(session.frame, 0);
    assert!(session.obstacles.is_empty());
    assert!(!session.flap_requested);
    assert!((session.player.y - VIEW.height / 2.0).abs() < f64::EPSILON);

    let report = session.step(&mut rng);
    assert_eq!(report.frames, 1);
    assert_eq!(spawned(&report.events), 1);
}

#[test]
fn test_advance_matches_manual_steps() {
    let mut by_time = Session::with_tuning(VIEW, tuning());
    let mut by_step = by_time.clone();
    let mut rng_a = ChaCha8Rng::seed_from_u64(10);
    let mut rng_b = ChaCha8Rng::seed_from_u64(10);

    // 10 x 16ms in uneven chunks.
    for dt in [5, 11, 30, 2, 40, 20, 52] {
        by_time.advance(dt, &mut rng_a);
    }
    for _ in 0..10 {
        by_step.step(&mut rng_b);
    }

    assert_eq!(by_time.frame, by_step.frame);
    assert_eq!(by_time.player, by_step.player);
    assert_eq!(by_time.obstacles, by_step.obstacles);
}
