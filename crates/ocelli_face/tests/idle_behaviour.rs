mod common;

use common::{engine, quiet_engine, run_until, surface, FRAME_MS, SIZE};
use ocelli_animation::{AnimationScheduler, TickEvent};
use ocelli_face::animations::Blink;
use ocelli_face::{Expression, FaceState};

fn blink_length(dt_ms: f32) -> f32 {
    let mut state = FaceState::new(SIZE);
    let mut scheduler: AnimationScheduler<FaceState> = AnimationScheduler::new();
    let id = scheduler.add(Box::new(Blink::new(&mut state, 1500.0)));

    let mut elapsed = 0.0;
    loop {
        let events = scheduler.tick(&mut state, dt_ms);
        elapsed += dt_ms;
        if events.contains(&TickEvent::Completed(id)) {
            return elapsed;
        }
        assert!(elapsed < 5_000.0, "blink never completed");
    }
}

#[test]
fn test_blink_length_independent_of_frame_rate() {
    for dt in [10.0, 7.5, 25.0] {
        assert_eq!(blink_length(dt), 1500.0);
    }
}

#[test]
fn test_idle_runs_without_commands() {
    let mut engine = engine();
    let mut seen = Vec::new();
    while engine.now_ms() < 60_000.0 {
        engine.step(FRAME_MS);
        for name in engine.running_animations() {
            if !seen.contains(&name) {
                seen.push(name);
            }
        }
    }
    assert!(seen.contains(&"blink"));
    assert!(seen.contains(&"look_around"));
    assert!(engine.history().is_empty());
}

#[test]
fn test_focus_suppresses_looking_around() {
    let mut engine = engine();
    engine.focus();
    run_until(&mut engine, 1_000.0);
    assert!(engine.flags().look_around_lock);

    while engine.now_ms() < 20_000.0 {
        engine.step(FRAME_MS);
        assert!(!engine.running_animations().contains(&"look_around"));
        assert!(engine.flags().look_around_lock);
    }
}

#[test]
fn test_quiet_face_stays_idle() {
    let mut engine = quiet_engine();
    run_until(&mut engine, 10_000.0);
    assert!(engine.running_animations().is_empty());
    assert_eq!(engine.expression(), Expression::Idle);
    assert_eq!(engine.mask_count(), 0);
}

#[test]
fn test_frame_recording_is_balanced() {
    let mut engine = engine();
    let mut surface = surface();
    engine.smile();
    while engine.now_ms() < 5_000.0 {
        surface.take_commands();
        engine.frame(FRAME_MS, &mut surface);
        assert!(surface.is_balanced());
        assert_eq!(surface.mask_count(), engine.mask_count());
    }
    assert!(engine.flags().smiling);
    assert_eq!(engine.mask_count(), 2);
}
