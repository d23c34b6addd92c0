mod common;

use common::{quiet_engine, run_for, run_until};
use ocelli_face::{AnimationCommand, Expression};

#[test]
fn test_never_plays_same_command_twice_in_a_row() {
    let mut engine = quiet_engine();
    for command in [
        AnimationCommand::Nod,
        AnimationCommand::Nod,
        AnimationCommand::Focus,
        AnimationCommand::Focus,
        AnimationCommand::CancelFocus,
        AnimationCommand::Nod,
        AnimationCommand::Nod,
    ] {
        engine.enqueue(command);
    }
    run_until(&mut engine, 30_000.0);

    let played: Vec<_> = engine.history().iter().map(|t| t.command).collect();
    assert_eq!(
        played,
        vec![
            AnimationCommand::Nod,
            AnimationCommand::Focus,
            AnimationCommand::CancelFocus,
            AnimationCommand::Nod,
        ]
    );
    for pair in played.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
    assert!(engine.pending_commands().is_empty());
}

#[test]
fn test_at_most_one_command_per_dispatch_tick() {
    let mut engine = quiet_engine();
    engine.cancel_focus();
    engine.nod();

    run_until(&mut engine, 1_000.0);
    assert_eq!(engine.history().len(), 1);
    assert_eq!(engine.pending_commands(), vec![AnimationCommand::Nod]);

    run_until(&mut engine, 2_000.0);
    assert_eq!(engine.current_command(), Some(AnimationCommand::Nod));
    assert!(engine.pending_commands().is_empty());
}

#[test]
fn test_sleep_gates_everything_but_cancel_sleep() {
    let mut engine = quiet_engine();
    engine.sleep();
    run_until(&mut engine, 3_000.0);
    assert!(engine.flags().sleeping);

    engine.smile();
    engine.nod();
    run_for(&mut engine, 10_000.0);
    assert!(engine.flags().sleeping);
    let mut pending = engine.pending_commands();
    pending.sort_by_key(|c| c.as_str());
    assert_eq!(pending, vec![AnimationCommand::Nod, AnimationCommand::Smile]);
    // gated commands never become the previous command
    assert_eq!(engine.flags().prev_command, Some(AnimationCommand::Sleep));

    engine.cancel_sleep();
    run_for(&mut engine, 15_000.0);
    assert!(!engine.flags().sleeping);
    assert!(engine.pending_commands().is_empty());

    let played: Vec<_> = engine.history().iter().map(|t| t.command).collect();
    assert_eq!(played[0], AnimationCommand::Sleep);
    assert_eq!(played[1], AnimationCommand::CancelSleep);
    assert!(played[2..].contains(&AnimationCommand::Smile));
    assert!(played[2..].contains(&AnimationCommand::Nod));
}

#[test]
fn test_thinking_gates_until_cancel_think() {
    let mut engine = quiet_engine();
    engine.think();
    engine.focus();
    engine.cancel_think();
    run_for(&mut engine, 8_000.0);

    // focus was requeued behind cancel_think and ran after it
    let played: Vec<_> = engine.history().iter().map(|t| t.command).collect();
    assert_eq!(
        played,
        vec![
            AnimationCommand::Think,
            AnimationCommand::CancelThink,
            AnimationCommand::Focus,
        ]
    );
    assert!(!engine.flags().thinking);
}

#[test]
fn test_nod_releases_both_locks() {
    let mut engine = quiet_engine();
    engine.nod();
    run_until(&mut engine, 1_500.0);
    assert_eq!(engine.expression(), Expression::Nodding);
    let flags = engine.flags();
    assert!(flags.blink_lock && flags.look_around_lock && flags.on_animation);

    run_for(&mut engine, 3_000.0);
    let flags = engine.flags();
    assert!(!flags.blink_lock);
    assert!(!flags.look_around_lock);
    assert!(!flags.on_animation);
    assert_eq!(engine.expression(), Expression::Idle);
    assert_eq!(
        engine.state().scene.container_offset(ocelli_face::EyeSide::Left),
        0.0
    );
}

#[test]
fn test_focus_holds_until_cancelled() {
    let mut engine = quiet_engine();
    engine.focus();
    run_until(&mut engine, 4_000.0);
    assert!(engine.flags().look_around_lock);
    assert!(!engine.flags().blink_lock);
    assert_eq!(engine.expression(), Expression::Focusing);

    engine.cancel_focus();
    run_for(&mut engine, 1_500.0);
    assert!(!engine.flags().look_around_lock);
    assert!(!engine.flags().on_animation);
    assert_eq!(engine.expression(), Expression::Idle);
}
