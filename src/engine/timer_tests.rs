//! Tests for StepTimer transitions.

use proptest::prelude::*;

use super::*;
use crate::engine::RunPhase;
use crate::recipe::RecipeId;

fn recipe(steps: Vec<Step>) -> Recipe {
    Recipe::new(RecipeId(7), "Test", steps)
}

fn tick_n(timer: &mut StepTimer, n: usize) -> Vec<TimerEvent> {
    (0..n).flat_map(|_| timer.tick()).collect()
}

fn alerts(events: &[TimerEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, TimerEvent::AlertFired { .. }))
        .count()
}

#[test]
fn start_rejects_empty_recipe() {
    let err = StepTimer::start(recipe(vec![])).unwrap_err();
    assert_eq!(err, EngineError::InvalidRecipe(RecipeId(7)));
}

#[test]
fn start_builds_initial_state() {
    let timer = StepTimer::start(recipe(vec![Step::new("a", 12), Step::new("b", 3)])).unwrap();
    let state = timer.state();
    assert_eq!(state.current_step, 0);
    assert_eq!(state.remaining_secs, 12);
    assert!(!state.is_running);
    assert!(state.completed.is_empty());
    assert_eq!(state.phase(), RunPhase::Idle);
}

#[test]
fn single_step_runs_to_terminal() {
    let mut timer = StepTimer::start(recipe(vec![Step::new("only", 3)])).unwrap();
    assert_eq!(timer.state().remaining_secs, 3);

    timer.toggle();
    assert_eq!(timer.state().phase(), RunPhase::Running);

    let mut seen = Vec::new();
    for _ in 0..3 {
        timer.tick();
        seen.push(timer.state().remaining_secs);
    }
    assert_eq!(seen, vec![2, 1, 0]);
    assert!(!timer.state().is_running);
    assert!(timer.state().is_completed(0));
    assert_eq!(timer.state().completed.len(), 1);
    assert_eq!(timer.state().phase(), RunPhase::Terminal);
}

#[test]
fn terminal_ignores_commands_except_reset_run() {
    let mut timer = StepTimer::start(recipe(vec![Step::new("only", 1)])).unwrap();
    timer.toggle();
    let events = timer.tick();
    assert_eq!(
        events,
        vec![TimerEvent::StepCompleted { step: 0 }, TimerEvent::RunFinished]
    );

    let before = timer.state().clone();
    assert!(timer.tick().is_empty());
    assert_eq!(timer.toggle(), &before);
    assert_eq!(timer.reset_current_step(), &before);

    timer.reset_run();
    assert_eq!(timer.state().phase(), RunPhase::Idle);
    assert_eq!(timer.state().remaining_secs, 1);
}

#[test]
fn auto_advance_starts_on_following_tick() {
    let mut timer = StepTimer::start(recipe(vec![
        Step::new("first", 5).with_auto_advance(true),
        Step::new("second", 2),
    ]))
    .unwrap();
    timer.toggle();

    let events = tick_n(&mut timer, 5);
    assert!(events.contains(&TimerEvent::StepStarted { step: 1, running: true }));
    let state = timer.state();
    assert_eq!(state.current_step, 1);
    assert_eq!(state.remaining_secs, 2);
    assert!(state.is_running);
    assert!(state.is_completed(0));

    timer.tick();
    assert_eq!(timer.state().remaining_secs, 1);
}

#[test]
fn manual_advance_waits_for_toggle() {
    let mut timer = StepTimer::start(recipe(vec![Step::new("first", 2), Step::new("second", 2)]))
        .unwrap();
    timer.toggle();
    let events = tick_n(&mut timer, 2);

    assert!(events.contains(&TimerEvent::StepStarted { step: 1, running: false }));
    assert_eq!(timer.state().phase(), RunPhase::Idle);
    assert!(timer.tick().is_empty());
    assert_eq!(timer.state().remaining_secs, 2);
}

#[test]
fn zero_duration_steps_cascade_one_per_tick() {
    let mut timer = StepTimer::start(recipe(vec![
        Step::new("a", 0).with_auto_advance(true),
        Step::new("b", 0).with_auto_advance(true),
        Step::new("c", 0),
    ]))
    .unwrap();
    timer.toggle();

    timer.tick();
    assert_eq!(timer.state().current_step, 1);
    assert!(timer.state().is_running);

    timer.tick();
    assert_eq!(timer.state().current_step, 2);
    assert!(timer.state().is_running);

    timer.tick();
    assert_eq!(timer.state().phase(), RunPhase::Terminal);
    assert_eq!(timer.state().completed.len(), 3);
}

#[test]
fn alert_fires_once_per_traversal() {
    let mut timer =
        StepTimer::start(recipe(vec![Step::new("steep", 5).with_alert(true)])).unwrap();
    timer.toggle();

    let events = timer.tick();
    assert_eq!(events, vec![TimerEvent::AlertFired { step: 0 }]);
    assert_eq!(timer.state().remaining_secs, 4);

    // Pause and resume inside the same traversal.
    timer.toggle();
    timer.toggle();
    let events = tick_n(&mut timer, 2);
    assert_eq!(alerts(&events), 0);

    timer.reset_current_step();
    assert!(!timer.state().alert_fired);
    timer.toggle();
    let events = tick_n(&mut timer, 5);
    assert_eq!(alerts(&events), 1);
}

#[test]
fn short_steps_never_alert() {
    let mut timer = StepTimer::start(recipe(vec![Step::new("flip", 3).with_alert(true)])).unwrap();
    timer.toggle();
    assert_eq!(alerts(&tick_n(&mut timer, 3)), 0);
}

#[test]
fn reset_current_step_keeps_progress() {
    let mut timer = StepTimer::start(recipe(vec![Step::new("a", 1), Step::new("b", 6)])).unwrap();
    timer.toggle();
    timer.tick();
    timer.toggle();
    tick_n(&mut timer, 2);

    let state = timer.reset_current_step();
    assert_eq!(state.current_step, 1);
    assert_eq!(state.remaining_secs, 6);
    assert!(!state.is_running);
    assert!(state.is_completed(0));
}

#[test]
fn reset_run_restores_initial_state() {
    let mut timer = StepTimer::start(recipe(vec![
        Step::new("a", 2).with_auto_advance(true),
        Step::new("b", 8).with_alert(true),
    ]))
    .unwrap();
    let initial = timer.state().clone();
    timer.toggle();
    tick_n(&mut timer, 6);
    assert_ne!(timer.state(), &initial);

    assert_eq!(timer.reset_run(), &initial);
}

#[test]
fn tick_while_paused_is_noop() {
    let mut timer = StepTimer::start(recipe(vec![Step::new("a", 4)])).unwrap();
    let before = timer.state().clone();
    assert!(timer.tick().is_empty());
    assert_eq!(timer.state(), &before);
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Tick,
    Toggle,
    ResetStep,
    ResetRun,
}

fn arb_step() -> impl Strategy<Value = Step> {
    (0u32..9, any::<bool>(), any::<bool>())
        .prop_map(|(secs, auto, alert)| Step::new("s", secs).with_auto_advance(auto).with_alert(alert))
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => Just(Op::Tick),
        2 => Just(Op::Toggle),
        1 => Just(Op::ResetStep),
        1 => Just(Op::ResetRun),
    ]
}

proptest! {
    #[test]
    fn invariants_hold_for_any_command_sequence(
        steps in prop::collection::vec(arb_step(), 1..5),
        ops in prop::collection::vec(arb_op(), 0..120),
    ) {
        let len = steps.len();
        let mut timer = StepTimer::start(recipe(steps.clone())).unwrap();
        let mut alerts_this_traversal = 0;

        for op in ops {
            let before = timer.state().clone();
            match op {
                Op::Tick => {
                    let events = timer.tick();
                    if !before.is_running || before.is_terminal() {
                        prop_assert!(events.is_empty());
                        prop_assert_eq!(timer.state(), &before);
                    }
                    let started = events
                        .iter()
                        .filter(|e| matches!(e, TimerEvent::StepStarted { .. }))
                        .count();
                    prop_assert!(started <= 1);

                    for event in &events {
                        if let TimerEvent::AlertFired { step } = event {
                            prop_assert_eq!(*step, before.current_step);
                            prop_assert!(steps[*step].alert_eligible());
                            prop_assert_eq!(before.remaining_secs, 5);
                            alerts_this_traversal += 1;
                        }
                    }
                    prop_assert!(alerts_this_traversal <= 1);
                    if timer.state().current_step != before.current_step {
                        alerts_this_traversal = 0;
                    }
                    prop_assert!(timer.state().completed.is_superset(&before.completed));
                }
                Op::Toggle => {
                    timer.toggle();
                    prop_assert!(timer.state().completed.is_superset(&before.completed));
                }
                Op::ResetStep => {
                    timer.reset_current_step();
                    if !before.is_terminal() {
                        alerts_this_traversal = 0;
                    }
                    prop_assert_eq!(&timer.state().completed, &before.completed);
                }
                Op::ResetRun => {
                    timer.reset_run();
                    alerts_this_traversal = 0;
                    prop_assert!(timer.state().completed.is_empty());
                }
            }

            let state = timer.state();
            prop_assert!(state.current_step < len);
            prop_assert!(state.remaining_secs <= steps[state.current_step].duration_secs);
        }
    }
}
