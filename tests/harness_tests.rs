//! End-to-end flows with EffectStoreTestHarness: store, effects, and rendering

use seasons::{
    action::Action,
    clock::FixedClock,
    components::{Component, SeasonApp, SeasonAppProps},
    effect::Effect,
    geolocation::Coordinates,
    reducer::reducer,
    state::{AppState, AppView, LocationRequest},
};
use tui_dispatch::NumericComponentId;
use tui_dispatch::testing::*;

macro_rules! render_app {
    ($harness:expr, $month:expr) => {{
        let mut component = SeasonApp::with_clock(FixedClock($month));
        $harness.render_plain(70, 22, |frame, area, state| {
            let props = SeasonAppProps {
                state,
                is_focused: true,
            };
            component.render(frame, area, props);
        })
    }};
}

#[test]
fn test_prompt_then_accept_then_resolve() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::LocationRequest);
    harness.assert_state(|s| s.request == LocationRequest::AwaitingPermission);
    harness.drain_effects().effects_empty();

    harness.dispatch_collect(Action::PermissionAccept);
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::RequestLocation));

    // Simulate the lookup task finishing
    harness.complete_action(Action::LocationDidResolve(Coordinates::new(40.7, -74.0)));
    let (changed, total) = harness.process_emitted();
    assert_eq!(total, 1);
    assert_eq!(changed, 1);

    harness.assert_state(|s| s.view() == AppView::Ready(40.7));
}

#[test]
fn test_north_july_shows_beach() {
    let mut harness = EffectStoreTestHarness::new(AppState::new(true), reducer);
    harness.dispatch_collect(Action::LocationRequest);
    harness.complete_action(Action::LocationDidResolve(Coordinates::new(40.7, -74.0)));
    harness.process_emitted();

    let output = render_app!(harness, 6);
    assert!(output.contains("Lets hit the beach"), "output:\n{}", output);
    assert!(!output.contains("Please accept location request"));
}

#[test]
fn test_south_july_shows_cold() {
    let mut harness = EffectStoreTestHarness::new(AppState::new(true), reducer);
    harness.dispatch_collect(Action::LocationRequest);
    harness.complete_action(Action::LocationDidResolve(Coordinates::new(-33.9, 151.2)));
    harness.process_emitted();

    let output = render_app!(harness, 6);
    assert!(output.contains("Burr, its cold"), "output:\n{}", output);
}

#[test]
fn test_north_december_shows_cold() {
    let mut harness = EffectStoreTestHarness::new(AppState::new(true), reducer);
    harness.dispatch_collect(Action::LocationRequest);
    harness.complete_action(Action::LocationDidResolve(Coordinates::new(51.5, -0.1)));
    harness.process_emitted();

    let output = render_app!(harness, 11);
    assert!(output.contains("Burr, its cold"), "output:\n{}", output);
}

#[test]
fn test_denied_shows_error_and_no_greeting() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    let mut component = SeasonApp::with_clock(FixedClock(6));

    harness.dispatch_collect(Action::LocationRequest);

    let actions = harness.send_keys::<NumericComponentId, _, _>("n", |state, event| {
        let props = SeasonAppProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });
    for action in actions {
        harness.dispatch_collect(action);
    }

    harness.drain_effects().effects_empty();
    harness.assert_state(|s| s.view() == AppView::Error("User denied Geolocation"));

    let output = render_app!(harness, 6);
    assert!(output.contains("User denied Geolocation"), "output:\n{}", output);
    assert!(!output.contains("Lets hit the beach"));
    assert!(!output.contains("Burr, its cold"));
}

#[test]
fn test_lookup_error_flow() {
    let mut harness = EffectStoreTestHarness::new(AppState::new(true), reducer);

    harness.dispatch_collect(Action::LocationRequest);
    harness.complete_action(Action::LocationDidError("Timeout expired".into()));
    harness.process_emitted();

    harness.assert_state(|s| s.error_message.as_deref() == Some("Timeout expired"));
    harness.assert_state(|s| s.latitude.is_none());
}

#[test]
fn test_pending_before_any_outcome() {
    let mut harness = EffectStoreTestHarness::new(AppState::new(true), reducer);
    harness.dispatch_collect(Action::LocationRequest);

    let output = render_app!(harness, 6);
    assert!(output.contains("Please accept location request"), "output:\n{}", output);
    assert!(!output.contains("Error"));
    assert!(!output.contains("Lets hit the beach"));
}

#[test]
fn test_ticks_stop_after_settle() {
    let mut harness = EffectStoreTestHarness::new(AppState::new(true), reducer);

    let results = harness.dispatch_all([Action::LocationRequest, Action::Tick, Action::Tick]);
    assert_eq!(results, vec![true, true, true]);
    harness.assert_state(|s| s.tick_count == 2);

    harness.complete_action(Action::LocationDidResolve(Coordinates::new(10.0, 10.0)));
    harness.process_emitted();

    let results = harness.dispatch_all([Action::Tick]);
    assert_eq!(results, vec![false]);
}

#[test]
fn test_duplicate_outcomes_apply_once() {
    let mut harness = EffectStoreTestHarness::new(AppState::new(true), reducer);
    harness.dispatch_collect(Action::LocationRequest);

    harness.complete_action(Action::LocationDidResolve(Coordinates::new(10.0, 0.0)));
    harness.complete_action(Action::LocationDidError("second".into()));
    let (changed, total) = harness.process_emitted();

    assert_eq!(total, 2);
    assert_eq!(changed, 1);
    harness.assert_state(|s| s.view() == AppView::Ready(10.0));
}

#[test]
fn test_restored_locating_state_requests_again() {
    let saved = AppState {
        request: LocationRequest::Locating,
        auto_accept: true,
        ..Default::default()
    };
    let mut harness = EffectStoreTestHarness::new(saved.restarted(), reducer);

    harness.dispatch_collect(Action::LocationRequest);
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::RequestLocation));

    harness.complete_action(Action::LocationDidResolve(Coordinates::new(-33.9, 151.2)));
    harness.process_emitted();
    harness.assert_state(|s| s.view() == AppView::Ready(-33.9));
}
