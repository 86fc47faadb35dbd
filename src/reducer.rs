//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::geolocation::LocationUnavailable;
use crate::state::{AppState, LocationRequest};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Location actions =====
        Action::LocationRequest => {
            if state.request != LocationRequest::NotRequested {
                return DispatchResult::unchanged();
            }
            if state.auto_accept {
                state.request = LocationRequest::Locating;
                DispatchResult::changed_with(Effect::RequestLocation)
            } else {
                state.request = LocationRequest::AwaitingPermission;
                DispatchResult::changed()
            }
        }

        // Results only land while the lookup is in flight
        Action::LocationDidResolve(coords) => {
            if state.request != LocationRequest::Locating {
                return DispatchResult::unchanged();
            }
            state.request = LocationRequest::Settled;
            state.latitude = Some(coords.latitude);
            DispatchResult::changed()
        }

        Action::LocationDidError(msg) => {
            if state.request != LocationRequest::Locating {
                return DispatchResult::unchanged();
            }
            state.request = LocationRequest::Settled;
            state.error_message = Some(msg);
            DispatchResult::changed()
        }

        // ===== Permission actions =====
        Action::PermissionAccept => {
            if !state.awaiting_permission() {
                return DispatchResult::unchanged();
            }
            state.request = LocationRequest::Locating;
            DispatchResult::changed_with(Effect::RequestLocation)
        }

        Action::PermissionDeny => {
            if !state.awaiting_permission() {
                return DispatchResult::unchanged();
            }
            state.request = LocationRequest::Settled;
            state.error_message = Some(LocationUnavailable::PermissionDenied.to_string());
            DispatchResult::changed()
        }

        // ===== Global actions =====
        Action::Tick => {
            if state.is_pending() {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}
