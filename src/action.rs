//! Actions - intents from the user and results from the geolocation task

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::geolocation::Coordinates;

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Location =====
    /// Intent: ask for the position (dispatched once at startup)
    LocationRequest,

    /// Result: position resolved
    LocationDidResolve(Coordinates),

    /// Result: position unavailable
    LocationDidError(String),

    // ===== Permission prompt (uncategorized) =====
    /// User accepted the location prompt
    PermissionAccept,

    /// User denied the location prompt
    PermissionDeny,

    // ===== Uncategorized (global) =====
    /// Spinner frame
    Tick,

    /// Exit the application
    Quit,
}
