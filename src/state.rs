//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Spinner frame interval while waiting for a position.
pub const SPINNER_TICK_MS: u64 = 80;

/// Prompt shown until a position or an error arrives
pub const PENDING_PROMPT: &str = "Please accept location request";

/// Lifecycle of the single geolocation request
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum LocationRequest {
    /// Startup has not asked for a position yet
    #[default]
    NotRequested,
    /// Waiting for the user to accept or deny the prompt
    AwaitingPermission,
    /// Lookup task in flight
    Locating,
    /// An outcome was applied; nothing further is accepted
    Settled,
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, Default, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Latitude in degrees, once resolved
    #[debug(section = "Location", label = "Latitude", debug_fmt)]
    pub latitude: Option<f64>,

    /// Message from a failed lookup
    #[debug(section = "Location", label = "Error", debug_fmt)]
    pub error_message: Option<String>,

    #[debug(section = "Location", label = "Request", debug_fmt)]
    pub request: LocationRequest,

    /// Skip the permission prompt
    #[debug(skip)]
    pub auto_accept: bool,

    /// Spinner frame counter
    #[debug(skip)]
    pub tick_count: u32,
}

impl AppState {
    pub fn new(auto_accept: bool) -> Self {
        Self {
            auto_accept,
            ..Default::default()
        }
    }

    pub fn view(&self) -> AppView<'_> {
        AppView::from_state(self)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.view(), AppView::Pending)
    }

    pub fn awaiting_permission(&self) -> bool {
        self.request == LocationRequest::AwaitingPermission
    }

    /// A state saved mid-request has no task behind it; start the request over.
    pub fn restarted(mut self) -> Self {
        let in_flight = matches!(
            self.request,
            LocationRequest::AwaitingPermission | LocationRequest::Locating
        );
        if in_flight && self.latitude.is_none() && self.error_message.is_none() {
            self.request = LocationRequest::NotRequested;
            self.tick_count = 0;
        }
        self
    }
}

/// Which of the three root views to show
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AppView<'a> {
    Error(&'a str),
    Ready(f64),
    Pending,
}

impl<'a> AppView<'a> {
    /// Error wins over Ready; anything else, including both fields set, is Pending.
    pub fn from_state(state: &'a AppState) -> Self {
        match (&state.error_message, state.latitude) {
            (Some(error), None) => AppView::Error(error),
            (None, Some(lat)) => AppView::Ready(lat),
            _ => AppView::Pending,
        }
    }
}
