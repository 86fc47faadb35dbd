//! Seasons TUI - season greeting for wherever you are

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use seasons::action::Action;
use seasons::clock::{Clock, FixedClock, SystemClock};
use seasons::components::{Component, SeasonApp, SeasonAppProps};
use seasons::config::LocatorConfig;
use seasons::effect::Effect;
use seasons::geolocation::{DEFAULT_GEOLOCATION_URL, LocationService};
use seasons::logging;
use seasons::reducer::reducer;
use seasons::state::{AppState, SPINNER_TICK_MS};
use tracing::{info, warn};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// Seasons - greets you with the season at your location
#[derive(Parser, Debug)]
#[command(name = "seasons")]
#[command(about = "A season greeting TUI built with tui-dispatch")]
struct Args {
    /// Use this latitude instead of looking up the position
    #[arg(long, env = "SEASONS_LATITUDE", allow_negative_numbers = true)]
    latitude: Option<f64>,

    /// Longitude to pair with --latitude
    #[arg(long, allow_negative_numbers = true, requires = "latitude")]
    longitude: Option<f64>,

    /// Accept the location request without prompting
    #[arg(long, short = 'y')]
    accept_location: bool,

    /// IP geolocation endpoint
    #[arg(long, env = "SEASONS_GEOLOCATION_URL", default_value = DEFAULT_GEOLOCATION_URL)]
    geolocation_url: String,

    /// Lookup timeout in seconds (minimum 1)
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: u64,

    /// Pin the month (1-12) instead of reading the clock
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,

    /// Append logs to this file
    #[arg(long, env = "SEASONS_LOG_FILE")]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum SeasonComponentId {
    Root,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum SeasonContext {
    Main,
}

impl EventRoutingState<SeasonComponentId, SeasonContext> for AppState {
    fn focused(&self) -> Option<SeasonComponentId> {
        Some(SeasonComponentId::Root)
    }

    fn modal(&self) -> Option<SeasonComponentId> {
        None
    }

    fn binding_context(&self, id: SeasonComponentId) -> SeasonContext {
        match id {
            SeasonComponentId::Root => SeasonContext::Main,
        }
    }

    fn default_context(&self) -> SeasonContext {
        SeasonContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        latitude,
        longitude,
        accept_location,
        geolocation_url,
        timeout_secs,
        month,
        log_file,
        debug: debug_args,
    } = Args::parse();

    logging::init_logging(log_file.as_deref())?;

    let locator = LocatorConfig::from_parts(
        latitude,
        longitude,
        geolocation_url,
        Duration::from_secs(timeout_secs),
    );
    let service = locator
        .build()
        .map_err(|e| io::Error::other(format!("geolocation setup failed: {e}")))?;
    info!(?locator, accept_location, "starting");

    let clock: Box<dyn Clock> = match month {
        Some(month) => Box::new(FixedClock(month - 1)),
        None => Box::new(SystemClock),
    };

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(accept_location))
        })
        .await
        .map_err(debug_error)?
        .restarted();

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, clock, service, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

struct SeasonUi {
    app: SeasonApp<Box<dyn Clock>>,
}

impl SeasonUi {
    fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            app: SeasonApp::with_clock(clock),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<SeasonComponentId>,
    ) {
        event_ctx.set_component_area(SeasonComponentId::Root, area);

        let props = SeasonAppProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.app.render(frame, area, props);
    }

    fn handle_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = SeasonAppProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self.app.handle_event(event, props).into_iter().collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    clock: Box<dyn Clock>,
    service: Arc<dyn LocationService>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(SeasonUi::new(clock)));
    let mut bus: EventBus<AppState, Action, SeasonComponentId, SeasonContext> = EventBus::new();
    let keybindings: Keybindings<SeasonContext> = Keybindings::new();

    let ui_root = Rc::clone(&ui);
    bus.register(SeasonComponentId::Root, move |event, state| {
        ui_root.borrow_mut().handle_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::LocationRequest),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(SPINNER_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, &service),
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, service: &Arc<dyn LocationService>) {
    match effect {
        Effect::RequestLocation => {
            let service = Arc::clone(service);
            ctx.tasks().spawn("geolocation", async move {
                match service.current_position().await {
                    Ok(coords) => {
                        info!(latitude = coords.latitude, "position resolved");
                        Action::LocationDidResolve(coords)
                    }
                    Err(e) => {
                        warn!(error = %e, "position unavailable");
                        Action::LocationDidError(e.to_string())
                    }
                }
            });
        }
    }
}
