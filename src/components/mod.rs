pub mod season_app;
pub mod season_display;
pub mod spinner;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use season_app::{SeasonApp, SeasonAppProps};
pub use season_display::{SeasonDisplay, SeasonDisplayProps, SeasonGreeting};
pub use spinner::{Spinner, SpinnerProps};
