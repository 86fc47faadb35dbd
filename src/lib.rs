//! Seasons TUI - a location-aware season greeting built on tui-dispatch
//!
//! This library exposes the app's modules for testing.

pub mod action;
pub mod clock;
pub mod components;
pub mod config;
pub mod effect;
pub mod geolocation;
pub mod icons;
pub mod logging;
pub mod reducer;
pub mod season;
pub mod state;
