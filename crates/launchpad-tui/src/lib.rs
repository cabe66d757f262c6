//! Launchpad TUI Library
//!
//! Terminal front-end for the Launchpad app launcher: passcode keypad,
//! loading screen, tile dashboard and settings.

pub mod app;
pub mod ui;

pub use app::{App, LauncherConfig};
