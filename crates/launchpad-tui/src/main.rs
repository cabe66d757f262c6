//! Launchpad - personal app launcher for the terminal
//!
//! Unlock with a four-digit passcode, then open your web apps from a paged
//! grid of tiles.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::panic;
use std::sync::Mutex;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use launchpad_tui::{App, LauncherConfig};
use ratatui::prelude::*;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Application entry point with panic handling for terminal restoration
fn main() -> Result<()> {
    // Set up panic hook to restore terminal on crash
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let config = LauncherConfig::load();

    // The terminal belongs to the UI, so logs go to a file
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(log_writer(&config))),
        )
        .with(EnvFilter::from_default_env().add_directive("launchpad_tui=info".parse()?))
        .init();

    match config.save_if_missing() {
        Ok(true) => tracing::info!("Wrote default configuration"),
        Ok(false) => {}
        Err(e) => tracing::warn!("Could not write configuration: {}", e),
    }

    let result = run_app(config);

    if let Err(e) = &result {
        tracing::error!("Application error: {}", e);
    }

    result
}

/// Open the log file, or discard output when there is nowhere to put it
fn log_writer(config: &LauncherConfig) -> Box<dyn Write + Send> {
    let Some(path) = config.log_path() else {
        return Box::new(io::sink());
    };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }

    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => Box::new(file),
        Err(_) => Box::new(io::sink()),
    }
}

/// Main application runner
fn run_app(config: LauncherConfig) -> Result<()> {
    // Open the store before touching the terminal so errors print normally
    let mut app = App::new(config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
