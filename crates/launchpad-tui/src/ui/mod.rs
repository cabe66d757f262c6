//! UI rendering

pub mod components;
pub mod layout;
pub mod screens;
pub mod theme;

pub use theme::Theme;

use ratatui::prelude::*;

use crate::app::{App, Screen};

/// Main render function - delegates to appropriate screen
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    app.state.viewport_width = area.width;

    let app = &*app;
    match app.state.current_screen {
        Screen::Passcode => screens::passcode::draw(frame, area, app),
        Screen::Loading => screens::loading::draw(frame, area, app),
        Screen::Dashboard => screens::dashboard::draw(frame, area, app),
        Screen::Settings => screens::settings::draw(frame, area, app),
        Screen::Help => screens::help::draw(frame, area, app),
    }

    app.toasts.render(frame, area, &app.theme);
}
