//! Loading screen shown between unlock and the dashboard

use std::time::Instant;

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::App;
use crate::ui::components::progress::{ProgressBar, Spinner};
use crate::ui::layout::centered_rect_fixed;

/// Draw the loading screen
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let panel = centered_rect_fixed(40, 6, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(1), // Spinner
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Progress
        ])
        .split(panel);

    let title = Paragraph::new("◆ LAUNCHPAD")
        .style(theme.title())
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let mut spinner = Spinner::new("Loading your apps");
    spinner.set_tick(app.tick);
    spinner.render(frame, chunks[1], theme);

    let progress = app.flow.transition().progress(Instant::now());
    ProgressBar::new(progress, "Preparing dashboard")
        .hide_percent()
        .render(frame, chunks[3], theme);
}
