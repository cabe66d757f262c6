//! Passcode keypad screen

use launchpad_core::credential::CREDENTIAL_LENGTH;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::App;
use crate::ui::layout::{centered_rect_fixed, hint_line};

/// Draw the passcode screen
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let gate = app.flow.gate();

    // Center the keypad dialog
    let dialog = centered_rect_fixed(44, 15, area);

    let block = Block::default()
        .title(" Locked ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(if gate.error_visible() {
            theme.danger()
        } else {
            theme.border_focused()
        });

    let inner = block.inner(dialog);
    frame.render_widget(block, dialog);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(2), // Instructions
            Constraint::Length(2), // Dots
            Constraint::Length(2), // Error message
            Constraint::Min(0),    // Spacer
            Constraint::Length(1), // Help
        ])
        .split(inner);

    let title = Paragraph::new("◆ LAUNCHPAD")
        .style(theme.title())
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let instructions = Paragraph::new("Enter passcode")
        .style(theme.text_secondary())
        .alignment(Alignment::Center);
    frame.render_widget(instructions, chunks[1]);

    let dots: Vec<Span> = (0..CREDENTIAL_LENGTH)
        .flat_map(|i| {
            let dot = if i < gate.len() {
                Span::styled("●", theme.pin_dot())
            } else {
                Span::styled("○", theme.pin_placeholder())
            };
            [dot, Span::raw("  ")]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(dots)).alignment(Alignment::Center),
        chunks[2],
    );

    if gate.error_visible() {
        let error = Paragraph::new("Incorrect passcode")
            .style(theme.danger())
            .alignment(Alignment::Center);
        frame.render_widget(error, chunks[3]);
    } else if gate.is_validating() {
        let checking = Paragraph::new("Checking…")
            .style(theme.text_muted())
            .alignment(Alignment::Center);
        frame.render_widget(checking, chunks[3]);
    }

    let help = Paragraph::new(hint_line(&[("0-9", "Digit"), ("⌫", "Delete"), ("Esc", "Quit")]))
        .style(theme.text_muted())
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[5]);
}
