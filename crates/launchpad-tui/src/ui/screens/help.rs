//! Help screen

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::App;
use crate::ui::layout::{render_footer, render_header, section_block, ScreenLayout};

/// Draw the help screen
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let layout = ScreenLayout::new(area);

    render_header(frame, layout.header, "Help", theme);

    let heading = |text: &'static str| Line::from(Span::styled(text, theme.text_highlight()));

    let content = Paragraph::new(vec![
        Line::from(""),
        heading("  Dashboard:"),
        Line::from("    Arrows or h/j/k/l   - Select a tile"),
        Line::from("    PgUp/PgDn or [ ]    - Previous / next page"),
        Line::from("    Mouse drag / scroll - Swipe between pages"),
        Line::from("    Enter or Space      - Open the selected tile"),
        Line::from("    < and >             - Move the selected tile"),
        Line::from("    s                   - Settings"),
        Line::from("    L                   - Log out"),
        Line::from("    q                   - Quit"),
        Line::from(""),
        heading("  Settings:"),
        Line::from("    e or Enter          - Edit the tile's URL"),
        Line::from("    r                   - Restore the tile's default URL"),
        Line::from("    o                   - Restore the default tile order"),
        Line::from("    p                   - Change the passcode"),
        Line::from("    c                   - Restore the default passcode"),
        Line::from("    Esc                 - Back"),
        Line::from(""),
        heading("  Keypad:"),
        Line::from("    0-9                 - Enter a digit"),
        Line::from("    Backspace           - Delete the last digit"),
        Line::from("    Esc                 - Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "  Unlocking is remembered until you log out.",
            theme.text_secondary(),
        )),
    ])
    .block(section_block("Keys", false, theme));

    frame.render_widget(content, layout.content);

    render_footer(frame, layout.footer, &[("Esc", "Back")], theme);
}
