//! Shared screen chrome: header bar, key hints and grid placement

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use super::Theme;

const HEADER_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 2;

/// Header, body and footer rows of a full-screen view
pub struct ScreenLayout {
    pub header: Rect,
    pub content: Rect,
    pub footer: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect) -> Self {
        let [header, content, footer] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(6),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .areas(area);

        Self {
            header,
            content,
            footer,
        }
    }
}

/// A `width` x `height` box in the middle of `area`, shrunk to fit
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Brand on the left, where the user is in the middle, wall clock on the right
pub fn render_header(frame: &mut Frame, area: Rect, location: &str, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(theme.border())
        .style(Style::default().bg(theme.background));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [brand, middle, clock] = Layout::horizontal([
        Constraint::Length(14),
        Constraint::Min(10),
        Constraint::Length(7),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new(" ◆ LAUNCHPAD").style(theme.title()),
        brand,
    );
    frame.render_widget(
        Paragraph::new(location)
            .style(theme.text_secondary())
            .alignment(Alignment::Center),
        middle,
    );
    frame.render_widget(
        Paragraph::new(chrono::Local::now().format("%H:%M ").to_string())
            .style(theme.text_muted())
            .alignment(Alignment::Right),
        clock,
    );
}

pub fn render_footer(frame: &mut Frame, area: Rect, hints: &[(&str, &str)], theme: &Theme) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(theme.border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    frame.render_widget(
        Paragraph::new(hint_line(hints))
            .style(theme.text_muted())
            .alignment(Alignment::Center),
        inner,
    );
}

/// `[key] action` pairs separated by two spaces
pub fn hint_line(hints: &[(&str, &str)]) -> String {
    let mut line = String::new();
    for (key, action) in hints {
        if !line.is_empty() {
            line.push_str("  ");
        }
        line.push_str(&format!("[{}] {}", key, action));
    }
    line
}

/// Titled panel; the focused panel gets the brand border
pub fn section_block<'a>(title: &'a str, focused: bool, theme: &Theme) -> Block<'a> {
    let border = if focused {
        theme.border_focused()
    } else {
        theme.border()
    };
    Block::default()
        .title(format!(" {} ", title))
        .title_style(theme.text_highlight())
        .borders(Borders::ALL)
        .border_style(border)
}

/// Tile slots for one carousel page, filled row by row
pub fn grid(area: Rect, columns: usize, rows: usize) -> Vec<Rect> {
    let columns = columns.max(1) as u32;
    let rows = rows.max(1) as u32;

    Layout::vertical((0..rows).map(|_| Constraint::Ratio(1, rows)))
        .split(area)
        .iter()
        .flat_map(|row| {
            Layout::horizontal((0..columns).map(|_| Constraint::Ratio(1, columns)))
                .split(*row)
                .to_vec()
        })
        .collect()
}
