//! Dashboard tile card

use launchpad_core::Tile;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::ui::Theme;

/// One tile in the dashboard grid
pub struct TileCard<'a> {
    tile: &'a Tile,
    selected: bool,
}

impl<'a> TileCard<'a> {
    pub fn new(tile: &'a Tile, selected: bool) -> Self {
        Self { tile, selected }
    }

    /// Render the card
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let accent = theme.accent(self.tile.accent);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(if self.selected {
                BorderType::Thick
            } else {
                BorderType::Rounded
            })
            .border_style(theme.tile_border(self.tile.accent, self.selected));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let host = short_url(&self.tile.url, inner.width.saturating_sub(2) as usize);
        let marker = if self.selected { "▶ " } else { "  " };

        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(marker, theme.text_highlight()),
                Span::styled(
                    self.tile.name.clone(),
                    Style::default().fg(accent).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(host, theme.text_muted())),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }
}

/// URL without its scheme, shortened to fit `max_width` columns
pub fn short_url(url: &str, max_width: usize) -> String {
    let stripped = url
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/');

    if stripped.width() <= max_width {
        return stripped.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    for c in stripped.chars() {
        if out.width() + 1 >= max_width {
            break;
        }
        out.push(c);
    }
    out.push('…');
    out
}
