//! Loading indicators

use ratatui::prelude::*;
use ratatui::widgets::{Gauge, Paragraph};

use crate::ui::Theme;

const SPINNER_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Horizontal bar for a known fraction of work
pub struct ProgressBar {
    ratio: f64,
    caption: String,
    with_percent: bool,
}

impl ProgressBar {
    /// `ratio` is clamped to `0.0..=1.0`
    pub fn new(ratio: f64, caption: impl Into<String>) -> Self {
        Self {
            ratio: ratio.clamp(0.0, 1.0),
            caption: caption.into(),
            with_percent: true,
        }
    }

    pub fn hide_percent(mut self) -> Self {
        self.with_percent = false;
        self
    }

    fn percent(&self) -> u16 {
        (self.ratio * 100.0).round() as u16
    }

    fn label(&self) -> String {
        if self.with_percent {
            format!("{} - {}%", self.caption, self.percent())
        } else {
            self.caption.clone()
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        frame.render_widget(
            Gauge::default()
                .gauge_style(fg_on(theme.progress_filled, theme.progress_empty))
                .ratio(self.ratio)
                .label(self.label()),
            area,
        );
    }
}

fn fg_on(fg: Color, bg: Color) -> Style {
    Style::default().fg(fg).bg(bg)
}

/// Braille spinner advanced by the UI tick counter
pub struct Spinner {
    tick: u64,
    caption: String,
}

impl Spinner {
    pub fn new(caption: impl Into<String>) -> Self {
        Self {
            tick: 0,
            caption: caption.into(),
        }
    }

    pub fn set_tick(&mut self, tick: u64) {
        self.tick = tick;
    }

    fn text(&self) -> String {
        let glyph = SPINNER_FRAMES[(self.tick % SPINNER_FRAMES.len() as u64) as usize];
        format!("{} {}", glyph, self.caption)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        frame.render_widget(
            Paragraph::new(self.text())
                .style(theme.text_highlight())
                .alignment(Alignment::Center),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_clamped() {
        assert_eq!(ProgressBar::new(1.7, "x").percent(), 100);
        assert_eq!(ProgressBar::new(-0.5, "x").percent(), 0);
        assert_eq!(ProgressBar::new(0.5, "Loading").label(), "Loading - 50%");
        assert_eq!(
            ProgressBar::new(0.5, "Loading").hide_percent().label(),
            "Loading"
        );
    }

    #[test]
    fn test_spinner_wraps() {
        let mut spinner = Spinner::new("Loading");
        spinner.set_tick(10);
        assert_eq!(spinner.text(), "⠋ Loading");
        spinner.set_tick(11);
        assert_eq!(spinner.text(), "⠙ Loading");
    }
}
