//! Short-lived status messages shown over the current screen

use std::collections::VecDeque;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::ui::Theme;

const MAX_TOASTS: usize = 3;
const MAX_WIDTH: usize = 56;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastKind {
    /// Lifetime in UI ticks (10 per second)
    fn lifetime(self) -> u64 {
        match self {
            ToastKind::Info | ToastKind::Success => 30,
            ToastKind::Warning => 50,
            ToastKind::Error => 60,
        }
    }

    fn glyph(self) -> &'static str {
        match self {
            ToastKind::Info => "·",
            ToastKind::Success => "✓",
            ToastKind::Warning => "!",
            ToastKind::Error => "✗",
        }
    }

    fn style(self, theme: &Theme) -> Style {
        match self {
            ToastKind::Info => theme.info(),
            ToastKind::Success => theme.success(),
            ToastKind::Warning => theme.warning(),
            ToastKind::Error => theme.danger(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    ticks_left: u64,
}

impl Toast {
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
            ticks_left: kind.lifetime(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, message)
    }

    /// Override the lifetime, in ticks
    pub fn lasting(mut self, ticks: u64) -> Self {
        self.ticks_left = ticks;
        self
    }

    fn label(&self) -> String {
        format!("{} {}", self.kind.glyph(), self.message)
    }

    fn width(&self) -> u16 {
        (self.label().width() + 4).min(MAX_WIDTH) as u16
    }
}

/// Bounded queue of toasts; the newest sits closest to the footer
#[derive(Debug, Default)]
pub struct Toasts {
    queue: VecDeque<Toast>,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a toast. Repeating the message on screen restarts its timer
    /// instead of stacking a copy.
    pub fn push(&mut self, toast: Toast) {
        self.queue
            .retain(|t| !(t.kind == toast.kind && t.message == toast.message));
        self.queue.push_back(toast);
        while self.queue.len() > MAX_TOASTS {
            self.queue.pop_front();
        }
    }

    pub fn tick(&mut self) {
        for toast in &mut self.queue {
            toast.ticks_left = toast.ticks_left.saturating_sub(1);
        }
        self.queue.retain(|t| t.ticks_left > 0);
    }

    pub fn active(&self) -> impl ExactSizeIterator<Item = &Toast> {
        self.queue.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Stack toasts upwards from just above the footer line
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let mut bottom = area.bottom().saturating_sub(1);
        for toast in self.queue.iter().rev() {
            if bottom < area.y + 3 {
                break;
            }
            let width = toast.width().min(area.width);
            let rect = Rect::new(
                area.right().saturating_sub(width + 1).max(area.x),
                bottom - 3,
                width,
                3,
            );
            let style = toast.kind.style(theme);

            frame.render_widget(Clear, rect);
            frame.render_widget(
                Paragraph::new(toast.label())
                    .style(style)
                    .block(Block::default().borders(Borders::ALL).border_style(style)),
                rect,
            );
            bottom -= 3;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(toasts: &Toasts) -> Vec<&str> {
        toasts.active().map(|t| t.message.as_str()).collect()
    }

    #[test]
    fn test_toasts_expire_by_kind() {
        let mut toasts = Toasts::new();
        toasts.push(Toast::info("short").lasting(1));
        toasts.push(Toast::error("long"));

        toasts.tick();
        assert_eq!(messages(&toasts), vec!["long"]);

        for _ in 0..59 {
            toasts.tick();
        }
        assert!(toasts.is_empty());
    }

    #[test]
    fn test_queue_keeps_newest() {
        let mut toasts = Toasts::new();
        for i in 0..5 {
            toasts.push(Toast::info(format!("n{}", i)));
        }
        assert_eq!(messages(&toasts), vec!["n2", "n3", "n4"]);
    }

    #[test]
    fn test_repeated_message_is_collapsed() {
        let mut toasts = Toasts::new();
        toasts.push(Toast::error("Invalid URL"));
        toasts.push(Toast::info("Opening Mapper"));
        toasts.push(Toast::error("Invalid URL"));

        assert_eq!(messages(&toasts), vec!["Opening Mapper", "Invalid URL"]);
    }
}
