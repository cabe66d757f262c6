//! Colours and styles shared by every screen

use launchpad_core::Accent;
use ratatui::style::{Color, Modifier, Style};

fn fg(color: Color) -> Style {
    Style::default().fg(color)
}

/// Launchpad palette
///
/// Tile colours come from [`Accent`]; everything else is chrome.
pub struct Theme {
    pub brand: Color,
    pub background: Color,

    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub info: Color,

    pub border: Color,
    pub border_focused: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub selection: Color,

    pub progress_filled: Color,
    pub progress_empty: Color,
}

impl Default for Theme {
    fn default() -> Self {
        let brand = Accent::Blue.color();
        Self {
            brand,
            background: Color::Rgb(0x1C, 0x1C, 0x1E),

            success: Accent::Green.color(),
            warning: Accent::Orange.color(),
            danger: Accent::Red.color(),
            info: Accent::Teal.color(),

            border: Color::Rgb(0x48, 0x48, 0x4A),
            border_focused: brand,
            text_primary: Color::Rgb(0xF2, 0xF2, 0xF7),
            text_secondary: Color::Rgb(0xAE, 0xAE, 0xB2),
            text_muted: Color::Rgb(0x63, 0x63, 0x66),
            selection: Color::Rgb(0x2C, 0x2C, 0x2E),

            progress_filled: brand,
            progress_empty: Color::Rgb(0x48, 0x48, 0x4A),
        }
    }
}

trait AccentColor {
    fn color(self) -> Color;
}

impl AccentColor for Accent {
    fn color(self) -> Color {
        let (r, g, b) = self.rgb();
        Color::Rgb(r, g, b)
    }
}

impl Theme {
    /// White-on-black chrome for low-contrast terminals
    pub fn high_contrast() -> Self {
        Self {
            text_primary: Color::White,
            text_secondary: Color::White,
            text_muted: Color::Gray,
            border: Color::White,
            border_focused: Color::Yellow,
            selection: Color::DarkGray,
            ..Self::default()
        }
    }

    pub fn text(&self) -> Style {
        fg(self.text_primary)
    }

    pub fn text_secondary(&self) -> Style {
        fg(self.text_secondary)
    }

    pub fn text_muted(&self) -> Style {
        fg(self.text_muted)
    }

    /// Brand colour in bold; used for titles and section headings
    pub fn title(&self) -> Style {
        fg(self.brand).add_modifier(Modifier::BOLD)
    }

    pub fn text_highlight(&self) -> Style {
        self.title()
    }

    pub fn border(&self) -> Style {
        fg(self.border)
    }

    pub fn border_focused(&self) -> Style {
        fg(self.border_focused)
    }

    pub fn success(&self) -> Style {
        fg(self.success)
    }

    pub fn warning(&self) -> Style {
        fg(self.warning)
    }

    pub fn danger(&self) -> Style {
        fg(self.danger).add_modifier(Modifier::BOLD)
    }

    pub fn info(&self) -> Style {
        fg(self.info)
    }

    pub fn selection(&self) -> Style {
        Style::default().bg(self.selection).fg(self.brand)
    }

    pub fn input(&self) -> Style {
        fg(self.text_primary).bg(self.background)
    }

    /// Filled keypad slot
    pub fn pin_dot(&self) -> Style {
        self.title()
    }

    /// Empty keypad slot
    pub fn pin_placeholder(&self) -> Style {
        self.text_muted()
    }

    pub fn accent(&self, accent: Accent) -> Color {
        accent.color()
    }

    /// Tile card border, dimmed unless the tile is selected
    pub fn tile_border(&self, accent: Accent, selected: bool) -> Style {
        let modifier = if selected {
            Modifier::BOLD
        } else {
            Modifier::DIM
        };
        fg(accent.color()).add_modifier(modifier)
    }
}
