//! Application state

use std::time::Instant;

use launchpad_core::ScreenState;
use ratatui::style::Style;
use tui_textarea::TextArea;

/// Current screen/view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Passcode keypad
    #[default]
    Passcode,

    /// Loading screen after unlock
    Loading,

    /// Tile grid
    Dashboard,

    /// Tile URLs, ordering and passcode
    Settings,

    /// Key reference
    Help,
}

impl Screen {
    /// Whether this screen belongs to the unlocked part of the app
    pub fn is_unlocked(self) -> bool {
        matches!(self, Screen::Dashboard | Screen::Settings | Screen::Help)
    }
}

/// Text field open on the settings screen
pub enum Editor {
    /// New URL for a tile
    Url {
        tile_id: String,
        input: TextArea<'static>,
    },

    /// New passcode
    Passcode { input: TextArea<'static> },
}

impl Editor {
    /// Editor prefilled with a tile's current URL
    pub fn url(tile_id: impl Into<String>, current: &str) -> Self {
        let mut input = TextArea::new(vec![current.to_string()]);
        input.set_cursor_line_style(Style::default());
        input.move_cursor(tui_textarea::CursorMove::End);
        Self::Url {
            tile_id: tile_id.into(),
            input,
        }
    }

    /// Empty, masked passcode field
    pub fn passcode() -> Self {
        let mut input = TextArea::default();
        input.set_cursor_line_style(Style::default());
        input.set_mask_char('\u{25CF}');
        input.set_placeholder_text("4 digits");
        Self::Passcode { input }
    }

    pub fn input(&self) -> &TextArea<'static> {
        match self {
            Editor::Url { input, .. } | Editor::Passcode { input } => input,
        }
    }

    pub fn input_mut(&mut self) -> &mut TextArea<'static> {
        match self {
            Editor::Url { input, .. } | Editor::Passcode { input } => input,
        }
    }

    /// Current single-line contents
    pub fn text(&self) -> String {
        self.input().lines().concat()
    }

    pub fn title(&self) -> &'static str {
        match self {
            Editor::Url { .. } => "Edit URL",
            Editor::Passcode { .. } => "New Passcode",
        }
    }
}

/// Mouse drag across the tile grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    /// Column the drag started on
    pub origin: u16,
    /// When the button went down
    pub started: Instant,
    /// Columns moved so far, positive to the right
    pub offset: f64,
}

/// Application state
#[derive(Default)]
pub struct AppState {
    /// Current screen
    pub current_screen: Screen,

    /// Selected tile, as an index into the catalog
    pub selected_tile: usize,

    /// Selected tile on the settings screen
    pub settings_index: usize,

    /// Open text field, if any
    pub editor: Option<Editor>,

    /// Drag in progress on the dashboard
    pub drag: Option<Drag>,

    /// Width of the last drawn frame, used as the page width for drags
    pub viewport_width: u16,
}

impl AppState {
    /// Create new application state
    pub fn new() -> Self {
        Self::default()
    }

    /// Screen to show for a flow state, keeping the current one if it fits
    pub fn screen_for(&self, flow: ScreenState) -> Screen {
        match flow {
            ScreenState::Gate => Screen::Passcode,
            ScreenState::Transitioning => Screen::Loading,
            ScreenState::Active if self.current_screen.is_unlocked() => self.current_screen,
            ScreenState::Active => Screen::Dashboard,
        }
    }

    /// Forget everything tied to the unlocked screens
    pub fn reset_unlocked(&mut self) {
        self.selected_tile = 0;
        self.settings_index = 0;
        self.editor = None;
        self.drag = None;
    }
}
