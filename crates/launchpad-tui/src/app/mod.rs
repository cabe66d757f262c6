//! Application state and event handling

pub mod config;
mod state;

pub use config::{ConfigError, LauncherConfig};
pub use state::{AppState, Drag, Editor, Screen};

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use launchpad_core::credential::{clear_secret, store_secret};
use launchpad_core::{
    Carousel, Credential, FileStore, FlowController, FlowEvent, KeyValueStore, KvSessionStore,
    Launcher, Navigator, SharedStore, StoredSecretVerifier, SystemNavigator, Tile, TileCatalog,
};
use ratatui::prelude::*;
use zeroize::Zeroizing;

use crate::ui::components::toast::{Toast, Toasts};
use crate::ui::{self, Theme};

/// Store shared by the session flag, the verifier and the catalog
pub type AppStore = SharedStore<Box<dyn KeyValueStore>>;

/// Flow controller as wired by the app
pub type AppFlow = FlowController<KvSessionStore<AppStore>, StoredSecretVerifier<AppStore>>;

/// Tiles per grid row
pub const GRID_COLUMNS: usize = 2;

/// Main application struct
pub struct App {
    /// Application state
    pub state: AppState,

    /// Colour palette
    pub theme: Theme,

    /// Loaded configuration
    pub config: LauncherConfig,

    /// Passcode gate, loading delay and session flag
    pub flow: AppFlow,

    /// Dashboard tiles
    pub catalog: TileCatalog<AppStore>,

    /// Current dashboard page
    pub carousel: Carousel,

    /// Toasts
    pub toasts: Toasts,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Tick counter for animations
    pub tick: u64,

    store: AppStore,
    launcher: Launcher<Box<dyn Navigator>>,

    /// Last tick time
    last_tick: Instant,
}

impl App {
    /// Create the app with the file store from the configuration
    pub fn new(config: LauncherConfig) -> Result<Self> {
        let path = config.store_path().ok_or(ConfigError::NoConfigDir)?;
        let store = FileStore::open(path)?;
        Ok(Self::with_parts(
            config,
            Box::new(store),
            Box::new(SystemNavigator),
        ))
    }

    /// Create the app around an existing store and navigator
    pub fn with_parts(
        config: LauncherConfig,
        store: Box<dyn KeyValueStore>,
        navigator: Box<dyn Navigator>,
    ) -> Self {
        let store = SharedStore::new(store);
        let flow = FlowController::with_timings(
            KvSessionStore::new(store.clone()),
            StoredSecretVerifier::new(store.clone()),
            config.timings,
        );
        let catalog = TileCatalog::load(store.clone());
        let carousel = Carousel::new(catalog.page_count(config.tiles_per_page.max(1)));
        let theme = if config.high_contrast {
            Theme::high_contrast()
        } else {
            Theme::default()
        };

        let mut app = Self {
            state: AppState::new(),
            theme,
            config,
            flow,
            catalog,
            carousel,
            toasts: Toasts::new(),
            should_quit: false,
            tick: 0,
            store,
            launcher: Launcher::new(navigator),
            last_tick: Instant::now(),
        };
        app.sync_screen();
        app
    }

    /// The store behind the session flag and tile customisations
    pub fn store(&self) -> &AppStore {
        &self.store
    }

    /// Tiles per dashboard page
    pub fn tiles_per_page(&self) -> usize {
        self.config.tiles_per_page.max(1)
    }

    /// Currently selected tile on the dashboard
    pub fn selected_tile(&self) -> Option<&Tile> {
        self.catalog.tiles().get(self.state.selected_tile)
    }

    /// Run the application main loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let tick_rate = Duration::from_millis(100);

        while !self.should_quit {
            // Draw UI
            terminal.draw(|frame| ui::render(frame, self))?;

            // Sleep until the next tick or the next flow deadline
            let now = Instant::now();
            let mut timeout = tick_rate
                .checked_sub(self.last_tick.elapsed())
                .unwrap_or(Duration::ZERO);
            if let Some(deadline) = self.flow.next_deadline() {
                timeout = timeout.min(deadline.saturating_duration_since(now));
            }

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key, Instant::now());
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse, Instant::now()),
                    _ => {}
                }
            }

            self.update(Instant::now());

            // Update tick
            if self.last_tick.elapsed() >= tick_rate {
                self.tick = self.tick.wrapping_add(1);
                self.toasts.tick();
                self.last_tick = Instant::now();
            }
        }

        Ok(())
    }

    /// Fire due timers and react to what happened
    pub fn update(&mut self, now: Instant) {
        match self.flow.tick(now) {
            Ok(events) => {
                for event in events {
                    self.apply_event(event);
                }
            }
            Err(e) => {
                tracing::error!("Flow update failed: {}", e);
                self.notify(Toast::error(e.to_string()));
            }
        }
    }

    fn apply_event(&mut self, event: FlowEvent) {
        match event {
            FlowEvent::CredentialRejected | FlowEvent::ErrorCleared => {}
            FlowEvent::Authenticated => {
                self.state.reset_unlocked();
                self.carousel.go_to(0);
            }
            FlowEvent::Activated => self.notify(Toast::success("Unlocked")),
            FlowEvent::SessionRevoked => {
                self.notify(Toast::warning("Session ended while loading"))
            }
            FlowEvent::LoggedOut => {
                self.state.reset_unlocked();
                self.carousel.go_to(0);
                self.notify(Toast::info("Logged out"));
            }
        }
        self.sync_screen();
    }

    fn sync_screen(&mut self) {
        self.state.current_screen = self.state.screen_for(self.flow.state());
    }

    fn notify(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }

    /// Handle key press events
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        // Global quit handler
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // Delegate to screen-specific handlers
        match self.state.current_screen {
            Screen::Passcode => self.handle_passcode_key(key.code, now),
            Screen::Loading => {}
            Screen::Dashboard => self.handle_dashboard_key(key.code),
            Screen::Settings => self.handle_settings_key(key),
            Screen::Help => self.handle_help_key(key.code),
        }
    }

    fn handle_passcode_key(&mut self, key: KeyCode, now: Instant) {
        let result = match key {
            KeyCode::Char(c) if c.is_ascii_digit() => self.flow.enter_digit(c, now),
            KeyCode::Backspace | KeyCode::Delete => self.flow.delete_digit().map(|_| ()),
            KeyCode::Esc => {
                self.should_quit = true;
                Ok(())
            }
            _ => Ok(()),
        };

        if let Err(e) = result {
            tracing::debug!("Keypad input ignored: {}", e);
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Left | KeyCode::Char('h') => self.move_selection(-1),
            KeyCode::Right | KeyCode::Char('l') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-(GRID_COLUMNS as isize)),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(GRID_COLUMNS as isize),
            KeyCode::PageDown | KeyCode::Char(']') | KeyCode::Tab => {
                if self.carousel.next() {
                    self.select_page_start();
                }
            }
            KeyCode::PageUp | KeyCode::Char('[') | KeyCode::BackTab => {
                if self.carousel.prev() {
                    self.select_page_start();
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.launch_selected(),
            KeyCode::Char('<') => self.shift_selected(-1),
            KeyCode::Char('>') => self.shift_selected(1),
            KeyCode::Char('s') => {
                self.state.settings_index = self.state.selected_tile;
                self.state.current_screen = Screen::Settings;
            }
            KeyCode::Char('?') => self.state.current_screen = Screen::Help,
            KeyCode::Char('L') => self.logout(),
            _ => {}
        }
    }

    fn handle_settings_key(&mut self, key: KeyEvent) {
        if self.state.editor.is_some() {
            self.handle_editor_key(key);
            return;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('b') => {
                self.state.current_screen = Screen::Dashboard;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.settings_index = self.state.settings_index.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.state.settings_index + 1 < self.catalog.len() {
                    self.state.settings_index += 1;
                }
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(tile) = self.catalog.tiles().get(self.state.settings_index) {
                    self.state.editor = Some(Editor::url(tile.id.clone(), &tile.url));
                }
            }
            KeyCode::Char('r') => self.reset_selected_url(),
            KeyCode::Char('o') => self.reset_order(),
            KeyCode::Char('p') => self.state.editor = Some(Editor::passcode()),
            KeyCode::Char('c') => self.clear_passcode(),
            KeyCode::Char('L') => self.logout(),
            _ => {}
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state.editor = None,
            KeyCode::Enter => self.submit_editor(),
            _ => {
                if let Some(editor) = self.state.editor.as_mut() {
                    editor.input_mut().input(key);
                }
            }
        }
    }

    fn handle_help_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter | KeyCode::Char('?') => {
                self.state.current_screen = Screen::Dashboard;
            }
            _ => {}
        }
    }

    /// Handle mouse drags and scrolling on the dashboard
    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        if self.state.current_screen != Screen::Dashboard {
            return;
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.state.drag = Some(Drag {
                    origin: mouse.column,
                    started: now,
                    offset: 0.0,
                });
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(drag) = self.state.drag.as_mut() {
                    drag.offset = f64::from(mouse.column) - f64::from(drag.origin);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(drag) = self.state.drag.take() {
                    let offset = f64::from(mouse.column) - f64::from(drag.origin);
                    self.finish_drag(drag, offset, now);
                }
            }
            MouseEventKind::ScrollDown => {
                if self.carousel.next() {
                    self.select_page_start();
                }
            }
            MouseEventKind::ScrollUp => {
                if self.carousel.prev() {
                    self.select_page_start();
                }
            }
            _ => {}
        }
    }

    fn finish_drag(&mut self, drag: Drag, offset: f64, now: Instant) {
        if offset == 0.0 {
            return;
        }

        let elapsed = now.duration_since(drag.started).as_secs_f64().max(0.001);
        let page_width = f64::from(self.state.viewport_width.max(1));
        let before = self.carousel.page();
        let after = self.carousel.settle(offset / elapsed, offset, page_width);
        if after != before {
            self.select_page_start();
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.catalog.len();
        if len == 0 {
            return;
        }

        let target = self.state.selected_tile as isize + delta;
        if target < 0 || target >= len as isize {
            return;
        }
        self.state.selected_tile = target as usize;
        self.carousel.go_to(self.state.selected_tile / self.tiles_per_page());
    }

    fn select_page_start(&mut self) {
        let start = self.carousel.page() * self.tiles_per_page();
        self.state.selected_tile = start.min(self.catalog.len().saturating_sub(1));
    }

    fn shift_selected(&mut self, delta: isize) {
        let from = self.state.selected_tile;
        let to = from as isize + delta;
        if to < 0 || to >= self.catalog.len() as isize {
            return;
        }

        match self.catalog.move_tile(from, to as usize) {
            Ok(()) => {
                self.state.selected_tile = to as usize;
                self.carousel.go_to(self.state.selected_tile / self.tiles_per_page());
            }
            Err(e) => self.report("Could not reorder tiles", e),
        }
    }

    fn launch_selected(&mut self) {
        let Some(tile) = self.catalog.tiles().get(self.state.selected_tile) else {
            return;
        };

        let name = tile.name.clone();
        match self.launcher.launch(&self.flow, tile) {
            Ok(()) => self.notify(Toast::info(format!("Opening {}", name))),
            Err(e) => self.report(&format!("Could not open {}", name), e),
        }
    }

    fn logout(&mut self) {
        match self.flow.logout() {
            Ok(event) => self.apply_event(event),
            Err(e) => self.report("Logout failed", e),
        }
    }

    fn reset_selected_url(&mut self) {
        let Some(id) = self
            .catalog
            .tiles()
            .get(self.state.settings_index)
            .map(|tile| tile.id.clone())
        else {
            return;
        };

        match self.catalog.reset_url(&id) {
            Ok(()) => self.notify(Toast::success("URL restored")),
            Err(e) => self.report("Could not restore URL", e),
        }
    }

    fn reset_order(&mut self) {
        match self.catalog.reset_order() {
            Ok(()) => {
                self.state.selected_tile = 0;
                self.state.settings_index = 0;
                self.carousel.go_to(0);
                self.notify(Toast::success("Tile order restored"));
            }
            Err(e) => self.report("Could not restore order", e),
        }
    }

    fn clear_passcode(&mut self) {
        match clear_secret(&mut self.store) {
            Ok(()) => self.notify(Toast::success("Default passcode restored")),
            Err(e) => self.report("Could not restore passcode", e),
        }
    }

    fn submit_editor(&mut self) {
        let Some(editor) = self.state.editor.as_ref() else {
            return;
        };

        let result = match editor {
            Editor::Url { tile_id, .. } => {
                let url = editor.text();
                self.catalog
                    .set_url(tile_id, &url)
                    .map(|()| "URL updated")
            }
            Editor::Passcode { .. } => {
                let raw = Zeroizing::new(editor.text());
                Credential::parse(&raw)
                    .and_then(|secret| store_secret(&mut self.store, &secret))
                    .map(|()| "Passcode changed")
            }
        };

        match result {
            Ok(message) => {
                self.state.editor = None;
                self.notify(Toast::success(message));
            }
            // Keep the editor open so the input can be corrected
            Err(e) => self.notify(Toast::error(e.to_string())),
        }
    }

    fn report(&mut self, context: &str, error: launchpad_core::LaunchpadError) {
        tracing::warn!("{}: {}", context, error);
        self.notify(Toast::error(format!("{}: {}", context, error)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use launchpad_core::store::keys;
    use launchpad_core::{MemoryStore, RecordingNavigator, ScreenState};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with(store: MemoryStore) -> (App, RecordingNavigator) {
        let navigator = RecordingNavigator::new();
        let app = App::with_parts(
            LauncherConfig::default(),
            Box::new(store),
            Box::new(navigator.clone()),
        );
        (app, navigator)
    }

    fn unlocked_app() -> (App, RecordingNavigator) {
        let mut store = MemoryStore::new();
        store.set(keys::SESSION, "true").unwrap();
        app_with(store)
    }

    fn type_code(app: &mut App, code: &str, now: Instant) {
        for c in code.chars() {
            app.handle_key(key(KeyCode::Char(c)), now);
        }
    }

    #[test]
    fn test_unlock_flow() {
        let t0 = Instant::now();
        let (mut app, _) = app_with(MemoryStore::new());
        assert_eq!(app.state.current_screen, Screen::Passcode);

        type_code(&mut app, "1997", t0);
        app.update(t0 + ms(300));
        assert_eq!(app.state.current_screen, Screen::Loading);
        assert_eq!(app.store().get(keys::SESSION).as_deref(), Some("true"));

        app.update(t0 + ms(2300));
        assert_eq!(app.state.current_screen, Screen::Dashboard);
        assert_eq!(app.flow.state(), ScreenState::Active);
    }

    #[test]
    fn test_wrong_code_shows_error() {
        let t0 = Instant::now();
        let (mut app, _) = app_with(MemoryStore::new());

        type_code(&mut app, "1234", t0);
        app.update(t0 + ms(300));
        assert_eq!(app.state.current_screen, Screen::Passcode);
        assert!(app.flow.gate().error_visible());

        app.handle_key(key(KeyCode::Backspace), t0 + ms(400));
        assert!(app.flow.gate().error_visible());
    }

    #[test]
    fn test_escape_quits_from_keypad() {
        let (mut app, _) = app_with(MemoryStore::new());
        app.handle_key(key(KeyCode::Esc), Instant::now());
        assert!(app.should_quit);
    }

    #[test]
    fn test_existing_session_opens_dashboard() {
        let (app, _) = unlocked_app();
        assert_eq!(app.state.current_screen, Screen::Dashboard);
    }

    #[test]
    fn test_grid_navigation_moves_pages() {
        let (mut app, _) = unlocked_app();
        let now = Instant::now();

        app.handle_key(key(KeyCode::Down), now);
        app.handle_key(key(KeyCode::Right), now);
        assert_eq!(app.state.selected_tile, 3);
        assert_eq!(app.carousel.page(), 0);

        app.handle_key(key(KeyCode::Right), now);
        assert_eq!(app.state.selected_tile, 4);
        assert_eq!(app.carousel.page(), 1);

        app.handle_key(key(KeyCode::PageUp), now);
        assert_eq!(app.state.selected_tile, 0);
        assert_eq!(app.carousel.page(), 0);
    }

    #[test]
    fn test_enter_launches_selected_tile() {
        let (mut app, navigator) = unlocked_app();
        app.handle_key(key(KeyCode::Right), Instant::now());
        app.handle_key(key(KeyCode::Enter), Instant::now());

        assert_eq!(
            navigator.opened(),
            vec!["https://routes-vm-faizzz7348.replit.app/".to_string()]
        );
    }

    #[test]
    fn test_reorder_persists() {
        let (mut app, _) = unlocked_app();
        app.handle_key(key(KeyCode::Char('>')), Instant::now());

        assert_eq!(app.state.selected_tile, 1);
        assert_eq!(app.catalog.tiles()[1].id, "expired");
        assert!(app.store().get(keys::TILE_ORDER).is_some());
    }

    #[test]
    fn test_logout_returns_to_keypad() {
        let (mut app, _) = unlocked_app();
        app.handle_key(key(KeyCode::Char('L')), Instant::now());

        assert_eq!(app.state.current_screen, Screen::Passcode);
        assert!(app.store().get(keys::SESSION).is_none());
    }

    #[test]
    fn test_edit_url_from_settings() {
        let (mut app, _) = unlocked_app();
        let now = Instant::now();

        app.handle_key(key(KeyCode::Char('s')), now);
        assert_eq!(app.state.current_screen, Screen::Settings);

        app.handle_key(key(KeyCode::Char('e')), now);
        assert!(app.state.editor.is_some());
        app.state.editor = Some(Editor::url("expired", "https://example.org"));
        app.handle_key(key(KeyCode::Enter), now);

        assert!(app.state.editor.is_none());
        assert_eq!(app.catalog.tiles()[0].url, "https://example.org/");
        assert!(app.catalog.is_overridden("expired"));
    }

    #[test]
    fn test_invalid_url_keeps_editor_open() {
        let (mut app, _) = unlocked_app();
        let now = Instant::now();

        app.handle_key(key(KeyCode::Char('s')), now);
        app.state.editor = Some(Editor::url("expired", "ftp://example.org"));
        app.handle_key(key(KeyCode::Enter), now);

        assert!(app.state.editor.is_some());
        assert_eq!(app.toasts.active().len(), 1);
    }

    #[test]
    fn test_changed_passcode_unlocks() {
        let (mut app, _) = unlocked_app();
        let t0 = Instant::now();

        app.handle_key(key(KeyCode::Char('s')), t0);
        app.handle_key(key(KeyCode::Char('p')), t0);
        type_code(&mut app, "2468", t0);
        app.handle_key(key(KeyCode::Enter), t0);
        assert_eq!(app.store().get(keys::PASSCODE).as_deref(), Some("2468"));

        app.handle_key(key(KeyCode::Char('L')), t0);
        type_code(&mut app, "1997", t0);
        app.update(t0 + ms(300));
        assert_eq!(app.state.current_screen, Screen::Passcode);

        app.update(t0 + ms(3300));
        type_code(&mut app, "2468", t0 + ms(3400));
        app.update(t0 + ms(3700));
        assert_eq!(app.state.current_screen, Screen::Loading);
    }

    #[test]
    fn test_drag_flips_page() {
        let (mut app, _) = unlocked_app();
        app.state.viewport_width = 80;
        let t0 = Instant::now();

        let mouse = |kind, column| MouseEvent {
            kind,
            column,
            row: 5,
            modifiers: KeyModifiers::NONE,
        };

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 60), t0);
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 30), t0 + ms(500));
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 30), t0 + ms(600));

        assert_eq!(app.carousel.page(), 1);
        assert_eq!(app.state.selected_tile, 4);
    }
}
