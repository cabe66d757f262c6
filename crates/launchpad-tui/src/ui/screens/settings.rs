//! Settings screen

use ratatui::prelude::*;
use ratatui::widgets::{Clear, List, ListItem, ListState, Paragraph, Wrap};

use crate::app::App;
use crate::ui::layout::{
    centered_rect_fixed, render_footer, render_header, section_block, ScreenLayout,
};

/// Draw the settings screen
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let layout = ScreenLayout::new(area);

    render_header(frame, layout.header, "Dashboard > Settings", theme);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(layout.content);

    render_tiles(frame, content_chunks[0], app);
    render_detail(frame, content_chunks[1], app);

    render_footer(frame, layout.footer, hints(app.state.editor.is_some()), theme);

    if app.state.editor.is_some() {
        render_editor(frame, area, app);
    }
}

/// Render the tile list
fn render_tiles(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let block = section_block("Tiles", true, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let items: Vec<ListItem> = app
        .catalog
        .tiles()
        .iter()
        .map(|tile| {
            let mut spans = vec![
                Span::styled("■ ", Style::default().fg(theme.accent(tile.accent))),
                Span::styled(tile.name.clone(), theme.text()),
            ];
            if app.catalog.is_overridden(&tile.id) {
                spans.push(Span::styled(" *", theme.warning()));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(theme.selection())
        .highlight_symbol("▶ ");

    let mut state = ListState::default().with_selected(Some(app.state.settings_index));
    frame.render_stateful_widget(list, inner, &mut state);
}

/// Render detail panel for the selected tile
fn render_detail(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let block = section_block("Details", false, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(tile) = app.catalog.tiles().get(app.state.settings_index) else {
        return;
    };

    let url_note = if app.catalog.is_overridden(&tile.id) {
        Span::styled("custom", theme.warning())
    } else {
        Span::styled("default", theme.text_muted())
    };
    let passcode_note = if app.flow.verifier().has_override() {
        Span::styled("custom", theme.warning())
    } else {
        Span::styled("default", theme.text_muted())
    };

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Name:      ", theme.text_secondary()),
            Span::styled(tile.name.clone(), theme.text()),
        ]),
        Line::from(vec![
            Span::styled("URL:       ", theme.text_secondary()),
            Span::styled(tile.url.clone(), theme.text()),
        ]),
        Line::from(vec![Span::styled("           ", theme.text_secondary()), url_note]),
        Line::from(vec![
            Span::styled("Position:  ", theme.text_secondary()),
            Span::raw(format!("{} of {}", app.state.settings_index + 1, app.catalog.len())),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Passcode:  ", theme.text_secondary()),
            passcode_note,
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn hints(editing: bool) -> &'static [(&'static str, &'static str)] {
    if editing {
        &[("Enter", "Save"), ("Esc", "Cancel")]
    } else {
        &[
            ("↑/↓", "Navigate"),
            ("e", "Edit URL"),
            ("r", "Reset URL"),
            ("o", "Reset order"),
            ("p", "Passcode"),
            ("c", "Default passcode"),
            ("L", "Logout"),
            ("Esc", "Back"),
        ]
    }
}

/// Render the open text field as a popup
fn render_editor(frame: &mut Frame, area: Rect, app: &App) {
    let Some(editor) = app.state.editor.as_ref() else {
        return;
    };
    let theme = &app.theme;

    let popup = centered_rect_fixed(area.width * 3 / 5, 3, area);
    frame.render_widget(Clear, popup);

    let block = section_block(editor.title(), true, theme).style(theme.input());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let field = Rect::new(inner.x, inner.y, inner.width, inner.height.min(1));
    frame.render_widget(editor.input(), field);
}
