//! Dashboard screen - paged tile grid

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{App, GRID_COLUMNS};
use crate::ui::components::tile::{short_url, TileCard};
use crate::ui::layout::{grid, render_footer, render_header, ScreenLayout};

/// Draw the dashboard
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let layout = ScreenLayout::new(area);

    let page = app.carousel.page();
    let crumb = format!("Page {} of {}", page + 1, app.carousel.page_count());
    render_header(frame, layout.header, &crumb, theme);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(4),    // Grid
            Constraint::Length(1), // Page dots
            Constraint::Length(1), // Selected URL
        ])
        .split(layout.content);

    render_grid(frame, chunks[0], app);
    render_page_dots(frame, chunks[1], app);

    if let Some(tile) = app.selected_tile() {
        let url = Paragraph::new(short_url(&tile.url, chunks[2].width as usize))
            .style(theme.text_muted())
            .alignment(Alignment::Center);
        frame.render_widget(url, chunks[2]);
    }

    let hints = &[
        ("←↑↓→", "Select"),
        ("PgUp/PgDn", "Page"),
        ("Enter", "Open"),
        ("</>", "Move"),
        ("s", "Settings"),
        ("L", "Logout"),
        ("?", "Help"),
        ("q", "Quit"),
    ];
    render_footer(frame, layout.footer, hints, theme);
}

fn render_grid(frame: &mut Frame, area: Rect, app: &App) {
    let per_page = app.tiles_per_page();
    let rows = per_page.div_ceil(GRID_COLUMNS);
    let cells = grid(area, GRID_COLUMNS, rows);

    let Some(tiles) = app.catalog.pages(per_page).get(app.carousel.page()).copied() else {
        let empty = Paragraph::new("No tiles")
            .style(app.theme.text_muted())
            .alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    };

    let first = app.carousel.page() * per_page;
    for (offset, (tile, cell)) in tiles.iter().zip(cells).enumerate() {
        let selected = first + offset == app.state.selected_tile;
        TileCard::new(tile, selected).render(frame, cell, &app.theme);
    }
}

fn render_page_dots(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let dots: Vec<Span> = (0..app.carousel.page_count())
        .map(|i| {
            if i == app.carousel.page() {
                Span::styled("● ", theme.text_highlight())
            } else {
                Span::styled("○ ", theme.text_muted())
            }
        })
        .collect();

    frame.render_widget(
        Paragraph::new(Line::from(dots)).alignment(Alignment::Center),
        area,
    );
}
