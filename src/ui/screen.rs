//! Full-screen layout
//!
//! Header, the four browser columns, status bar, and the help overlay.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::app::{App, Column};
use crate::ui::info::render_movie_info;
use crate::ui::panel::{ListPanel, Row};
use crate::ui::Theme;

/// Main render function
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(Style::default().bg(Theme::BACKGROUND)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Columns
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0]);
    render_columns(frame, chunks[1], app);
    render_status_bar(frame, chunks[2], app);

    if app.show_help {
        render_help(frame, area);
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let logo = Paragraph::new(Line::from(vec![
        Span::styled("STAR", Theme::title()),
        Span::styled("CATALOG", Theme::secondary().add_modifier(Modifier::BOLD)),
        Span::styled("  films · starships · pilots", Theme::dimmed()),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border()),
    );
    frame.render_widget(logo, area);
}

fn render_columns(frame: &mut Frame, area: Rect, app: &mut App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(22),
            Constraint::Percentage(22),
            Constraint::Percentage(22),
        ])
        .split(area);

    // Films column: list on top, info below
    let film_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(columns[0]);

    let focus = app.focus;
    let state = app.browser.state();

    let film_rows: Vec<Row> = state
        .display_movies()
        .into_iter()
        .map(|movie| {
            Row::new(movie.title.clone())
                .badge(episode_badge(movie.episode_id))
                .active(state.is_selected(movie))
        })
        .collect();
    let starship_rows: Vec<Row> = state
        .starships
        .iter()
        .map(|entry| {
            Row::new(entry.label())
                .active(state.active_starship.as_deref() == Some(entry.locator.as_str()))
                .unavailable(!entry.is_resolved())
        })
        .collect();
    let pilot_rows: Vec<Row> = state.pilots.iter().map(Row::new).collect();
    let shortlist_rows: Vec<Row> = state.shortlist.names().iter().map(Row::new).collect();

    let loading_message = state
        .loading
        .is_loading()
        .then(|| state.loading.message().unwrap_or("Loading..."));
    let starship_hint = if state.selected.is_some() {
        "No starships"
    } else {
        "Select a film"
    };
    let pilot_hint = if state.active_starship.is_some() {
        "No pilots"
    } else {
        "Select a starship"
    };
    let selected = state.selected.clone();

    let panels = [
        (
            Column::Films,
            film_chunks[0],
            ListPanel::new(Column::Films.title(), film_rows)
                .loading(loading_message)
                .empty_hint("No films available"),
        ),
        (
            Column::Starships,
            columns[1],
            ListPanel::new(Column::Starships.title(), starship_rows).empty_hint(starship_hint),
        ),
        (
            Column::Pilots,
            columns[2],
            ListPanel::new(Column::Pilots.title(), pilot_rows).empty_hint(pilot_hint),
        ),
        (
            Column::Shortlist,
            columns[3],
            ListPanel::new(Column::Shortlist.title(), shortlist_rows)
                .empty_hint("Add pilots with ↵"),
        ),
    ];

    for (column, area, panel) in panels {
        let panel = panel.focused(focus == column);
        panel.render(frame, area, &mut app.lists[column.index()]);
    }

    render_movie_info(frame, film_chunks[1], selected.as_ref());
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let focus = Span::styled(
        format!(" {} ", app.focus.title()),
        Style::default().fg(Theme::BACKGROUND).bg(Theme::PRIMARY),
    );

    let activity = if app.browser.is_busy() {
        Span::styled(" ⟳ fetching ", Theme::loading())
    } else {
        Span::styled(" idle ", Theme::dimmed())
    };

    let shortlist = Span::styled(
        format!(" ★ {} ", app.browser.state().shortlist.len()),
        Theme::accent(),
    );

    let failed = match app.browser.failed_lookups() {
        0 => Span::raw(""),
        n => Span::styled(format!(" ✗ {} failed ", n), Theme::warning()),
    };

    let help = Span::styled(" q:quit  tab:column  ↵:select  esc:clear  ?:help ", Theme::dimmed());

    let status = Paragraph::new(Line::from(vec![
        focus,
        activity,
        shortlist,
        failed,
        Span::raw(" │ "),
        help,
    ]))
    .style(Theme::status_bar());
    frame.render_widget(status, area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let popup_width = 48.min(area.width.saturating_sub(4));
    let popup_height = 13.min(area.height.saturating_sub(2));
    let popup_area = Rect {
        x: area.x + (area.width.saturating_sub(popup_width)) / 2,
        y: area.y + (area.height.saturating_sub(popup_height)) / 2,
        width: popup_width,
        height: popup_height,
    };

    frame.render_widget(Clear, popup_area);

    let bindings = [
        ("tab / →", "next column"),
        ("S-tab / ←", "previous column"),
        ("↑↓ / jk", "move"),
        ("g / G", "first / last"),
        ("↵", "select film / starship"),
        ("↵ / a", "add pilot to shortlist"),
        ("↵ / d", "remove from shortlist"),
        ("esc", "clear selection"),
        ("q", "quit"),
    ];
    let lines: Vec<Line> = bindings
        .iter()
        .map(|(keys, desc)| {
            Line::from(vec![
                Span::styled(format!(" {:<10}", keys), Theme::keybind()),
                Span::styled(*desc, Theme::text()),
            ])
        })
        .collect();

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Theme::border_focused())
            .title(Span::styled(" KEYS ", Theme::title()))
            .style(Style::default().bg(Theme::BACKGROUND)),
    );
    frame.render_widget(help, popup_area);
}

/// Roman numeral badge for an episode, e.g. "[IV]"
pub fn episode_badge(episode: u32) -> String {
    const NUMERALS: [&str; 9] = ["I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX"];
    match episode {
        1..=9 => format!("[{}]", NUMERALS[episode as usize - 1]),
        n => format!("[{}]", n),
    }
}
