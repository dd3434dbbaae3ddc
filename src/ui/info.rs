//! Film info panel
//!
//! Episode, director, release date and opening crawl of the selected film.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::models::Movie;
use crate::ui::Theme;

/// Render the info panel for `movie`, or a hint when nothing is selected
pub fn render_movie_info(frame: &mut Frame, area: Rect, movie: Option<&Movie>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(" INFO ", Theme::title()));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(movie) = movie else {
        let hint = Paragraph::new("Select a film with ↵")
            .style(Theme::dimmed())
            .alignment(Alignment::Center);
        frame.render_widget(hint, inner);
        return;
    };

    let paragraph = Paragraph::new(Text::from(movie_lines(movie, inner.width)))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);
}

fn movie_lines(movie: &Movie, width: u16) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled("▶ ", Theme::accent()),
            Span::styled(movie.title.clone(), Theme::title()),
        ]),
        field("Episode", movie.episode_id.to_string()),
        field("Director", movie.director.clone()),
        field("Release Date", movie.release_date.clone()),
        Line::from(Span::styled("─".repeat(width as usize), Theme::dimmed())),
    ];

    for line in movie.crawl_lines() {
        lines.push(Line::from(Span::styled(line.to_string(), Theme::crawl())));
    }
    lines
}

fn field(name: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", name), Theme::dimmed()),
        Span::styled(value, Theme::text()),
    ])
}
