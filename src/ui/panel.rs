//! List column widget
//!
//! Renders one column of the browser: a bordered, titled list with a cursor,
//! an "active" marker for the current selection, and an empty/loading state.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

use crate::app::ListState;
use crate::ui::Theme;

/// One row of a list column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub label: String,
    /// Short dimmed prefix, e.g. an episode badge
    pub badge: Option<String>,
    /// Part of the current selection
    pub active: bool,
    /// Failed lookup placeholder
    pub unavailable: bool,
}

impl Row {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            badge: None,
            active: false,
            unavailable: false,
        }
    }

    pub fn badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = Some(badge.into());
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn unavailable(mut self, unavailable: bool) -> Self {
        self.unavailable = unavailable;
        self
    }
}

/// A titled list column
#[derive(Debug)]
pub struct ListPanel<'a> {
    pub title: &'a str,
    pub rows: Vec<Row>,
    pub focused: bool,
    /// Shown instead of rows while loading
    pub loading: Option<&'a str>,
    /// Shown when there are no rows
    pub empty_hint: &'a str,
}

impl<'a> ListPanel<'a> {
    pub fn new(title: &'a str, rows: Vec<Row>) -> Self {
        Self {
            title,
            rows,
            focused: false,
            loading: None,
            empty_hint: "Nothing here yet",
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn loading(mut self, message: Option<&'a str>) -> Self {
        self.loading = message;
        self
    }

    pub fn empty_hint(mut self, hint: &'a str) -> Self {
        self.empty_hint = hint;
        self
    }

    fn block(&self, title: String) -> Block<'static> {
        let border_style = if self.focused {
            Theme::border_focused()
        } else {
            Theme::border()
        };
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Span::styled(title, Theme::title()))
    }

    /// Render the column, scrolling `list` so its cursor stays visible
    pub fn render(&self, frame: &mut Frame, area: Rect, list: &mut ListState) {
        if let Some(message) = self.loading {
            let loading = Paragraph::new(format!("⟳ {}", message))
                .style(Theme::loading())
                .alignment(Alignment::Center)
                .block(self.block(format!(" {} ", self.title)));
            frame.render_widget(loading, area);
            return;
        }

        if self.rows.is_empty() {
            let empty = Paragraph::new(self.empty_hint)
                .style(Theme::dimmed())
                .alignment(Alignment::Center)
                .block(self.block(format!(" {} ", self.title)));
            frame.render_widget(empty, area);
            return;
        }

        let visible_height = area.height.saturating_sub(2) as usize;
        list.scroll_into_view(visible_height);

        let items: Vec<ListItem> = self
            .rows
            .iter()
            .enumerate()
            .skip(list.offset)
            .take(visible_height)
            .map(|(i, row)| self.render_row(row, self.focused && i == list.selected))
            .collect();

        let title = format!(" {} ({}) ", self.title, self.rows.len());
        let widget = List::new(items)
            .block(self.block(title))
            .style(Theme::text());
        frame.render_widget(widget, area);
    }

    /// Format: ▸ [IV] Title
    fn render_row(&self, row: &Row, under_cursor: bool) -> ListItem<'static> {
        let marker = if row.active { "▸ " } else { "  " };

        let label_style = if under_cursor {
            Theme::cursor()
        } else if row.unavailable {
            Theme::warning()
        } else if row.active {
            Theme::active()
        } else {
            Theme::text()
        };

        let mut spans = vec![Span::styled(marker, Theme::accent())];
        if let Some(badge) = &row.badge {
            spans.push(Span::styled(format!("{} ", badge), Theme::episode()));
        }
        spans.push(Span::styled(row.label.clone(), label_style));

        ListItem::new(Line::from(spans))
    }
}
