//! App state and keyboard handling
//!
//! Wraps the `CatalogBrowser` with what only the terminal front-end needs:
//! which column has focus, the cursor in each column, and the help overlay.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::catalog::CatalogBrowser;

// =============================================================================
// Columns
// =============================================================================

/// The four columns of the browser, left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Column {
    #[default]
    Films,
    Starships,
    Pilots,
    Shortlist,
}

impl Column {
    pub const ALL: [Column; 4] = [
        Column::Films,
        Column::Starships,
        Column::Pilots,
        Column::Shortlist,
    ];

    pub fn next(self) -> Self {
        match self {
            Column::Films => Column::Starships,
            Column::Starships => Column::Pilots,
            Column::Pilots => Column::Shortlist,
            Column::Shortlist => Column::Films,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Column::Films => Column::Shortlist,
            Column::Starships => Column::Films,
            Column::Pilots => Column::Starships,
            Column::Shortlist => Column::Pilots,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Column::Films => "FILMS",
            Column::Starships => "STARSHIPS",
            Column::Pilots => "PILOTS",
            Column::Shortlist => "SHORTLIST",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Column::Films => 0,
            Column::Starships => 1,
            Column::Pilots => 2,
            Column::Shortlist => 3,
        }
    }
}

// =============================================================================
// Selection State (per-column)
// =============================================================================

/// Cursor state for a list column
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListState {
    /// Currently selected index
    pub selected: usize,
    /// Scroll offset for viewport
    pub offset: usize,
    /// Total number of items
    pub len: usize,
}

impl ListState {
    pub fn new(len: usize) -> Self {
        Self {
            selected: 0,
            offset: 0,
            len,
        }
    }

    /// Index of the last row, `None` for an empty column
    fn last_index(&self) -> Option<usize> {
        self.len.checked_sub(1)
    }

    /// Place the cursor on `index`, clamped to the column
    ///
    /// The offset never sits below the cursor; the panel scrolls the rest.
    fn move_to(&mut self, index: usize) {
        self.selected = self.last_index().map_or(0, |last| index.min(last));
        self.offset = self.offset.min(self.selected);
    }

    pub fn up(&mut self) {
        self.move_to(self.selected.saturating_sub(1));
    }

    pub fn down(&mut self) {
        self.move_to(self.selected.saturating_add(1));
    }

    /// Move up by `page_size` rows, stopping at the top
    pub fn page_up(&mut self, page_size: usize) {
        self.move_to(self.selected.saturating_sub(page_size));
    }

    /// Move down by `page_size` rows, stopping at the bottom
    pub fn page_down(&mut self, page_size: usize) {
        self.move_to(self.selected.saturating_add(page_size));
    }

    /// Home
    pub fn first(&mut self) {
        self.move_to(0);
        self.offset = 0;
    }

    /// End
    pub fn last(&mut self) {
        self.move_to(usize::MAX);
    }

    /// Shift the viewport of `visible_height` rows so the cursor shows
    pub fn scroll_into_view(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + visible_height {
            self.offset = self.selected + 1 - visible_height;
        }
    }

    /// Follow a column whose contents changed, keeping the cursor in range
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.move_to(self.selected);
    }
}

// =============================================================================
// Main Application State
// =============================================================================

const PAGE_SIZE: usize = 10;

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Whether the app is running
    pub running: bool,
    /// Column receiving navigation keys
    pub focus: Column,
    /// Help overlay visible
    pub show_help: bool,
    /// Cursor per column, indexed like `Column::ALL`
    pub lists: [ListState; 4],
    pub browser: CatalogBrowser,
}

impl App {
    pub fn new(browser: CatalogBrowser) -> Self {
        Self {
            running: true,
            focus: Column::default(),
            show_help: false,
            lists: Default::default(),
            browser,
        }
    }

    /// Kick off the initial film load
    pub fn start(&mut self) {
        self.browser.load_movies();
    }

    /// Apply finished lookups and resize the columns to match
    pub fn tick(&mut self) -> usize {
        let received = self.browser.poll_events();
        self.sync_lists();
        received
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn list(&self, column: Column) -> &ListState {
        &self.lists[column.index()]
    }

    fn list_mut(&mut self, column: Column) -> &mut ListState {
        &mut self.lists[column.index()]
    }

    /// Number of rows each column currently shows
    pub fn column_len(&self, column: Column) -> usize {
        let state = self.browser.state();
        match column {
            Column::Films => state.movies.len(),
            Column::Starships => state.starships.len(),
            Column::Pilots => state.pilots.len(),
            Column::Shortlist => state.shortlist.len(),
        }
    }

    /// Clamp every cursor to its column's current length
    pub fn sync_lists(&mut self) {
        for column in Column::ALL {
            let len = self.column_len(column);
            self.list_mut(column).set_len(len);
        }
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returns true if event was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        if self.show_help {
            // Any key closes help
            self.show_help = false;
            return true;
        }

        let consumed = match key.code {
            KeyCode::Char('q') => {
                self.quit();
                true
            }
            KeyCode::Char('?') => {
                self.show_help = true;
                true
            }
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
                self.focus = self.focus.next();
                true
            }
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                self.focus = self.focus.prev();
                true
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.list_mut(self.focus).up();
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.list_mut(self.focus).down();
                true
            }
            KeyCode::PageUp => {
                self.list_mut(self.focus).page_up(PAGE_SIZE);
                true
            }
            KeyCode::PageDown => {
                self.list_mut(self.focus).page_down(PAGE_SIZE);
                true
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.list_mut(self.focus).first();
                true
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.list_mut(self.focus).last();
                true
            }
            KeyCode::Esc => {
                self.browser.clear_selection();
                self.focus = Column::Films;
                true
            }
            KeyCode::Enter => self.activate(),
            KeyCode::Char('a') if self.focus == Column::Pilots => self.activate(),
            KeyCode::Char('d') | KeyCode::Delete if self.focus == Column::Shortlist => {
                self.activate()
            }
            _ => false,
        };

        self.sync_lists();
        consumed
    }

    /// Act on the row under the cursor of the focused column
    fn activate(&mut self) -> bool {
        let index = self.list(self.focus).selected;
        match self.focus {
            Column::Films => {
                if self.browser.select_movie_at(index) {
                    self.list_mut(Column::Starships).first();
                    self.list_mut(Column::Pilots).first();
                    true
                } else {
                    false
                }
            }
            Column::Starships => {
                if self.browser.select_starship(index) {
                    self.list_mut(Column::Pilots).first();
                    true
                } else {
                    false
                }
            }
            Column::Pilots => {
                let name = self.browser.state().pilots.get(index).cloned();
                match name {
                    Some(name) => {
                        self.browser.add_to_shortlist(name);
                        true
                    }
                    None => false,
                }
            }
            Column::Shortlist => {
                let name = self
                    .browser
                    .state()
                    .shortlist
                    .get(index)
                    .map(str::to_string);
                match name {
                    Some(name) => self.browser.remove_from_shortlist(&name) > 0,
                    None => false,
                }
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
