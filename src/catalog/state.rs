//! Browser state and its action handlers
//!
//! `BrowserState` is the single owner of everything the views display. Each
//! user action is a method that mutates it and, when a lookup is needed,
//! returns a request tagged with the `Generation` of the selection that
//! issued it. Results come back through `apply_*`, which drop anything whose
//! generation is no longer current.

use crate::catalog::Shortlist;
use crate::models::{Movie, StarshipEntry};

// =============================================================================
// Loading State
// =============================================================================

/// Loading state for the film collection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadingState {
    /// Idle - no loading in progress
    #[default]
    Idle,
    /// Loading with optional message
    Loading(Option<String>),
}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            LoadingState::Loading(Some(msg)) => Some(msg),
            _ => None,
        }
    }
}

// =============================================================================
// Generation Tokens
// =============================================================================

/// Identifies the selection a resolution was started for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    fn next(self) -> Self {
        Generation(self.0.wrapping_add(1))
    }
}

/// Starship names to resolve for the selected film
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarshipRequest {
    pub generation: Generation,
    pub locators: Vec<String>,
}

/// Pilots to resolve for the selected starship
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PilotRequest {
    pub generation: Generation,
    pub locator: String,
}

// =============================================================================
// Browser State
// =============================================================================

/// Everything the catalog views display
#[derive(Debug, Clone)]
pub struct BrowserState {
    /// Films in catalog order (display order is derived)
    pub movies: Vec<Movie>,
    pub loading: LoadingState,
    /// The single selected film
    pub selected: Option<Movie>,
    /// Gates starship resolution; set by selecting a film
    pub starships_enabled: bool,
    /// Starship slots of the selected film, in reference order
    pub starships: Vec<StarshipEntry>,
    /// Locator of the starship whose pilots are shown
    pub active_starship: Option<String>,
    /// Pilot names of the active starship, in reference order
    pub pilots: Vec<String>,
    pub shortlist: Shortlist,
    movie_generation: Generation,
    starship_generation: Generation,
}

impl Default for BrowserState {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserState {
    /// Fresh state; films count as loading until the first load settles
    pub fn new() -> Self {
        Self::with_shortlist(Shortlist::new())
    }

    pub fn with_shortlist(shortlist: Shortlist) -> Self {
        Self {
            movies: Vec::new(),
            loading: LoadingState::Loading(None),
            selected: None,
            starships_enabled: false,
            starships: Vec::new(),
            active_starship: None,
            pilots: Vec::new(),
            shortlist,
            movie_generation: Generation::default(),
            starship_generation: Generation::default(),
        }
    }

    // -------------------------------------------------------------------------
    // Films
    // -------------------------------------------------------------------------

    pub fn begin_loading(&mut self) {
        self.loading = LoadingState::Loading(Some("Loading films...".into()));
    }

    /// Settle the film load; `None` means the fetch failed
    pub fn finish_loading(&mut self, movies: Option<Vec<Movie>>) {
        if let Some(movies) = movies {
            self.movies = movies;
        }
        self.loading = LoadingState::Idle;
    }

    /// Films sorted ascending by episode number
    ///
    /// Sorting is stable and does not touch `movies`.
    pub fn display_movies(&self) -> Vec<&Movie> {
        let mut sorted: Vec<&Movie> = self.movies.iter().collect();
        sorted.sort_by_key(|m| m.episode_id);
        sorted
    }

    pub fn is_selected(&self, movie: &Movie) -> bool {
        self.selected.as_ref() == Some(movie)
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Make `movie` the active film and request its starship names
    pub fn select_movie(&mut self, movie: Movie) -> Option<StarshipRequest> {
        self.selected = Some(movie);
        self.starships_enabled = true;
        self.reset_pilots();
        self.request_starship_names()
    }

    /// Deselect the film and empty every derived list
    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.starships_enabled = false;
        self.reset_pilots();
        self.movie_generation = self.movie_generation.next();
        self.starships.clear();
    }

    /// Start a starship resolution for the current selection
    ///
    /// Invalidates any resolution already in flight. Without an active film
    /// or with resolution disabled, the list is cleared and nothing is requested.
    pub fn request_starship_names(&mut self) -> Option<StarshipRequest> {
        self.movie_generation = self.movie_generation.next();
        self.starships.clear();

        match (&self.selected, self.starships_enabled) {
            (Some(movie), true) => Some(StarshipRequest {
                generation: self.movie_generation,
                locators: movie.starships.clone(),
            }),
            _ => None,
        }
    }

    /// Select the starship at `index` of the selected film's references
    pub fn select_starship(&mut self, index: usize) -> Option<PilotRequest> {
        let locator = self.selected.as_ref()?.starships.get(index)?.clone();
        Some(self.select_starship_ref(locator))
    }

    /// Select a starship by locator and request its pilots
    pub fn select_starship_ref(&mut self, locator: impl Into<String>) -> PilotRequest {
        let locator = locator.into();
        self.reset_pilots();
        self.active_starship = Some(locator.clone());
        PilotRequest {
            generation: self.starship_generation,
            locator,
        }
    }

    fn reset_pilots(&mut self) {
        self.starship_generation = self.starship_generation.next();
        self.active_starship = None;
        self.pilots.clear();
    }

    // -------------------------------------------------------------------------
    // Resolution results
    // -------------------------------------------------------------------------

    /// Store resolved starship names, returns false if the result was dropped
    ///
    /// `None` is a failed batch: the list keeps its cleared state.
    pub fn apply_starship_names(
        &mut self,
        generation: Generation,
        outcome: Option<Vec<StarshipEntry>>,
    ) -> bool {
        if generation != self.movie_generation {
            return false;
        }
        match outcome {
            Some(entries) => {
                self.starships = entries;
                true
            }
            None => false,
        }
    }

    /// Store resolved pilot names, returns false if the result was dropped
    pub fn apply_pilots(&mut self, generation: Generation, outcome: Option<Vec<String>>) -> bool {
        if generation != self.starship_generation {
            return false;
        }
        match outcome {
            Some(names) => {
                self.pilots = names;
                true
            }
            None => false,
        }
    }

    pub fn is_current_movie_generation(&self, generation: Generation) -> bool {
        generation == self.movie_generation
    }

    pub fn is_current_starship_generation(&self, generation: Generation) -> bool {
        generation == self.starship_generation
    }
}
