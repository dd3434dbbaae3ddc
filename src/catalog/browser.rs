//! Catalog browser controller
//!
//! Owns the `BrowserState` and the catalog source. Lookups run as tokio
//! tasks that report back over a channel; the owner of the browser applies
//! those reports from its event loop, so state has a single writer.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::api::CatalogSource;
use crate::catalog::resolve::{resolve_pilots, resolve_starship_names, BatchPolicy};
use crate::catalog::state::{BrowserState, Generation, PilotRequest, StarshipRequest};
use crate::catalog::Shortlist;
use crate::models::{Movie, StarshipEntry};

/// Result of a finished lookup, reported back to the event loop
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogEvent {
    /// Film collection settled; `None` if the fetch failed
    MoviesLoaded(Option<Vec<Movie>>),
    /// Starship names for the film selected at `generation`
    StarshipsResolved {
        generation: Generation,
        outcome: Option<Vec<StarshipEntry>>,
    },
    /// Pilot names for the starship selected at `generation`
    PilotsResolved {
        generation: Generation,
        outcome: Option<Vec<String>>,
    },
}

/// Tunables for a `CatalogBrowser`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrowserOptions {
    pub batch_policy: BatchPolicy,
    pub dedupe_shortlist: bool,
}

/// Failed lookups, per resolution step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Failures {
    films: usize,
    starships: usize,
    pilots: usize,
}

impl Failures {
    fn total(self) -> usize {
        self.films + self.starships + self.pilots
    }
}

/// The catalog browser: films, their starships, their pilots, and a shortlist
pub struct CatalogBrowser {
    source: Arc<dyn CatalogSource>,
    policy: BatchPolicy,
    state: BrowserState,
    events_tx: mpsc::UnboundedSender<CatalogEvent>,
    events_rx: mpsc::UnboundedReceiver<CatalogEvent>,
    in_flight: usize,
    failed: Failures,
}

impl std::fmt::Debug for CatalogBrowser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogBrowser")
            .field("policy", &self.policy)
            .field("state", &self.state)
            .field("in_flight", &self.in_flight)
            .field("failed", &self.failed)
            .finish()
    }
}

impl CatalogBrowser {
    pub fn new(source: Arc<dyn CatalogSource>, options: BrowserOptions) -> Self {
        let shortlist = if options.dedupe_shortlist {
            Shortlist::deduplicating()
        } else {
            Shortlist::new()
        };
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Self {
            source,
            policy: options.batch_policy,
            state: BrowserState::with_shortlist(shortlist),
            events_tx,
            events_rx,
            in_flight: 0,
            failed: Failures::default(),
        }
    }

    pub fn state(&self) -> &BrowserState {
        &self.state
    }

    pub fn policy(&self) -> BatchPolicy {
        self.policy
    }

    /// Whether any lookup has not reported back yet
    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    /// Lookups for the current selection that failed outright
    ///
    /// Reset with each new selection; stale results are not counted.
    pub fn failed_lookups(&self) -> usize {
        self.failed.total()
    }

    // -------------------------------------------------------------------------
    // Actions
    // -------------------------------------------------------------------------

    /// Fetch the film collection
    pub fn load_movies(&mut self) {
        self.state.begin_loading();
        self.failed.films = 0;

        let source = Arc::clone(&self.source);
        self.spawn(async move {
            match source.movies().await {
                Ok(movies) => {
                    info!(count = movies.len(), "films loaded");
                    CatalogEvent::MoviesLoaded(Some(movies))
                }
                Err(e) => {
                    error!(error = %e, "error fetching films");
                    CatalogEvent::MoviesLoaded(None)
                }
            }
        });
    }

    /// Select a film and resolve its starship names
    pub fn select_movie(&mut self, movie: Movie) {
        debug!(title = %movie.title, "film selected");
        self.failed.starships = 0;
        self.failed.pilots = 0;
        if let Some(request) = self.state.select_movie(movie) {
            self.spawn_starship_names(request);
        }
    }

    /// Select the film at `index` in display (episode) order
    pub fn select_movie_at(&mut self, index: usize) -> bool {
        let movie = match self.state.display_movies().get(index) {
            Some(movie) => (*movie).clone(),
            None => return false,
        };
        self.select_movie(movie);
        true
    }

    /// Re-run starship resolution for the current selection
    ///
    /// Clears the list instead when nothing is selected.
    pub fn resolve_starship_names(&mut self) {
        self.failed.starships = 0;
        if let Some(request) = self.state.request_starship_names() {
            self.spawn_starship_names(request);
        }
    }

    pub fn clear_selection(&mut self) {
        debug!("selection cleared");
        self.state.clear_selection();
        self.failed.starships = 0;
        self.failed.pilots = 0;
    }

    /// Select the starship at `index` of the selected film and resolve its pilots
    pub fn select_starship(&mut self, index: usize) -> bool {
        match self.state.select_starship(index) {
            Some(request) => {
                self.failed.pilots = 0;
                self.spawn_pilots(request);
                true
            }
            None => false,
        }
    }

    /// Select a starship by locator and resolve its pilots
    pub fn select_starship_ref(&mut self, locator: impl Into<String>) {
        let request = self.state.select_starship_ref(locator);
        self.failed.pilots = 0;
        self.spawn_pilots(request);
    }

    pub fn add_to_shortlist(&mut self, name: impl Into<String>) -> bool {
        self.state.shortlist.add(name)
    }

    pub fn remove_from_shortlist(&mut self, name: &str) -> usize {
        self.state.shortlist.remove(name)
    }

    // -------------------------------------------------------------------------
    // Event handling
    // -------------------------------------------------------------------------

    /// Apply a finished lookup, returns false if it was stale or failed
    pub fn apply(&mut self, event: CatalogEvent) -> bool {
        match event {
            CatalogEvent::MoviesLoaded(movies) => {
                let loaded = movies.is_some();
                if !loaded {
                    self.failed.films += 1;
                }
                self.state.finish_loading(movies);
                loaded
            }
            CatalogEvent::StarshipsResolved {
                generation,
                outcome,
            } => {
                if !self.state.is_current_movie_generation(generation) {
                    debug!("discarding starship names for a previous selection");
                } else if outcome.is_none() {
                    self.failed.starships += 1;
                }
                self.state.apply_starship_names(generation, outcome)
            }
            CatalogEvent::PilotsResolved {
                generation,
                outcome,
            } => {
                if !self.state.is_current_starship_generation(generation) {
                    debug!("discarding pilots for a previous selection");
                } else if outcome.is_none() {
                    self.failed.pilots += 1;
                }
                self.state.apply_pilots(generation, outcome)
            }
        }
    }

    /// Apply every lookup that has already finished, without waiting
    ///
    /// Returns how many events were received.
    pub fn poll_events(&mut self) -> usize {
        let mut received = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.receive(event);
            received += 1;
        }
        received
    }

    /// Wait until every lookup started so far has reported back
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            match self.events_rx.recv().await {
                Some(event) => self.receive(event),
                None => break,
            }
        }
    }

    fn receive(&mut self, event: CatalogEvent) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.apply(event);
    }

    // -------------------------------------------------------------------------
    // Task spawning
    // -------------------------------------------------------------------------

    fn spawn_starship_names(&mut self, request: StarshipRequest) {
        let source = Arc::clone(&self.source);
        let policy = self.policy;
        self.spawn(async move {
            let outcome = resolve_starship_names(source.as_ref(), &request.locators, policy).await;
            CatalogEvent::StarshipsResolved {
                generation: request.generation,
                outcome,
            }
        });
    }

    fn spawn_pilots(&mut self, request: PilotRequest) {
        debug!(locator = %request.locator, "starship selected");
        let source = Arc::clone(&self.source);
        let policy = self.policy;
        self.spawn(async move {
            let outcome = resolve_pilots(source.as_ref(), &request.locator, policy).await;
            CatalogEvent::PilotsResolved {
                generation: request.generation,
                outcome,
            }
        });
    }

    fn spawn<F>(&mut self, task: F)
    where
        F: std::future::Future<Output = CatalogEvent> + Send + 'static,
    {
        self.in_flight += 1;
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            if tx.send(task.await).is_err() {
                debug!("browser dropped, discarding lookup result");
            }
        });
    }
}
