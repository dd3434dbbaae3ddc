//! Catalog browser tests
//!
//! Drives `CatalogBrowser` against an in-memory catalog with per-locator
//! delays and failures, then end to end against a mock HTTP catalog.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use mockito::{Matcher, Server};
use starcatalog::api::{CatalogSource, SwapiClient};
use starcatalog::catalog::{BatchPolicy, BrowserOptions, CatalogBrowser};
use starcatalog::models::{Movie, Pilot, Starship};

// =============================================================================
// In-memory catalog
// =============================================================================

#[derive(Default)]
struct FakeCatalog {
    /// `None` makes the film fetch fail
    movies: Option<Vec<Movie>>,
    starships: HashMap<String, Starship>,
    pilots: HashMap<String, String>,
    delays_ms: HashMap<String, u64>,
    requested: Mutex<Vec<String>>,
    completed: Mutex<Vec<String>>,
}

impl FakeCatalog {
    fn with_movies(movies: Vec<Movie>) -> Self {
        Self {
            movies: Some(movies),
            ..Default::default()
        }
    }

    fn starship(mut self, locator: &str, name: &str, pilots: &[&str]) -> Self {
        self.starships.insert(
            locator.to_string(),
            Starship {
                name: name.to_string(),
                pilots: pilots.iter().map(|p| p.to_string()).collect(),
            },
        );
        self
    }

    fn pilot(mut self, locator: &str, name: &str) -> Self {
        self.pilots.insert(locator.to_string(), name.to_string());
        self
    }

    fn delay(mut self, locator: &str, ms: u64) -> Self {
        self.delays_ms.insert(locator.to_string(), ms);
        self
    }

    fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }

    fn completed(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }

    async fn visit(&self, locator: &str) {
        self.requested.lock().unwrap().push(locator.to_string());
        if let Some(ms) = self.delays_ms.get(locator) {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
        }
        self.completed.lock().unwrap().push(locator.to_string());
    }
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    async fn movies(&self) -> Result<Vec<Movie>> {
        self.visit("films/").await;
        self.movies.clone().ok_or_else(|| anyhow!("catalog offline"))
    }

    async fn starship(&self, locator: &str) -> Result<Starship> {
        self.visit(locator).await;
        self.starships
            .get(locator)
            .cloned()
            .ok_or_else(|| anyhow!("no starship at {}", locator))
    }

    async fn pilot(&self, locator: &str) -> Result<Pilot> {
        self.visit(locator).await;
        self.pilots
            .get(locator)
            .map(|name| Pilot { name: name.clone() })
            .ok_or_else(|| anyhow!("no pilot at {}", locator))
    }
}

fn movie(title: &str, episode_id: u32, starships: &[&str]) -> Movie {
    Movie {
        title: title.into(),
        episode_id,
        director: "George Lucas".into(),
        release_date: "1977-05-25".into(),
        opening_crawl: String::new(),
        starships: starships.iter().map(|s| s.to_string()).collect(),
        url: None,
    }
}

fn browser(catalog: &Arc<FakeCatalog>, policy: BatchPolicy) -> CatalogBrowser {
    let source: Arc<dyn CatalogSource> = catalog.clone();
    CatalogBrowser::new(
        source,
        BrowserOptions {
            batch_policy: policy,
            ..Default::default()
        },
    )
}

fn labels(browser: &CatalogBrowser) -> Vec<String> {
    browser
        .state()
        .starships
        .iter()
        .map(|e| e.label().to_string())
        .collect()
}

// =============================================================================
// Films
// =============================================================================

#[tokio::test]
async fn test_load_movies_displays_by_episode() {
    let catalog = Arc::new(FakeCatalog::with_movies(vec![
        movie("The Empire Strikes Back", 5, &[]),
        movie("A New Hope", 4, &[]),
        movie("The Phantom Menace", 1, &[]),
    ]));
    let mut browser = browser(&catalog, BatchPolicy::Isolated);

    browser.load_movies();
    assert!(browser.state().loading.is_loading());
    browser.settle().await;

    assert!(!browser.state().loading.is_loading());
    let sorted = browser.state().display_movies();
    let titles: Vec<&str> = sorted.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["The Phantom Menace", "A New Hope", "The Empire Strikes Back"]);

    // Stored collection keeps catalog order
    assert_eq!(browser.state().movies[0].episode_id, 5);
}

#[tokio::test]
async fn test_load_movies_failure_leaves_collection_empty() {
    let catalog = Arc::new(FakeCatalog::default());
    let mut browser = browser(&catalog, BatchPolicy::Isolated);

    browser.load_movies();
    browser.settle().await;

    assert!(browser.state().movies.is_empty());
    assert!(!browser.state().loading.is_loading());
    assert_eq!(browser.failed_lookups(), 1);
}

#[tokio::test]
async fn test_poll_events_applies_finished_lookups() {
    let catalog = Arc::new(FakeCatalog::with_movies(vec![movie("A New Hope", 4, &[])]));
    let mut browser = browser(&catalog, BatchPolicy::Isolated);

    browser.load_movies();
    assert!(browser.is_busy());

    let mut received = 0;
    for _ in 0..50 {
        received += browser.poll_events();
        if received > 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    assert_eq!(received, 1);
    assert!(!browser.is_busy());
    assert_eq!(browser.state().movies.len(), 1);
}

// =============================================================================
// Starship names
// =============================================================================

#[tokio::test]
async fn test_starship_order_follows_references_not_completion() {
    let catalog = Arc::new(
        FakeCatalog::with_movies(vec![])
            .starship("ships/a/", "Alpha", &[])
            .starship("ships/b/", "Bravo", &[])
            .starship("ships/c/", "Charlie", &[])
            .delay("ships/a/", 60)
            .delay("ships/b/", 30),
    );
    let mut browser = browser(&catalog, BatchPolicy::Isolated);

    browser.select_movie(movie("A New Hope", 4, &["ships/a/", "ships/b/", "ships/c/"]));
    browser.settle().await;

    assert_eq!(catalog.completed(), vec!["ships/c/", "ships/b/", "ships/a/"]);
    assert_eq!(labels(&browser), vec!["Alpha", "Bravo", "Charlie"]);
}

#[tokio::test]
async fn test_selecting_another_film_discards_stale_starships() {
    let catalog = Arc::new(
        FakeCatalog::with_movies(vec![])
            .starship("ships/slow/", "Death Star", &[])
            .starship("ships/fast/", "Millennium Falcon", &[])
            .delay("ships/slow/", 80),
    );
    let mut browser = browser(&catalog, BatchPolicy::Isolated);

    browser.select_movie(movie("A New Hope", 4, &["ships/slow/"]));
    browser.select_movie(movie("The Empire Strikes Back", 5, &["ships/fast/"]));
    browser.settle().await;

    // Both lookups ran; only the newer one landed
    assert_eq!(catalog.completed(), vec!["ships/fast/", "ships/slow/"]);
    assert_eq!(labels(&browser), vec!["Millennium Falcon"]);
    assert_eq!(
        browser.state().selected.as_ref().map(|m| m.episode_id),
        Some(5)
    );
    assert_eq!(browser.failed_lookups(), 0);
}

#[tokio::test]
async fn test_clear_selection_discards_in_flight_starships() {
    let catalog = Arc::new(
        FakeCatalog::with_movies(vec![])
            .starship("ships/a/", "X-wing", &[])
            .delay("ships/a/", 30),
    );
    let mut browser = browser(&catalog, BatchPolicy::Isolated);

    browser.select_movie(movie("A New Hope", 4, &["ships/a/"]));
    browser.clear_selection();
    browser.settle().await;

    assert!(browser.state().selected.is_none());
    assert!(browser.state().starships.is_empty());
}

#[tokio::test]
async fn test_film_without_starships_resolves_to_empty_list() {
    let catalog = Arc::new(FakeCatalog::with_movies(vec![]));
    let mut browser = browser(&catalog, BatchPolicy::Isolated);

    browser.select_movie(movie("The Force Awakens", 7, &[]));
    browser.settle().await;

    assert!(browser.state().starships.is_empty());
    assert!(catalog.requested().is_empty());
}

#[tokio::test]
async fn test_isolated_policy_marks_failed_starship_unavailable() {
    let catalog = Arc::new(
        FakeCatalog::with_movies(vec![])
            .starship("ships/a/", "X-wing", &[])
            .starship("ships/c/", "Y-wing", &[]),
    );
    let mut browser = browser(&catalog, BatchPolicy::Isolated);

    browser.select_movie(movie("A New Hope", 4, &["ships/a/", "ships/missing/", "ships/c/"]));
    browser.settle().await;

    assert_eq!(labels(&browser), vec!["X-wing", "(unavailable)", "Y-wing"]);
    assert!(!browser.state().starships[1].is_resolved());
    assert_eq!(browser.failed_lookups(), 0);
}

#[tokio::test]
async fn test_all_or_nothing_policy_drops_whole_batch() {
    let catalog = Arc::new(
        FakeCatalog::with_movies(vec![])
            .starship("ships/a/", "X-wing", &[])
            .starship("ships/c/", "Y-wing", &[]),
    );
    let mut browser = browser(&catalog, BatchPolicy::AllOrNothing);

    browser.select_movie(movie("A New Hope", 4, &["ships/a/", "ships/missing/", "ships/c/"]));
    browser.settle().await;

    assert!(browser.state().starships.is_empty());
    assert_eq!(browser.failed_lookups(), 1);
}

#[tokio::test]
async fn test_failure_count_cleared_by_next_selection() {
    let catalog = Arc::new(
        FakeCatalog::with_movies(vec![])
            .starship("ships/falcon/", "Millennium Falcon", &["people/gone/"])
            .starship("ships/xwing/", "X-wing", &[]),
    );
    let mut browser = browser(&catalog, BatchPolicy::AllOrNothing);

    browser.select_movie(movie("Attack of the Clones", 2, &["ships/missing/"]));
    browser.settle().await;
    assert_eq!(browser.failed_lookups(), 1);

    browser.select_movie(movie("A New Hope", 4, &["ships/falcon/", "ships/xwing/"]));
    browser.settle().await;
    assert_eq!(browser.failed_lookups(), 0);
    assert_eq!(labels(&browser), vec!["Millennium Falcon", "X-wing"]);

    assert!(browser.select_starship(0));
    browser.settle().await;
    assert_eq!(browser.failed_lookups(), 1);

    assert!(browser.select_starship(1));
    browser.settle().await;
    assert_eq!(browser.failed_lookups(), 0);

    assert!(browser.select_starship(0));
    browser.settle().await;
    browser.clear_selection();
    assert_eq!(browser.failed_lookups(), 0);
}

#[tokio::test]
async fn test_resolve_starship_names_reruns_for_selection() {
    let catalog = Arc::new(FakeCatalog::with_movies(vec![]).starship("ships/a/", "X-wing", &[]));
    let mut browser = browser(&catalog, BatchPolicy::Isolated);

    browser.select_movie(movie("A New Hope", 4, &["ships/a/"]));
    browser.settle().await;
    browser.resolve_starship_names();
    assert!(browser.state().starships.is_empty());
    browser.settle().await;

    assert_eq!(labels(&browser), vec!["X-wing"]);
    assert_eq!(catalog.requested(), vec!["ships/a/", "ships/a/"]);
}

// =============================================================================
// Pilots
// =============================================================================

fn falcon_catalog() -> FakeCatalog {
    FakeCatalog::with_movies(vec![])
        .starship("ships/falcon/", "Millennium Falcon", &["people/han/", "people/chewie/"])
        .starship("ships/xwing/", "X-wing", &["people/luke/"])
        .starship("ships/corvette/", "CR90 corvette", &[])
        .pilot("people/han/", "Han Solo")
        .pilot("people/chewie/", "Chewbacca")
        .pilot("people/luke/", "Luke Skywalker")
}

fn new_hope() -> Movie {
    movie(
        "A New Hope",
        4,
        &["ships/corvette/", "ships/falcon/", "ships/xwing/"],
    )
}

#[tokio::test]
async fn test_select_starship_resolves_pilots_in_order() {
    let catalog = Arc::new(falcon_catalog().delay("people/han/", 40));
    let mut browser = browser(&catalog, BatchPolicy::Isolated);

    browser.select_movie(new_hope());
    browser.settle().await;
    assert!(browser.select_starship(1));
    browser.settle().await;

    assert_eq!(browser.state().pilots, vec!["Han Solo", "Chewbacca"]);
    assert_eq!(
        browser.state().active_starship.as_deref(),
        Some("ships/falcon/")
    );
}

#[tokio::test]
async fn test_select_starship_clears_previous_pilots_immediately() {
    let catalog = Arc::new(falcon_catalog());
    let mut browser = browser(&catalog, BatchPolicy::Isolated);

    browser.select_movie(new_hope());
    browser.settle().await;
    browser.select_starship(1);
    browser.settle().await;
    assert_eq!(browser.state().pilots.len(), 2);

    browser.select_starship(2);
    assert!(browser.state().pilots.is_empty());
    browser.settle().await;
    assert_eq!(browser.state().pilots, vec!["Luke Skywalker"]);
}

#[tokio::test]
async fn test_starship_without_pilots_issues_no_pilot_fetch() {
    let catalog = Arc::new(falcon_catalog());
    let mut browser = browser(&catalog, BatchPolicy::Isolated);

    browser.select_movie(new_hope());
    browser.settle().await;
    browser.select_starship(0);
    browser.settle().await;

    assert!(browser.state().pilots.is_empty());
    assert!(!catalog.requested().iter().any(|l| l.starts_with("people/")));
}

#[tokio::test]
async fn test_rapid_starship_selection_keeps_latest_pilots() {
    let catalog = Arc::new(falcon_catalog().delay("people/han/", 80));
    let mut browser = browser(&catalog, BatchPolicy::Isolated);

    browser.select_movie(new_hope());
    browser.settle().await;
    browser.select_starship(1);
    browser.select_starship(2);
    browser.settle().await;

    assert_eq!(browser.state().pilots, vec!["Luke Skywalker"]);
}

#[tokio::test]
async fn test_select_starship_out_of_range() {
    let catalog = Arc::new(falcon_catalog());
    let mut browser = browser(&catalog, BatchPolicy::Isolated);

    assert!(!browser.select_starship(0));

    browser.select_movie(new_hope());
    browser.settle().await;
    assert!(!browser.select_starship(3));
    assert!(!browser.is_busy());
}

#[tokio::test]
async fn test_pilot_failure_per_policy() {
    let catalog = Arc::new(
        FakeCatalog::with_movies(vec![])
            .starship("ships/falcon/", "Millennium Falcon", &["people/han/", "people/gone/"])
            .pilot("people/han/", "Han Solo"),
    );

    let mut isolated = browser(&catalog, BatchPolicy::Isolated);
    isolated.select_starship_ref("ships/falcon/");
    isolated.settle().await;
    assert_eq!(isolated.state().pilots, vec!["Han Solo"]);

    let mut strict = browser(&catalog, BatchPolicy::AllOrNothing);
    strict.select_starship_ref("ships/falcon/");
    strict.settle().await;
    assert!(strict.state().pilots.is_empty());
    assert_eq!(strict.failed_lookups(), 1);
}

#[tokio::test]
async fn test_unavailable_starship_is_still_selectable() {
    let catalog = Arc::new(falcon_catalog());
    let mut browser = browser(&catalog, BatchPolicy::Isolated);

    browser.select_movie(movie("A New Hope", 4, &["ships/missing/"]));
    browser.settle().await;
    assert_eq!(labels(&browser), vec!["(unavailable)"]);

    assert!(browser.select_starship(0));
    browser.settle().await;

    assert!(browser.state().pilots.is_empty());
    assert_eq!(browser.failed_lookups(), 1);
}

// =============================================================================
// Shortlist
// =============================================================================

#[tokio::test]
async fn test_shortlist_keeps_duplicates_and_removes_all() {
    let catalog = Arc::new(falcon_catalog());
    let mut browser = browser(&catalog, BatchPolicy::Isolated);

    browser.add_to_shortlist("Han Solo");
    browser.add_to_shortlist("Chewbacca");
    browser.add_to_shortlist("Han Solo");
    assert_eq!(
        browser.state().shortlist.names(),
        ["Han Solo", "Chewbacca", "Han Solo"]
    );

    assert_eq!(browser.remove_from_shortlist("Han Solo"), 2);
    assert_eq!(browser.state().shortlist.names(), ["Chewbacca"]);

    // Shortlist survives selection changes
    browser.select_movie(new_hope());
    browser.settle().await;
    browser.clear_selection();
    assert_eq!(browser.state().shortlist.len(), 1);
}

// =============================================================================
// End to end over HTTP
// =============================================================================

#[tokio::test]
async fn test_http_flow_film_to_shortlist() {
    let mut server = Server::new_async().await;
    let url = server.url();

    let films = format!(
        r#"{{"results": [
            {{"title": "The Empire Strikes Back", "episode_id": 5, "director": "Irvin Kershner",
              "release_date": "1980-05-17", "opening_crawl": "",
              "starships": ["{url}/starships/10/", "{url}/starships/23/"]}},
            {{"title": "A New Hope", "episode_id": 4, "director": "George Lucas",
              "release_date": "1977-05-25", "opening_crawl": "",
              "starships": ["{url}/starships/10/"]}}
        ]}}"#
    );

    let films_mock = server
        .mock("GET", "/films/")
        .with_status(200)
        .with_body(films)
        .create_async()
        .await;
    let falcon_mock = server
        .mock("GET", "/starships/10/")
        .with_status(200)
        .with_body(format!(
            r#"{{"name": "Millennium Falcon", "pilots": ["{url}/people/14/"]}}"#
        ))
        .expect(2)
        .create_async()
        .await;
    let destroyer_mock = server
        .mock("GET", "/starships/23/")
        .with_status(200)
        .with_body(r#"{"name": "Imperial Star Destroyer", "pilots": []}"#)
        .expect(2)
        .create_async()
        .await;
    let people_mock = server
        .mock("GET", Matcher::Regex(r"^/people/".into()))
        .with_status(200)
        .with_body(r#"{"name": "Han Solo"}"#)
        .expect(1)
        .create_async()
        .await;

    let source: Arc<dyn CatalogSource> = Arc::new(SwapiClient::with_base_url(url.clone()));
    let mut browser = CatalogBrowser::new(source, BrowserOptions::default());

    browser.load_movies();
    browser.settle().await;
    films_mock.assert_async().await;

    // Episode V is first in the catalog but second in episode order
    assert!(browser.select_movie_at(1));
    browser.settle().await;
    assert_eq!(
        labels(&browser),
        vec!["Millennium Falcon", "Imperial Star Destroyer"]
    );

    browser.select_starship(0);
    browser.settle().await;
    assert_eq!(browser.state().pilots, vec!["Han Solo"]);
    browser.add_to_shortlist("Han Solo");

    // A starship with no pilots must not hit the people endpoint
    browser.select_starship(1);
    browser.settle().await;
    assert!(browser.state().pilots.is_empty());

    falcon_mock.assert_async().await;
    destroyer_mock.assert_async().await;
    people_mock.assert_async().await;
    assert_eq!(browser.state().shortlist.names(), ["Han Solo"]);
}
