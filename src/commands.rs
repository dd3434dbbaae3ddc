//! CLI Command Handlers
//!
//! Each handler drives a `CatalogBrowser` through the same steps the TUI
//! takes (load, select film, select starship), waiting for lookups to settle
//! in between. Handlers take CLI args and Output, return ExitCode.

use serde::Serialize;
use std::sync::Arc;

use crate::api::SwapiClient;
use crate::catalog::CatalogBrowser;
use crate::cli::{ExitCode, Output, PilotsCmd, StarshipRef, StarshipsCmd};
use crate::config::Config;
use crate::models::{Movie, StarshipEntry};

/// Build a browser over the HTTP catalog
///
/// `base_url` (from `--base-url`) wins over config and environment.
pub fn browser_from(config: &Config, base_url: Option<&str>) -> CatalogBrowser {
    let base_url = base_url
        .map(str::to_string)
        .unwrap_or_else(|| config.base_url());
    let client = SwapiClient::with_options(base_url, config.timeout());
    CatalogBrowser::new(Arc::new(client), config.browser_options())
}

// =============================================================================
// Response Types
// =============================================================================

/// Starships of one film
#[derive(Debug, Serialize)]
pub struct StarshipsResponse {
    pub film: String,
    pub episode: u32,
    pub starships: Vec<StarshipEntry>,
}

/// Pilots of one starship
#[derive(Debug, Serialize)]
pub struct PilotsResponse {
    pub film: String,
    pub starship: String,
    pub pilots: Vec<String>,
}

// =============================================================================
// Shared Steps
// =============================================================================

/// Load the film collection, reporting a failed fetch
async fn load_films(browser: &mut CatalogBrowser, output: &Output) -> Result<(), ExitCode> {
    output.info("Loading films...");
    browser.load_movies();
    browser.settle().await;

    if browser.failed_lookups() > 0 {
        return Err(output.error("Could not load films from the catalog", ExitCode::NetworkError));
    }
    Ok(())
}

/// Load films, select the one with `episode` and resolve its starships
async fn open_film(
    browser: &mut CatalogBrowser,
    episode: u32,
    output: &Output,
) -> Result<Movie, ExitCode> {
    load_films(browser, output).await?;

    let movie = browser
        .state()
        .movies
        .iter()
        .find(|m| m.episode_id == episode)
        .cloned()
        .ok_or_else(|| output.error(format!("No film with episode {}", episode), ExitCode::NotFound))?;

    output.info(format!("Resolving starships of {}...", movie.title));
    browser.select_movie(movie.clone());
    browser.settle().await;

    if browser.failed_lookups() > 0 {
        return Err(output.error(
            format!("Could not resolve the starships of {}", movie.title),
            ExitCode::NetworkError,
        ));
    }
    Ok(movie)
}

/// Find a starship slot by position or case-insensitive name
fn find_starship(entries: &[StarshipEntry], starship: &StarshipRef) -> Option<StarshipEntry> {
    match starship {
        StarshipRef::Position(index) => entries.get(*index).cloned(),
        StarshipRef::Name(name) => {
            let wanted = name.to_lowercase();
            entries
                .iter()
                .find(|e| e.name.as_ref().is_some_and(|n| n.to_lowercase() == wanted))
                .cloned()
        }
        StarshipRef::Invalid(_) => None,
    }
}

// =============================================================================
// Films Command
// =============================================================================

pub async fn films_cmd(browser: &mut CatalogBrowser, output: &Output) -> ExitCode {
    if let Err(code) = load_films(browser, output).await {
        return code;
    }

    let films = browser.state().display_movies();
    let lines: Vec<String> = films.iter().map(|m| m.to_string()).collect();

    if let Err(e) = output.print_lines(&films, &lines) {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }
    ExitCode::Success
}

// =============================================================================
// Starships Command
// =============================================================================

pub async fn starships_cmd(
    cmd: StarshipsCmd,
    browser: &mut CatalogBrowser,
    output: &Output,
) -> ExitCode {
    let movie = match open_film(browser, cmd.episode, output).await {
        Ok(movie) => movie,
        Err(code) => return code,
    };

    let starships = browser.state().starships.clone();
    let lines: Vec<String> = starships
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{:>3}. {}", i + 1, entry.label()))
        .collect();

    let response = StarshipsResponse {
        film: movie.title,
        episode: movie.episode_id,
        starships,
    };
    if let Err(e) = output.print_lines(&response, &lines) {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }
    ExitCode::Success
}

// =============================================================================
// Pilots Command
// =============================================================================

pub async fn pilots_cmd(cmd: PilotsCmd, browser: &mut CatalogBrowser, output: &Output) -> ExitCode {
    let starship_ref = cmd.starship_ref();
    if let StarshipRef::Invalid(arg) = &starship_ref {
        return output.error(
            format!("Invalid starship '{}': use a position from 1 or a name", arg),
            ExitCode::InvalidArgs,
        );
    }

    let movie = match open_film(browser, cmd.episode, output).await {
        Ok(movie) => movie,
        Err(code) => return code,
    };

    let Some(entry) = find_starship(&browser.state().starships, &starship_ref) else {
        return output.error(
            format!("No starship '{}' in {}", cmd.starship, movie.title),
            ExitCode::NotFound,
        );
    };

    output.info(format!("Resolving pilots of {}...", entry.label()));
    browser.select_starship_ref(entry.locator.clone());
    browser.settle().await;

    if browser.failed_lookups() > 0 {
        return output.error(
            format!("Could not resolve the pilots of {}", entry.label()),
            ExitCode::NetworkError,
        );
    }

    let pilots = browser.state().pilots.clone();
    if pilots.is_empty() {
        output.info("No pilots");
    }

    let response = PilotsResponse {
        film: movie.title,
        starship: entry.label().to_string(),
        pilots,
    };
    if let Err(e) = output.print_lines(&response, &response.pilots) {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }
    ExitCode::Success
}
