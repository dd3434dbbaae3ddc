//! Resolution steps
//!
//! One resolution step fetches a batch of sibling records concurrently and
//! assembles the results in reference order, whatever order they complete in.

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::api::CatalogSource;
use crate::models::StarshipEntry;

/// What a batch yields when some of its fetches fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BatchPolicy {
    /// Each reference resolves on its own; failures leave gaps
    #[default]
    Isolated,
    /// One failed fetch fails the whole batch
    AllOrNothing,
}

/// Resolve the names of a film's starships
///
/// Returns `None` when the batch failed under `AllOrNothing`. Under
/// `Isolated` every locator keeps its slot and failed slots have no name.
pub async fn resolve_starship_names(
    source: &dyn CatalogSource,
    locators: &[String],
    policy: BatchPolicy,
) -> Option<Vec<StarshipEntry>> {
    debug!(count = locators.len(), "resolving starship names");

    let fetches = locators.iter().map(|locator| async move {
        match source.starship(locator).await {
            Ok(starship) => Some(starship.name),
            Err(e) => {
                warn!(%locator, error = %e, "starship fetch failed");
                None
            }
        }
    });
    let names = join_all(fetches).await;

    let entries: Vec<StarshipEntry> = locators
        .iter()
        .zip(names)
        .map(|(locator, name)| StarshipEntry {
            locator: locator.clone(),
            name,
        })
        .collect();

    match policy {
        BatchPolicy::AllOrNothing if entries.iter().any(|e| !e.is_resolved()) => {
            error!("starship batch failed, dropping all names");
            None
        }
        _ => Some(entries),
    }
}

/// Resolve the pilot names of one starship
///
/// Fetches the starship first; with no pilot references no further fetch is
/// issued and the result is empty. Returns `None` when the starship itself
/// could not be fetched, or when a pilot failed under `AllOrNothing`.
pub async fn resolve_pilots(
    source: &dyn CatalogSource,
    starship_locator: &str,
    policy: BatchPolicy,
) -> Option<Vec<String>> {
    let starship = match source.starship(starship_locator).await {
        Ok(starship) => starship,
        Err(e) => {
            warn!(locator = %starship_locator, error = %e, "starship fetch failed");
            return None;
        }
    };

    if starship.pilots.is_empty() {
        debug!(starship = %starship.name, "no pilots");
        return Some(Vec::new());
    }

    debug!(starship = %starship.name, count = starship.pilots.len(), "resolving pilots");

    let fetches = starship.pilots.iter().map(|locator| async move {
        match source.pilot(locator).await {
            Ok(pilot) => Some(pilot.name),
            Err(e) => {
                warn!(%locator, error = %e, "pilot fetch failed");
                None
            }
        }
    });
    let names = join_all(fetches).await;

    match policy {
        BatchPolicy::Isolated => Some(names.into_iter().flatten().collect()),
        BatchPolicy::AllOrNothing => {
            let all: Option<Vec<String>> = names.into_iter().collect();
            if all.is_none() {
                error!(starship = %starship.name, "pilot batch failed, dropping all names");
            }
            all
        }
    }
}
