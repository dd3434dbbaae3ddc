//! Data structures for the film catalog
//!
//! Contains the shared models used across the application:
//! - **Catalog records**: films, starships and pilots as the catalog API returns them
//! - **Resolved entries**: starship names resolved for the selected film

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Catalog Records
// =============================================================================

/// A film from the catalog's `/films/` collection
///
/// Deserialized verbatim from the wire; fields the catalog sends but we do not
/// use are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    pub episode_id: u32,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub opening_crawl: String,
    /// Starship resource locators, in catalog order
    #[serde(default)]
    pub starships: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Movie {
    /// Release year parsed from a date like "1977-05-25"
    pub fn release_year(&self) -> Option<u16> {
        extract_year(&self.release_date)
    }

    /// Opening crawl split into display lines
    ///
    /// The catalog uses `\r\n` line breaks; carriage returns are stripped.
    pub fn crawl_lines(&self) -> Vec<&str> {
        self.opening_crawl
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .collect()
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year = self
            .release_year()
            .map(|y| format!(" ({})", y))
            .unwrap_or_default();
        write!(f, "Episode {}: {}{}", self.episode_id, self.title, year)
    }
}

/// A starship record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Starship {
    pub name: String,
    /// Pilot resource locators, in catalog order
    #[serde(default)]
    pub pilots: Vec<String>,
}

/// A pilot (person) record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pilot {
    pub name: String,
}

// =============================================================================
// Resolved Entries
// =============================================================================

/// A starship slot of the selected film
///
/// Keeps the locator next to the resolved name so the slot can be selected
/// even when its name failed to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarshipEntry {
    pub locator: String,
    pub name: Option<String>,
}

impl StarshipEntry {
    pub fn resolved(locator: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            name: Some(name.into()),
        }
    }

    pub fn unavailable(locator: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            name: None,
        }
    }

    /// Name to display, or a placeholder for a failed lookup
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("(unavailable)")
    }

    pub fn is_resolved(&self) -> bool {
        self.name.is_some()
    }
}

/// Extract year from a date string like "1980-05-17"
fn extract_year(date: &str) -> Option<u16> {
    date.get(..4).and_then(|y| y.parse().ok())
}
