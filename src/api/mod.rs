//! Catalog source seam and its HTTP client
//!
//! - `CatalogSource`: what the browser needs from a catalog
//! - `SwapiClient`: the Star Wars API implementation over reqwest

pub mod swapi;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Movie, Pilot, Starship};

pub use swapi::SwapiClient;

/// Catalog fetch error types
///
/// Kept distinct for logging; the browser treats every variant as "fetch failed".
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Resource not found (404)")]
    NotFound,

    #[error("Unexpected status: {0}")]
    Status(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

/// Read-only catalog of films, starships and pilots
///
/// Starships and pilots are addressed by the opaque locators found in the
/// records that reference them.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the full film collection, in catalog order
    async fn movies(&self) -> Result<Vec<Movie>>;

    /// Fetch one starship record
    async fn starship(&self, locator: &str) -> Result<Starship>;

    /// Fetch one pilot record
    async fn pilot(&self, locator: &str) -> Result<Pilot>;
}
