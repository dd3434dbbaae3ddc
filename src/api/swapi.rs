//! Star Wars API (SWAPI) client
//!
//! Provides the film collection and starship/pilot records.
//! API docs: https://swapi.dev/documentation

use anyhow::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{CatalogError, CatalogSource};
use crate::models::{Movie, Pilot, Starship};

/// Default catalog endpoint
pub const DEFAULT_BASE_URL: &str = "https://swapi.dev/api";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// SWAPI client
#[derive(Debug, Clone)]
pub struct SwapiClient {
    base_url: String,
    client: reqwest::Client,
}

impl SwapiClient {
    /// Create a client against the public SWAPI endpoint
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (mirrors, testing)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_options(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom base URL and request timeout
    pub fn with_options(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Turn a resource locator into a request URL
    ///
    /// Absolute locators are used verbatim; anything else is joined onto the base URL.
    pub fn resolve_url(&self, locator: &str) -> String {
        if locator.starts_with("http://") || locator.starts_with("https://") {
            locator.to_string()
        } else {
            format!("{}/{}", self.base_url, locator.trim_start_matches('/'))
        }
    }

    /// GET a locator and decode its JSON body
    async fn get<T: DeserializeOwned>(&self, locator: &str) -> Result<T> {
        let url = self.resolve_url(locator);
        debug!(%url, "catalog request");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(CatalogError::from)?;

        match response.status() {
            StatusCode::OK => {
                let body = response.text().await.map_err(CatalogError::from)?;
                let parsed: T = serde_json::from_str(&body).map_err(|e| {
                    CatalogError::InvalidResponse(format!("JSON parse error: {}", e))
                })?;
                Ok(parsed)
            }
            StatusCode::NOT_FOUND => Err(CatalogError::NotFound.into()),
            status => Err(CatalogError::Status(status.as_u16()).into()),
        }
    }
}

impl Default for SwapiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogSource for SwapiClient {
    async fn movies(&self) -> Result<Vec<Movie>> {
        let response: FilmsResponse = self.get("films/").await?;
        Ok(response.results)
    }

    async fn starship(&self, locator: &str) -> Result<Starship> {
        self.get(locator).await
    }

    async fn pilot(&self, locator: &str) -> Result<Pilot> {
        self.get(locator).await
    }
}

// =============================================================================
// Response Structures
// =============================================================================

#[derive(Debug, Deserialize)]
struct FilmsResponse {
    results: Vec<Movie>,
}
