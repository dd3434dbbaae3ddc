//! starcatalog - terminal browser for the Star Wars catalog
//!
//! Pick a film, see its starships, pick a starship, see its pilots, and keep
//! a shortlist of pilots. Lookups run concurrently; results for a selection
//! that has since changed are discarded.
//!
//! # Modules
//!
//! - `models` - Films, starships, pilots and resolved starship slots
//! - `api` - Catalog source trait and the SWAPI HTTP client
//! - `catalog` - Browser state, resolution and the browser controller
//! - `app` - TUI navigation and key handling
//! - `ui` - TUI components
//! - `config`, `logging` - Config file and tracing setup
//! - `cli`, `commands` - Scriptable subcommands

pub mod api;
pub mod app;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod models;
pub mod ui;

// Re-export commonly used types
pub use models::{Movie, Pilot, Starship, StarshipEntry};

pub use api::{CatalogError, CatalogSource, SwapiClient};
pub use app::{App, Column};
pub use catalog::{BatchPolicy, BrowserOptions, BrowserState, CatalogBrowser, CatalogEvent, Shortlist};
pub use config::Config;
