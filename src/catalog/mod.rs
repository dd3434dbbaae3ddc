//! Catalog browsing core
//!
//! - `state`: the explicit browser state and its action handlers
//! - `resolve`: concurrent resolution steps (starship names, pilots)
//! - `shortlist`: the user's pilot shortlist
//! - `browser`: the controller tying state, source and tasks together

pub mod browser;
pub mod resolve;
pub mod shortlist;
pub mod state;

pub use browser::{BrowserOptions, CatalogBrowser, CatalogEvent};
pub use resolve::BatchPolicy;
pub use shortlist::Shortlist;
pub use state::{BrowserState, Generation, LoadingState};
