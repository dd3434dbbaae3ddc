//! Integration tests for starcatalog
//!
//! Tests are organized by component:
//! - swapi_test: SWAPI client tests (mocked HTTP)
//! - browser_test: Catalog browser flow, ordering and stale-result tests
//! - cli_test: CLI parsing and command handler exit codes
//! - ui_test: Rendering tests on a TestBackend

// Note: Each test file is a separate integration test crate
// Tests are run individually by cargo, not via mod.rs
