//! Spreadsheet store adapters.
//!
//! - `AppsScriptStore` - HTTP adapter for the Google Apps Script web app
//! - `InMemoryIntakeStore` - recording store for tests and local runs

mod apps_script_store;
mod in_memory;

pub use apps_script_store::AppsScriptStore;
pub use in_memory::InMemoryIntakeStore;
