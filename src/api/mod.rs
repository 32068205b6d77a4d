//! Tabula HTTP API
//!
//! Upload, manual entry and query endpoints plus the web UI pages.
//! Run with `tabula serve` or `tabula-server`.

pub mod handlers;
pub mod server;

pub use server::{build_router, run_api_server, AppState};
