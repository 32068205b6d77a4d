//! CLI command handlers

pub mod commands;

pub use commands::{add, convert, fields, import, parse_key_value, serve, show};
