//! Configuration model for userexit.
//!
//! This module defines [`Settings`] (how messages are laid out and where
//! `{argv[N]}` comes from) and [`Catalog`] (a YAML file of variant
//! declarations). Both support forward-compatible YAML parsing (unknown fields
//! are ignored) and sensible defaults for optional fields.

mod model;
mod operations;

#[cfg(test)]
mod tests;

// Re-export public API
pub use model::{Catalog, DEFAULT_PROGRAM, DEFAULT_WIDTH, Settings, WIDTH_ENV};
