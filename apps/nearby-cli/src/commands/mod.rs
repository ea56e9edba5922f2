//! # CLI Commands
//!
//! One module per top-level command. Each function writes its output to
//! the writer it is given so tests can capture it.
//!
//! ## Module Organization
//! - [`config`] - init / show nearby.toml
//! - [`favorites`] - list / add / remove / toggle / clear / categories
//! - [`quote`] - two-tier pricing

pub mod config;
pub mod favorites;
pub mod quote;
