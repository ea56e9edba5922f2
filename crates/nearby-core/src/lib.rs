//! # nearby-core: Pure Logic for Nearby
//!
//! This crate holds the only logic in Nearby that carries invariants:
//! the favorites collection rules and the two-tier (normal / VIP) pricing
//! computation. Everything here is a pure function or plain data.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Nearby Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Screens (out of scope)                       │   │
//! │  │    Category list ──► Service detail ──► Favorites tab           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ nearby-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │ validation│  │   │
//! │  │   │ Favorite  │  │   Money   │  │  quote()  │  │   rules   │  │   │
//! │  │   │Collection │  │ Rounding  │  │   Tier    │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 nearby-db (Durable Layer)                       │   │
//! │  │          Key-value backends, persisted FavoriteStore            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Favorite items and the id-unique collection
//! - [`money`] - Whole-unit money and the single rounding point
//! - [`pricing`] - Normal / VIP quote computation
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use nearby_core::pricing::quote;
//!
//! let q = quote(100.0, 0.5);
//! assert_eq!(q.normal.units(), 100);
//! assert_eq!(q.vip.units(), 50);
//! assert_eq!(q.savings.units(), 50);
//! ```

pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, RoundingMode};
pub use pricing::{quote, try_quote, DiscountRate, PricingQuote, PricingTier};
pub use types::{FavoriteCollection, FavoriteItem, FavoriteItemInput};

/// Key under which the whole favorites collection is stored.
pub const FAVORITES_STORAGE_KEY: &str = "favorites";

/// Upper bound for a catalog rating.
pub const MAX_RATING: f64 = 5.0;
