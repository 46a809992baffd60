//! Data-driven pot content and loaders.
//!
//! This crate provides loaders for the RON/TOML data files a participant
//! needs before it can cook:
//! - Item catalogs (effect definitions and visual geometry, RON)
//! - Pot configuration (use budget and placement tuning, TOML)
//!
//! Content is consumed by runtime oracles and never appears in pot state.
//! All loaders use pot-core types directly with serde for deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, ItemCatalog, ItemLoader, LoadResult};
