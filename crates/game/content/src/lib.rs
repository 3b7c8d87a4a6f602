//! Data-driven content definitions and loaders.
//!
//! This crate houses static game content and provides loaders for RON/TOML
//! data files:
//! - Biome word lists for local realm names (data-driven via RON)
//! - Game configuration (data-driven via TOML)
//!
//! Content is consumed by the runtime and never appears in game state.

pub mod lore;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use lore::{BiomeLore, LoreTable};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoreLoader};
