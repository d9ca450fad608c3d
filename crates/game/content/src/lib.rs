//! Data-driven content definitions and loaders.
//!
//! This crate houses loaders that convert content files into `game-core`
//! types:
//! - Quest scripts (line-oriented text)
//! - Static message tables (TOML)
//! - Localized text tables (TOML)
//! - Spell catalogs (RON)
//!
//! Content is consumed by the runtime and never appears in game state.

pub mod loaders;

pub use loaders::{
    MessagesLoader, QuestLoader, SpellCatalog, SpellDefinition, SpellLoader, TableTextOracle,
    TextsLoader,
};
