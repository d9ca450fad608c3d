//! Content loaders for reading game data from files.

pub mod messages;
pub mod quests;
pub mod spells;
pub mod texts;

pub use messages::MessagesLoader;
pub use quests::QuestLoader;
pub use spells::{SpellCatalog, SpellDefinition, SpellLoader};
pub use texts::{TableTextOracle, TextsLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
