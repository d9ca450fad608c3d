//! Static message table loader.

use std::collections::HashMap;
use std::path::Path;

use game_core::StaticMessageTable;
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// TOML shape: a single `[messages]` table of name -> id.
#[derive(Debug, Deserialize)]
struct MessagesToml {
    messages: HashMap<String, i32>,
}

/// Loader for the global static message table.
pub struct MessagesLoader;

impl MessagesLoader {
    /// Load the static message table from a TOML file.
    pub fn load(path: &Path) -> LoadResult<StaticMessageTable> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse messages {}: {}", path.display(), e))
    }

    /// Parse the static message table from TOML text.
    pub fn parse(content: &str) -> LoadResult<StaticMessageTable> {
        let data: MessagesToml = toml::from_str(content)?;
        Ok(data.messages.into_iter().collect())
    }
}
