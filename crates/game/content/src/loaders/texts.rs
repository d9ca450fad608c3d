//! Localized text table loader.

use std::collections::HashMap;
use std::path::Path;

use game_core::TextOracle;
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// TOML shape: a single `[text]` table of key -> display string.
#[derive(Debug, Deserialize)]
struct TextsToml {
    text: HashMap<String, String>,
}

/// Table-backed [`TextOracle`] implementation.
#[derive(Clone, Debug, Default)]
pub struct TableTextOracle {
    by_key: HashMap<String, String>,
}

impl TableTextOracle {
    pub fn new(by_key: HashMap<String, String>) -> Self {
        Self { by_key }
    }
}

impl TextOracle for TableTextOracle {
    fn localized_text(&self, key: &str) -> Option<&str> {
        self.by_key.get(key).map(String::as_str)
    }
}

/// Loader for localized text tables.
pub struct TextsLoader;

impl TextsLoader {
    /// Load a text oracle from a TOML file.
    pub fn load(path: &Path) -> LoadResult<TableTextOracle> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse texts {}: {}", path.display(), e))
    }

    /// Parse a text oracle from TOML text.
    pub fn parse(content: &str) -> LoadResult<TableTextOracle> {
        let data: TextsToml = toml::from_str(content)?;
        Ok(TableTextOracle::new(data.text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_keys_and_misses_unknown() {
        let oracle = TextsLoader::parse(
            r#"
[text]
readyToLock = "Ready to lock."
youAreInvisible = "You are invisible."
"#,
        )
        .unwrap();
        assert_eq!(oracle.localized_text("readyToLock"), Some("Ready to lock."));
        assert_eq!(oracle.localized_text("doorLocked"), None);
    }

    #[test]
    fn display_names_fall_back_to_raw_keys() {
        use game_core::{DamageResource, EffectKind};

        let oracle = TextsLoader::parse("[text]\ncontinuousDamage = \"Continuous Damage\"\n")
            .unwrap();
        let props = EffectKind::ContinuousDamage(DamageResource::Fatigue).properties();
        assert_eq!(props.display_name(&oracle), "Continuous Damage (fatigue)");
    }
}
