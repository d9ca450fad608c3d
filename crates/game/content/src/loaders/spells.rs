//! Spell catalog loader.
//!
//! Spells bundle one or more effects with pre-resolved settings. The
//! catalog is authored in RON; unknown effect keys are authoring faults
//! surfaced at load time (the core would otherwise skip them silently on
//! the save path, which is the wrong behavior for authored content).

use std::path::Path;

use game_core::{CastRequest, EffectKind, EffectSettings, EntityId};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One effect reference inside a spell definition.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct SpellEffectRon {
    key: String,
    settings: EffectSettings,
}

/// RON shape of the catalog file.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct SpellCatalogRon {
    spells: Vec<SpellRon>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct SpellRon {
    name: String,
    effects: Vec<SpellEffectRon>,
}

/// One castable spell: a named list of effect kinds with settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpellDefinition {
    pub name: String,
    pub effects: Vec<(EffectKind, EffectSettings)>,
}

impl SpellDefinition {
    /// Expands this spell into cast requests against a target.
    pub fn cast_requests(
        &self,
        caster: Option<EntityId>,
        target: EntityId,
    ) -> Vec<CastRequest> {
        self.effects
            .iter()
            .map(|(kind, settings)| CastRequest {
                kind: *kind,
                settings: *settings,
                caster,
                target,
            })
            .collect()
    }
}

/// All spells known to the game.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpellCatalog {
    spells: Vec<SpellDefinition>,
}

impl SpellCatalog {
    pub fn get(&self, name: &str) -> Option<&SpellDefinition> {
        self.spells.iter().find(|s| s.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpellDefinition> {
        self.spells.iter()
    }

    pub fn len(&self) -> usize {
        self.spells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }
}

/// Loader for spell catalogs from RON files.
pub struct SpellLoader;

impl SpellLoader {
    /// Load a spell catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<SpellCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse spells {}: {}", path.display(), e))
    }

    /// Parse a spell catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<SpellCatalog> {
        let data: SpellCatalogRon = ron::from_str(content)?;
        let mut spells = Vec::with_capacity(data.spells.len());
        for spell in data.spells {
            let mut effects = Vec::with_capacity(spell.effects.len());
            for effect in spell.effects {
                let kind = EffectKind::from_key(&effect.key).ok_or_else(|| {
                    anyhow::anyhow!("spell {:?}: unknown effect key {:?}", spell.name, effect.key)
                })?;
                effects.push((kind, effect.settings));
            }
            spells.push(SpellDefinition {
                name: spell.name,
                effects,
            });
        }
        Ok(SpellCatalog { spells })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::DamageResource;

    const CATALOG: &str = r#"(
    spells: [
        (
            name: "Spell of Weariness",
            effects: [
                (key: "ContinuousDamage-Fatigue", settings: (duration: 3, magnitude: 10, chance: 0)),
            ],
        ),
        (
            name: "Sorcerer's Seal",
            effects: [
                (key: "Lock", settings: (duration: 0, magnitude: 0, chance: 70)),
            ],
        ),
    ],
)"#;

    #[test]
    fn parses_spells_and_resolves_effect_keys() {
        let catalog = SpellLoader::parse(CATALOG).unwrap();
        assert_eq!(catalog.len(), 2);

        let weariness = catalog.get("Spell of Weariness").unwrap();
        assert_eq!(
            weariness.effects[0].0,
            EffectKind::ContinuousDamage(DamageResource::Fatigue)
        );
        assert_eq!(weariness.effects[0].1.duration, 3);
    }

    #[test]
    fn expands_to_cast_requests() {
        let catalog = SpellLoader::parse(CATALOG).unwrap();
        let requests = catalog
            .get("Spell of Weariness")
            .unwrap()
            .cast_requests(Some(EntityId(2)), EntityId(1));
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].target, EntityId(1));
        assert_eq!(requests[0].caster, Some(EntityId(2)));
    }

    #[test]
    fn unknown_effect_keys_are_load_errors() {
        let err = SpellLoader::parse(
            r#"(spells: [(name: "Bad", effects: [(key: "Banish-Dread", settings: (duration: 0, magnitude: 0, chance: 0))])])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown effect key"));
    }
}
