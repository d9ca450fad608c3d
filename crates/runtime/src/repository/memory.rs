//! In-memory SaveRepository for tests and ephemeral sessions.

use std::collections::HashMap;
use std::sync::Mutex;

use super::error::{RepositoryError, Result};
use super::{SaveGame, SaveRepository};

/// In-memory implementation of [`SaveRepository`].
///
/// Stores serialized bytes rather than live values so the save format gets
/// exercised exactly as the file repository does.
#[derive(Default)]
pub struct MemorySaveRepository {
    slots: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemorySaveRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveRepository for MemorySaveRepository {
    fn save(&self, slot: &str, save: &SaveGame) -> Result<()> {
        let bytes = bincode::serialize(save)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        let mut slots = self.slots.lock().map_err(|_| RepositoryError::LockPoisoned)?;
        slots.insert(slot.to_string(), bytes);
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<SaveGame>> {
        let slots = self.slots.lock().map_err(|_| RepositoryError::LockPoisoned)?;
        let Some(bytes) = slots.get(slot) else {
            return Ok(None);
        };
        let save = bincode::deserialize(bytes)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        Ok(Some(save))
    }

    fn exists(&self, slot: &str) -> bool {
        self.slots
            .lock()
            .map(|slots| slots.contains_key(slot))
            .unwrap_or(false)
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let mut slots = self.slots.lock().map_err(|_| RepositoryError::LockPoisoned)?;
        slots.remove(slot);
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let slots = self.slots.lock().map_err(|_| RepositoryError::LockPoisoned)?;
        let mut names: Vec<String> = slots.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{GameState, GameStateRecord};

    #[test]
    fn memory_repository_round_trips() {
        let repo = MemorySaveRepository::new();
        let save = SaveGame::new(GameStateRecord::save(&GameState::with_seed(7)), Vec::new());

        repo.save("quick", &save).unwrap();
        assert_eq!(repo.load("quick").unwrap().unwrap(), save);

        repo.delete("quick").unwrap();
        assert!(repo.load("quick").unwrap().is_none());
    }
}
