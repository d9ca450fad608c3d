//! Repository contracts for saving and loading game sessions.

mod error;
mod file;
mod memory;

pub use error::{RepositoryError, Result};
pub use file::FileSaveRepository;
pub use memory::MemorySaveRepository;

use chrono::{DateTime, Utc};
use game_core::{GameStateRecord, QuestRecord};

/// Versioned save payload for a whole session.
///
/// Carries the effect/quest record graph from `game-core` plus metadata.
/// The restore path rebuilds live state from records without re-running
/// cast-time computation or quest compilation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum SaveGame {
    V1 {
        created_at: DateTime<Utc>,
        state: GameStateRecord,
        quests: Vec<QuestRecord>,
    },
}

impl SaveGame {
    pub fn new(state: GameStateRecord, quests: Vec<QuestRecord>) -> Self {
        Self::V1 {
            created_at: Utc::now(),
            state,
            quests,
        }
    }
}

/// Repository for session persistence, indexed by named slot.
pub trait SaveRepository: Send + Sync {
    /// Save a session into a slot, replacing any previous content.
    fn save(&self, slot: &str, save: &SaveGame) -> Result<()>;

    /// Load a session from a slot.
    ///
    /// An absent slot is `Ok(None)`, never an error: restore accepts an
    /// absent payload and leaves fresh state.
    fn load(&self, slot: &str) -> Result<Option<SaveGame>>;

    /// Check whether a slot exists.
    fn exists(&self, slot: &str) -> bool;

    /// Delete a slot.
    fn delete(&self, slot: &str) -> Result<()>;

    /// List all populated slots.
    fn list_slots(&self) -> Result<Vec<String>>;
}
