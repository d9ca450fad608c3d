//! File-based SaveRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use super::error::{RepositoryError, Result};
use super::{SaveGame, SaveRepository};

/// File-based implementation of [`SaveRepository`].
///
/// Stores sessions as individual bincode files, one per slot.
///
/// # File Format
///
/// Saves are stored as `save_{slot}.bin` in bincode format for compact size
/// and fast serialization. Writes go through a temp file plus atomic rename
/// so a crash mid-write never corrupts an existing save.
pub struct FileSaveRepository {
    base_dir: PathBuf,
}

impl FileSaveRepository {
    /// Create a new file-based save repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    /// Create a repository under the platform's data directory.
    pub fn in_default_dir(app_name: &str) -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", app_name).ok_or_else(|| {
            RepositoryError::Io(std::io::Error::other("no home directory available"))
        })?;
        Self::new(dirs.data_dir().join("saves"))
    }

    fn slot_path(&self, slot: &str) -> Result<PathBuf> {
        // Slot names become file names; keep them to a safe charset.
        if slot.is_empty()
            || !slot
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(RepositoryError::InvalidSlot(slot.to_string()));
        }
        Ok(self.base_dir.join(format!("save_{slot}.bin")))
    }
}

impl SaveRepository for FileSaveRepository {
    fn save(&self, slot: &str, save: &SaveGame) -> Result<()> {
        let path = self.slot_path(slot)?;
        let temp_path = path.with_extension("bin.tmp");

        let bytes = bincode::serialize(save)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved slot {:?} to {}", slot, path.display());

        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<SaveGame>> {
        let path = self.slot_path(slot)?;

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let save: SaveGame = bincode::deserialize(&bytes)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        tracing::debug!("Loaded slot {:?} from {}", slot, path.display());

        Ok(Some(save))
    }

    fn exists(&self, slot: &str) -> bool {
        self.slot_path(slot).map(|p| p.exists()).unwrap_or(false)
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let path = self.slot_path(slot)?;
        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!("Deleted slot {:?}", slot);
        }
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let mut slots = Vec::new();
        for entry in fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)? {
            let entry = entry.map_err(RepositoryError::Io)?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if let Some(slot) = name
                .strip_prefix("save_")
                .and_then(|n| n.strip_suffix(".bin"))
            {
                slots.push(slot.to_string());
            }
        }
        slots.sort();
        Ok(slots)
    }
}
