//! Imperative shell around the deterministic core.
//!
//! The runtime owns the authoritative [`game_core::GameState`] and
//! [`game_core::QuestMachine`] inside a background worker, wires up
//! command/event channels, and exposes a builder-based API for clients to
//! drive rounds, casts, clicks, and persistence.

pub mod api;
pub mod events;
pub mod repository;
mod runtime;
pub mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::{Event, EventBus, SessionEvent, Topic};
pub use repository::{
    FileSaveRepository, MemorySaveRepository, RepositoryError, SaveGame, SaveRepository,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use workers::Command;
