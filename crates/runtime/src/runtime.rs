//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive the session.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use game_core::{GameState, QuestMachine, StaticMessageTable};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::repository::{MemorySaveRepository, SaveRepository};
use crate::workers::SimulationWorker;

/// Runtime configuration shared across the orchestrator and worker.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// Main runtime that owns the simulation worker.
///
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder.
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Shut down: drop the command channel and wait for the worker.
    pub async fn shutdown(self) -> Result<()> {
        let Runtime {
            handle,
            worker_handle,
        } = self;
        drop(handle);
        worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`].
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    state: Option<GameState>,
    quests: Option<QuestMachine>,
    repository: Option<Box<dyn SaveRepository>>,
}

impl RuntimeBuilder {
    pub fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            state: None,
            quests: None,
            repository: None,
        }
    }

    pub fn with_config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn with_quest_machine(mut self, quests: QuestMachine) -> Self {
        self.quests = Some(quests);
        self
    }

    pub fn with_repository(mut self, repository: Box<dyn SaveRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Spawns the simulation worker and returns the runtime.
    ///
    /// Defaults: a fresh state with a random game seed, an empty quest
    /// machine, and an in-memory save repository.
    pub fn build(self) -> Runtime {
        let state = self
            .state
            .unwrap_or_else(|| GameState::with_seed(rand::random::<u64>()));
        let quests = self
            .quests
            .unwrap_or_else(|| QuestMachine::new(StaticMessageTable::new()));
        let repository = self
            .repository
            .unwrap_or_else(|| Box::new(MemorySaveRepository::new()));

        eprintln!("PROBE build: start");
        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let worker = SimulationWorker::new(
            state,
            quests,
            repository,
            command_rx,
            event_bus.clone(),
        );
        eprintln!("PROBE build: before spawn");
        let worker_handle = tokio::spawn(worker.run());
        eprintln!("PROBE build: after spawn");

        Runtime {
            handle: RuntimeHandle::new(command_tx, event_bus),
            worker_handle,
        }
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
