//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! driving rounds, casting, quest clicks, persistence, and event streams.

use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{
    CastOutcome, CastRequest, DoorId, EntityId, GameState, MagicEvent, QuestSource, Symbol,
};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime.
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn send<T>(
        &self,
        command: Command,
        reply_rx: oneshot::Receiver<Result<T>>,
    ) -> Result<T> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Advance one round and return the events it produced.
    pub async fn advance_round(&self) -> Result<Vec<Event>> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::AdvanceRound { reply: reply_tx }, reply_rx)
            .await
    }

    /// Resolve a cast request.
    pub async fn cast_spell(&self, request: CastRequest) -> Result<CastOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(
            Command::CastSpell {
                request,
                reply: reply_tx,
            },
            reply_rx,
        )
        .await
    }

    /// Notify a quest that the player clicked a foe.
    pub async fn click_foe(&self, quest: impl Into<String>, symbol: Symbol) -> Result<bool> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(
            Command::ClickFoe {
                quest: quest.into(),
                symbol,
                reply: reply_tx,
            },
            reply_rx,
        )
        .await
    }

    /// Notify a quest that the player clicked an NPC.
    pub async fn click_npc(&self, quest: impl Into<String>, symbol: Symbol) -> Result<bool> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(
            Command::ClickNpc {
                quest: quest.into(),
                symbol,
                reply: reply_tx,
            },
            reply_rx,
        )
        .await
    }

    /// Consume a held Lock effect against a door.
    pub async fn trigger_lock(&self, holder: EntityId, door: DoorId) -> Result<Vec<MagicEvent>> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(
            Command::TriggerLock {
                holder,
                door,
                reply: reply_tx,
            },
            reply_rx,
        )
        .await
    }

    /// Compile and schedule a quest.
    pub async fn start_quest(&self, source: QuestSource) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(
            Command::StartQuest {
                source,
                reply: reply_tx,
            },
            reply_rx,
        )
        .await
    }

    /// Query the current game state (read-only snapshot).
    pub async fn query_state(&self) -> Result<GameState> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(Command::QueryState { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Persist the session into a named slot.
    pub async fn save_game(&self, slot: impl Into<String>) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(
            Command::SaveGame {
                slot: slot.into(),
                reply: reply_tx,
            },
            reply_rx,
        )
        .await
    }

    /// Restore the session from a named slot; false when the slot is empty.
    pub async fn load_game(&self, slot: impl Into<String>) -> Result<bool> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(
            Command::LoadGame {
                slot: slot.into(),
                reply: reply_tx,
            },
            reply_rx,
        )
        .await
    }

    /// Subscribe to events from a specific topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }
}
