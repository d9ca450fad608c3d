//! Simulation worker that owns the authoritative game state.
//!
//! Receives commands from [`crate::RuntimeHandle`], drives the core entry
//! points ([`game_core::cast`], [`game_core::advance_round`], quest ticks),
//! and publishes events to the event bus. The worker is the single logical
//! owner of all mutable session state; every mutation is serialized through
//! its command loop, which is what makes the tick model safe without locks.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use game_core::{
    CastOutcome, CastRequest, DoorId, EntityId, GameEnv, GameState, GameStateRecord, MagicEvent,
    PcgRng, QuestMachine, QuestSource, Symbol, advance_round, cast, trigger_lock,
};

use crate::api::{Result, RuntimeError};
use crate::events::{Event, EventBus, SessionEvent};
use crate::repository::{SaveGame, SaveRepository};

/// Commands that can be sent to the simulation worker.
pub enum Command {
    /// Advance one round: effect bundles tick, then quest tasks are polled.
    AdvanceRound {
        reply: oneshot::Sender<Result<Vec<Event>>>,
    },
    /// Resolve a cast request against its target's effect bundle.
    CastSpell {
        request: CastRequest,
        reply: oneshot::Sender<Result<CastOutcome>>,
    },
    /// Player clicked a quest foe; returns false if the symbol is unknown.
    ClickFoe {
        quest: String,
        symbol: Symbol,
        reply: oneshot::Sender<Result<bool>>,
    },
    /// Player clicked a quest NPC.
    ClickNpc {
        quest: String,
        symbol: Symbol,
        reply: oneshot::Sender<Result<bool>>,
    },
    /// Entity holding a Lock incumbent activated a door.
    TriggerLock {
        holder: EntityId,
        door: DoorId,
        reply: oneshot::Sender<Result<Vec<MagicEvent>>>,
    },
    /// Compile a quest source and add it to the schedule.
    StartQuest {
        source: QuestSource,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Query a read-only snapshot of the game state.
    QueryState { reply: oneshot::Sender<GameState> },
    /// Persist the session into a named slot.
    SaveGame {
        slot: String,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Restore the session from a named slot; false when the slot is empty.
    LoadGame {
        slot: String,
        reply: oneshot::Sender<Result<bool>>,
    },
}

/// Background task that processes session commands.
pub struct SimulationWorker {
    state: GameState,
    quests: QuestMachine,
    rng: PcgRng,
    repository: Box<dyn SaveRepository>,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl SimulationWorker {
    pub fn new(
        state: GameState,
        quests: QuestMachine,
        repository: Box<dyn SaveRepository>,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            state,
            quests,
            rng: PcgRng,
            repository,
            command_rx,
            event_bus,
        }
    }

    /// Runs the command loop until every handle is dropped.
    pub async fn run(mut self) {
        eprintln!("PROBE worker started");
        info!("simulation worker started");
        while let Some(command) = self.command_rx.recv().await {
            eprintln!("PROBE recv command");
            self.handle_command(command);
        }
        info!("simulation worker stopped");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::AdvanceRound { reply } => {
                let events = self.advance_round();
                let _ = reply.send(Ok(events));
            }
            Command::CastSpell { request, reply } => {
                let _ = reply.send(self.cast_spell(&request));
            }
            Command::ClickFoe {
                quest,
                symbol,
                reply,
            } => {
                let _ = reply.send(self.click(&quest, &symbol, ClickTarget::Foe));
            }
            Command::ClickNpc {
                quest,
                symbol,
                reply,
            } => {
                let _ = reply.send(self.click(&quest, &symbol, ClickTarget::Npc));
            }
            Command::TriggerLock {
                holder,
                door,
                reply,
            } => {
                let events = trigger_lock(&mut self.state, holder, door);
                for event in &events {
                    self.event_bus.publish(Event::Magic(event.clone()));
                }
                let _ = reply.send(Ok(events));
            }
            Command::StartQuest { source, reply } => {
                let _ = reply.send(self.start_quest(&source));
            }
            Command::QueryState { reply } => {
                let _ = reply.send(self.state.clone());
            }
            Command::SaveGame { slot, reply } => {
                let _ = reply.send(self.save_game(&slot));
            }
            Command::LoadGame { slot, reply } => {
                let _ = reply.send(self.load_game(&slot));
            }
        }
    }

    fn advance_round(&mut self) -> Vec<Event> {
        let mut events: Vec<Event> = advance_round(&mut self.state)
            .into_iter()
            .map(Event::Magic)
            .collect();

        // Quest tasks poll after effects so triggers observe this round's
        // world state. A missing player actor skips quest work entirely.
        if let Some(player) = self.state.entities.actor_mut(EntityId::PLAYER) {
            events.extend(self.quests.tick(player).into_iter().map(Event::Quest));
        }

        events.push(Event::Session(SessionEvent::RoundAdvanced {
            round: self.state.round.clock,
        }));

        debug!("advanced to round {}", self.state.round.clock);
        for event in &events {
            self.event_bus.publish(event.clone());
        }
        events
    }

    fn cast_spell(&mut self, request: &CastRequest) -> Result<CastOutcome> {
        let env = GameEnv::with_rng(&self.rng);
        let (outcome, events) = cast(&mut self.state, request, &env)?;
        debug!(
            "cast {} on {}: {:?}",
            request.kind.key(),
            request.target,
            outcome
        );
        for event in events {
            self.event_bus.publish(Event::Magic(event));
        }
        Ok(outcome)
    }

    fn click(&mut self, quest: &str, symbol: &Symbol, target: ClickTarget) -> Result<bool> {
        let quest = self
            .quests
            .quest_mut(quest)
            .ok_or_else(|| RuntimeError::UnknownQuest(quest.to_string()))?;
        Ok(match target {
            ClickTarget::Foe => quest.set_foe_clicked(symbol),
            ClickTarget::Npc => quest.set_npc_clicked(symbol),
        })
    }

    fn start_quest(&mut self, source: &QuestSource) -> Result<()> {
        let quest = self.quests.compile(source)?;
        info!("starting quest {:?}", quest.name);
        self.event_bus.publish(Event::Session(SessionEvent::QuestStarted {
            name: quest.name.clone(),
        }));
        self.quests.start_quest(quest);
        Ok(())
    }

    fn save_game(&mut self, slot: &str) -> Result<()> {
        let save = SaveGame::new(GameStateRecord::save(&self.state), self.quests.save());
        self.repository.save(slot, &save)?;
        self.event_bus.publish(Event::Session(SessionEvent::GameSaved {
            slot: slot.to_string(),
        }));
        Ok(())
    }

    fn load_game(&mut self, slot: &str) -> Result<bool> {
        let Some(save) = self.repository.load(slot)? else {
            return Ok(false);
        };
        let SaveGame::V1 { state, quests, .. } = save;

        let (state, skipped) = state.restore();
        for key in &skipped {
            warn!("dropping unrecognized effect entry {:?} from slot {:?}", key, slot);
        }
        self.state = state;
        self.quests.restore(&quests);

        self.event_bus.publish(Event::Session(SessionEvent::GameLoaded {
            slot: slot.to_string(),
        }));
        Ok(true)
    }
}

enum ClickTarget {
    Foe,
    Npc,
}
