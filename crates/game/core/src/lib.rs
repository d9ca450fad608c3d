//! Deterministic effect and questing logic shared across clients.
//!
//! `game-core` defines the canonical rules for magic effect incumbency and
//! quest task scheduling, and exposes pure APIs that can be reused by both
//! the runtime and offline tools. State mutation happens through the round
//! entry points ([`magic::cast`], [`magic::advance_round`],
//! [`quest::QuestMachine::tick`]); supporting crates depend on the types
//! re-exported here.
pub mod config;
pub mod env;
pub mod magic;
pub mod quest;
pub mod state;

pub use config::GameConfig;
pub use env::{Env, GameEnv, OracleError, PcgRng, RngOracle, TextOracle, compute_seed};
pub use magic::{
    ActiveEffect, AssignOutcome, CastError, CastOutcome, CastRequest, ClassicKey, ConcealmentKind,
    DamageResource, EffectBundle, EffectCosts, EffectKind, EffectProperties, EffectRecord,
    EffectSettings, ElementFlags, MagicEvent, MagicSkill, TargetFlags, advance_round, cast,
    trigger_lock,
};
pub use quest::{
    ActionRecord, ActionRegistry, ActionSlot, Foe, Npc, Quest, QuestAction, QuestCompileContext,
    QuestCompileError, QuestEvent, QuestItem, QuestMachine, QuestMessage, QuestRecord, QuestSource,
    StaticMessageTable, Symbol, Task, TaskRecord, TaskSource,
};
pub use state::{
    ActorState, Attributes, ConcealmentFlags, DoorId, DoorState, EntitiesState, EntityId,
    GameState, GameStateRecord, ResourceMeter, Round, RoundState, Stat,
};
