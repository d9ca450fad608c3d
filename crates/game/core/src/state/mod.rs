//! Authoritative game state representation.
//!
//! This module owns the data structures that describe actors, doors, the
//! round clock, and per-entity effect bundles. Runtime layers clone or query
//! this state but mutate it exclusively through the entry points in
//! [`crate::magic`] and [`crate::quest`].
mod actor;
mod attributes;
mod common;

use std::collections::HashMap;

pub use actor::{ActorState, ConcealmentFlags, DoorState};
pub use attributes::{Attributes, Stat};
pub use common::{DoorId, EntityId, ResourceMeter, Round};

use crate::config::GameConfig;
use crate::magic::{EffectBundle, EffectKind, EffectRecord};

/// Round bookkeeping shared by the incumbency engine and the quest scheduler.
#[derive(Clone, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct RoundState {
    /// Current round clock.
    pub clock: Round,

    /// Monotonic operation counter.
    ///
    /// Increments on every state-mutating operation and feeds RNG seed
    /// derivation, so every roll draws from a fresh deterministic seed.
    pub nonce: u64,
}

/// All entities tracked in the world: actors and action doors.
#[derive(Clone, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct EntitiesState {
    actors: HashMap<EntityId, ActorState>,
    doors: HashMap<DoorId, DoorState>,
}

impl EntitiesState {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn insert_actor(&mut self, actor: ActorState) {
        self.actors.insert(actor.id, actor);
    }

    pub fn actor(&self, id: EntityId) -> Option<&ActorState> {
        self.actors.get(&id)
    }

    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut ActorState> {
        self.actors.get_mut(&id)
    }

    pub fn remove_actor(&mut self, id: EntityId) -> Option<ActorState> {
        self.actors.remove(&id)
    }

    pub fn insert_door(&mut self, id: DoorId, door: DoorState) {
        self.doors.insert(id, door);
    }

    pub fn door(&self, id: DoorId) -> Option<&DoorState> {
        self.doors.get(&id)
    }

    pub fn door_mut(&mut self, id: DoorId) -> Option<&mut DoorState> {
        self.doors.get_mut(&id)
    }

    pub fn actor_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.actors.keys().copied()
    }
}

/// Canonical snapshot of the deterministic game state.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GameState {
    /// RNG seed for deterministic random generation.
    ///
    /// Set once at game initialization and never modified. Combined with
    /// `round.nonce` to derive unique seeds for each random event.
    pub game_seed: u64,

    /// Round bookkeeping.
    pub round: RoundState,

    /// All entities tracked in the world.
    pub entities: EntitiesState,

    /// Active effect bundles peered with their target entities.
    ///
    /// Kept out of [`ActorState`] so round processing can mutate an actor
    /// and its bundle through disjoint borrows.
    pub effects: HashMap<EntityId, EffectBundle>,
}

impl GameState {
    /// Creates an empty state with no entities.
    pub fn empty() -> Self {
        Self {
            game_seed: 0,
            round: RoundState::default(),
            entities: EntitiesState::empty(),
            effects: HashMap::new(),
        }
    }

    /// Creates an empty state with a specific game seed.
    pub fn with_seed(game_seed: u64) -> Self {
        Self {
            game_seed,
            ..Self::empty()
        }
    }

    /// Returns the effect bundle for an entity, creating it on first use.
    pub fn bundle_mut(&mut self, id: EntityId) -> &mut EffectBundle {
        self.effects.entry(id).or_default()
    }

    pub fn bundle(&self, id: EntityId) -> Option<&EffectBundle> {
        self.effects.get(&id)
    }

    /// Attribute value after layering active fortify and drain effects over
    /// the base value.
    pub fn effective_attribute(&self, id: EntityId, stat: Stat) -> i32 {
        let Some(actor) = self.entities.actor(id) else {
            return 0;
        };
        let mut value = actor.attributes.get(stat);
        if let Some(bundle) = self.effects.get(&id) {
            for effect in bundle.iter() {
                match effect.kind {
                    EffectKind::Fortify(s) if s == stat => value += effect.magnitude(),
                    EffectKind::Drain(s) if s == stat => value -= effect.magnitude(),
                    _ => {}
                }
            }
        }
        value.clamp(GameConfig::MIN_ATTRIBUTE, GameConfig::MAX_ATTRIBUTE)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::empty()
    }
}

// ============================================================================
// Versioned save records
// ============================================================================

/// Versioned save payload for the whole game state.
///
/// Actors and doors are plain data and ride along inside the version
/// envelope; effect entries use their own per-entry records so the restore
/// path can rebuild incumbents without re-running cast-time computation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum GameStateRecord {
    V1 {
        game_seed: u64,
        round: RoundState,
        entities: EntitiesState,
        effects: Vec<(EntityId, Vec<EffectRecord>)>,
    },
}

impl GameStateRecord {
    /// Captures the current state.
    pub fn save(state: &GameState) -> Self {
        let mut effects: Vec<(EntityId, Vec<EffectRecord>)> = state
            .effects
            .iter()
            .map(|(id, bundle)| (*id, bundle.save()))
            .collect();
        // Deterministic ordering for byte-stable save files.
        effects.sort_by_key(|(id, _)| *id);
        Self::V1 {
            game_seed: state.game_seed,
            round: state.round.clone(),
            entities: state.entities.clone(),
            effects,
        }
    }

    /// Rebuilds a state from this record.
    ///
    /// Unrecognized effect entries are dropped; the returned list names the
    /// skipped keys so callers can surface them.
    pub fn restore(self) -> (GameState, Vec<String>) {
        let Self::V1 {
            game_seed,
            round,
            entities,
            effects,
        } = self;
        let mut skipped = Vec::new();
        let mut state = GameState {
            game_seed,
            round,
            entities,
            effects: HashMap::new(),
        };
        for (id, records) in effects {
            let (bundle, unknown) = EffectBundle::restore(&records);
            skipped.extend(unknown);
            if !bundle.is_empty() {
                state.effects.insert(id, bundle);
            }
        }
        (state, skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::magic::{ActiveEffect, EffectSettings};

    fn actor(id: u32) -> ActorState {
        ActorState::new(EntityId(id), format!("actor-{id}"), 5)
    }

    #[test]
    fn effective_attribute_layers_fortify_and_drain() {
        let mut state = GameState::empty();
        state.entities.insert_actor(actor(1));

        let bundle = state.bundle_mut(EntityId(1));
        bundle.assign(ActiveEffect::new(
            EffectKind::Fortify(Stat::Luck),
            EffectSettings::new(5, 20, 0),
            None,
        ));
        bundle.assign(ActiveEffect::new(
            EffectKind::Drain(Stat::Luck),
            EffectSettings::new(0, 30, 0),
            None,
        ));

        // 50 base + 20 fortify - 30 drain
        assert_eq!(state.effective_attribute(EntityId(1), Stat::Luck), 40);
        // Unrelated stat untouched
        assert_eq!(state.effective_attribute(EntityId(1), Stat::Speed), 50);
    }

    #[test]
    fn effective_attribute_clamps_at_zero() {
        let mut state = GameState::empty();
        state.entities.insert_actor(actor(1));
        state.bundle_mut(EntityId(1)).assign(ActiveEffect::new(
            EffectKind::Drain(Stat::Strength),
            EffectSettings::new(0, 90, 0),
            None,
        ));
        assert_eq!(state.effective_attribute(EntityId(1), Stat::Strength), 0);
    }

    #[test]
    fn state_record_round_trips() {
        let mut state = GameState::with_seed(77);
        state.entities.insert_actor(actor(1).with_gold(120));
        state.entities.insert_door(DoorId(3), DoorState::default());
        state.round.clock = Round(9);
        state.round.nonce = 42;
        state.bundle_mut(EntityId(1)).assign(ActiveEffect::new(
            EffectKind::Fortify(Stat::Speed),
            EffectSettings::new(12, 8, 0),
            Some(EntityId(1)),
        ));

        let record = GameStateRecord::save(&state);
        let (restored, skipped) = record.restore();
        assert!(skipped.is_empty());
        assert_eq!(restored, state);
    }
}
