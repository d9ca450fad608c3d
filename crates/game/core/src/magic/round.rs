//! Round processing entry points for the incumbency engine.
//!
//! All state mutation for magic flows through three operations: [`cast`]
//! installs or merges effects, [`advance_round`] ticks every bundle by one
//! round, and [`trigger_lock`] consumes a held Lock effect when its holder
//! activates a door. Each returns the events it produced instead of logging.

use crate::env::{GameEnv, OracleError, compute_seed};
use crate::state::{ActorState, DoorId, EntityId, GameState, Stat};

use super::bundle::AssignOutcome;
use super::entry::ActiveEffect;
use super::kind::{DamageResource, EffectKind};
use super::settings::EffectSettings;

/// Seed context for the cast-time chance roll.
const SEED_CONTEXT_CHANCE: u32 = 0;

/// A request to instantiate an effect on a target.
///
/// Produced by the external spell/potion-casting system with all numeric
/// parameters already resolved from caster stats and cost tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CastRequest {
    pub kind: EffectKind,
    pub settings: EffectSettings,
    pub caster: Option<EntityId>,
    pub target: EntityId,
}

/// How a cast resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CastOutcome {
    /// Candidate became a new incumbent on the target.
    Installed,
    /// Candidate merged into an existing incumbent.
    Merged,
    /// Instant effect applied once; nothing was installed.
    AppliedInstant,
    /// Chance roll failed; nothing was installed.
    Fizzled,
}

/// Errors raised by [`cast`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CastError {
    #[error("target entity {0} not found")]
    TargetNotFound(EntityId),

    #[error("effect {key} does not allow this target")]
    TargetNotAllowed { key: String },

    #[error("target entity {0} cannot hold more effects")]
    EffectListFull(EntityId),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

/// Observable outcomes of magic processing.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum MagicEvent {
    EffectStarted { target: EntityId, key: String },
    EffectMerged { target: EntityId, key: String },
    EffectEnded { target: EntityId, key: String },
    CastFizzled { target: EntityId, key: String },
    ResourceDamaged {
        target: EntityId,
        resource: DamageResource,
        amount: u32,
        caster: Option<EntityId>,
    },
    AttributeHealed {
        target: EntityId,
        stat: Stat,
        amount: i32,
    },
    /// HUD text by localized-text key, resolved at the display layer.
    HudText { key: String },
    DoorLocked { door: DoorId, lock_value: u32 },
    DoorAlreadyLocked { door: DoorId },
    DoorClosed { door: DoorId },
}

/// Per-round working context handed to effect behaviors.
///
/// `target` is optional: the entity can be gone while its bundle still
/// exists, and per-round application then skips silently (a valid steady
/// state, not a fault).
pub(crate) struct MagicRoundContext<'a> {
    pub target_id: EntityId,
    pub target: Option<&'a mut ActorState>,
    pub events: &'a mut Vec<MagicEvent>,
}

/// Resolves a cast request against the target's effect bundle.
pub fn cast(
    state: &mut GameState,
    request: &CastRequest,
    env: &GameEnv<'_>,
) -> Result<(CastOutcome, Vec<MagicEvent>), CastError> {
    let props = request.kind.properties();

    if state.entities.actor(request.target).is_none() {
        return Err(CastError::TargetNotFound(request.target));
    }
    let self_cast = request.caster == Some(request.target);
    let allowed = if self_cast {
        props.allowed_targets.allows_self()
    } else {
        props.allowed_targets.allows_other()
    };
    if !allowed {
        return Err(CastError::TargetNotAllowed { key: props.key });
    }

    state.round.nonce += 1;
    let mut events = Vec::new();

    // Chance-based effects roll at cast time with a seed derived from the
    // round nonce, so replays and save/load reproduce the same outcome.
    if props.support_chance {
        let seed = compute_seed(
            state.game_seed,
            state.round.nonce,
            request.target.0,
            SEED_CONTEXT_CHANCE,
        );
        let roll = env.rng()?.roll_d100(seed) as i32;
        if roll > request.settings.chance {
            events.push(MagicEvent::CastFizzled {
                target: request.target,
                key: request.kind.key(),
            });
            return Ok((CastOutcome::Fizzled, events));
        }
    }

    let effect = ActiveEffect::new(request.kind, request.settings, request.caster);

    if request.kind.is_instant() {
        let GameState {
            entities, effects, ..
        } = state;
        let bundle = effects.entry(request.target).or_default();
        request.kind.apply_instant(
            &effect,
            entities.actor_mut(request.target),
            bundle,
            &mut events,
        );
        if bundle.is_empty() {
            effects.remove(&request.target);
        }
        return Ok((CastOutcome::AppliedInstant, events));
    }

    let bundle = state.bundle_mut(request.target);
    match bundle.assign(effect) {
        AssignOutcome::Installed => {
            let mut ctx = MagicRoundContext {
                target_id: request.target,
                target: state.entities.actor_mut(request.target),
                events: &mut events,
            };
            request.kind.on_start(&effect, &mut ctx);
            events.push(MagicEvent::EffectStarted {
                target: request.target,
                key: request.kind.key(),
            });
            Ok((CastOutcome::Installed, events))
        }
        AssignOutcome::Merged => {
            events.push(MagicEvent::EffectMerged {
                target: request.target,
                key: request.kind.key(),
            });
            Ok((CastOutcome::Merged, events))
        }
        AssignOutcome::Rejected => Err(CastError::EffectListFull(request.target)),
    }
}

/// Advances the round clock and ticks every entity's effect bundle.
pub fn advance_round(state: &mut GameState) -> Vec<MagicEvent> {
    state.round.clock = state.round.clock + 1;
    state.round.nonce += 1;

    let mut events = Vec::new();

    // Deterministic processing order regardless of map iteration order.
    let mut ids: Vec<EntityId> = state.effects.keys().copied().collect();
    ids.sort();

    let GameState {
        entities, effects, ..
    } = state;
    for id in ids {
        let Some(bundle) = effects.get_mut(&id) else {
            continue;
        };
        let mut ctx = MagicRoundContext {
            target_id: id,
            target: entities.actor_mut(id),
            events: &mut events,
        };
        bundle.advance_round(&mut ctx);
    }

    state.effects.retain(|_, bundle| !bundle.is_empty());
    events
}

/// Consumes a held Lock effect when its holder activates a door.
///
/// No-ops (returning no events) when the holder has no live Lock incumbent
/// or the door does not exist; both are valid steady states.
pub fn trigger_lock(state: &mut GameState, holder: EntityId, door_id: DoorId) -> Vec<MagicEvent> {
    let mut events = Vec::new();

    let has_lock = state
        .effects
        .get(&holder)
        .and_then(|bundle| bundle.find_kind(EffectKind::Lock))
        .is_some_and(|lock| lock.rounds_remaining > 0);
    if !has_lock {
        return events;
    }
    let Some(level) = state.entities.actor(holder).map(|actor| actor.level) else {
        return events;
    };

    let Some(door) = state.entities.door_mut(door_id) else {
        return events;
    };
    if door.is_locked() {
        events.push(MagicEvent::DoorAlreadyLocked { door: door_id });
    } else {
        // Locks to the holder's level, as the spell description promises.
        door.lock_value = level;
        events.push(MagicEvent::DoorLocked {
            door: door_id,
            lock_value: level,
        });
    }
    if door.is_open {
        door.is_open = false;
        events.push(MagicEvent::DoorClosed { door: door_id });
    }

    state.round.nonce += 1;
    let GameState {
        entities, effects, ..
    } = state;
    if let Some(bundle) = effects.get_mut(&holder) {
        let mut ctx = MagicRoundContext {
            target_id: holder,
            target: entities.actor_mut(holder),
            events: &mut events,
        };
        bundle.resign(EffectKind::Lock, &mut ctx);
        if bundle.is_empty() {
            effects.remove(&holder);
        }
    }
    events
}
