//! One live effect instance on a target entity.

use crate::state::EntityId;

use super::kind::EffectKind;
use super::settings::EffectSettings;

/// An active effect entry.
///
/// Created on successful cast, mutated every round, destroyed when its
/// countdown reaches zero or an explicit cancel fires. The caster is a weak
/// handle: the entity may be gone by the time a round is processed, which is
/// a valid steady state, not a fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ActiveEffect {
    pub kind: EffectKind,

    /// Cast-time parameters; never recomputed after cast.
    pub settings: EffectSettings,

    /// Remaining rounds. For forced-round kinds this value is pinned and
    /// only an explicit cancel removes the entry.
    pub rounds_remaining: u32,

    /// Live magnitude. Starts at `settings.magnitude`; merge policies may
    /// grow it (drain stacking).
    magnitude: i32,

    /// Outcome of the cast-time chance roll for chance-based effects.
    pub chance_success: bool,

    pub caster: Option<EntityId>,
}

impl ActiveEffect {
    /// Builds a fresh entry from cast-time parameters.
    pub fn new(kind: EffectKind, settings: EffectSettings, caster: Option<EntityId>) -> Self {
        let rounds_remaining = if kind.is_instant() {
            0
        } else if kind.uses_forced_rounds() {
            // Held open until explicitly cancelled.
            1
        } else {
            settings.duration
        };
        Self {
            kind,
            settings,
            rounds_remaining,
            magnitude: settings.magnitude,
            chance_success: true,
            caster,
        }
    }

    /// Rebuilds an entry from persisted fields without re-running cast-time
    /// computation.
    pub fn from_saved(
        kind: EffectKind,
        settings: EffectSettings,
        rounds_remaining: u32,
        magnitude: i32,
        chance_success: bool,
        caster: Option<EntityId>,
    ) -> Self {
        Self {
            kind,
            settings,
            rounds_remaining,
            magnitude,
            chance_success,
            caster,
        }
    }

    pub fn with_chance_success(mut self, chance_success: bool) -> Self {
        self.chance_success = chance_success;
        self
    }

    pub fn magnitude(&self) -> i32 {
        self.magnitude
    }

    /// Grows the live magnitude (merge policies only).
    pub(crate) fn increase_magnitude(&mut self, amount: i32) {
        self.magnitude += amount;
    }

    /// Shrinks the live magnitude, flooring at zero. Returns the new value.
    pub(crate) fn reduce_magnitude(&mut self, amount: i32) -> i32 {
        self.magnitude = (self.magnitude - amount).max(0);
        self.magnitude
    }

    pub fn key(&self) -> String {
        self.kind.key()
    }
}
