//! Closed set of effect kinds and their capability dispatch.
//!
//! The original engine discovered effect implementations by reflection over
//! subclasses; here the set is a tagged enum and every capability (static
//! properties, like-kind predicate, merge policy, per-round behavior)
//! dispatches through one `match` per capability. Adding a kind means adding
//! a variant and its arm in each capability, which the compiler enforces.

use std::str::FromStr;

use crate::state::Stat;

use super::entry::ActiveEffect;
use super::kinds;
use super::properties::EffectProperties;
use super::round::MagicRoundContext;

/// Resource pools a continuous-damage effect can burn down.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum DamageResource {
    Fatigue,
    Health,
}

/// Concealment variants applied by illusion effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ConcealmentKind {
    ChameleonNormal,
    ChameleonTrue,
    InvisibilityNormal,
    InvisibilityTrue,
}

/// One effect kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum EffectKind {
    /// Damage a resource pool every round.
    ContinuousDamage(DamageResource),
    /// Permanent attribute debuff held until healed.
    Drain(Stat),
    /// Instant attribute recovery; heals like-stat drain damage first.
    Heal(Stat),
    /// Timed attribute buff.
    Fortify(Stat),
    /// Timed magical concealment.
    Concealment(ConcealmentKind),
    /// Chance-based door lock, consumed by door activation.
    Lock,
}

impl EffectKind {
    /// Canonical string key, e.g. `"ContinuousDamage-Fatigue"`.
    pub fn key(&self) -> String {
        match self {
            EffectKind::ContinuousDamage(res) => format!("ContinuousDamage-{res}"),
            EffectKind::Drain(stat) => format!("Drain-{stat}"),
            EffectKind::Heal(stat) => format!("Heal-{stat}"),
            EffectKind::Fortify(stat) => format!("Fortify-{stat}"),
            EffectKind::Concealment(kind) => match kind {
                ConcealmentKind::ChameleonNormal => "Chameleon-Normal".to_string(),
                ConcealmentKind::ChameleonTrue => "Chameleon-True".to_string(),
                ConcealmentKind::InvisibilityNormal => "Invisibility-Normal".to_string(),
                ConcealmentKind::InvisibilityTrue => "Invisibility-True".to_string(),
            },
            EffectKind::Lock => "Lock".to_string(),
        }
    }

    /// Decodes a canonical key back into a kind.
    ///
    /// Unknown keys return `None`; the restore path treats those entries as
    /// unrecognized save data rather than an error.
    pub fn from_key(key: &str) -> Option<Self> {
        let (group, subgroup) = match key.split_once('-') {
            Some((group, subgroup)) => (group, Some(subgroup)),
            None => (key, None),
        };
        match (group, subgroup) {
            ("ContinuousDamage", Some(res)) => {
                DamageResource::from_str(res).ok().map(EffectKind::ContinuousDamage)
            }
            ("Drain", Some(stat)) => Stat::from_str(stat).ok().map(EffectKind::Drain),
            ("Heal", Some(stat)) => Stat::from_str(stat).ok().map(EffectKind::Heal),
            ("Fortify", Some(stat)) => Stat::from_str(stat).ok().map(EffectKind::Fortify),
            ("Chameleon", Some("Normal")) => {
                Some(EffectKind::Concealment(ConcealmentKind::ChameleonNormal))
            }
            ("Chameleon", Some("True")) => {
                Some(EffectKind::Concealment(ConcealmentKind::ChameleonTrue))
            }
            ("Invisibility", Some("Normal")) => {
                Some(EffectKind::Concealment(ConcealmentKind::InvisibilityNormal))
            }
            ("Invisibility", Some("True")) => {
                Some(EffectKind::Concealment(ConcealmentKind::InvisibilityTrue))
            }
            ("Lock", None) => Some(EffectKind::Lock),
            _ => None,
        }
    }

    /// Static properties for this kind.
    pub fn properties(&self) -> EffectProperties {
        match self {
            EffectKind::ContinuousDamage(res) => kinds::damage::properties(*res),
            EffectKind::Drain(stat) => kinds::drain::properties(*stat),
            EffectKind::Heal(stat) => kinds::heal::properties(*stat),
            EffectKind::Fortify(stat) => kinds::fortify::properties(*stat),
            EffectKind::Concealment(kind) => kinds::concealment::properties(*kind),
            EffectKind::Lock => kinds::lock::properties(),
        }
    }

    /// Instant effects apply once at cast time and are never installed as
    /// incumbents.
    pub fn is_instant(&self) -> bool {
        matches!(self, EffectKind::Heal(_))
    }

    /// Forced-round effects hold a fixed rounds-remaining value that the
    /// round countdown never touches; they resign only via explicit cancel.
    pub fn uses_forced_rounds(&self) -> bool {
        matches!(self, EffectKind::Drain(_) | EffectKind::Lock)
    }

    /// Symmetric like-kind predicate deciding incumbency grouping.
    pub fn is_like_kind(&self, other: &EffectKind) -> bool {
        match (self, other) {
            (EffectKind::ContinuousDamage(a), EffectKind::ContinuousDamage(b)) => a == b,
            (EffectKind::Drain(a), EffectKind::Drain(b)) => a == b,
            (EffectKind::Fortify(a), EffectKind::Fortify(b)) => a == b,
            (EffectKind::Concealment(a), EffectKind::Concealment(b)) => a == b,
            (EffectKind::Lock, EffectKind::Lock) => true,
            // Instant effects never participate in incumbency.
            _ => false,
        }
    }

    /// Merge policy: folds `candidate` into an existing incumbent.
    ///
    /// Policies are authoritative per kind; there is no universal rule.
    pub(crate) fn add_state(&self, incumbent: &mut ActiveEffect, candidate: &ActiveEffect) {
        match self {
            EffectKind::ContinuousDamage(_) => kinds::damage::add_state(incumbent, candidate),
            EffectKind::Drain(_) => kinds::drain::add_state(incumbent, candidate),
            EffectKind::Fortify(_) => kinds::fortify::add_state(incumbent, candidate),
            EffectKind::Concealment(_) => kinds::concealment::add_state(incumbent, candidate),
            EffectKind::Lock => kinds::lock::add_state(incumbent, candidate),
            // Instant effects are never incumbents, so there is nothing to merge.
            EffectKind::Heal(_) => {}
        }
    }

    /// Start-of-life behavior, invoked once when the entry is installed as a
    /// new incumbent (not on merge).
    pub(crate) fn on_start(&self, effect: &ActiveEffect, ctx: &mut MagicRoundContext<'_>) {
        match self {
            EffectKind::Concealment(kind) => kinds::concealment::on_start(*kind, effect, ctx),
            EffectKind::Lock => kinds::lock::on_start(effect, ctx),
            _ => {}
        }
    }

    /// Per-round side effect, invoked before the countdown decrement.
    pub(crate) fn magic_round(&self, effect: &mut ActiveEffect, ctx: &mut MagicRoundContext<'_>) {
        match self {
            EffectKind::ContinuousDamage(res) => kinds::damage::magic_round(*res, effect, ctx),
            EffectKind::Concealment(kind) => kinds::concealment::magic_round(*kind, effect, ctx),
            // Presence-based kinds: the live entry itself is the modifier,
            // layered on by GameState::effective_attribute.
            EffectKind::Drain(_) | EffectKind::Fortify(_) => {}
            // Lock holds its forced round and waits for the door trigger.
            EffectKind::Lock => {}
            // Instant; applied at cast via apply_instant.
            EffectKind::Heal(_) => {}
        }
    }

    /// One-shot application for instant kinds, run at cast time.
    ///
    /// Receives the target's bundle as well, so instant recovery can repair
    /// live incumbents (heal reduces like-stat drain magnitude).
    pub(crate) fn apply_instant(
        &self,
        effect: &ActiveEffect,
        target: Option<&mut crate::state::ActorState>,
        bundle: &mut super::bundle::EffectBundle,
        events: &mut Vec<super::round::MagicEvent>,
    ) {
        if let EffectKind::Heal(stat) = self {
            kinds::heal::apply(*stat, effect, target, bundle, events);
        }
    }

    /// Terminal behavior, invoked exactly once when the entry leaves the
    /// bundle (countdown expiry or explicit resignation).
    pub(crate) fn on_end(&self, effect: &ActiveEffect, ctx: &mut MagicRoundContext<'_>) {
        match self {
            EffectKind::Concealment(kind) => kinds::concealment::on_end(*kind, effect, ctx),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_for_every_kind() {
        let kinds = [
            EffectKind::ContinuousDamage(DamageResource::Fatigue),
            EffectKind::ContinuousDamage(DamageResource::Health),
            EffectKind::Drain(Stat::Endurance),
            EffectKind::Heal(Stat::Strength),
            EffectKind::Fortify(Stat::Luck),
            EffectKind::Concealment(ConcealmentKind::ChameleonTrue),
            EffectKind::Concealment(ConcealmentKind::InvisibilityNormal),
            EffectKind::Lock,
        ];
        for kind in kinds {
            assert_eq!(EffectKind::from_key(&kind.key()), Some(kind), "{}", kind.key());
        }
    }

    #[test]
    fn unknown_keys_decode_to_none() {
        assert_eq!(EffectKind::from_key("Disintegrate"), None);
        assert_eq!(EffectKind::from_key("Drain-Moxie"), None);
        assert_eq!(EffectKind::from_key(""), None);
    }

    #[test]
    fn like_kind_is_symmetric_and_type_scoped() {
        let drain_end = EffectKind::Drain(Stat::Endurance);
        let drain_str = EffectKind::Drain(Stat::Strength);
        let fatigue = EffectKind::ContinuousDamage(DamageResource::Fatigue);

        assert!(drain_end.is_like_kind(&drain_end));
        assert!(!drain_end.is_like_kind(&drain_str));
        assert!(!drain_end.is_like_kind(&fatigue));
        assert!(!fatigue.is_like_kind(&drain_end));
    }

    #[test]
    fn heal_never_matches_like_kind() {
        let heal = EffectKind::Heal(Stat::Strength);
        assert!(!heal.is_like_kind(&heal));
    }
}
