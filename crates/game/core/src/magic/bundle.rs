//! Per-entity bundle of active effects enforcing the incumbency invariant.

use arrayvec::ArrayVec;

use crate::config::GameConfig;

use super::entry::ActiveEffect;
use super::kind::EffectKind;
use super::record::EffectRecord;
use super::round::{MagicEvent, MagicRoundContext};

/// How an [`EffectBundle::assign`] call resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignOutcome {
    /// Candidate became a new incumbent.
    Installed,
    /// Candidate was folded into an existing incumbent.
    Merged,
    /// Bundle is full and no incumbent matched.
    Rejected,
}

/// Active effects on one target entity.
///
/// Invariant: for a given like-kind group at most one entry is incumbent at
/// any time; further entries of the same group merge into the incumbent via
/// the kind's `add_state` policy instead of coexisting.
#[derive(Clone, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct EffectBundle {
    entries: ArrayVec<ActiveEffect, { GameConfig::MAX_ACTIVE_EFFECTS }>,
}

impl EffectBundle {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Adds a candidate effect, merging into a like-kind incumbent when one
    /// exists.
    pub fn assign(&mut self, candidate: ActiveEffect) -> AssignOutcome {
        if let Some(incumbent) = self
            .entries
            .iter_mut()
            .find(|e| e.kind.is_like_kind(&candidate.kind))
        {
            let kind = incumbent.kind;
            kind.add_state(incumbent, &candidate);
            return AssignOutcome::Merged;
        }
        if self.entries.is_full() {
            return AssignOutcome::Rejected;
        }
        self.entries.push(candidate);
        AssignOutcome::Installed
    }

    /// Advances every entry by one round: per-round side effect first, then
    /// the countdown decrement (skipped for forced-round kinds), removing
    /// entries whose countdown reached zero.
    pub(crate) fn advance_round(&mut self, ctx: &mut MagicRoundContext<'_>) {
        let mut i = 0;
        while i < self.entries.len() {
            let kind = self.entries[i].kind;
            kind.magic_round(&mut self.entries[i], ctx);

            let expired = if kind.uses_forced_rounds() {
                false
            } else {
                let entry = &mut self.entries[i];
                entry.rounds_remaining = entry.rounds_remaining.saturating_sub(1);
                entry.rounds_remaining == 0
            };

            if expired {
                let effect = self.entries.remove(i);
                effect.kind.on_end(&effect, ctx);
                ctx.events.push(MagicEvent::EffectEnded {
                    target: ctx.target_id,
                    key: effect.key(),
                });
            } else {
                i += 1;
            }
        }
    }

    /// Explicit early removal, independent of the round countdown.
    ///
    /// Returns true when an entry of the exact kind was present.
    pub fn resign(&mut self, kind: EffectKind, ctx: &mut MagicRoundContext<'_>) -> bool {
        let Some(index) = self.entries.iter().position(|e| e.kind == kind) else {
            return false;
        };
        let effect = self.entries.remove(index);
        effect.kind.on_end(&effect, ctx);
        ctx.events.push(MagicEvent::EffectEnded {
            target: ctx.target_id,
            key: effect.key(),
        });
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.entries.iter()
    }

    pub fn find_kind(&self, kind: EffectKind) -> Option<&ActiveEffect> {
        self.entries.iter().find(|e| e.kind == kind)
    }

    pub(crate) fn find_kind_mut(&mut self, kind: EffectKind) -> Option<&mut ActiveEffect> {
        self.entries.iter_mut().find(|e| e.kind == kind)
    }

    /// Removes an entry without firing terminal behavior (used when another
    /// effect consumes it, e.g. heal cancelling a drain).
    pub(crate) fn remove_kind(&mut self, kind: EffectKind) -> Option<ActiveEffect> {
        let index = self.entries.iter().position(|e| e.kind == kind)?;
        Some(self.entries.remove(index))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Captures every entry as a versioned save record.
    pub fn save(&self) -> Vec<EffectRecord> {
        self.entries.iter().map(EffectRecord::save).collect()
    }

    /// Rebuilds a bundle from save records.
    ///
    /// Entries are assumed to be already-resolved incumbents, so merge logic
    /// is not re-invoked. Records with unrecognized keys are skipped and
    /// returned for the caller to surface.
    pub fn restore(records: &[EffectRecord]) -> (Self, Vec<String>) {
        let mut bundle = Self::empty();
        let mut skipped = Vec::new();
        for record in records {
            match record.restore() {
                Some(effect) if !bundle.entries.is_full() => bundle.entries.push(effect),
                Some(_) => skipped.push(record.key().to_string()),
                None => skipped.push(record.key().to_string()),
            }
        }
        (bundle, skipped)
    }
}
