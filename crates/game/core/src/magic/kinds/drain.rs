//! Drain family: permanent attribute debuff held until healed.
//!
//! A drain has no countdown; it pins a forced round and the live entry
//! itself is the modifier (layered on by `GameState::effective_attribute`).
//! Re-casting deepens the incumbent's magnitude.

use crate::magic::entry::ActiveEffect;
use crate::magic::kind::EffectKind;
use crate::magic::properties::{
    ClassicKey, EffectCosts, EffectProperties, ElementFlags, MagicSkill, TargetFlags,
};
use crate::state::Stat;

pub(crate) fn properties(stat: Stat) -> EffectProperties {
    EffectProperties {
        key: EffectKind::Drain(stat).key(),
        classic_key: ClassicKey::new(7, stat.index() as u8),
        group_key: "drain",
        subgroup_key: Some(stat.text_key()),
        support_duration: false,
        support_magnitude: true,
        support_chance: false,
        show_spell_icon: false,
        allowed_targets: TargetFlags::OTHER,
        allowed_elements: ElementFlags::all(),
        magic_skill: MagicSkill::Destruction,
        duration_costs: EffectCosts::NONE,
        magnitude_costs: EffectCosts::with_gold(8, 100, 116),
        chance_costs: EffectCosts::NONE,
    }
}

/// Deepen the incumbent's drain by the candidate's magnitude.
pub(crate) fn add_state(incumbent: &mut ActiveEffect, candidate: &ActiveEffect) {
    incumbent.increase_magnitude(candidate.magnitude());
}
