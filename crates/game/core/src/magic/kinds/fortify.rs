//! Fortify Attribute family: timed stat buff.
//!
//! The live entry is the modifier; `GameState::effective_attribute` layers
//! it over the base value, so expiry needs no compensating write-back.

use crate::magic::entry::ActiveEffect;
use crate::magic::kind::EffectKind;
use crate::magic::properties::{
    ClassicKey, EffectCosts, EffectProperties, ElementFlags, MagicSkill, TargetFlags,
};
use crate::state::Stat;

pub(crate) fn properties(stat: Stat) -> EffectProperties {
    EffectProperties {
        key: EffectKind::Fortify(stat).key(),
        classic_key: ClassicKey::new(9, stat.index() as u8),
        group_key: "fortifyAttribute",
        subgroup_key: Some(stat.text_key()),
        support_duration: true,
        support_magnitude: true,
        support_chance: false,
        show_spell_icon: true,
        allowed_targets: TargetFlags::all(),
        allowed_elements: ElementFlags::MAGIC_ONLY,
        magic_skill: MagicSkill::Restoration,
        duration_costs: EffectCosts::new(28, 100),
        magnitude_costs: EffectCosts::new(40, 120),
        chance_costs: EffectCosts::NONE,
    }
}

/// Stack the candidate's rounds onto the incumbent.
pub(crate) fn add_state(incumbent: &mut ActiveEffect, candidate: &ActiveEffect) {
    incumbent.rounds_remaining += candidate.rounds_remaining;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::magic::settings::EffectSettings;

    #[test]
    fn merge_extends_duration_without_touching_magnitude() {
        let mut incumbent = ActiveEffect::new(
            EffectKind::Fortify(Stat::Luck),
            EffectSettings::new(4, 15, 0),
            None,
        );
        let candidate = ActiveEffect::new(
            EffectKind::Fortify(Stat::Luck),
            EffectSettings::new(6, 40, 0),
            None,
        );
        add_state(&mut incumbent, &candidate);
        assert_eq!(incumbent.rounds_remaining, 10);
        assert_eq!(incumbent.magnitude(), 15);
    }
}
