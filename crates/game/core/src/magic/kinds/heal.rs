//! Heal family: instant attribute recovery.
//!
//! Healing an attribute repairs drain damage for that stat: the like-stat
//! drain incumbent loses magnitude, and is removed once fully healed.

use crate::magic::bundle::EffectBundle;
use crate::magic::entry::ActiveEffect;
use crate::magic::kind::EffectKind;
use crate::magic::properties::{
    ClassicKey, EffectCosts, EffectProperties, ElementFlags, MagicSkill, TargetFlags,
};
use crate::magic::round::MagicEvent;
use crate::state::{ActorState, Stat};

pub(crate) fn properties(stat: Stat) -> EffectProperties {
    EffectProperties {
        key: EffectKind::Heal(stat).key(),
        classic_key: ClassicKey::new(10, stat.index() as u8),
        group_key: "heal",
        subgroup_key: Some(stat.text_key()),
        support_duration: false,
        support_magnitude: true,
        support_chance: false,
        show_spell_icon: true,
        allowed_targets: TargetFlags::all(),
        allowed_elements: ElementFlags::MAGIC_ONLY,
        magic_skill: MagicSkill::Restoration,
        duration_costs: EffectCosts::NONE,
        magnitude_costs: EffectCosts::new(40, 28),
        chance_costs: EffectCosts::NONE,
    }
}

pub(crate) fn apply(
    stat: Stat,
    effect: &ActiveEffect,
    target: Option<&mut ActorState>,
    bundle: &mut EffectBundle,
    events: &mut Vec<MagicEvent>,
) {
    let Some(target) = target else {
        return;
    };

    let magnitude = effect.magnitude().max(0);
    let Some(drain) = bundle.find_kind_mut(EffectKind::Drain(stat)) else {
        // Nothing drained; the attribute is already at its permanent value.
        return;
    };

    let healed = magnitude.min(drain.magnitude());
    let remaining = drain.reduce_magnitude(magnitude);
    let key = drain.key();
    events.push(MagicEvent::AttributeHealed {
        target: target.id,
        stat,
        amount: healed,
    });
    if remaining == 0 {
        // Fully healed; the drain incumbent resigns.
        bundle.remove_kind(EffectKind::Drain(stat));
        events.push(MagicEvent::EffectEnded {
            target: target.id,
            key,
        });
    }
}
