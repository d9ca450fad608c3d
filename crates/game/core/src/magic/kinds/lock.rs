//! Lock: chance-based door lock, consumed by door activation.
//!
//! A successful cast arms the effect with one forced round; it never counts
//! down. Activating a door while armed locks the door to the holder's level
//! and cancels the effect (see [`crate::magic::trigger_lock`]).

use crate::magic::entry::ActiveEffect;
use crate::magic::kind::EffectKind;
use crate::magic::properties::{
    ClassicKey, EffectCosts, EffectProperties, ElementFlags, MagicSkill, TargetFlags,
};
use crate::magic::round::{MagicEvent, MagicRoundContext};

pub(crate) fn properties() -> EffectProperties {
    EffectProperties {
        key: EffectKind::Lock.key(),
        classic_key: ClassicKey::new(16, 255),
        group_key: "lock",
        subgroup_key: None,
        support_duration: false,
        support_magnitude: false,
        support_chance: true,
        show_spell_icon: false,
        allowed_targets: TargetFlags::SELF,
        allowed_elements: ElementFlags::MAGIC_ONLY,
        magic_skill: MagicSkill::Mysticism,
        duration_costs: EffectCosts::NONE,
        magnitude_costs: EffectCosts::NONE,
        chance_costs: EffectCosts::with_gold(28, 120, 120),
    }
}

/// Merging a second Lock onto an armed one changes nothing.
pub(crate) fn add_state(_incumbent: &mut ActiveEffect, _candidate: &ActiveEffect) {}

pub(crate) fn on_start(_effect: &ActiveEffect, ctx: &mut MagicRoundContext<'_>) {
    ctx.events.push(MagicEvent::HudText {
        key: "readyToLock".to_string(),
    });
}
