//! Concealment family: chameleon and invisibility.
//!
//! While an entry is live its flag is held on the target; ending the entry
//! (expiry or resignation) clears the flag.

use crate::magic::entry::ActiveEffect;
use crate::magic::kind::{ConcealmentKind, EffectKind};
use crate::magic::properties::{
    ClassicKey, EffectCosts, EffectProperties, ElementFlags, MagicSkill, TargetFlags,
};
use crate::magic::round::{MagicEvent, MagicRoundContext};
use crate::state::ConcealmentFlags;

pub(crate) fn properties(kind: ConcealmentKind) -> EffectProperties {
    let (group_key, subgroup_key, classic_key) = match kind {
        ConcealmentKind::ChameleonNormal => ("chameleon", "normal", ClassicKey::new(23, 0)),
        ConcealmentKind::ChameleonTrue => ("chameleon", "true", ClassicKey::new(23, 1)),
        ConcealmentKind::InvisibilityNormal => ("invisibility", "normal", ClassicKey::new(13, 0)),
        ConcealmentKind::InvisibilityTrue => ("invisibility", "true", ClassicKey::new(13, 1)),
    };
    EffectProperties {
        key: EffectKind::Concealment(kind).key(),
        classic_key,
        group_key,
        subgroup_key: Some(subgroup_key),
        support_duration: true,
        support_magnitude: false,
        support_chance: false,
        show_spell_icon: true,
        allowed_targets: TargetFlags::all(),
        allowed_elements: ElementFlags::MAGIC_ONLY,
        magic_skill: MagicSkill::Illusion,
        duration_costs: EffectCosts::new(40, 120),
        magnitude_costs: EffectCosts::NONE,
        chance_costs: EffectCosts::NONE,
    }
}

fn flag(kind: ConcealmentKind) -> ConcealmentFlags {
    match kind {
        ConcealmentKind::ChameleonNormal => ConcealmentFlags::BLENDING_NORMAL,
        ConcealmentKind::ChameleonTrue => ConcealmentFlags::BLENDING_TRUE,
        ConcealmentKind::InvisibilityNormal => ConcealmentFlags::INVISIBLE_NORMAL,
        ConcealmentKind::InvisibilityTrue => ConcealmentFlags::INVISIBLE_TRUE,
    }
}

fn start_message_key(kind: ConcealmentKind) -> &'static str {
    match kind {
        ConcealmentKind::ChameleonNormal | ConcealmentKind::ChameleonTrue => "youAreBlending",
        ConcealmentKind::InvisibilityNormal | ConcealmentKind::InvisibilityTrue => {
            "youAreInvisible"
        }
    }
}

/// Stack the candidate's rounds onto the incumbent.
pub(crate) fn add_state(incumbent: &mut ActiveEffect, candidate: &ActiveEffect) {
    incumbent.rounds_remaining += candidate.rounds_remaining;
}

pub(crate) fn on_start(
    kind: ConcealmentKind,
    _effect: &ActiveEffect,
    ctx: &mut MagicRoundContext<'_>,
) {
    if let Some(target) = ctx.target.as_deref_mut() {
        target.concealment.insert(flag(kind));
    }
    ctx.events.push(MagicEvent::HudText {
        key: start_message_key(kind).to_string(),
    });
}

pub(crate) fn magic_round(
    kind: ConcealmentKind,
    _effect: &mut ActiveEffect,
    ctx: &mut MagicRoundContext<'_>,
) {
    // Re-assert the flag in case the host cleared it (e.g. on zone change).
    if let Some(target) = ctx.target.as_deref_mut() {
        target.concealment.insert(flag(kind));
    }
}

pub(crate) fn on_end(
    kind: ConcealmentKind,
    _effect: &ActiveEffect,
    ctx: &mut MagicRoundContext<'_>,
) {
    if let Some(target) = ctx.target.as_deref_mut() {
        target.concealment.remove(flag(kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::magic::settings::EffectSettings;
    use crate::state::{ActorState, EntityId};

    #[test]
    fn start_sets_flag_and_queues_message() {
        let mut target = ActorState::new(EntityId(1), "sneak", 4);
        let mut events = Vec::new();
        let mut ctx = MagicRoundContext {
            target_id: EntityId(1),
            target: Some(&mut target),
            events: &mut events,
        };
        let effect = ActiveEffect::new(
            EffectKind::Concealment(ConcealmentKind::InvisibilityNormal),
            EffectSettings::new(5, 0, 0),
            None,
        );
        on_start(ConcealmentKind::InvisibilityNormal, &effect, &mut ctx);

        assert!(target.concealment.contains(ConcealmentFlags::INVISIBLE_NORMAL));
        assert!(matches!(
            &events[0],
            MagicEvent::HudText { key } if key == "youAreInvisible"
        ));
    }

    #[test]
    fn end_clears_only_its_own_flag() {
        let mut target = ActorState::new(EntityId(1), "sneak", 4);
        target.concealment =
            ConcealmentFlags::INVISIBLE_NORMAL | ConcealmentFlags::BLENDING_TRUE;
        let mut events = Vec::new();
        let mut ctx = MagicRoundContext {
            target_id: EntityId(1),
            target: Some(&mut target),
            events: &mut events,
        };
        let effect = ActiveEffect::new(
            EffectKind::Concealment(ConcealmentKind::InvisibilityNormal),
            EffectSettings::new(5, 0, 0),
            None,
        );
        on_end(ConcealmentKind::InvisibilityNormal, &effect, &mut ctx);

        assert!(!target.concealment.contains(ConcealmentFlags::INVISIBLE_NORMAL));
        assert!(target.concealment.contains(ConcealmentFlags::BLENDING_TRUE));
    }
}
