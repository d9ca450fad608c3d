//! Continuous Damage family: burn a resource pool every round.

use crate::magic::entry::ActiveEffect;
use crate::magic::kind::{DamageResource, EffectKind};
use crate::magic::properties::{
    ClassicKey, EffectCosts, EffectProperties, ElementFlags, MagicSkill, TargetFlags,
};
use crate::magic::round::{MagicEvent, MagicRoundContext};

pub(crate) fn properties(resource: DamageResource) -> EffectProperties {
    let (subgroup, subgroup_key) = match resource {
        DamageResource::Fatigue => (1, "fatigue"),
        DamageResource::Health => (0, "health"),
    };
    EffectProperties {
        key: EffectKind::ContinuousDamage(resource).key(),
        classic_key: ClassicKey::new(1, subgroup),
        group_key: "continuousDamage",
        subgroup_key: Some(subgroup_key),
        support_duration: true,
        support_magnitude: true,
        support_chance: false,
        show_spell_icon: true,
        allowed_targets: TargetFlags::OTHER,
        allowed_elements: ElementFlags::all(),
        magic_skill: MagicSkill::Destruction,
        duration_costs: EffectCosts::new(20, 8),
        magnitude_costs: EffectCosts::new(40, 28),
        chance_costs: EffectCosts::NONE,
    }
}

/// Stack the candidate's rounds onto the incumbent.
pub(crate) fn add_state(incumbent: &mut ActiveEffect, candidate: &ActiveEffect) {
    incumbent.rounds_remaining += candidate.rounds_remaining;
}

pub(crate) fn magic_round(
    resource: DamageResource,
    effect: &mut ActiveEffect,
    ctx: &mut MagicRoundContext<'_>,
) {
    // The peered entity can be gone while the bundle lives on; skip silently.
    let Some(target) = ctx.target.as_deref_mut() else {
        return;
    };

    let amount = effect.magnitude().max(0) as u32;
    match resource {
        DamageResource::Fatigue => target.fatigue.drain(amount),
        DamageResource::Health => target.health.drain(amount),
    }
    ctx.events.push(MagicEvent::ResourceDamaged {
        target: ctx.target_id,
        resource,
        amount,
        caster: effect.caster,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::magic::settings::EffectSettings;
    use crate::state::{ActorState, EntityId};

    fn effect(rounds: u32, magnitude: i32) -> ActiveEffect {
        ActiveEffect::new(
            EffectKind::ContinuousDamage(DamageResource::Fatigue),
            EffectSettings::new(rounds, magnitude, 0),
            Some(EntityId(7)),
        )
    }

    #[test]
    fn round_application_drains_fatigue() {
        let mut target = ActorState::new(EntityId(1), "victim", 3);
        let mut events = Vec::new();
        let mut ctx = MagicRoundContext {
            target_id: EntityId(1),
            target: Some(&mut target),
            events: &mut events,
        };

        let mut e = effect(3, 10);
        magic_round(DamageResource::Fatigue, &mut e, &mut ctx);

        assert_eq!(target.fatigue.current, 90);
        assert!(matches!(
            events[0],
            MagicEvent::ResourceDamaged {
                amount: 10,
                resource: DamageResource::Fatigue,
                caster: Some(EntityId(7)),
                ..
            }
        ));
    }

    #[test]
    fn missing_target_skips_without_event() {
        let mut events = Vec::new();
        let mut ctx = MagicRoundContext {
            target_id: EntityId(1),
            target: None,
            events: &mut events,
        };
        let mut e = effect(3, 10);
        magic_round(DamageResource::Fatigue, &mut e, &mut ctx);
        assert!(events.is_empty());
    }

    #[test]
    fn merge_stacks_rounds_and_keeps_incumbent_magnitude() {
        let mut incumbent = effect(3, 10);
        let candidate = effect(2, 25);
        add_state(&mut incumbent, &candidate);
        assert_eq!(incumbent.rounds_remaining, 5);
        assert_eq!(incumbent.magnitude(), 10);
    }
}
