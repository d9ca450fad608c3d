//! Versioned save records for active effect entries.

use crate::state::EntityId;

use super::entry::ActiveEffect;
use super::kind::EffectKind;
use super::settings::EffectSettings;

/// Persisted form of one [`ActiveEffect`].
///
/// The record stores the canonical key string plus the packed classic key so
/// legacy tooling can index entries without decoding the kind. New versions
/// add variants; [`EffectRecord::restore`] migrates old shapes forward.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum EffectRecord {
    V1 {
        key: String,
        classic_key: u16,
        rounds_remaining: u32,
        settings: EffectSettings,
        magnitude: i32,
        chance_success: bool,
        caster: Option<EntityId>,
    },
}

impl EffectRecord {
    /// Captures a live entry.
    pub fn save(effect: &ActiveEffect) -> Self {
        Self::V1 {
            key: effect.key(),
            classic_key: effect.kind.properties().classic_key.packed(),
            rounds_remaining: effect.rounds_remaining,
            settings: effect.settings,
            magnitude: effect.magnitude(),
            chance_success: effect.chance_success,
            caster: effect.caster,
        }
    }

    /// Rebuilds the live entry, or `None` when the key is not recognized
    /// (stale save data from a removed effect kind).
    pub fn restore(&self) -> Option<ActiveEffect> {
        let Self::V1 {
            key,
            rounds_remaining,
            settings,
            magnitude,
            chance_success,
            caster,
            ..
        } = self;
        let kind = EffectKind::from_key(key)?;
        Some(ActiveEffect::from_saved(
            kind,
            *settings,
            *rounds_remaining,
            *magnitude,
            *chance_success,
            *caster,
        ))
    }

    pub fn key(&self) -> &str {
        let Self::V1 { key, .. } = self;
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::magic::DamageResource;
    use crate::state::Stat;

    #[test]
    fn record_round_trips_every_observable_field() {
        use crate::magic::ConcealmentKind;

        let effects = [
            ActiveEffect::new(
                EffectKind::ContinuousDamage(DamageResource::Fatigue),
                EffectSettings::new(5, 12, 0),
                Some(EntityId(4)),
            ),
            ActiveEffect::new(
                EffectKind::ContinuousDamage(DamageResource::Health),
                EffectSettings::new(2, 4, 0),
                None,
            ),
            ActiveEffect::new(
                EffectKind::Drain(Stat::Endurance),
                EffectSettings::new(0, 20, 0),
                None,
            ),
            ActiveEffect::new(
                EffectKind::Fortify(Stat::Speed),
                EffectSettings::new(8, 15, 0),
                Some(EntityId(1)),
            ),
            ActiveEffect::new(
                EffectKind::Concealment(ConcealmentKind::InvisibilityTrue),
                EffectSettings::new(6, 0, 0),
                Some(EntityId(1)),
            ),
            ActiveEffect::new(EffectKind::Lock, EffectSettings::new(0, 0, 65), Some(EntityId(0)))
                .with_chance_success(false),
        ];
        for effect in effects {
            let record = EffectRecord::save(&effect);
            let restored = record.restore().unwrap();
            assert_eq!(restored, effect);
        }
    }

    #[test]
    fn record_serializes_under_its_version_tag() {
        let effect = ActiveEffect::new(
            EffectKind::Fortify(Stat::Luck),
            EffectSettings::new(3, 7, 0),
            None,
        );
        let json = serde_json::to_string(&EffectRecord::save(&effect)).unwrap();
        assert!(json.starts_with("{\"V1\":"));
        assert!(json.contains("Fortify-Luck"));
    }
}
