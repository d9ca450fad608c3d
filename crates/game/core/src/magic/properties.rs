//! Static properties shared by every instance of an effect kind.

use bitflags::bitflags;

bitflags! {
    /// Target categories an effect may be cast on.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct TargetFlags: u8 {
        const CASTER_ONLY           = 1 << 0;
        const BY_TOUCH              = 1 << 1;
        const SINGLE_TARGET_AT_RANGE = 1 << 2;
        const AREA_AROUND_CASTER    = 1 << 3;
        const AREA_AT_RANGE         = 1 << 4;
    }
}

impl TargetFlags {
    /// Targets that resolve to the caster itself.
    pub const SELF: Self = Self::CASTER_ONLY.union(Self::AREA_AROUND_CASTER);
    /// Targets that resolve to another entity.
    pub const OTHER: Self = Self::BY_TOUCH
        .union(Self::SINGLE_TARGET_AT_RANGE)
        .union(Self::AREA_AT_RANGE);

    pub fn allows_self(self) -> bool {
        self.intersects(Self::SELF)
    }

    pub fn allows_other(self) -> bool {
        self.intersects(Self::OTHER)
    }
}

bitflags! {
    /// Elemental delivery channels an effect may ride on.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ElementFlags: u8 {
        const FIRE   = 1 << 0;
        const COLD   = 1 << 1;
        const POISON = 1 << 2;
        const SHOCK  = 1 << 3;
        const MAGIC  = 1 << 4;
    }
}

impl ElementFlags {
    pub const MAGIC_ONLY: Self = Self::MAGIC;
}

/// School of magic an effect belongs to.
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
pub enum MagicSkill {
    Alteration,
    Destruction,
    Illusion,
    Mysticism,
    Restoration,
    Thaumaturgy,
}

/// Classic (group, subgroup) compatibility identifier.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub struct ClassicKey {
    pub group: u8,
    pub subgroup: u8,
}

impl ClassicKey {
    pub const fn new(group: u8, subgroup: u8) -> Self {
        Self { group, subgroup }
    }

    /// Packed form used by legacy save data.
    pub const fn packed(self) -> u16 {
        ((self.group as u16) << 8) | self.subgroup as u16
    }

    pub const fn from_packed(value: u16) -> Self {
        Self {
            group: (value >> 8) as u8,
            subgroup: (value & 0xff) as u8,
        }
    }
}

/// Spell-point cost coefficients for one castable aspect of an effect.
///
/// Consumed by the external casting system when pricing a spell; the core
/// never evaluates them after cast time.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize,
)]
pub struct EffectCosts {
    pub cost_a: u32,
    pub cost_b: u32,
    pub offset_gold: u32,
}

impl EffectCosts {
    pub const NONE: Self = Self {
        cost_a: 0,
        cost_b: 0,
        offset_gold: 0,
    };

    pub const fn new(cost_a: u32, cost_b: u32) -> Self {
        Self {
            cost_a,
            cost_b,
            offset_gold: 0,
        }
    }

    pub const fn with_gold(cost_a: u32, cost_b: u32, offset_gold: u32) -> Self {
        Self {
            cost_a,
            cost_b,
            offset_gold,
        }
    }

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

/// Static properties describing one effect kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectProperties {
    /// Canonical string identifier, e.g. `"ContinuousDamage-Fatigue"`.
    pub key: String,
    /// Classic compatibility identifier.
    pub classic_key: ClassicKey,
    /// Localized-text keys for the group and optional subgroup name.
    pub group_key: &'static str,
    pub subgroup_key: Option<&'static str>,
    pub support_duration: bool,
    pub support_magnitude: bool,
    pub support_chance: bool,
    pub show_spell_icon: bool,
    pub allowed_targets: TargetFlags,
    pub allowed_elements: ElementFlags,
    pub magic_skill: MagicSkill,
    pub duration_costs: EffectCosts,
    pub magnitude_costs: EffectCosts,
    pub chance_costs: EffectCosts,
}

impl EffectProperties {
    /// Display name resolved through the text oracle, falling back to the
    /// raw keys when no localization is available.
    pub fn display_name(&self, text: &dyn crate::env::TextOracle) -> String {
        let group = text
            .localized_text(self.group_key)
            .unwrap_or(self.group_key);
        match self.subgroup_key {
            Some(sub) => {
                let sub = text.localized_text(sub).unwrap_or(sub);
                format!("{group} ({sub})")
            }
            None => group.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_key_packs_and_unpacks() {
        let key = ClassicKey::new(16, 255);
        assert_eq!(key.packed(), 0x10ff);
        assert_eq!(ClassicKey::from_packed(0x10ff), key);
    }

    #[test]
    fn target_flag_groups_do_not_overlap() {
        assert!(!TargetFlags::SELF.intersects(TargetFlags::OTHER));
        assert!(TargetFlags::all().allows_self());
        assert!(TargetFlags::all().allows_other());
    }
}
