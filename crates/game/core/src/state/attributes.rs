//! Classic attribute block shared by all actors.

use crate::config::GameConfig;

/// The eight classic attributes.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum Stat {
    Strength,
    Intelligence,
    Willpower,
    Agility,
    Endurance,
    Personality,
    Speed,
    Luck,
}

impl Stat {
    /// All attributes in canonical order.
    pub const ALL: [Stat; 8] = [
        Stat::Strength,
        Stat::Intelligence,
        Stat::Willpower,
        Stat::Agility,
        Stat::Endurance,
        Stat::Personality,
        Stat::Speed,
        Stat::Luck,
    ];

    /// Localized-text key for the attribute name.
    pub fn text_key(self) -> &'static str {
        match self {
            Stat::Strength => "strength",
            Stat::Intelligence => "intelligence",
            Stat::Willpower => "willpower",
            Stat::Agility => "agility",
            Stat::Endurance => "endurance",
            Stat::Personality => "personality",
            Stat::Speed => "speed",
            Stat::Luck => "luck",
        }
    }

    /// Canonical index used for table lookups.
    pub fn index(self) -> usize {
        match self {
            Stat::Strength => 0,
            Stat::Intelligence => 1,
            Stat::Willpower => 2,
            Stat::Agility => 3,
            Stat::Endurance => 4,
            Stat::Personality => 5,
            Stat::Speed => 6,
            Stat::Luck => 7,
        }
    }
}

/// Attribute values for an actor.
///
/// Only base values live here. Temporary modifiers from active effects
/// (fortify, drain) are layered on by [`crate::state::GameState::effective_attribute`]
/// so that expiring an effect never needs a compensating write-back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Attributes {
    values: [i32; 8],
}

impl Attributes {
    /// Creates an attribute block with every stat set to `value`.
    pub fn uniform(value: i32) -> Self {
        Self { values: [value; 8] }
    }

    pub fn get(&self, stat: Stat) -> i32 {
        self.values[stat.index()]
    }

    pub fn set(&mut self, stat: Stat, value: i32) {
        self.values[stat.index()] =
            value.clamp(GameConfig::MIN_ATTRIBUTE, GameConfig::MAX_ATTRIBUTE);
    }
}

impl Default for Attributes {
    fn default() -> Self {
        Self::uniform(50)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_clamps_to_valid_range() {
        let mut attrs = Attributes::default();
        attrs.set(Stat::Luck, 250);
        assert_eq!(attrs.get(Stat::Luck), GameConfig::MAX_ATTRIBUTE);
        attrs.set(Stat::Luck, -10);
        assert_eq!(attrs.get(Stat::Luck), GameConfig::MIN_ATTRIBUTE);
    }

    #[test]
    fn stat_round_trips_through_strings() {
        for stat in Stat::ALL {
            let text = stat.to_string();
            assert_eq!(text.parse::<Stat>().unwrap(), stat);
        }
    }
}
