//! Quest resources addressable by symbol.
//!
//! Lookups return `Option`; an absent resource is a transient "not yet"
//! condition for triggers, never a fault.

use super::symbol::Symbol;

/// A hostile quest entity the player can click (attack/interact).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Foe {
    pub symbol: Symbol,
    pub has_player_clicked: bool,
}

impl Foe {
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            has_player_clicked: false,
        }
    }
}

/// A friendly quest entity.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Npc {
    pub symbol: Symbol,
    pub has_player_clicked: bool,
    /// Whether this NPC currently offers the quest.
    pub is_questor: bool,
}

impl Npc {
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            has_player_clicked: false,
            is_questor: false,
        }
    }

    pub fn questor(symbol: Symbol) -> Self {
        Self {
            symbol,
            has_player_clicked: false,
            is_questor: true,
        }
    }
}

/// An item tracked by the quest.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuestItem {
    pub symbol: Symbol,
}

impl QuestItem {
    pub fn new(symbol: Symbol) -> Self {
        Self { symbol }
    }
}
