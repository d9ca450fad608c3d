//! Actor and door state tracked per entity.

use bitflags::bitflags;

use super::attributes::Attributes;
use super::common::{EntityId, ResourceMeter};

bitflags! {
    /// Magical concealment states applied by active illusion effects.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ConcealmentFlags: u8 {
        const INVISIBLE_NORMAL = 1 << 0;
        const INVISIBLE_TRUE   = 1 << 1;
        const BLENDING_NORMAL  = 1 << 2;
        const BLENDING_TRUE    = 1 << 3;
    }
}

impl serde::Serialize for ConcealmentFlags {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.bits())
    }
}

impl<'de> serde::Deserialize<'de> for ConcealmentFlags {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bits = <u8 as serde::Deserialize>::deserialize(deserializer)?;
        Ok(ConcealmentFlags::from_bits_truncate(bits))
    }
}

/// One living entity that can cast and receive magic effects.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ActorState {
    pub id: EntityId,
    pub name: String,
    pub level: u32,
    pub attributes: Attributes,
    pub health: ResourceMeter,
    pub fatigue: ResourceMeter,
    pub spell_points: ResourceMeter,
    pub gold_pieces: u32,
    pub concealment: ConcealmentFlags,
}

impl ActorState {
    pub fn new(id: EntityId, name: impl Into<String>, level: u32) -> Self {
        Self {
            id,
            name: name.into(),
            level,
            attributes: Attributes::default(),
            health: ResourceMeter::full(100),
            fatigue: ResourceMeter::full(100),
            spell_points: ResourceMeter::full(50),
            gold_pieces: 0,
            concealment: ConcealmentFlags::empty(),
        }
    }

    pub fn with_gold(mut self, gold_pieces: u32) -> Self {
        self.gold_pieces = gold_pieces;
        self
    }
}

/// Minimal action-door state consumed by the Lock effect trigger.
///
/// Doors are world props; only the fields the lock/unlock path touches are
/// tracked here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct DoorState {
    pub is_open: bool,
    pub lock_value: u32,
}

impl DoorState {
    pub fn is_locked(&self) -> bool {
        self.lock_value > 0
    }
}
