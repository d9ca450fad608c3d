//! Quest messages and the global static message table.

use std::collections::HashMap;

/// One message owned by a quest, shown as a popup by id.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuestMessage {
    pub id: i32,
    pub name: String,
    pub text: String,
}

impl QuestMessage {
    pub fn new(id: i32, name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Global table mapping well-known message names to ids.
///
/// Quest scripts may reference a message indirectly by name (`say idName`);
/// the name resolves through this table at compile time. A missing mapping
/// leaves the id unset (0), which downstream logic treats as "no message to
/// show".
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StaticMessageTable {
    by_name: HashMap<String, i32>,
}

impl StaticMessageTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, id: i32) {
        self.by_name.insert(name.into(), id);
    }

    pub fn get(&self, name: &str) -> Option<i32> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl FromIterator<(String, i32)> for StaticMessageTable {
    fn from_iter<I: IntoIterator<Item = (String, i32)>>(iter: I) -> Self {
        Self {
            by_name: iter.into_iter().collect(),
        }
    }
}
