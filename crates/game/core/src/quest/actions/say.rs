//! Show a message popup by id or static-message name.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::quest::parser::{ActionParseError, group, parse_int};
use crate::quest::{Quest, QuestTickContext};

use super::{ActionStatus, QuestAction, QuestCompileContext};

pub(crate) static PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^say (?:(?P<id>\d+)|(?P<idName>[a-zA-Z_][a-zA-Z0-9_]*))$").expect("valid regex")
});

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Say {
    pub id: i32,
}

pub(crate) fn create(
    caps: &Captures<'_>,
    ctx: &QuestCompileContext<'_>,
) -> Result<QuestAction, ActionParseError> {
    let mut id = parse_int("id", group(caps, "id"))?;
    let id_name = group(caps, "idName");
    if id == 0 && !id_name.is_empty() {
        id = ctx.static_messages.get(id_name).unwrap_or(0);
    }
    Ok(QuestAction::Say(Say { id }))
}

impl Say {
    pub(crate) fn update(
        &self,
        quest: &mut Quest,
        ctx: &mut QuestTickContext<'_>,
    ) -> ActionStatus {
        // Id 0 means the indirect name never resolved; nothing to show.
        if self.id != 0 {
            quest.show_message_popup(self.id, ctx.events);
        }
        ActionStatus::Complete
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum SayRecord {
    V1 { id: i32 },
}

impl Say {
    pub(crate) fn save(&self) -> SayRecord {
        SayRecord::V1 { id: self.id }
    }

    pub(crate) fn restore(record: &SayRecord) -> Self {
        let SayRecord::V1 { id } = record;
        Self { id: *id }
    }
}
