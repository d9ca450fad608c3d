//! Strip questor status from an NPC.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::quest::parser::{ActionParseError, group};
use crate::quest::{Quest, QuestTickContext, Symbol};

use super::{ActionStatus, QuestAction, QuestCompileContext};

pub(crate) static PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^drop (?P<target>[a-zA-Z0-9_.-]+) as questor$").expect("valid regex")
});

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DropAsQuestor {
    pub target: Symbol,
}

pub(crate) fn create(
    caps: &Captures<'_>,
    _ctx: &QuestCompileContext<'_>,
) -> Result<QuestAction, ActionParseError> {
    Ok(QuestAction::DropAsQuestor(DropAsQuestor {
        target: Symbol::new(group(caps, "target")),
    }))
}

impl DropAsQuestor {
    pub(crate) fn update(
        &self,
        quest: &mut Quest,
        ctx: &mut QuestTickContext<'_>,
    ) -> ActionStatus {
        quest.drop_questor(&self.target, ctx.events);
        ActionStatus::Complete
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum DropAsQuestorRecord {
    V1 { target: Symbol },
}

impl DropAsQuestor {
    pub(crate) fn save(&self) -> DropAsQuestorRecord {
        DropAsQuestorRecord::V1 {
            target: self.target.clone(),
        }
    }

    pub(crate) fn restore(record: &DropAsQuestorRecord) -> Self {
        let DropAsQuestorRecord::V1 { target } = record;
        Self {
            target: target.clone(),
        }
    }
}
