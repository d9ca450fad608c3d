//! Tombstone the owning quest.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::quest::parser::ActionParseError;
use crate::quest::{Quest, QuestTickContext, TaskDirective};

use super::{ActionStatus, QuestAction, QuestCompileContext};

pub(crate) static PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^end quest$").expect("valid regex"));

#[derive(Clone, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct EndQuest;

pub(crate) fn create(
    _caps: &Captures<'_>,
    _ctx: &QuestCompileContext<'_>,
) -> Result<QuestAction, ActionParseError> {
    Ok(QuestAction::EndQuest(EndQuest))
}

impl EndQuest {
    pub(crate) fn update(
        &self,
        _quest: &mut Quest,
        ctx: &mut QuestTickContext<'_>,
    ) -> ActionStatus {
        ctx.directives.push(TaskDirective::EndQuest);
        ActionStatus::Complete
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum EndQuestRecord {
    V1,
}

impl EndQuest {
    pub(crate) fn save(&self) -> EndQuestRecord {
        EndQuestRecord::V1
    }

    pub(crate) fn restore(_record: &EndQuestRecord) -> Self {
        Self
    }
}
