//! Start another task by symbol.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::quest::parser::{ActionParseError, group};
use crate::quest::{Quest, QuestTickContext, Symbol, TaskDirective};

use super::{ActionStatus, QuestAction, QuestCompileContext};

pub(crate) static PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^start task (?P<taskName>[a-zA-Z0-9_.]+)$").expect("valid regex")
});

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StartTask {
    pub task_symbol: Symbol,
}

pub(crate) fn create(
    caps: &Captures<'_>,
    _ctx: &QuestCompileContext<'_>,
) -> Result<QuestAction, ActionParseError> {
    Ok(QuestAction::StartTask(StartTask {
        task_symbol: Symbol::new(group(caps, "taskName")),
    }))
}

impl StartTask {
    pub(crate) fn update(
        &self,
        _quest: &mut Quest,
        ctx: &mut QuestTickContext<'_>,
    ) -> ActionStatus {
        ctx.directives
            .push(TaskDirective::Start(self.task_symbol.clone()));
        ActionStatus::Complete
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum StartTaskRecord {
    V1 { task_symbol: Symbol },
}

impl StartTask {
    pub(crate) fn save(&self) -> StartTaskRecord {
        StartTaskRecord::V1 {
            task_symbol: self.task_symbol.clone(),
        }
    }

    pub(crate) fn restore(record: &StartTaskRecord) -> Self {
        let StartTaskRecord::V1 { task_symbol } = record;
        Self {
            task_symbol: task_symbol.clone(),
        }
    }
}
