//! Reset tasks to their untriggered state.
//!
//! This is the explicit re-arm: a cleared task polls its trigger conditions
//! again, and its actions run again once it re-triggers.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::quest::parser::{ActionParseError, group};
use crate::quest::{Quest, QuestTickContext, Symbol, TaskDirective};

use super::{ActionStatus, QuestAction, QuestCompileContext};

pub(crate) static PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^clear (?P<taskNames>[a-zA-Z0-9_.]+(?: [a-zA-Z0-9_.]+)*)$").expect("valid regex")
});

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClearTask {
    pub task_symbols: Vec<Symbol>,
}

pub(crate) fn create(
    caps: &Captures<'_>,
    _ctx: &QuestCompileContext<'_>,
) -> Result<QuestAction, ActionParseError> {
    let task_symbols = group(caps, "taskNames")
        .split_whitespace()
        .map(Symbol::new)
        .collect();
    Ok(QuestAction::ClearTask(ClearTask { task_symbols }))
}

impl ClearTask {
    pub(crate) fn update(
        &self,
        _quest: &mut Quest,
        ctx: &mut QuestTickContext<'_>,
    ) -> ActionStatus {
        for symbol in &self.task_symbols {
            ctx.directives.push(TaskDirective::Clear(symbol.clone()));
        }
        ActionStatus::Complete
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ClearTaskRecord {
    V1 { task_symbols: Vec<Symbol> },
}

impl ClearTask {
    pub(crate) fn save(&self) -> ClearTaskRecord {
        ClearTaskRecord::V1 {
            task_symbols: self.task_symbols.clone(),
        }
    }

    pub(crate) fn restore(record: &ClearTaskRecord) -> Self {
        let ClearTaskRecord::V1 { task_symbols } = record;
        Self {
            task_symbols: task_symbols.clone(),
        }
    }
}
