//! Quest action types and the pattern registry.
//!
//! Each action type contributes a compiled pattern with named capture
//! groups, a constructor from a match, trigger or update behavior, and a
//! versioned save record. The registry tries each candidate pattern in
//! registration order; a line no pattern matches is a quest authoring fault
//! surfaced at compile time.

mod clear_task;
mod clicked;
mod drop_as_questor;
mod end_quest;
mod say;
mod start_task;

pub use clear_task::{ClearTask, ClearTaskRecord};
pub use clicked::{ClickedFoe, ClickedFoeRecord, ClickedNpc, ClickedNpcRecord};
pub use drop_as_questor::{DropAsQuestor, DropAsQuestorRecord};
pub use end_quest::{EndQuest, EndQuestRecord};
pub use say::{Say, SayRecord};
pub use start_task::{StartTask, StartTaskRecord};

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::message::StaticMessageTable;
use super::parser::ActionParseError;
use super::{Quest, QuestTickContext};

/// Compile-time services available while constructing actions.
pub struct QuestCompileContext<'a> {
    pub static_messages: &'a StaticMessageTable,
}

/// Completion signal returned by a non-trigger action's update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionStatus {
    Pending,
    Complete,
}

/// One parsed instruction within a quest task.
///
/// Pattern-derived identity fields are immutable after construction; only
/// runtime state (the owning slot's completion flag, clicked flags on
/// resources) changes during play.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum QuestAction {
    ClickedFoe(ClickedFoe),
    ClickedNpc(ClickedNpc),
    DropAsQuestor(DropAsQuestor),
    Say(Say),
    StartTask(StartTask),
    ClearTask(ClearTask),
    EndQuest(EndQuest),
}

impl QuestAction {
    /// Trigger actions gate task execution; the rest run once per activation.
    pub fn is_trigger_condition(&self) -> bool {
        matches!(self, QuestAction::ClickedFoe(_) | QuestAction::ClickedNpc(_))
    }

    /// Polls the trigger condition. Must be idempotent and safe to call
    /// every tick; once the owning task is triggered it short-circuits true.
    pub(crate) fn check_trigger(
        &self,
        already_triggered: bool,
        quest: &mut Quest,
        ctx: &mut QuestTickContext<'_>,
    ) -> bool {
        match self {
            QuestAction::ClickedFoe(action) => {
                action.check_trigger(already_triggered, quest, ctx)
            }
            QuestAction::ClickedNpc(action) => {
                action.check_trigger(already_triggered, quest, ctx)
            }
            // Non-trigger actions never gate a task.
            _ => false,
        }
    }

    /// Executes the action's side effects; the action reports completion.
    pub(crate) fn update(
        &self,
        quest: &mut Quest,
        ctx: &mut QuestTickContext<'_>,
    ) -> ActionStatus {
        match self {
            QuestAction::DropAsQuestor(action) => action.update(quest, ctx),
            QuestAction::Say(action) => action.update(quest, ctx),
            QuestAction::StartTask(action) => action.update(quest, ctx),
            QuestAction::ClearTask(action) => action.update(quest, ctx),
            QuestAction::EndQuest(action) => action.update(quest, ctx),
            // Trigger actions have no update behavior.
            QuestAction::ClickedFoe(_) | QuestAction::ClickedNpc(_) => ActionStatus::Complete,
        }
    }

    /// Captures this action as a versioned save record.
    pub fn save(&self) -> ActionRecord {
        match self {
            QuestAction::ClickedFoe(a) => ActionRecord::ClickedFoe(a.save()),
            QuestAction::ClickedNpc(a) => ActionRecord::ClickedNpc(a.save()),
            QuestAction::DropAsQuestor(a) => ActionRecord::DropAsQuestor(a.save()),
            QuestAction::Say(a) => ActionRecord::Say(a.save()),
            QuestAction::StartTask(a) => ActionRecord::StartTask(a.save()),
            QuestAction::ClearTask(a) => ActionRecord::ClearTask(a.save()),
            QuestAction::EndQuest(a) => ActionRecord::EndQuest(a.save()),
        }
    }

    /// Rebuilds an action from its save record, symmetric to [`save`].
    ///
    /// The restore path never re-runs pattern matching.
    ///
    /// [`save`]: QuestAction::save
    pub fn restore(record: &ActionRecord) -> Self {
        match record {
            ActionRecord::ClickedFoe(r) => QuestAction::ClickedFoe(ClickedFoe::restore(r)),
            ActionRecord::ClickedNpc(r) => QuestAction::ClickedNpc(ClickedNpc::restore(r)),
            ActionRecord::DropAsQuestor(r) => {
                QuestAction::DropAsQuestor(DropAsQuestor::restore(r))
            }
            ActionRecord::Say(r) => QuestAction::Say(Say::restore(r)),
            ActionRecord::StartTask(r) => QuestAction::StartTask(StartTask::restore(r)),
            ActionRecord::ClearTask(r) => QuestAction::ClearTask(ClearTask::restore(r)),
            ActionRecord::EndQuest(r) => QuestAction::EndQuest(EndQuest::restore(r)),
        }
    }
}

/// Persisted form of one action, tagged by type then by version.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ActionRecord {
    ClickedFoe(ClickedFoeRecord),
    ClickedNpc(ClickedNpcRecord),
    DropAsQuestor(DropAsQuestorRecord),
    Say(SayRecord),
    StartTask(StartTaskRecord),
    ClearTask(ClearTaskRecord),
    EndQuest(EndQuestRecord),
}

type ConstructFn =
    fn(&Captures<'_>, &QuestCompileContext<'_>) -> Result<QuestAction, ActionParseError>;

struct RegistryEntry {
    name: &'static str,
    pattern: &'static LazyLock<Regex>,
    construct: ConstructFn,
}

/// Ordered registry of action patterns.
pub struct ActionRegistry {
    entries: Vec<RegistryEntry>,
}

impl ActionRegistry {
    /// Registry with every built-in action type.
    pub fn standard() -> Self {
        Self {
            entries: vec![
                RegistryEntry {
                    name: "ClickedFoe",
                    pattern: &clicked::CLICKED_FOE_PATTERN,
                    construct: clicked::create_clicked_foe,
                },
                RegistryEntry {
                    name: "ClickedNpc",
                    pattern: &clicked::CLICKED_NPC_PATTERN,
                    construct: clicked::create_clicked_npc,
                },
                RegistryEntry {
                    name: "DropAsQuestor",
                    pattern: &drop_as_questor::PATTERN,
                    construct: drop_as_questor::create,
                },
                RegistryEntry {
                    name: "Say",
                    pattern: &say::PATTERN,
                    construct: say::create,
                },
                RegistryEntry {
                    name: "StartTask",
                    pattern: &start_task::PATTERN,
                    construct: start_task::create,
                },
                RegistryEntry {
                    name: "ClearTask",
                    pattern: &clear_task::PATTERN,
                    construct: clear_task::create,
                },
                RegistryEntry {
                    name: "EndQuest",
                    pattern: &end_quest::PATTERN,
                    construct: end_quest::create,
                },
            ],
        }
    }

    /// Compiles one quest-script line into a typed action.
    ///
    /// Per-candidate match failure is non-fatal; the next type is tried.
    /// Total failure across the registry is [`ActionParseError::NoMatch`].
    pub fn compile_line(
        &self,
        line: &str,
        ctx: &QuestCompileContext<'_>,
    ) -> Result<QuestAction, ActionParseError> {
        for entry in &self.entries {
            if let Some(caps) = entry.pattern.captures(line) {
                return (entry.construct)(&caps, ctx);
            }
        }
        Err(ActionParseError::NoMatch)
    }

    /// Names of every registered type whose pattern matches the line.
    ///
    /// Well-formed lines match exactly one; this surface exists so tests can
    /// assert pattern exclusivity across the registry.
    pub fn matching_types(&self, line: &str) -> Vec<&'static str> {
        self.entries
            .iter()
            .filter(|entry| entry.pattern.is_match(line))
            .map(|entry| entry.name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quest::Symbol;

    fn ctx_table() -> StaticMessageTable {
        let mut table = StaticMessageTable::new();
        table.insert("QuestComplete", 1004);
        table
    }

    #[test]
    fn each_well_formed_line_matches_exactly_one_type() {
        let registry = ActionRegistry::standard();
        let corpus = [
            "clicked foe aFoe",
            "clicked foe aFoe say 1020",
            "clicked foe aFoe say QuestComplete",
            "clicked foe aFoe and at least 50 gold otherwise do taskB",
            "clicked npc aNoble",
            "clicked npc aNoble say 1011",
            "drop aNoble as questor",
            "say 1020",
            "say QuestComplete",
            "start task taskB",
            "clear taskA taskB",
            "end quest",
        ];
        for line in corpus {
            let matches = registry.matching_types(line);
            assert_eq!(matches.len(), 1, "line {line:?} matched {matches:?}");
        }
    }

    #[test]
    fn malformed_lines_match_zero_types() {
        let registry = ActionRegistry::standard();
        let corpus = [
            "clicked foe",
            "clicked foe aFoe say",
            "pick up the sword",
            "start task",
            "drop as questor",
            "",
        ];
        for line in corpus {
            assert!(
                registry.matching_types(line).is_empty(),
                "line {line:?} unexpectedly matched"
            );
        }
    }

    #[test]
    fn clicked_foe_gold_line_extracts_all_fields() {
        let registry = ActionRegistry::standard();
        let table = ctx_table();
        let ctx = QuestCompileContext {
            static_messages: &table,
        };
        let action = registry
            .compile_line(
                "clicked foe aFoe and at least 50 gold otherwise do taskB",
                &ctx,
            )
            .unwrap();
        let QuestAction::ClickedFoe(action) = action else {
            panic!("wrong action type");
        };
        assert_eq!(action.npc_symbol, Symbol::new("aFoe"));
        assert_eq!(action.gold_amount, 50);
        assert_eq!(action.task_symbol, Symbol::new("taskB"));
        assert_eq!(action.id, 0);
    }

    #[test]
    fn say_resolves_static_message_names() {
        let registry = ActionRegistry::standard();
        let table = ctx_table();
        let ctx = QuestCompileContext {
            static_messages: &table,
        };

        let QuestAction::Say(resolved) =
            registry.compile_line("say QuestComplete", &ctx).unwrap()
        else {
            panic!("wrong action type");
        };
        assert_eq!(resolved.id, 1004);

        // Unresolvable name leaves the id unset.
        let QuestAction::Say(unresolved) =
            registry.compile_line("say NoSuchMessage", &ctx).unwrap()
        else {
            panic!("wrong action type");
        };
        assert_eq!(unresolved.id, 0);
    }

    #[test]
    fn unmatched_line_reports_no_match() {
        let registry = ActionRegistry::standard();
        let table = ctx_table();
        let ctx = QuestCompileContext {
            static_messages: &table,
        };
        assert_eq!(
            registry.compile_line("summon the harbinger", &ctx),
            Err(ActionParseError::NoMatch)
        );
    }

    #[test]
    fn every_action_record_round_trips() {
        let actions = [
            QuestAction::ClickedFoe(ClickedFoe {
                npc_symbol: Symbol::new("aFoe"),
                id: 1020,
                gold_amount: 50,
                task_symbol: Symbol::new("taskB"),
            }),
            QuestAction::ClickedNpc(ClickedNpc {
                npc_symbol: Symbol::new("aNoble"),
                id: 0,
                gold_amount: 0,
                task_symbol: Symbol::default(),
            }),
            QuestAction::DropAsQuestor(DropAsQuestor {
                target: Symbol::new("aNoble"),
            }),
            QuestAction::Say(Say { id: 1020 }),
            QuestAction::StartTask(StartTask {
                task_symbol: Symbol::new("taskB"),
            }),
            QuestAction::ClearTask(ClearTask {
                task_symbols: vec![Symbol::new("taskA"), Symbol::new("taskB")],
            }),
            QuestAction::EndQuest(EndQuest),
        ];
        for action in actions {
            let record = action.save();
            assert_eq!(QuestAction::restore(&record), action);
        }
    }
}
