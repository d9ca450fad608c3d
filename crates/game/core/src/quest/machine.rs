//! Quest compilation and scheduling.

use super::actions::{ActionRegistry, QuestCompileContext};
use super::message::{QuestMessage, StaticMessageTable};
use super::parser::ActionParseError;
use super::record::QuestRecord;
use super::resource::{Foe, Npc, QuestItem};
use super::symbol::Symbol;
use super::task::Task;
use super::{Quest, QuestEvent};
use crate::state::ActorState;

/// Structured quest source, ready for compilation.
///
/// Content loaders produce this from script files; tests build it directly.
#[derive(Clone, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct QuestSource {
    pub name: String,
    pub foes: Vec<Symbol>,
    pub npcs: Vec<Symbol>,
    /// NPCs that start as questors.
    pub questors: Vec<Symbol>,
    pub items: Vec<Symbol>,
    pub messages: Vec<QuestMessage>,
    pub tasks: Vec<TaskSource>,
}

/// One task definition: a symbol and its raw action lines.
#[derive(Clone, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct TaskSource {
    pub symbol: Symbol,
    pub lines: Vec<String>,
}

/// Script authoring faults surfaced at quest compile time.
///
/// A quest that fails to compile does not load; faults are never silently
/// dropped.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum QuestCompileError {
    #[error("quest {quest}, task {task}, line {line:?}: {source}")]
    BadLine {
        quest: String,
        task: Symbol,
        line: String,
        #[source]
        source: ActionParseError,
    },

    #[error("quest {quest}: duplicate task symbol {symbol}")]
    DuplicateTask { quest: String, symbol: Symbol },

    #[error("quest {quest}: duplicate message id {id}")]
    DuplicateMessage { quest: String, id: i32 },
}

/// Owns the action registry, the static message table, and every live quest.
pub struct QuestMachine {
    registry: ActionRegistry,
    static_messages: StaticMessageTable,
    quests: Vec<Quest>,
}

impl QuestMachine {
    pub fn new(static_messages: StaticMessageTable) -> Self {
        Self {
            registry: ActionRegistry::standard(),
            static_messages,
            quests: Vec::new(),
        }
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    pub fn static_messages(&self) -> &StaticMessageTable {
        &self.static_messages
    }

    /// Compiles a quest source into a live quest.
    ///
    /// Every task line must match exactly one registered action pattern;
    /// the first fault aborts compilation with its location.
    pub fn compile(&self, source: &QuestSource) -> Result<Quest, QuestCompileError> {
        let mut quest = Quest::new(source.name.clone());

        for symbol in &source.foes {
            quest.add_foe(Foe::new(symbol.clone()));
        }
        for symbol in &source.npcs {
            quest.add_npc(Npc::new(symbol.clone()));
        }
        for symbol in &source.questors {
            quest.add_npc(Npc::questor(symbol.clone()));
        }
        for symbol in &source.items {
            quest.add_item(QuestItem::new(symbol.clone()));
        }
        for message in &source.messages {
            if quest.get_message(message.id).is_some() {
                return Err(QuestCompileError::DuplicateMessage {
                    quest: source.name.clone(),
                    id: message.id,
                });
            }
            quest.add_message(message.clone());
        }

        let ctx = QuestCompileContext {
            static_messages: &self.static_messages,
        };
        for task_source in &source.tasks {
            if quest.get_task(&task_source.symbol).is_some() {
                return Err(QuestCompileError::DuplicateTask {
                    quest: source.name.clone(),
                    symbol: task_source.symbol.clone(),
                });
            }
            let mut actions = Vec::with_capacity(task_source.lines.len());
            for line in &task_source.lines {
                let action = self.registry.compile_line(line, &ctx).map_err(|source_err| {
                    QuestCompileError::BadLine {
                        quest: source.name.clone(),
                        task: task_source.symbol.clone(),
                        line: line.clone(),
                        source: source_err,
                    }
                })?;
                actions.push(action);
            }
            quest.add_task(Task::new(task_source.symbol.clone(), actions));
        }

        Ok(quest)
    }

    /// Adds a compiled (or restored) quest to the schedule.
    pub fn start_quest(&mut self, quest: Quest) {
        self.quests.push(quest);
    }

    pub fn quests(&self) -> &[Quest] {
        &self.quests
    }

    pub fn quest(&self, name: &str) -> Option<&Quest> {
        self.quests.iter().find(|q| q.name == name)
    }

    pub fn quest_mut(&mut self, name: &str) -> Option<&mut Quest> {
        self.quests.iter_mut().find(|q| q.name == name)
    }

    /// Drops quests that have ended.
    pub fn remove_finished(&mut self) {
        self.quests.retain(|q| !q.is_done());
    }

    /// Advances every live quest by one tick.
    pub fn tick(&mut self, player: &mut ActorState) -> Vec<QuestEvent> {
        let mut events = Vec::new();
        for quest in &mut self.quests {
            quest.update(player, &mut events);
        }
        events
    }

    /// Captures every live quest as a versioned record.
    pub fn save(&self) -> Vec<QuestRecord> {
        self.quests.iter().map(QuestRecord::save).collect()
    }

    /// Replaces live quests from save records.
    ///
    /// An empty record list leaves a fresh machine; restore never re-runs
    /// pattern matching or compilation.
    pub fn restore(&mut self, records: &[QuestRecord]) {
        self.quests = records.iter().map(QuestRecord::restore).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quest::record::TaskRecord;
    use crate::quest::ActionRecord;
    use crate::state::EntityId;

    fn static_messages() -> StaticMessageTable {
        let mut table = StaticMessageTable::new();
        table.insert("QuestComplete", 1004);
        table
    }

    fn gold_quest_source() -> QuestSource {
        QuestSource {
            name: "GOLD_GATE".to_string(),
            foes: vec![Symbol::new("aFoe")],
            npcs: vec![],
            questors: vec![Symbol::new("aNoble")],
            items: vec![],
            messages: vec![QuestMessage::new(1020, "paidUp", "You pay the toll.")],
            tasks: vec![
                TaskSource {
                    symbol: Symbol::new("_main_"),
                    lines: vec![
                        "clicked foe aFoe and at least 50 gold otherwise do _poor_".to_string(),
                        "say 1020".to_string(),
                        "drop aNoble as questor".to_string(),
                        "end quest".to_string(),
                    ],
                },
                TaskSource {
                    symbol: Symbol::new("_poor_"),
                    lines: vec!["say QuestComplete".to_string()],
                },
            ],
        }
    }

    fn player() -> ActorState {
        ActorState::new(EntityId::PLAYER, "player", 5)
    }

    #[test]
    fn compile_builds_tasks_in_definition_order() {
        let machine = QuestMachine::new(static_messages());
        let quest = machine.compile(&gold_quest_source()).unwrap();
        assert_eq!(quest.tasks().len(), 2);
        assert_eq!(quest.tasks()[0].symbol, Symbol::new("_main_"));
        assert!(!quest.tasks()[0].triggered);
    }

    #[test]
    fn compile_rejects_unknown_action_lines_with_location() {
        let machine = QuestMachine::new(static_messages());
        let mut source = gold_quest_source();
        source.tasks[0].lines.push("summon the harbinger".to_string());

        let err = machine.compile(&source).unwrap_err();
        assert!(matches!(
            err,
            QuestCompileError::BadLine { ref line, ref task, .. }
                if line == "summon the harbinger" && *task == Symbol::new("_main_")
        ));
    }

    #[test]
    fn compile_rejects_malformed_numbers() {
        let machine = QuestMachine::new(static_messages());
        let mut source = gold_quest_source();
        // 10 digits overflows i32; the pattern matches but the field doesn't parse.
        source.tasks[0].lines[0] =
            "clicked foe aFoe and at least 9999999999 gold otherwise do _poor_".to_string();

        let err = machine.compile(&source).unwrap_err();
        assert!(matches!(
            err,
            QuestCompileError::BadLine {
                source: ActionParseError::InvalidNumber { field: "goldAmount", .. },
                ..
            }
        ));
    }

    #[test]
    fn compile_rejects_duplicate_tasks() {
        let machine = QuestMachine::new(static_messages());
        let mut source = gold_quest_source();
        let duplicate = source.tasks[1].clone();
        source.tasks.push(duplicate);

        assert!(matches!(
            machine.compile(&source).unwrap_err(),
            QuestCompileError::DuplicateTask { .. }
        ));
    }

    #[test]
    fn insufficient_gold_starts_fallback_and_leaves_gold_untouched() {
        let mut machine = QuestMachine::new(static_messages());
        let quest = machine.compile(&gold_quest_source()).unwrap();
        machine.start_quest(quest);

        let mut player = player().with_gold(30);
        machine
            .quest_mut("GOLD_GATE")
            .unwrap()
            .set_foe_clicked(&Symbol::new("aFoe"));

        let events = machine.tick(&mut player);

        assert_eq!(player.gold_pieces, 30);
        let quest = machine.quest("GOLD_GATE").unwrap();
        assert!(!quest.get_task(&Symbol::new("_main_")).unwrap().triggered);
        assert!(quest.get_task(&Symbol::new("_poor_")).unwrap().triggered);
        assert!(events.iter().any(|e| matches!(
            e,
            QuestEvent::TaskStarted { task, .. } if *task == Symbol::new("_poor_")
        )));
    }

    #[test]
    fn sufficient_gold_deducts_once_and_fires_trigger() {
        let mut machine = QuestMachine::new(static_messages());
        let quest = machine.compile(&gold_quest_source()).unwrap();
        machine.start_quest(quest);

        let mut player = player().with_gold(80);
        machine
            .quest_mut("GOLD_GATE")
            .unwrap()
            .set_foe_clicked(&Symbol::new("aFoe"));

        let events = machine.tick(&mut player);

        assert_eq!(player.gold_pieces, 30);
        let quest = machine.quest("GOLD_GATE").unwrap();
        assert!(quest.get_task(&Symbol::new("_main_")).unwrap().triggered);
        assert!(quest.is_done());
        assert!(events.iter().any(|e| matches!(
            e,
            QuestEvent::MessagePopup { id: 1020, text: Some(_), .. }
        )));
        assert!(events.iter().any(|e| matches!(
            e,
            QuestEvent::QuestorDropped { npc, .. } if *npc == Symbol::new("aNoble")
        )));
        assert!(events.iter().any(|e| matches!(e, QuestEvent::QuestEnded { .. })));

        // Ticking a finished quest changes nothing.
        let gold_before = player.gold_pieces;
        assert!(machine.tick(&mut player).is_empty());
        assert_eq!(player.gold_pieces, gold_before);
    }

    #[test]
    fn trigger_latches_once_task_is_triggered() {
        let mut machine = QuestMachine::new(static_messages());
        let source = QuestSource {
            name: "LATCH".to_string(),
            foes: vec![Symbol::new("aFoe")],
            tasks: vec![TaskSource {
                symbol: Symbol::new("_main_"),
                lines: vec!["clicked foe aFoe".to_string(), "say 1020".to_string()],
            }],
            ..Default::default()
        };
        let quest = machine.compile(&source).unwrap();
        machine.start_quest(quest);

        let mut player = player();
        machine
            .quest_mut("LATCH")
            .unwrap()
            .set_foe_clicked(&Symbol::new("aFoe"));
        machine.tick(&mut player);
        assert!(machine.quest("LATCH").unwrap().tasks()[0].triggered);

        // The click re-arm scheduled by the trigger lands on the next tick,
        // reverting the world condition; the task stays triggered.
        machine.tick(&mut player);
        let quest = machine.quest("LATCH").unwrap();
        assert!(!quest.get_foe(&Symbol::new("aFoe")).unwrap().has_player_clicked);
        assert!(quest.tasks()[0].triggered);
    }

    #[test]
    fn cleared_task_polls_its_trigger_again() {
        let mut machine = QuestMachine::new(static_messages());
        let source = QuestSource {
            name: "REARM".to_string(),
            foes: vec![Symbol::new("aFoe")],
            tasks: vec![
                TaskSource {
                    symbol: Symbol::new("_watch_"),
                    lines: vec!["clicked foe aFoe say 1020".to_string()],
                },
                TaskSource {
                    symbol: Symbol::new("_reset_"),
                    lines: vec!["clear _watch_".to_string()],
                },
            ],
            ..Default::default()
        };
        let quest = machine.compile(&source).unwrap();
        machine.start_quest(quest);

        let mut player = player();
        machine
            .quest_mut("REARM")
            .unwrap()
            .set_foe_clicked(&Symbol::new("aFoe"));
        machine.tick(&mut player);
        assert!(machine.quest("REARM").unwrap().tasks()[0].triggered);

        // External start of the reset task clears the watch task.
        let mut events = Vec::new();
        machine
            .quest_mut("REARM")
            .unwrap()
            .start_task(&Symbol::new("_reset_"), &mut events);
        machine.tick(&mut player);
        assert!(!machine.quest("REARM").unwrap().tasks()[0].triggered);

        // A fresh click re-triggers it.
        machine
            .quest_mut("REARM")
            .unwrap()
            .set_foe_clicked(&Symbol::new("aFoe"));
        machine.tick(&mut player);
        assert!(machine.quest("REARM").unwrap().tasks()[0].triggered);
    }

    #[test]
    fn machine_save_restore_round_trips_mid_quest_state() {
        let mut machine = QuestMachine::new(static_messages());
        let quest = machine.compile(&gold_quest_source()).unwrap();
        machine.start_quest(quest);

        let mut player = player().with_gold(30);
        machine
            .quest_mut("GOLD_GATE")
            .unwrap()
            .set_foe_clicked(&Symbol::new("aFoe"));
        machine.tick(&mut player);

        let records = machine.save();
        let mut restored = QuestMachine::new(static_messages());
        restored.restore(&records);

        assert_eq!(restored.quests(), machine.quests());
        // Restored actions carry their tagged type names.
        let QuestRecord::V1 { tasks, .. } = &records[0];
        let TaskRecord::V1 { actions, .. } = &tasks[0];
        assert!(matches!(actions[0].action, ActionRecord::ClickedFoe(_)));
    }
}
