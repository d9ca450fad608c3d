//! Versioned save records for quests and tasks.

use std::collections::HashMap;

use super::actions::{ActionRecord, QuestAction};
use super::message::QuestMessage;
use super::resource::{Foe, Npc, QuestItem};
use super::symbol::Symbol;
use super::task::{ActionSlot, Task};
use super::Quest;

/// Persisted form of one action slot.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ActionSlotRecord {
    pub action: ActionRecord,
    pub complete: bool,
}

/// Persisted form of one task.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum TaskRecord {
    V1 {
        symbol: Symbol,
        triggered: bool,
        actions: Vec<ActionSlotRecord>,
    },
}

impl TaskRecord {
    pub fn save(task: &Task) -> Self {
        Self::V1 {
            symbol: task.symbol.clone(),
            triggered: task.triggered,
            actions: task
                .actions
                .iter()
                .map(|slot| ActionSlotRecord {
                    action: slot.action.save(),
                    complete: slot.complete,
                })
                .collect(),
        }
    }

    pub fn restore(&self) -> Task {
        let Self::V1 {
            symbol,
            triggered,
            actions,
        } = self;
        Task {
            symbol: symbol.clone(),
            triggered: *triggered,
            actions: actions
                .iter()
                .map(|slot| ActionSlot {
                    action: QuestAction::restore(&slot.action),
                    complete: slot.complete,
                })
                .collect(),
        }
    }
}

/// Persisted form of one quest.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum QuestRecord {
    V1 {
        name: String,
        foes: Vec<Foe>,
        npcs: Vec<Npc>,
        items: Vec<QuestItem>,
        messages: Vec<QuestMessage>,
        tasks: Vec<TaskRecord>,
        pending_click_rearms: Vec<Symbol>,
        done: bool,
    },
}

impl QuestRecord {
    pub fn save(quest: &Quest) -> Self {
        // Resource tables are sorted for byte-stable save files.
        let mut foes: Vec<Foe> = quest.foes.values().cloned().collect();
        foes.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        let mut npcs: Vec<Npc> = quest.npcs.values().cloned().collect();
        npcs.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        let mut items: Vec<QuestItem> = quest.items.values().cloned().collect();
        items.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        let mut messages: Vec<QuestMessage> = quest.messages.values().cloned().collect();
        messages.sort_by_key(|m| m.id);

        Self::V1 {
            name: quest.name.clone(),
            foes,
            npcs,
            items,
            messages,
            tasks: quest.tasks.iter().map(TaskRecord::save).collect(),
            pending_click_rearms: quest.pending_click_rearms.clone(),
            done: quest.done,
        }
    }

    /// Rebuilds the quest, symmetric to [`QuestRecord::save`].
    pub fn restore(&self) -> Quest {
        let Self::V1 {
            name,
            foes,
            npcs,
            items,
            messages,
            tasks,
            pending_click_rearms,
            done,
        } = self;
        Quest {
            name: name.clone(),
            tasks: tasks.iter().map(TaskRecord::restore).collect(),
            foes: foes
                .iter()
                .map(|f| (f.symbol.clone(), f.clone()))
                .collect::<HashMap<_, _>>(),
            npcs: npcs
                .iter()
                .map(|n| (n.symbol.clone(), n.clone()))
                .collect::<HashMap<_, _>>(),
            items: items
                .iter()
                .map(|i| (i.symbol.clone(), i.clone()))
                .collect::<HashMap<_, _>>(),
            messages: messages.iter().map(|m| (m.id, m.clone())).collect(),
            pending_click_rearms: pending_click_rearms.clone(),
            done: *done,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quest::actions::{ClickedFoe, Say};

    #[test]
    fn quest_record_round_trips_tasks_and_resources() {
        let mut quest = Quest::new("TEST_QUEST");
        quest.add_foe(Foe::new(Symbol::new("aFoe")));
        quest.add_npc(Npc::questor(Symbol::new("aNoble")));
        quest.add_message(QuestMessage::new(1020, "questComplete", "The deed is done."));
        quest.add_task(Task::new(
            Symbol::new("_main_"),
            vec![
                QuestAction::ClickedFoe(ClickedFoe {
                    npc_symbol: Symbol::new("aFoe"),
                    id: 1020,
                    gold_amount: 0,
                    task_symbol: Symbol::default(),
                }),
                QuestAction::Say(Say { id: 1020 }),
            ],
        ));
        quest.set_foe_clicked(&Symbol::new("aFoe"));
        quest.schedule_click_rearm(Symbol::new("aFoe"));

        let record = QuestRecord::save(&quest);
        let restored = record.restore();
        assert_eq!(restored, quest);
    }

    #[test]
    fn restored_task_keeps_trigger_and_completion_state() {
        let mut task = Task::new(
            Symbol::new("_pay_"),
            vec![QuestAction::Say(Say { id: 7 })],
        );
        task.triggered = true;
        task.actions[0].complete = true;

        let restored = TaskRecord::save(&task).restore();
        assert_eq!(restored, task);
        assert!(restored.is_done());
    }
}
