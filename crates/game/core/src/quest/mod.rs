//! Quest action scheduler.
//!
//! Parses textual quest-script lines into typed actions via pattern
//! matching, and drives each quest's task graph forward by polling trigger
//! conditions and executing non-trigger actions once per tick.
//!
//! # Module Structure
//!
//! - `symbol`, `resource`, `message`: quest-scoped names and resources
//! - `parser`: field extraction helpers and parse errors
//! - `actions`: action types, the pattern registry, save records
//! - `task`: the task state machine
//! - `machine`: [`QuestMachine`] compiling sources and ticking quests
//! - `record`: versioned quest/task save records

pub mod actions;
mod machine;
mod message;
pub mod parser;
mod record;
mod resource;
mod symbol;
mod task;

pub use actions::{ActionRecord, ActionRegistry, QuestAction, QuestCompileContext};
pub use machine::{QuestCompileError, QuestMachine, QuestSource, TaskSource};
pub use message::{QuestMessage, StaticMessageTable};
pub use record::{ActionSlotRecord, QuestRecord, TaskRecord};
pub use resource::{Foe, Npc, QuestItem};
pub use symbol::Symbol;
pub use task::{ActionSlot, Task};

use std::collections::HashMap;

use crate::state::ActorState;

/// Observable outcomes of quest processing.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum QuestEvent {
    TaskTriggered { quest: String, task: Symbol },
    TaskStarted { quest: String, task: Symbol },
    TaskCleared { quest: String, task: Symbol },
    MessagePopup {
        quest: String,
        id: i32,
        text: Option<String>,
    },
    QuestorDropped { quest: String, npc: Symbol },
    QuestEnded { quest: String },
}

/// Deferred mutations actions request against the owning quest's task graph.
///
/// Applied after the emitting task finishes its tick, so a task can address
/// itself and ordering matches definition order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum TaskDirective {
    Start(Symbol),
    Clear(Symbol),
    EndQuest,
}

/// Mutable services handed to actions during a tick.
pub struct QuestTickContext<'a> {
    pub player: &'a mut ActorState,
    pub events: &'a mut Vec<QuestEvent>,
    pub(crate) directives: &'a mut Vec<TaskDirective>,
}

/// One quest: task graph, symbol tables, and messages.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Quest {
    pub name: String,
    tasks: Vec<Task>,
    foes: HashMap<Symbol, Foe>,
    npcs: HashMap<Symbol, Npc>,
    items: HashMap<Symbol, QuestItem>,
    messages: HashMap<i32, QuestMessage>,
    pending_click_rearms: Vec<Symbol>,
    done: bool,
}

impl Quest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tasks: Vec::new(),
            foes: HashMap::new(),
            npcs: HashMap::new(),
            items: HashMap::new(),
            messages: HashMap::new(),
            pending_click_rearms: Vec::new(),
            done: false,
        }
    }

    pub fn add_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn add_foe(&mut self, foe: Foe) {
        self.foes.insert(foe.symbol.clone(), foe);
    }

    pub fn add_npc(&mut self, npc: Npc) {
        self.npcs.insert(npc.symbol.clone(), npc);
    }

    pub fn add_item(&mut self, item: QuestItem) {
        self.items.insert(item.symbol.clone(), item);
    }

    pub fn add_message(&mut self, message: QuestMessage) {
        self.messages.insert(message.id, message);
    }

    pub fn get_foe(&self, symbol: &Symbol) -> Option<&Foe> {
        self.foes.get(symbol)
    }

    pub fn get_npc(&self, symbol: &Symbol) -> Option<&Npc> {
        self.npcs.get(symbol)
    }

    pub fn get_item(&self, symbol: &Symbol) -> Option<&QuestItem> {
        self.items.get(symbol)
    }

    pub fn get_task(&self, symbol: &Symbol) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.symbol == symbol)
    }

    pub fn get_task_mut(&mut self, symbol: &Symbol) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| &t.symbol == symbol)
    }

    pub fn get_message(&self, id: i32) -> Option<&QuestMessage> {
        self.messages.get(&id)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Marks a foe as clicked by the player. Returns false when the symbol
    /// does not resolve.
    pub fn set_foe_clicked(&mut self, symbol: &Symbol) -> bool {
        match self.foes.get_mut(symbol) {
            Some(foe) => {
                foe.has_player_clicked = true;
                true
            }
            None => false,
        }
    }

    /// Marks an NPC as clicked by the player.
    pub fn set_npc_clicked(&mut self, symbol: &Symbol) -> bool {
        match self.npcs.get_mut(symbol) {
            Some(npc) => {
                npc.has_player_clicked = true;
                true
            }
            None => false,
        }
    }

    /// Queues a click re-arm, applied at the start of the next tick so a
    /// trigger never observes its own re-arm within the tick that scheduled
    /// it.
    pub fn schedule_click_rearm(&mut self, symbol: Symbol) {
        self.pending_click_rearms.push(symbol);
    }

    /// Emits a message popup event, resolving the text when the quest owns
    /// the message.
    pub fn show_message_popup(&self, id: i32, events: &mut Vec<QuestEvent>) {
        events.push(QuestEvent::MessagePopup {
            quest: self.name.clone(),
            id,
            text: self.messages.get(&id).map(|m| m.text.clone()),
        });
    }

    /// Strips questor status from an NPC. An absent NPC is a no-op.
    pub fn drop_questor(&mut self, symbol: &Symbol, events: &mut Vec<QuestEvent>) {
        if let Some(npc) = self.npcs.get_mut(symbol) {
            if npc.is_questor {
                npc.is_questor = false;
                events.push(QuestEvent::QuestorDropped {
                    quest: self.name.clone(),
                    npc: symbol.clone(),
                });
            }
        }
    }

    /// Sets a task triggered outside its own trigger polling (start task
    /// actions, gold-check fallback).
    pub fn start_task(&mut self, symbol: &Symbol, events: &mut Vec<QuestEvent>) {
        let name = self.name.clone();
        if let Some(task) = self.get_task_mut(symbol) {
            if !task.triggered {
                task.triggered = true;
                events.push(QuestEvent::TaskStarted {
                    quest: name,
                    task: symbol.clone(),
                });
            }
        }
    }

    /// Re-arms a task: untriggered, all actions incomplete.
    pub fn clear_task(&mut self, symbol: &Symbol, events: &mut Vec<QuestEvent>) {
        let name = self.name.clone();
        if let Some(task) = self.get_task_mut(symbol) {
            task.clear();
            events.push(QuestEvent::TaskCleared {
                quest: name,
                task: symbol.clone(),
            });
        }
    }

    /// Advances every task by one tick.
    pub fn update(&mut self, player: &mut ActorState, events: &mut Vec<QuestEvent>) {
        if self.done {
            return;
        }

        // Re-arms scheduled during the previous tick take effect now.
        let rearms = std::mem::take(&mut self.pending_click_rearms);
        for symbol in rearms {
            if let Some(foe) = self.foes.get_mut(&symbol) {
                foe.has_player_clicked = false;
            }
            if let Some(npc) = self.npcs.get_mut(&symbol) {
                npc.has_player_clicked = false;
            }
        }

        let mut directives = Vec::new();
        for i in 0..self.tasks.len() {
            if self.done {
                break;
            }
            // Detach the task so actions can mutate the rest of the quest.
            let mut task = std::mem::take(&mut self.tasks[i]);
            {
                let mut ctx = QuestTickContext {
                    player: &mut *player,
                    events: &mut *events,
                    directives: &mut directives,
                };
                task.update(self, &mut ctx);
            }
            self.tasks[i] = task;

            for directive in directives.drain(..) {
                self.apply_directive(directive, events);
            }
        }
    }

    fn apply_directive(&mut self, directive: TaskDirective, events: &mut Vec<QuestEvent>) {
        match directive {
            TaskDirective::Start(symbol) => self.start_task(&symbol, events),
            TaskDirective::Clear(symbol) => self.clear_task(&symbol, events),
            TaskDirective::EndQuest => {
                if !self.done {
                    self.done = true;
                    events.push(QuestEvent::QuestEnded {
                        quest: self.name.clone(),
                    });
                }
            }
        }
    }
}
