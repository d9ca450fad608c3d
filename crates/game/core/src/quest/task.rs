//! Task state machine.
//!
//! `Untriggered -> Triggered -> (each non-trigger action independently)
//! Executing -> Complete`. Trigger actions are polled in order; a task
//! triggers exactly once, and only an explicit clear re-arms it.

use super::actions::{ActionStatus, QuestAction};
use super::{Quest, QuestEvent, QuestTickContext};
use crate::quest::Symbol;

/// One action plus its runtime completion flag.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ActionSlot {
    pub action: QuestAction,
    pub complete: bool,
}

impl ActionSlot {
    pub fn new(action: QuestAction) -> Self {
        Self {
            action,
            complete: false,
        }
    }
}

/// Named bag of ordered actions within a quest.
#[derive(Clone, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct Task {
    pub symbol: Symbol,
    pub triggered: bool,
    pub actions: Vec<ActionSlot>,
}

impl Task {
    pub fn new(symbol: Symbol, actions: Vec<QuestAction>) -> Self {
        Self {
            symbol,
            triggered: false,
            actions: actions.into_iter().map(ActionSlot::new).collect(),
        }
    }

    /// True when every non-trigger action has reported completion.
    pub fn is_done(&self) -> bool {
        self.actions
            .iter()
            .filter(|slot| !slot.action.is_trigger_condition())
            .all(|slot| slot.complete)
    }

    /// Explicit re-arm: back to untriggered with all actions incomplete.
    pub fn clear(&mut self) {
        self.triggered = false;
        for slot in &mut self.actions {
            slot.complete = false;
        }
    }

    /// Advances this task by one tick.
    ///
    /// The task is detached from the quest while it runs (the caller swaps
    /// it out), so actions receive the quest itself mutably.
    pub(crate) fn update(&mut self, quest: &mut Quest, ctx: &mut QuestTickContext<'_>) {
        let mut slots = std::mem::take(&mut self.actions);

        if !self.triggered {
            for slot in slots.iter().filter(|s| s.action.is_trigger_condition()) {
                if slot.action.check_trigger(self.triggered, quest, ctx) {
                    self.triggered = true;
                    ctx.events.push(QuestEvent::TaskTriggered {
                        quest: quest.name.clone(),
                        task: self.symbol.clone(),
                    });
                    break;
                }
            }
        }

        if self.triggered {
            for slot in slots
                .iter_mut()
                .filter(|s| !s.action.is_trigger_condition() && !s.complete)
            {
                if slot.action.update(quest, ctx) == ActionStatus::Complete {
                    slot.complete = true;
                }
            }
        }

        self.actions = slots;
    }
}
