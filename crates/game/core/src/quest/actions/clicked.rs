//! Click trigger conditions for foes and NPCs.
//!
//! Both actions gate a task on the player having clicked a quest resource,
//! with an optional gold threshold diverting to a fallback task and an
//! optional message popup.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::quest::parser::{ActionParseError, group, parse_int};
use crate::quest::{Quest, QuestTickContext, Symbol, TaskDirective};

use super::{QuestAction, QuestCompileContext};

pub(crate) static CLICKED_FOE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^clicked foe (?P<aFoe>[a-zA-Z0-9_.-]+)(?: and at least (?P<goldAmount>\d+) gold otherwise do (?P<taskName>[a-zA-Z0-9_.]+)| say (?:(?P<id>\d+)|(?P<idName>[a-zA-Z_][a-zA-Z0-9_]*)))?$",
    )
    .expect("valid regex")
});

pub(crate) static CLICKED_NPC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^clicked npc (?P<anNPC>[a-zA-Z0-9_.-]+)(?: and at least (?P<goldAmount>\d+) gold otherwise do (?P<taskName>[a-zA-Z0-9_.]+)| say (?:(?P<id>\d+)|(?P<idName>[a-zA-Z_][a-zA-Z0-9_]*)))?$",
    )
    .expect("valid regex")
});

/// Handles the player clicking a Foe.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClickedFoe {
    pub npc_symbol: Symbol,
    pub id: i32,
    pub gold_amount: i32,
    pub task_symbol: Symbol,
}

/// Handles the player clicking an NPC.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClickedNpc {
    pub npc_symbol: Symbol,
    pub id: i32,
    pub gold_amount: i32,
    pub task_symbol: Symbol,
}

fn resolve_id(
    caps: &Captures<'_>,
    ctx: &QuestCompileContext<'_>,
) -> Result<i32, ActionParseError> {
    let mut id = parse_int("id", group(caps, "id"))?;
    // Resolve static message name back to an id; an unknown name leaves the
    // id unset, which downstream treats as "no message to show".
    let id_name = group(caps, "idName");
    if id == 0 && !id_name.is_empty() {
        id = ctx.static_messages.get(id_name).unwrap_or(0);
    }
    Ok(id)
}

pub(crate) fn create_clicked_foe(
    caps: &Captures<'_>,
    ctx: &QuestCompileContext<'_>,
) -> Result<QuestAction, ActionParseError> {
    Ok(QuestAction::ClickedFoe(ClickedFoe {
        npc_symbol: Symbol::new(group(caps, "aFoe")),
        id: resolve_id(caps, ctx)?,
        gold_amount: parse_int("goldAmount", group(caps, "goldAmount"))?,
        task_symbol: Symbol::new(group(caps, "taskName")),
    }))
}

pub(crate) fn create_clicked_npc(
    caps: &Captures<'_>,
    ctx: &QuestCompileContext<'_>,
) -> Result<QuestAction, ActionParseError> {
    Ok(QuestAction::ClickedNpc(ClickedNpc {
        npc_symbol: Symbol::new(group(caps, "anNPC")),
        id: resolve_id(caps, ctx)?,
        gold_amount: parse_int("goldAmount", group(caps, "goldAmount"))?,
        task_symbol: Symbol::new(group(caps, "taskName")),
    }))
}

/// Shared click resolution once the clicked flag has been observed.
///
/// When a gold threshold and fallback task are set, the player must hold the
/// gold *at check time*: enough gold deducts it and fires the trigger; short
/// funds deducts nothing, starts the fallback task, and leaves the trigger
/// unfired (it may run again next tick).
fn resolve_click(
    symbol: &Symbol,
    id: i32,
    gold_amount: i32,
    task_symbol: &Symbol,
    quest: &mut Quest,
    ctx: &mut QuestTickContext<'_>,
) -> bool {
    if gold_amount > 0 && !task_symbol.is_empty() {
        if ctx.player.gold_pieces >= gold_amount as u32 {
            ctx.player.gold_pieces -= gold_amount as u32;
        } else {
            ctx.directives.push(TaskDirective::Start(task_symbol.clone()));
            return false;
        }
    }

    if id != 0 {
        quest.show_message_popup(id, ctx.events);
    }

    // Rearm the click after the current task; the flag stays set for the
    // rest of this tick.
    quest.schedule_click_rearm(symbol.clone());

    true
}

impl ClickedFoe {
    pub(crate) fn check_trigger(
        &self,
        already_triggered: bool,
        quest: &mut Quest,
        ctx: &mut QuestTickContext<'_>,
    ) -> bool {
        // Always true once the owning task has triggered; re-arming is an
        // explicit external operation.
        if already_triggered {
            return true;
        }
        let clicked = match quest.get_foe(&self.npc_symbol) {
            Some(foe) => foe.has_player_clicked,
            None => return false,
        };
        if !clicked {
            return false;
        }
        resolve_click(
            &self.npc_symbol,
            self.id,
            self.gold_amount,
            &self.task_symbol,
            quest,
            ctx,
        )
    }
}

impl ClickedNpc {
    pub(crate) fn check_trigger(
        &self,
        already_triggered: bool,
        quest: &mut Quest,
        ctx: &mut QuestTickContext<'_>,
    ) -> bool {
        if already_triggered {
            return true;
        }
        let clicked = match quest.get_npc(&self.npc_symbol) {
            Some(npc) => npc.has_player_clicked,
            None => return false,
        };
        if !clicked {
            return false;
        }
        resolve_click(
            &self.npc_symbol,
            self.id,
            self.gold_amount,
            &self.task_symbol,
            quest,
            ctx,
        )
    }
}

// ============================================================================
// Serialization
// ============================================================================

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ClickedFoeRecord {
    V1 {
        npc_symbol: Symbol,
        id: i32,
        gold_amount: i32,
        task_symbol: Symbol,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ClickedNpcRecord {
    V1 {
        npc_symbol: Symbol,
        id: i32,
        gold_amount: i32,
        task_symbol: Symbol,
    },
}

impl ClickedFoe {
    pub(crate) fn save(&self) -> ClickedFoeRecord {
        ClickedFoeRecord::V1 {
            npc_symbol: self.npc_symbol.clone(),
            id: self.id,
            gold_amount: self.gold_amount,
            task_symbol: self.task_symbol.clone(),
        }
    }

    pub(crate) fn restore(record: &ClickedFoeRecord) -> Self {
        let ClickedFoeRecord::V1 {
            npc_symbol,
            id,
            gold_amount,
            task_symbol,
        } = record;
        Self {
            npc_symbol: npc_symbol.clone(),
            id: *id,
            gold_amount: *gold_amount,
            task_symbol: task_symbol.clone(),
        }
    }
}

impl ClickedNpc {
    pub(crate) fn save(&self) -> ClickedNpcRecord {
        ClickedNpcRecord::V1 {
            npc_symbol: self.npc_symbol.clone(),
            id: self.id,
            gold_amount: self.gold_amount,
            task_symbol: self.task_symbol.clone(),
        }
    }

    pub(crate) fn restore(record: &ClickedNpcRecord) -> Self {
        let ClickedNpcRecord::V1 {
            npc_symbol,
            id,
            gold_amount,
            task_symbol,
        } = record;
        Self {
            npc_symbol: npc_symbol.clone(),
            id: *id,
            gold_amount: *gold_amount,
            task_symbol: task_symbol.clone(),
        }
    }
}
