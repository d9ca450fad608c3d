//! Quest script loader.
//!
//! Parses a line-oriented quest script into a [`QuestSource`]. The format:
//!
//! ```text
//! -- comment
//! quest: GOLD_GATE
//!
//! foe aFoe
//! questor aNoble
//! item aKey
//!
//! message 1020 paidUp: You pay the toll.
//!
//! task _main_:
//!     clicked foe aFoe and at least 50 gold otherwise do _poor_
//!     say 1020
//!     end quest
//! ```
//!
//! Resource declarations and messages sit at the top level; indented lines
//! under a `task <name>:` header are raw action lines, compiled later by the
//! core action registry. Per-line action faults are therefore reported at
//! quest compile time, not here.

use std::path::Path;

use game_core::{QuestMessage, QuestSource, Symbol, TaskSource};

use crate::loaders::{LoadResult, read_file};

/// Loader for quest script files.
pub struct QuestLoader;

impl QuestLoader {
    /// Load a quest source from a script file.
    pub fn load(path: &Path) -> LoadResult<QuestSource> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse quest script {}: {}", path.display(), e))
    }

    /// Parse a quest source from script text.
    pub fn parse(content: &str) -> LoadResult<QuestSource> {
        let mut source = QuestSource::default();
        let mut current_task: Option<TaskSource> = None;

        for (index, raw_line) in content.lines().enumerate() {
            let line_no = index + 1;
            let line = raw_line.trim_end();
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with("--") {
                continue;
            }

            let indented = line.starts_with(' ') || line.starts_with('\t');
            if indented {
                let Some(task) = current_task.as_mut() else {
                    anyhow::bail!("line {line_no}: action line outside a task block");
                };
                task.lines.push(trimmed.to_string());
                continue;
            }

            // A top-level directive ends any open task block.
            if let Some(task) = current_task.take() {
                source.tasks.push(task);
            }

            if let Some(name) = trimmed.strip_prefix("quest:") {
                source.name = name.trim().to_string();
                continue;
            }
            if let Some(rest) = trimmed.strip_prefix("foe ") {
                source.foes.push(Symbol::new(rest.trim()));
                continue;
            }
            if let Some(rest) = trimmed.strip_prefix("questor ") {
                source.questors.push(Symbol::new(rest.trim()));
                continue;
            }
            if let Some(rest) = trimmed.strip_prefix("npc ") {
                source.npcs.push(Symbol::new(rest.trim()));
                continue;
            }
            if let Some(rest) = trimmed.strip_prefix("item ") {
                source.items.push(Symbol::new(rest.trim()));
                continue;
            }
            if let Some(rest) = trimmed.strip_prefix("message ") {
                source.messages.push(parse_message(rest, line_no)?);
                continue;
            }
            if let Some(rest) = trimmed.strip_prefix("task ") {
                let Some(symbol) = rest.trim().strip_suffix(':') else {
                    anyhow::bail!("line {line_no}: task header must end with ':'");
                };
                current_task = Some(TaskSource {
                    symbol: Symbol::new(symbol.trim()),
                    lines: Vec::new(),
                });
                continue;
            }

            anyhow::bail!("line {line_no}: unrecognized directive {trimmed:?}");
        }

        if let Some(task) = current_task.take() {
            source.tasks.push(task);
        }
        if source.name.is_empty() {
            anyhow::bail!("quest script is missing a 'quest:' header");
        }

        Ok(source)
    }
}

/// Parses `<id> <name>: <text>` after the `message ` prefix.
fn parse_message(rest: &str, line_no: usize) -> LoadResult<QuestMessage> {
    let Some((head, text)) = rest.split_once(':') else {
        anyhow::bail!("line {line_no}: message must contain ':'");
    };
    let mut parts = head.split_whitespace();
    let id = parts
        .next()
        .and_then(|v| v.parse::<i32>().ok())
        .ok_or_else(|| anyhow::anyhow!("line {line_no}: message id must be an integer"))?;
    let name = parts
        .next()
        .ok_or_else(|| anyhow::anyhow!("line {line_no}: message is missing a name"))?;
    if parts.next().is_some() {
        anyhow::bail!("line {line_no}: message header has trailing tokens");
    }
    Ok(QuestMessage::new(id, name, text.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"
-- Toll gate quest
quest: GOLD_GATE

foe aFoe
questor aNoble

message 1020 paidUp: You pay the toll.

task _main_:
    clicked foe aFoe and at least 50 gold otherwise do _poor_
    say 1020
    end quest

task _poor_:
    say paidUp
"#;

    #[test]
    fn parses_resources_messages_and_tasks() {
        let source = QuestLoader::parse(SCRIPT).unwrap();
        assert_eq!(source.name, "GOLD_GATE");
        assert_eq!(source.foes, vec![Symbol::new("aFoe")]);
        assert_eq!(source.questors, vec![Symbol::new("aNoble")]);
        assert_eq!(source.messages.len(), 1);
        assert_eq!(source.messages[0].id, 1020);
        assert_eq!(source.messages[0].text, "You pay the toll.");
        assert_eq!(source.tasks.len(), 2);
        assert_eq!(source.tasks[0].symbol, Symbol::new("_main_"));
        assert_eq!(source.tasks[0].lines.len(), 3);
        assert_eq!(source.tasks[1].lines, vec!["say paidUp".to_string()]);
    }

    #[test]
    fn rejects_action_lines_outside_tasks() {
        let err = QuestLoader::parse("quest: X\n    say 5\n").unwrap_err();
        assert!(err.to_string().contains("outside a task block"));
    }

    #[test]
    fn rejects_missing_quest_header() {
        let err = QuestLoader::parse("foe aFoe\n").unwrap_err();
        assert!(err.to_string().contains("missing a 'quest:' header"));
    }

    #[test]
    fn rejects_unknown_directives() {
        let err = QuestLoader::parse("quest: X\nreward 50 gold\n").unwrap_err();
        assert!(err.to_string().contains("unrecognized directive"));
    }
}
