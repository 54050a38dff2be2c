//! Column intents forwarded to the host view.

use crate::types::Scope;
use serde::{Deserialize, Serialize};

/// Column kind for hashtag timelines.
pub const HASHTAG_COLUMN: &str = "HASHTAG";

/// Identifier of a pinned column.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnId(pub String);

/// Direction to move a column in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    Left,
    Right,
}

/// A command for the host's column layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnIntent {
    AddColumn { kind: String, scope: Scope },
    RemoveColumn { id: ColumnId },
    MoveColumn { id: ColumnId, direction: MoveDirection },
}

/// Toggle pinning: a pinned column is removed, an unpinned one is added.
pub fn pin_intent(column_id: Option<&ColumnId>, scope: &Scope) -> ColumnIntent {
    match column_id {
        Some(id) => ColumnIntent::RemoveColumn { id: id.clone() },
        None => ColumnIntent::AddColumn {
            kind: HASHTAG_COLUMN.to_string(),
            scope: scope.clone(),
        },
    }
}

pub fn move_intent(column_id: &ColumnId, direction: MoveDirection) -> ColumnIntent {
    ColumnIntent::MoveColumn {
        id: column_id.clone(),
        direction,
    }
}

/// Key under which the host remembers the column's scroll position.
pub fn scroll_key(column_id: Option<&ColumnId>) -> String {
    match column_id {
        Some(id) => format!("hashtag_timeline-{}", id.0),
        None => "hashtag_timeline-".to_string(),
    }
}
