//! Drop Reconciliation
//!
//! Pure computation of the board that results from dropping one item onto
//! another item or onto a column's drop zone.

use serde::{Deserialize, Serialize};

use crate::domain::board::flatten_columns;
use crate::domain::{BoardState, Status, WorkItem};

/// What the dragged item was released over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DropTarget {
    /// Another item; the dragged item takes its index
    Item(u32),
    /// A column's drop zone; the dragged item goes to the end of that column
    Column(Status),
}

/// Shape of a reconciled move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Same-column reorder
    Reorder { status: Status },
    /// Cross-column move; the item's status changes
    Transfer { from: Status, to: Status },
}

/// A new, invariant-satisfying item list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    pub item_id: u32,
    pub kind: MoveKind,
    pub items: Vec<WorkItem>,
}

impl Reconciled {
    /// New status of the moved item when it changed columns
    pub fn status_change(&self) -> Option<Status> {
        match self.kind {
            MoveKind::Transfer { to, .. } => Some(to),
            MoveKind::Reorder { .. } => None,
        }
    }
}

/// Compute the board after dropping `active_id` on `target`.
///
/// Returns `None` when the drop changes nothing: unknown ids, a drop onto
/// the item itself, or a reorder to the item's current index.
pub fn reconcile(board: &BoardState, active_id: u32, target: DropTarget) -> Option<Reconciled> {
    let from = board.get(active_id)?.status;
    let mut columns = board.columns();

    let (to, over_index) = match target {
        DropTarget::Item(over_id) => {
            if over_id == active_id {
                return None;
            }
            let to = board.get(over_id)?.status;
            let index = columns[to.column_index()].iter().position(|item| item.id == over_id)?;
            (to, Some(index))
        }
        DropTarget::Column(status) => (status, None),
    };

    let source_index = columns[from.column_index()]
        .iter()
        .position(|item| item.id == active_id)?;

    let kind = if from == to {
        let column = &mut columns[from.column_index()];
        let dest_index = over_index.unwrap_or(column.len() - 1);
        if dest_index == source_index {
            return None;
        }
        let moved = column.remove(source_index);
        column.insert(dest_index, moved);
        MoveKind::Reorder { status: from }
    } else {
        let mut moved = columns[from.column_index()].remove(source_index);
        moved.status = to;
        let dest = &mut columns[to.column_index()];
        let insert_at = over_index.unwrap_or(dest.len()).min(dest.len());
        dest.insert(insert_at, moved);
        MoveKind::Transfer { from, to }
    };

    Some(Reconciled {
        item_id: active_id,
        kind,
        items: flatten_columns(columns),
    })
}
