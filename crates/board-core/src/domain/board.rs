//! Board State
//!
//! The canonical in-memory list of work items, partitioned by status into
//! columns. Items are kept in column order (`Status::ALL`) and then by
//! position, so two boards with the same content compare equal.

use std::collections::HashSet;
use std::sync::Arc;

use log::warn;
use serde::{Deserialize, Serialize};

use super::error::{DomainError, DomainResult};
use super::item::{Status, WorkItem};

/// One row of the batch reorder request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderEntry {
    pub id: u32,
    pub position: u32,
    pub status: Status,
}

/// Immutable copy of the board taken before an optimistic mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    items: Arc<[WorkItem]>,
    version: u64,
}

impl BoardSnapshot {
    pub fn items(&self) -> &[WorkItem] {
        &self.items
    }

    /// Board version the snapshot was taken at
    pub fn version(&self) -> u64 {
        self.version
    }
}

/// Items grouped per column, indexed by `Status::column_index`
pub type Columns = [Vec<WorkItem>; 3];

#[derive(Debug, Clone, Default)]
pub struct BoardState {
    items: Vec<WorkItem>,
    /// Bumped on every replacement
    version: u64,
}

// The version is bookkeeping; equality is about content.
impl PartialEq for BoardState {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Eq for BoardState {}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from a freshly fetched list (see [`BoardState::load`])
    pub fn from_items(items: Vec<WorkItem>) -> Self {
        let mut board = Self::new();
        board.load(items);
        board
    }

    /// Replace the whole board with freshly fetched items.
    ///
    /// Each column is ordered by the incoming `position` (stable, so ties keep
    /// array order) and then re-indexed to `0..n`. Later duplicates of an id
    /// are dropped.
    pub fn load(&mut self, items: Vec<WorkItem>) {
        let mut seen = HashSet::new();
        let mut columns: Columns = Default::default();
        for item in items {
            if !seen.insert(item.id) {
                warn!("[BOARD] Dropping duplicate item id {}", item.id);
                continue;
            }
            columns[item.status.column_index()].push(item);
        }
        for column in columns.iter_mut() {
            column.sort_by_key(|item| item.position);
        }
        self.replace(flatten_columns(columns));
    }

    /// Rollback point for an optimistic mutation
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            items: Arc::from(self.items.as_slice()),
            version: self.version,
        }
    }

    /// Replace the board with a reconciled list.
    ///
    /// The list must already satisfy the column invariants; it is rejected
    /// otherwise and the board is left untouched.
    pub fn apply(&mut self, items: Vec<WorkItem>) -> DomainResult<()> {
        check_invariants(&items)?;
        let mut items = items;
        items.sort_by_key(|item| (item.status.column_index(), item.position));
        self.replace(items);
        Ok(())
    }

    /// Revert to a previously captured snapshot
    pub fn restore(&mut self, snapshot: &BoardSnapshot) {
        self.replace(snapshot.items.to_vec());
    }

    fn replace(&mut self, items: Vec<WorkItem>) {
        self.items = items;
        self.version += 1;
    }

    pub fn items(&self) -> &[WorkItem] {
        &self.items
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&WorkItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Items of one column in render order
    pub fn column(&self, status: Status) -> impl Iterator<Item = &WorkItem> {
        self.items.iter().filter(move |item| item.status == status)
    }

    pub fn column_len(&self, status: Status) -> usize {
        self.column(status).count()
    }

    /// Owned copy of every column in render order
    pub fn columns(&self) -> Columns {
        let mut columns: Columns = Default::default();
        for item in &self.items {
            columns[item.status.column_index()].push(item.clone());
        }
        columns
    }

    /// Full-board payload for the batch reorder call
    pub fn reorder_entries(&self) -> Vec<ReorderEntry> {
        self.items
            .iter()
            .map(|item| ReorderEntry {
                id: item.id,
                position: item.position,
                status: item.status,
            })
            .collect()
    }

    pub fn check_invariants(&self) -> DomainResult<()> {
        check_invariants(&self.items)
    }
}

/// Concatenate columns in board order, assigning `position = index` and the
/// column's status to every item.
pub(crate) fn flatten_columns(columns: Columns) -> Vec<WorkItem> {
    let mut items = Vec::with_capacity(columns.iter().map(Vec::len).sum());
    for (status, column) in Status::ALL.into_iter().zip(columns) {
        for (index, mut item) in column.into_iter().enumerate() {
            item.status = status;
            item.position = index as u32;
            items.push(item);
        }
    }
    items
}

/// Ids unique across the board; per column, positions exactly `0..n`.
fn check_invariants(items: &[WorkItem]) -> DomainResult<()> {
    let mut ids = HashSet::new();
    for item in items {
        if !ids.insert(item.id) {
            return Err(DomainError::InvalidInput(format!("duplicate item id {}", item.id)));
        }
    }
    for status in Status::ALL {
        let mut positions: Vec<u32> = items
            .iter()
            .filter(|item| item.status == status)
            .map(|item| item.position)
            .collect();
        positions.sort_unstable();
        for (expected, actual) in positions.iter().enumerate() {
            if *actual != expected as u32 {
                return Err(DomainError::InvalidInput(format!(
                    "column '{}' positions are not contiguous: {:?}",
                    status, positions
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u32, status: Status, position: u32) -> WorkItem {
        WorkItem::new(id, format!("Issue {}", id), status, position)
    }

    fn ids(board: &BoardState, status: Status) -> Vec<u32> {
        board.column(status).map(|i| i.id).collect()
    }

    #[test]
    fn test_load_normalizes_gaps_and_order() {
        let board = BoardState::from_items(vec![
            item(1, Status::Pending, 7),
            item(2, Status::InProgress, 3),
            item(3, Status::Pending, 2),
            item(4, Status::Pending, 9),
        ]);

        assert_eq!(ids(&board, Status::Pending), vec![3, 1, 4]);
        let positions: Vec<u32> = board.column(Status::Pending).map(|i| i.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
        assert_eq!(board.get(2).unwrap().position, 0);
        board.check_invariants().unwrap();
    }

    #[test]
    fn test_load_keeps_array_order_on_ties() {
        let board = BoardState::from_items(vec![
            item(5, Status::Resolved, 0),
            item(6, Status::Resolved, 0),
            item(7, Status::Resolved, 0),
        ]);
        assert_eq!(ids(&board, Status::Resolved), vec![5, 6, 7]);
    }

    #[test]
    fn test_load_drops_duplicate_ids() {
        let board = BoardState::from_items(vec![
            item(1, Status::Pending, 0),
            item(1, Status::Resolved, 0),
        ]);
        assert_eq!(board.len(), 1);
        assert_eq!(board.get(1).unwrap().status, Status::Pending);
    }

    #[test]
    fn test_load_empty() {
        let board = BoardState::from_items(Vec::new());
        assert!(board.is_empty());
        assert_eq!(board.version(), 1);
    }

    #[test]
    fn test_apply_rejects_gaps() {
        let mut board = BoardState::from_items(vec![item(1, Status::Pending, 0)]);
        let before = board.clone();

        let err = board
            .apply(vec![item(1, Status::Pending, 0), item(2, Status::Pending, 2)])
            .unwrap_err();

        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert_eq!(board, before);
        assert_eq!(board.version(), before.version());
    }

    #[test]
    fn test_apply_rejects_duplicate_ids() {
        let mut board = BoardState::new();
        let result = board.apply(vec![item(1, Status::Pending, 0), item(1, Status::InProgress, 0)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_canonicalizes_order() {
        let mut board = BoardState::new();
        board
            .apply(vec![
                item(3, Status::Resolved, 0),
                item(2, Status::Pending, 1),
                item(1, Status::Pending, 0),
            ])
            .unwrap();
        let order: Vec<u32> = board.items().iter().map(|i| i.id).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_snapshot_restore_roundtrip() {
        let mut board = BoardState::from_items(vec![item(1, Status::Pending, 0), item(2, Status::Pending, 1)]);
        let snapshot = board.snapshot();

        board
            .apply(vec![item(2, Status::Pending, 0), item(1, Status::Pending, 1)])
            .unwrap();
        assert_ne!(board.items(), snapshot.items());

        board.restore(&snapshot);
        assert_eq!(board.items(), snapshot.items());
        assert!(board.version() > snapshot.version());
    }

    #[test]
    fn test_reorder_entries_cover_whole_board() {
        let board = BoardState::from_items(vec![item(1, Status::Pending, 0), item(9, Status::Resolved, 0)]);
        let entries = board.reorder_entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1], ReorderEntry { id: 9, position: 0, status: Status::Resolved });
    }
}
