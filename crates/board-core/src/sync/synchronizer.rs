//! Board Synchronizer
//!
//! Applies drops optimistically and pushes them to the backend, restoring the
//! pre-drag snapshot when the reorder call fails. Also hosts the card
//! actions (create, edit, delete, cycle status) that end in a full refetch.

use log::{debug, error, info, warn};
use thiserror::Error;

use super::phase::PersistLifecycle;
use crate::api::{ApiError, IssueApi, IssueDraft};
use crate::domain::{BoardSnapshot, BoardState, DomainError, ReorderEntry, Status};
use crate::notice::{Notice, Notifier};
use crate::reconcile::{reconcile, DropTarget};

/// Access to the live board.
///
/// Both methods return `None` once the view owning the board is gone; the
/// synchronizer then drops whatever it was doing.
pub trait BoardHandle {
    fn with_board<R>(&self, f: impl FnOnce(&BoardState) -> R) -> Option<R>;
    fn update_board<R>(&self, f: impl FnOnce(&mut BoardState) -> R) -> Option<R>;

    /// Called after every [`BoardSync::reload`], whether the fetch worked or not
    fn reload_finished(&self) {}
}

#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

pub type SyncResult<T> = Result<T, SyncError>;

/// How a drop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Reconciliation was a no-op; nothing sent
    Unchanged,
    /// Server accepted the new order
    Committed,
    /// Server rejected the order; the pre-drag snapshot is back on screen
    RolledBack,
    /// Server rejected the order after a newer change was applied; the board
    /// was refetched instead of restoring a stale snapshot
    Resynced,
    /// The view went away before the gesture finished
    Abandoned,
}

/// Result of the synchronous half of a drop
struct PreparedDrop {
    snapshot: BoardSnapshot,
    applied_version: u64,
    status_change: Option<Status>,
    entries: Vec<ReorderEntry>,
}

pub struct BoardSync<A, B, N> {
    api: A,
    board: B,
    notifier: N,
    project_id: u32,
}

impl<A: Clone, B: Clone, N: Clone> Clone for BoardSync<A, B, N> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            board: self.board.clone(),
            notifier: self.notifier.clone(),
            project_id: self.project_id,
        }
    }
}

impl<A, B, N> BoardSync<A, B, N>
where
    A: IssueApi,
    B: BoardHandle,
    N: Notifier,
{
    pub fn new(api: A, board: B, notifier: N, project_id: u32) -> Self {
        Self {
            api,
            board,
            notifier,
            project_id,
        }
    }

    pub fn project_id(&self) -> u32 {
        self.project_id
    }

    /// Refetch the project's issues and replace the board with them
    pub async fn refresh(&self) -> SyncResult<usize> {
        let items = self.api.list_issues(self.project_id).await?;
        let count = items.len();
        match self.board.update_board(|board| board.load(items)) {
            Some(()) => info!("[SYNC] Loaded {} issues for project {}", count, self.project_id),
            None => debug!("[SYNC] Board gone before load completed"),
        }
        Ok(count)
    }

    /// [`refresh`](Self::refresh), reporting failure as a notice
    pub async fn reload(&self) {
        if let Err(e) = self.refresh().await {
            error!("[SYNC] Failed to load issues: {}", e);
            self.notify_failure(&e, "Failed to load issues");
        }
        self.board.reload_finished();
    }

    /// Handle a finished drag: reconcile, apply optimistically, persist.
    pub async fn drop_item(&self, active_id: u32, target: DropTarget) -> SyncResult<SyncOutcome> {
        let prepared = self.board.update_board(|board| -> Result<Option<PreparedDrop>, DomainError> {
            let snapshot = board.snapshot();
            let Some(reconciled) = reconcile(board, active_id, target) else {
                return Ok(None);
            };
            let status_change = reconciled.status_change();
            board.apply(reconciled.items)?;
            Ok(Some(PreparedDrop {
                snapshot,
                applied_version: board.version(),
                status_change,
                entries: board.reorder_entries(),
            }))
        });

        let PreparedDrop { snapshot, applied_version, status_change, entries } = match prepared {
            None => return Ok(SyncOutcome::Abandoned),
            Some(result) => match result? {
                None => {
                    debug!("[SYNC] Drop of {} on {:?} changes nothing", active_id, target);
                    return Ok(SyncOutcome::Unchanged);
                }
                Some(prepared) => prepared,
            },
        };

        let mut lifecycle = PersistLifecycle::new();
        lifecycle.begin(snapshot, applied_version)?;

        if let Some(status) = status_change {
            // Independent of the reorder call below; a failure here is
            // reported but neither rolls back nor stops the reorder.
            let _ = self.on_cross_column_move(active_id, status).await;
        }

        self.on_reorder(&entries, lifecycle).await
    }

    /// Status-only update after a cross-column move
    pub async fn on_cross_column_move(&self, item_id: u32, status: Status) -> SyncResult<()> {
        match self.api.update_status(item_id, status).await {
            Ok(()) => {
                info!("[SYNC] Issue {} moved to '{}'", item_id, status);
                Ok(())
            }
            Err(e) => {
                warn!(
                    "[SYNC] Status update for issue {} failed ({}); the displayed status may not match the server",
                    item_id, e
                );
                self.notifier.notify(Notice::error(e.user_message("Failed to update status")));
                Err(e.into())
            }
        }
    }

    /// Persist the full order. `lifecycle` must be pending.
    pub async fn on_reorder(
        &self,
        entries: &[ReorderEntry],
        mut lifecycle: PersistLifecycle,
    ) -> SyncResult<SyncOutcome> {
        let applied_version = lifecycle.applied_version().ok_or_else(|| {
            DomainError::Conflict(format!("reorder requires a pending change, found {}", lifecycle.phase().name()))
        })?;

        let err = match self.api.reorder(entries).await {
            Ok(()) => {
                lifecycle.commit()?;
                debug!("[SYNC] Reorder of {} entries committed", entries.len());
                return Ok(SyncOutcome::Committed);
            }
            Err(err) => err,
        };

        error!("[SYNC] Reorder failed: {}", err);
        let snapshot = lifecycle.roll_back()?;
        let restored = self.board.update_board(|board| {
            if board.version() == applied_version {
                board.restore(&snapshot);
                true
            } else {
                false
            }
        });

        match restored {
            None => {
                debug!("[SYNC] Board gone; skipping rollback");
                Ok(SyncOutcome::Abandoned)
            }
            Some(true) => {
                self.notifier.notify(Notice::error(err.user_message("Failed to save new order")));
                Ok(SyncOutcome::RolledBack)
            }
            Some(false) => {
                warn!("[SYNC] Board changed since this reorder was applied; refetching instead of restoring");
                self.notifier.notify(Notice::error(err.user_message("Failed to save new order")));
                self.reload().await;
                Ok(SyncOutcome::Resynced)
            }
        }
    }

    /// Move an issue to the next status in the Pending -> In Progress ->
    /// Resolved cycle
    pub async fn cycle_status(&self, id: u32) -> SyncResult<Status> {
        let current = self
            .board
            .with_board(|board| board.get(id).map(|item| item.status))
            .flatten()
            .ok_or_else(|| DomainError::NotFound(format!("issue {}", id)))?;
        let next = current.next();

        match self.api.update_status(id, next).await {
            Ok(()) => {
                self.notifier.notify(Notice::success(format!("Marked as {}", next)));
                self.reload().await;
                Ok(next)
            }
            Err(e) => {
                self.notifier.notify(Notice::error(e.user_message("Failed to update status")));
                Err(e.into())
            }
        }
    }

    pub async fn create_issue(&self, draft: &IssueDraft) -> SyncResult<()> {
        self.validated(draft)?;
        let result = self.api.create_issue(self.project_id, draft).await;
        self.finish_edit(result, "Issue created", "Failed to create issue").await
    }

    pub async fn update_issue(&self, id: u32, draft: &IssueDraft) -> SyncResult<()> {
        self.validated(draft)?;
        let result = self.api.update_issue(id, draft).await;
        self.finish_edit(result, "Issue updated", "Update failed").await
    }

    pub async fn delete_issue(&self, id: u32) -> SyncResult<()> {
        let result = self.api.delete_issue(id).await;
        self.finish_edit(result, "Issue deleted", "Failed to delete").await
    }

    fn validated(&self, draft: &IssueDraft) -> SyncResult<()> {
        draft.validate().map_err(|e| {
            if let DomainError::InvalidInput(message) = &e {
                self.notifier.notify(Notice::error(message.clone()));
            }
            SyncError::from(e)
        })
    }

    async fn finish_edit(&self, result: Result<(), ApiError>, success: &str, failure: &str) -> SyncResult<()> {
        match result {
            Ok(()) => {
                self.notifier.notify(Notice::success(success));
                self.reload().await;
                Ok(())
            }
            Err(e) => {
                error!("[SYNC] {}: {}", failure, e);
                self.notifier.notify(Notice::error(e.user_message(failure)));
                Err(e.into())
            }
        }
    }

    fn notify_failure(&self, err: &SyncError, fallback: &str) {
        let message = match err {
            SyncError::Api(e) => e.user_message(fallback),
            SyncError::Domain(_) => fallback.to_string(),
        };
        self.notifier.notify(Notice::error(message));
    }
}
