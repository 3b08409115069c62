//! Issue board core
//!
//! Everything behind the drag-and-drop issue board that does not touch the
//! DOM: the work item model, drop reconciliation, the drag gesture record and
//! the synchronizer that persists moves to the REST backend.

pub mod api;
pub mod config;
pub mod domain;
pub mod drag;
pub mod notice;
pub mod reconcile;
pub mod sync;

pub use api::{HttpIssueApi, IssueApi, IssueDraft};
pub use config::BoardConfig;
pub use domain::{BoardState, Status, WorkItem};
pub use drag::DragOperation;
pub use notice::{Notice, NoticeKind, Notifier};
pub use reconcile::{reconcile, DropTarget};
pub use sync::{BoardHandle, BoardSync, SyncOutcome};
