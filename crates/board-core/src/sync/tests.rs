use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use async_trait::async_trait;

use super::*;
use crate::api::{ApiError, ApiResult, IssueApi, IssueDraft};
use crate::config::SessionUser;
use crate::domain::{BoardState, DomainError, ReorderEntry, Status, WorkItem};
use crate::notice::{Notice, NoticeKind, Notifier};
use crate::reconcile::DropTarget;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    List(u32),
    Status(u32, Status),
    Reorder(Vec<ReorderEntry>),
    Create(u32, IssueDraft),
    Update(u32, IssueDraft),
    Delete(u32),
}

/// Something that happens to the board while the reorder request is in flight
#[derive(Debug, Clone, Copy)]
enum DuringReorder {
    Nothing,
    AnotherChange,
    Teardown,
}

#[derive(Clone)]
struct TestBoard {
    state: Rc<RefCell<BoardState>>,
    alive: Rc<Cell<bool>>,
    reloads_finished: Rc<Cell<u32>>,
}

impl TestBoard {
    fn new(items: Vec<WorkItem>) -> Self {
        Self {
            state: Rc::new(RefCell::new(BoardState::from_items(items))),
            alive: Rc::new(Cell::new(true)),
            reloads_finished: Rc::new(Cell::new(0)),
        }
    }

    fn current(&self) -> BoardState {
        self.state.borrow().clone()
    }
}

impl BoardHandle for TestBoard {
    fn with_board<R>(&self, f: impl FnOnce(&BoardState) -> R) -> Option<R> {
        self.alive.get().then(|| f(&self.state.borrow()))
    }

    fn update_board<R>(&self, f: impl FnOnce(&mut BoardState) -> R) -> Option<R> {
        self.alive.get().then(|| f(&mut self.state.borrow_mut()))
    }

    fn reload_finished(&self) {
        self.reloads_finished.set(self.reloads_finished.get() + 1);
    }
}

#[derive(Clone, Default)]
struct RecordingNotifier {
    notices: Rc<RefCell<Vec<Notice>>>,
}

impl RecordingNotifier {
    fn messages(&self) -> Vec<String> {
        self.notices.borrow().iter().map(|n| n.message.clone()).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}

struct FakeApi {
    calls: RefCell<Vec<Call>>,
    failing: RefCell<HashSet<&'static str>>,
    failure: RefCell<ApiError>,
    server_items: RefCell<Vec<WorkItem>>,
    during_reorder: Cell<DuringReorder>,
    board: TestBoard,
}

impl FakeApi {
    fn new(board: TestBoard) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            failing: RefCell::new(HashSet::new()),
            failure: RefCell::new(ApiError::Status { status: 500, message: None }),
            server_items: RefCell::new(Vec::new()),
            during_reorder: Cell::new(DuringReorder::Nothing),
            board,
        }
    }

    fn fail(&self, endpoint: &'static str) {
        self.failing.borrow_mut().insert(endpoint);
    }

    fn record(&self, endpoint: &'static str, call: Call) -> ApiResult<()> {
        self.calls.borrow_mut().push(call);
        if self.failing.borrow().contains(endpoint) {
            return Err(self.failure.borrow().clone());
        }
        Ok(())
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl IssueApi for Rc<FakeApi> {
    async fn list_issues(&self, project_id: u32) -> ApiResult<Vec<WorkItem>> {
        self.record("list", Call::List(project_id))?;
        Ok(self.server_items.borrow().clone())
    }

    async fn update_status(&self, id: u32, status: Status) -> ApiResult<()> {
        self.record("status", Call::Status(id, status))
    }

    async fn reorder(&self, entries: &[ReorderEntry]) -> ApiResult<()> {
        match self.during_reorder.get() {
            DuringReorder::Nothing => {}
            DuringReorder::AnotherChange => {
                self.board.update_board(|board| {
                    let mut items = board.items().to_vec();
                    items.retain(|item| item.id != 3);
                    board.load(items);
                });
            }
            DuringReorder::Teardown => self.board.alive.set(false),
        }
        self.record("reorder", Call::Reorder(entries.to_vec()))
    }

    async fn create_issue(&self, project_id: u32, draft: &IssueDraft) -> ApiResult<()> {
        self.record("create", Call::Create(project_id, draft.clone()))
    }

    async fn update_issue(&self, id: u32, draft: &IssueDraft) -> ApiResult<()> {
        self.record("update", Call::Update(id, draft.clone()))
    }

    async fn delete_issue(&self, id: u32) -> ApiResult<()> {
        self.record("delete", Call::Delete(id))
    }

    async fn current_user(&self) -> ApiResult<SessionUser> {
        Ok(SessionUser {
            username: "tester".to_string(),
            email: "tester@example.com".to_string(),
            role: None,
        })
    }
}

struct Harness {
    api: Rc<FakeApi>,
    board: TestBoard,
    notifier: RecordingNotifier,
    sync: BoardSync<Rc<FakeApi>, TestBoard, RecordingNotifier>,
}

fn item(id: u32, status: Status, position: u32) -> WorkItem {
    WorkItem::new(id, format!("Issue {}", id), status, position)
}

/// Pending: [1, 2], In Progress: [3], Resolved: [4]
fn harness() -> Harness {
    let board = TestBoard::new(vec![
        item(1, Status::Pending, 0),
        item(2, Status::Pending, 1),
        item(3, Status::InProgress, 0),
        item(4, Status::Resolved, 0),
    ]);
    let api = Rc::new(FakeApi::new(board.clone()));
    let notifier = RecordingNotifier::default();
    let sync = BoardSync::new(api.clone(), board.clone(), notifier.clone(), 12);
    Harness { api, board, notifier, sync }
}

fn layout(board: &BoardState, status: Status) -> Vec<u32> {
    board.column(status).map(|item| item.id).collect()
}

#[tokio::test]
async fn test_cross_column_drop_sends_status_then_reorder() {
    let h = harness();

    let outcome = h.sync.drop_item(1, DropTarget::Item(3)).await.unwrap();

    assert_eq!(outcome, SyncOutcome::Committed);
    let board = h.board.current();
    assert_eq!(layout(&board, Status::Pending), vec![2]);
    assert_eq!(layout(&board, Status::InProgress), vec![1, 3]);
    board.check_invariants().unwrap();

    let calls = h.api.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], Call::Status(1, Status::InProgress));
    assert_eq!(calls[1], Call::Reorder(board.reorder_entries()));
    assert!(h.notifier.messages().is_empty());
}

#[tokio::test]
async fn test_same_column_drop_skips_status_call() {
    let h = harness();

    let outcome = h.sync.drop_item(2, DropTarget::Item(1)).await.unwrap();

    assert_eq!(outcome, SyncOutcome::Committed);
    assert_eq!(layout(&h.board.current(), Status::Pending), vec![2, 1]);
    let calls = h.api.calls();
    assert_eq!(calls.len(), 1);
    assert!(matches!(calls[0], Call::Reorder(ref entries) if entries.len() == 4));
}

#[tokio::test]
async fn test_failed_reorder_restores_snapshot() {
    let h = harness();
    let before = h.board.current();
    h.api.fail("reorder");

    let outcome = h.sync.drop_item(1, DropTarget::Column(Status::Resolved)).await.unwrap();

    assert_eq!(outcome, SyncOutcome::RolledBack);
    assert_eq!(h.board.current(), before);
    assert_eq!(h.notifier.messages(), vec!["Failed to save new order"]);
    assert_eq!(h.notifier.notices.borrow()[0].kind, NoticeKind::Error);
}

#[tokio::test]
async fn test_server_message_reaches_notice() {
    let h = harness();
    h.api.fail("reorder");
    *h.api.failure.borrow_mut() = ApiError::Status {
        status: 409,
        message: Some("Board was modified".to_string()),
    };

    h.sync.drop_item(2, DropTarget::Item(1)).await.unwrap();

    assert_eq!(h.notifier.messages(), vec!["Board was modified"]);
}

#[tokio::test]
async fn test_failed_status_update_still_reorders() {
    let h = harness();
    h.api.fail("status");

    let outcome = h.sync.drop_item(1, DropTarget::Column(Status::Resolved)).await.unwrap();

    assert_eq!(outcome, SyncOutcome::Committed);
    assert_eq!(layout(&h.board.current(), Status::Resolved), vec![4, 1]);
    assert!(matches!(h.api.calls().last(), Some(Call::Reorder(_))));
    assert_eq!(h.notifier.messages(), vec!["Failed to update status"]);
}

#[tokio::test]
async fn test_noop_drop_sends_nothing() {
    let h = harness();
    let before = h.board.current();

    assert_eq!(h.sync.drop_item(1, DropTarget::Item(1)).await.unwrap(), SyncOutcome::Unchanged);
    assert_eq!(h.sync.drop_item(99, DropTarget::Item(1)).await.unwrap(), SyncOutcome::Unchanged);
    assert_eq!(
        h.sync.drop_item(2, DropTarget::Column(Status::Pending)).await.unwrap(),
        SyncOutcome::Unchanged
    );

    assert!(h.api.calls().is_empty());
    assert_eq!(h.board.current(), before);
    assert_eq!(h.board.current().version(), before.version());
}

#[tokio::test]
async fn test_drop_after_teardown_is_abandoned() {
    let h = harness();
    h.board.alive.set(false);

    let outcome = h.sync.drop_item(1, DropTarget::Item(3)).await.unwrap();

    assert_eq!(outcome, SyncOutcome::Abandoned);
    assert!(h.api.calls().is_empty());
}

#[tokio::test]
async fn test_teardown_during_failed_reorder_skips_rollback() {
    let h = harness();
    h.api.fail("reorder");
    h.api.during_reorder.set(DuringReorder::Teardown);

    let outcome = h.sync.drop_item(2, DropTarget::Item(1)).await.unwrap();

    assert_eq!(outcome, SyncOutcome::Abandoned);
    assert_eq!(layout(&h.board.current(), Status::Pending), vec![2, 1]);
    assert!(h.notifier.messages().is_empty());
}

#[tokio::test]
async fn test_stale_failure_refetches_instead_of_restoring() {
    let h = harness();
    h.api.fail("reorder");
    h.api.during_reorder.set(DuringReorder::AnotherChange);
    *h.api.server_items.borrow_mut() = vec![
        item(1, Status::Pending, 0),
        item(2, Status::Pending, 1),
        item(4, Status::Resolved, 0),
    ];

    let outcome = h.sync.drop_item(2, DropTarget::Item(1)).await.unwrap();

    assert_eq!(outcome, SyncOutcome::Resynced);
    let board = h.board.current();
    assert_eq!(layout(&board, Status::Pending), vec![1, 2]);
    assert!(board.get(3).is_none());
    assert_eq!(h.api.calls().last(), Some(&Call::List(12)));
    assert_eq!(h.notifier.messages(), vec!["Failed to save new order"]);
}

#[tokio::test]
async fn test_on_reorder_requires_pending_lifecycle() {
    let h = harness();

    let err = h.sync.on_reorder(&[], PersistLifecycle::new()).await.unwrap_err();

    assert!(matches!(err, SyncError::Domain(DomainError::Conflict(_))));
    assert!(h.api.calls().is_empty());
}

#[tokio::test]
async fn test_cycle_status_then_reload() {
    let h = harness();
    *h.api.server_items.borrow_mut() = vec![item(2, Status::InProgress, 0)];

    let next = h.sync.cycle_status(2).await.unwrap();

    assert_eq!(next, Status::InProgress);
    assert_eq!(h.api.calls(), vec![Call::Status(2, Status::InProgress), Call::List(12)]);
    assert_eq!(h.notifier.messages(), vec!["Marked as In Progress"]);
    assert_eq!(h.board.current().len(), 1);
}

#[tokio::test]
async fn test_cycle_status_unknown_issue() {
    let h = harness();

    let err = h.sync.cycle_status(42).await.unwrap_err();

    assert!(matches!(err, SyncError::Domain(DomainError::NotFound(_))));
    assert!(h.api.calls().is_empty());
}

#[tokio::test]
async fn test_create_requires_title_and_description() {
    let h = harness();

    let result = h.sync.create_issue(&IssueDraft::new("  ", "body")).await;

    assert!(result.is_err());
    assert!(h.api.calls().is_empty());
    assert_eq!(h.notifier.messages(), vec!["Title and description required"]);
}

#[tokio::test]
async fn test_create_and_update_reload_the_board() {
    let h = harness();
    let draft = IssueDraft::new("Deploy App", "Ship it");

    h.sync.create_issue(&draft).await.unwrap();
    h.sync.update_issue(3, &draft.clone().with_status(Status::Resolved)).await.unwrap();

    assert_eq!(
        h.api.calls(),
        vec![
            Call::Create(12, draft.clone()),
            Call::List(12),
            Call::Update(3, draft.with_status(Status::Resolved)),
            Call::List(12),
        ]
    );
    assert_eq!(h.notifier.messages(), vec!["Issue created", "Issue updated"]);
}

#[tokio::test]
async fn test_failed_delete_keeps_board() {
    let h = harness();
    let before = h.board.current();
    h.api.fail("delete");

    assert!(h.sync.delete_issue(4).await.is_err());

    assert_eq!(h.api.calls(), vec![Call::Delete(4)]);
    assert_eq!(h.board.current(), before);
    assert_eq!(h.notifier.messages(), vec!["Failed to delete"]);
}

#[tokio::test]
async fn test_failed_reload_notifies() {
    let h = harness();
    h.api.fail("list");

    h.sync.reload().await;

    assert_eq!(h.notifier.messages(), vec!["Failed to load issues"]);
    assert_eq!(h.board.current().len(), 4);
    assert_eq!(h.board.reloads_finished.get(), 1);
}

#[tokio::test]
async fn test_successful_reload_finishes() {
    let h = harness();
    *h.api.server_items.borrow_mut() = vec![item(9, Status::Resolved, 0)];

    h.sync.reload().await;

    assert_eq!(h.board.reloads_finished.get(), 1);
    assert_eq!(layout(&h.board.current(), Status::Resolved), vec![9]);
}
