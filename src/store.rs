//! Board Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The store is the
//! live board the synchronizer mutates, plus the toast queue it reports into.

use board_core::config::ToastTimings;
use board_core::domain::BoardState;
use board_core::notice::{Notice, NoticeKind, Notifier};
use board_core::sync::BoardHandle;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::debug;
use reactive_stores::Store;

/// A notice on screen
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}

/// Board state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Issues of the current project, in column order
    pub board: BoardState,
    /// Visible toasts, oldest first
    pub toasts: Vec<Toast>,
    /// Id for the next toast
    pub next_toast_id: u64,
    /// Initial fetch still running
    pub loading: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// The store's board as seen by the synchronizer.
///
/// Once the store is disposed every access yields `None`.
#[derive(Clone, Copy)]
pub struct StoreBoard(pub AppStore);

impl BoardHandle for StoreBoard {
    fn with_board<R>(&self, f: impl FnOnce(&BoardState) -> R) -> Option<R> {
        self.0.board().try_with_untracked(f)
    }

    fn update_board<R>(&self, f: impl FnOnce(&mut BoardState) -> R) -> Option<R> {
        self.0.board().try_update(f)
    }

    fn reload_finished(&self) {
        self.0.loading().try_set(false);
    }
}

/// Pushes notices onto the store's toast queue and removes each after its
/// dismiss delay.
#[derive(Clone, Copy)]
pub struct StoreNotifier {
    store: AppStore,
    timings: ToastTimings,
}

impl StoreNotifier {
    pub fn new(store: AppStore, timings: ToastTimings) -> Self {
        Self { store, timings }
    }
}

impl Notifier for StoreNotifier {
    fn notify(&self, notice: Notice) {
        let Some(id) = self.store.next_toast_id().try_update(|next| {
            *next += 1;
            *next
        }) else {
            return;
        };
        let delay = notice.kind.dismiss_after_ms(&self.timings);
        self.store.toasts().try_update(|toasts| {
            toasts.push(Toast {
                id,
                kind: notice.kind,
                message: notice.message,
            })
        });

        let store = self.store;
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            store_dismiss_toast(&store, id);
        });
    }
}

/// Remove a toast by ID
pub fn store_dismiss_toast(store: &AppStore, toast_id: u64) {
    if store.toasts().try_update(|toasts| toasts.retain(|t| t.id != toast_id)).is_none() {
        debug!("[TOAST] Store gone before toast {} expired", toast_id);
    }
}
