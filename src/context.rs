//! Application Context
//!
//! Shared state provided via Leptos Context API.

use board_core::api::HttpIssueApi;
use board_core::config::BoardConfig;
use board_core::domain::WorkItem;
use board_core::sync::BoardSync;
use leptos::prelude::*;

use crate::store::{AppStore, StoreBoard, StoreNotifier};

/// Synchronizer wired to the HTTP backend and the reactive store
pub type AppSync = BoardSync<HttpIssueApi, StoreBoard, StoreNotifier>;

/// Board-wide handles provided via context
#[derive(Clone, Copy)]
pub struct BoardContext {
    pub store: AppStore,
    pub config: StoredValue<BoardConfig>,
    /// Issue whose edit modal is open
    pub editing: RwSignal<Option<WorkItem>>,
    sync: StoredValue<AppSync, LocalStorage>,
}

impl BoardContext {
    pub fn new(store: AppStore, config: BoardConfig) -> Self {
        let api = HttpIssueApi::new(&config.api_base);
        let sync = BoardSync::new(
            api,
            StoreBoard(store),
            StoreNotifier::new(store, config.toast),
            config.project_id,
        );
        Self {
            store,
            config: StoredValue::new(config),
            editing: RwSignal::new(None),
            sync: StoredValue::new_local(sync),
        }
    }

    /// A handle to move into a spawned task; `None` once the board is gone
    pub fn sync(&self) -> Option<AppSync> {
        self.sync.try_get_value()
    }
}

pub fn use_board_context() -> BoardContext {
    expect_context::<BoardContext>()
}
