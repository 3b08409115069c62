//! Issue Board Component
//!
//! The three status columns with drag-and-drop between and within them.
//! Drops go through the synchronizer, which updates the store immediately and
//! persists in the background.

use board_core::domain::Status;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::*;
use log::{debug, error};

use crate::components::BoardColumn;
use crate::context::use_board_context;
use crate::store::AppStateStoreFields;

#[component]
pub fn IssueBoard() -> impl IntoView {
    let ctx = use_board_context();

    // Create DnD signals
    let dnd = create_dnd_signals();

    // Bind global mouseup handler for dropping
    bind_global_mouseup(dnd, move |dragged_id, target| {
        debug!("[DND] Drop: dragged={}, target={:?}", dragged_id, target);
        let Some(sync) = ctx.sync() else {
            debug!("[DND] Board gone, ignoring drop");
            return;
        };
        spawn_local(async move {
            match sync.drop_item(dragged_id, target).await {
                Ok(outcome) => debug!("[DND] Drop of {} finished: {:?}", dragged_id, outcome),
                Err(e) => error!("[DND] Drop of {} failed: {}", dragged_id, e),
            }
        });
    });

    let loading = ctx.store.loading();
    let board_class = move || {
        if dnd.dragging_id().is_some() {
            "board dragging"
        } else {
            "board"
        }
    };

    view! {
        <Show when=move || loading.get()>
            <div class="board-loading">"Loading issues..."</div>
        </Show>
        <div class=board_class>
            {Status::ALL
                .into_iter()
                .map(|status| view! { <BoardColumn status=status dnd=dnd /> })
                .collect_view()}
        </div>
    }
}
