//! Board Column Component
//!
//! One status column: heading, cards in position order and a drop zone at
//! the bottom for appending.

use board_core::domain::{Status, WorkItem};
use leptos::prelude::*;
use leptos_dragdrop::*;

use crate::components::IssueCard;
use crate::context::use_board_context;
use crate::store::AppStateStoreFields;

#[component]
pub fn BoardColumn(status: Status, dnd: DndSignals) -> impl IntoView {
    let ctx = use_board_context();
    let board = ctx.store.board();

    let cards = move || board.with(|b| b.column(status).cloned().collect::<Vec<WorkItem>>());
    let count = move || board.with(|b| b.column_len(status));

    view! {
        <section class=format!("board-column {}", status.css_class())>
            <header class="column-header">
                <h2>{status.label()}</h2>
                <span class="column-count">{count}</span>
            </header>
            <div class="column-cards">
                <For
                    each=cards
                    key=|item| {
                        (
                            item.id,
                            item.position,
                            item.status,
                            item.title.clone(),
                            item.description.clone(),
                        )
                    }
                    children=move |item| view! { <IssueCard item=item dnd=dnd /> }
                />
                <ColumnDropZone status=status dnd=dnd is_empty=Signal::derive(move || count() == 0) />
            </div>
        </section>
    }
}

/// Drop zone at the end of a column; dropping here appends
#[component]
fn ColumnDropZone(status: Status, dnd: DndSignals, is_empty: Signal<bool>) -> impl IntoView {
    let on_mouseenter = make_on_column_mouseenter(dnd, status);
    let on_mouseleave = make_on_mouseleave(dnd);

    // Is this zone the current drop target?
    let is_active = move || dnd.over() == Some(DropTarget::Column(status));

    let zone_class = move || {
        let mut c = String::from("column-drop-zone");
        if dnd.dragging_id().is_none() { c.push_str(" idle"); }
        if is_empty.get() { c.push_str(" empty"); }
        if is_active() { c.push_str(" active"); }
        c
    };

    view! {
        <div class=zone_class on:mouseenter=on_mouseenter on:mouseleave=on_mouseleave>
            <Show when=move || is_empty.get()>
                <span class="empty-hint">"No issues"</span>
            </Show>
        </div>
    }
}
