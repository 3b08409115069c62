//! Issue Card Component
//!
//! A draggable card with status badge, progress bar and an action menu.

use board_core::domain::WorkItem;
use leptos::ev;
use leptos::html::Article;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::*;
use log::warn;
use wasm_bindgen::JsCast;

use crate::components::DeleteConfirmButton;
use crate::context::use_board_context;

#[component]
pub fn IssueCard(item: WorkItem, dnd: DndSignals) -> impl IntoView {
    let ctx = use_board_context();

    let id = item.id;
    let status = item.status;
    let next = status.next();
    let (menu_open, set_menu_open) = signal(false);
    let card_ref = NodeRef::<Article>::new();

    // Close the menu on a mousedown anywhere outside this card
    let outside_click = window_event_listener(ev::mousedown, move |ev| {
        if !menu_open.get_untracked() {
            return;
        }
        let inside = match (card_ref.get_untracked(), ev.target()) {
            (Some(card), Some(target)) => card.contains(target.dyn_ref::<web_sys::Node>()),
            _ => false,
        };
        if !inside {
            set_menu_open.set(false);
        }
    });
    on_cleanup(move || outside_click.remove());

    // DnD handlers
    let on_mousedown = make_on_mousedown(dnd, id);
    let on_mouseenter = make_on_item_mouseenter(dnd, id);
    let on_mouseleave = make_on_mouseleave(dnd);

    // Visual state
    let is_dragging = move || dnd.dragging_id() == Some(id);
    let is_drop_target = move || dnd.over() == Some(DropTarget::Item(id));

    let card_class = move || {
        let mut c = String::from("issue-card");
        if is_dragging() { c.push_str(" dragging"); }
        if is_drop_target() { c.push_str(" drop-target"); }
        c
    };

    let edit_item = item.clone();
    let on_edit = move |_| {
        set_menu_open.set(false);
        ctx.editing.set(Some(edit_item.clone()));
    };

    let on_cycle = move |_| {
        set_menu_open.set(false);
        if let Some(sync) = ctx.sync() {
            spawn_local(async move {
                if let Err(e) = sync.cycle_status(id).await {
                    warn!("[CARD] Status change for issue {} failed: {}", id, e);
                }
            });
        }
    };

    let on_delete = Callback::new(move |_| {
        if let Some(sync) = ctx.sync() {
            spawn_local(async move {
                if let Err(e) = sync.delete_issue(id).await {
                    warn!("[CARD] Delete of issue {} failed: {}", id, e);
                }
            });
        }
    });

    view! {
        <article
            node_ref=card_ref
            class=card_class
            on:mousedown=on_mousedown
            on:mouseenter=on_mouseenter
            on:mouseleave=on_mouseleave
        >
            <div class="card-header">
                <h3 class="card-title">{item.title.clone()}</h3>
                <button
                    class="menu-btn"
                    on:click=move |_| {
                        // Ignore the click that ends a drag
                        if !dnd.drag_just_ended.get_untracked() {
                            set_menu_open.update(|open| *open = !*open);
                        }
                    }
                >
                    "⋯"
                </button>
            </div>

            <Show when=move || menu_open.get()>
                <div class="card-menu">
                    <button class="menu-item" on:click=on_edit.clone()>"Edit"</button>
                    <button class="menu-item" on:click=on_cycle>{format!("Mark as {}", next)}</button>
                    <DeleteConfirmButton button_class="menu-item danger" on_confirm=on_delete />
                </div>
            </Show>

            <p class="card-description">{item.description.clone()}</p>

            <div class="card-footer">
                <span class=format!("status-badge {}", status.css_class())>{status.as_str()}</span>
                <div class="progress">
                    <div
                        class=format!("progress-bar {}", status.css_class())
                        style=format!("width: {}%;", status.progress_percent())
                    />
                </div>
            </div>
        </article>
    }
}
