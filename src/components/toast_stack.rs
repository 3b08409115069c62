//! Toast Stack Component
//!
//! Renders the store's notices; they expire on their own, a click dismisses
//! one early.

use leptos::prelude::*;

use crate::context::use_board_context;
use crate::store::{store_dismiss_toast, AppStateStoreFields};

#[component]
pub fn ToastStack() -> impl IntoView {
    let ctx = use_board_context();
    let store = ctx.store;
    let toasts = store.toasts();

    view! {
        <div class="toast-stack">
            <For
                each=move || toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.kind.css_class() on:click=move |_| store_dismiss_toast(&store, id)>
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
