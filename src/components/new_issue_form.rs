//! New Issue Form Component
//!
//! Title and description; new issues start in Pending.

use board_core::api::IssueDraft;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_board_context;

#[component]
pub fn NewIssueForm() -> impl IntoView {
    let ctx = use_board_context();

    let (title, set_title) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (saving, set_saving) = signal(false);

    let create_issue = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(sync) = ctx.sync() else { return };
        let draft = IssueDraft::new(title.get(), description.get());
        set_saving.set(true);

        spawn_local(async move {
            if sync.create_issue(&draft).await.is_ok() {
                set_title.set(String::new());
                set_description.set(String::new());
            }
            set_saving.set(false);
        });
    };

    view! {
        <form class="new-issue-form" on:submit=create_issue>
            <input
                type="text"
                placeholder="Issue title"
                prop:value=move || title.get()
                on:input=move |ev| set_title.set(event_target_value(&ev))
            />
            <textarea
                placeholder="Description"
                prop:value=move || description.get()
                on:input=move |ev| set_description.set(event_target_value(&ev))
            />
            <button type="submit" disabled=move || saving.get()>"Add issue"</button>
        </form>
    }
}
