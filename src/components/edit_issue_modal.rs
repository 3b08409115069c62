//! Edit Issue Modal Component
//!
//! Opened from a card's menu. Saving sends title, description and status
//! and then reloads the board.

use board_core::api::IssueDraft;
use board_core::domain::Status;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;

use crate::context::use_board_context;

#[component]
pub fn EditIssueModal() -> impl IntoView {
    let ctx = use_board_context();

    let (title, set_title) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (status, set_status) = signal(Status::Pending);

    // Copy the issue into the form whenever the modal opens
    Effect::new(move |_| {
        if let Some(item) = ctx.editing.get() {
            set_title.set(item.title);
            set_description.set(item.description);
            set_status.set(item.status);
        }
    });

    let close = move || ctx.editing.set(None);

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(id) = ctx.editing.with_untracked(|editing| editing.as_ref().map(|item| item.id)) else {
            return;
        };
        let Some(sync) = ctx.sync() else { return };
        let draft = IssueDraft::new(title.get_untracked(), description.get_untracked())
            .with_status(status.get_untracked());

        spawn_local(async move {
            if sync.update_issue(id, &draft).await.is_ok() {
                close();
            }
        });
    };

    view! {
        <Show when=move || ctx.editing.with(Option::is_some)>
            <div class="modal-backdrop" on:click=move |_| close()>
                <form class="modal edit-issue" on:submit=save on:click=|ev| ev.stop_propagation()>
                    <h2>"Edit issue"</h2>
                    <input
                        type="text"
                        prop:value=move || title.get()
                        on:input=move |ev| set_title.set(event_target_value(&ev))
                    />
                    <textarea
                        prop:value=move || description.get()
                        on:input=move |ev| set_description.set(event_target_value(&ev))
                    />
                    <select
                        prop:value=move || status.get().as_str()
                        on:change=move |ev| {
                            match event_target_value(&ev).parse::<Status>() {
                                Ok(parsed) => set_status.set(parsed),
                                Err(e) => warn!("[EDIT] {}", e),
                            }
                        }
                    >
                        {Status::ALL
                            .into_iter()
                            .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                            .collect_view()}
                    </select>
                    <div class="modal-actions">
                        <button type="button" class="cancel-btn" on:click=move |_| close()>"Cancel"</button>
                        <button type="submit">"Save"</button>
                    </div>
                </form>
            </div>
        </Show>
    }
}
