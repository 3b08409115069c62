//! Issue Board Frontend App
//!
//! Header with the signed-in user, the new-issue form and the three-column
//! board.

use board_core::api::{HttpIssueApi, IssueApi};
use board_core::config::{BoardConfig, SessionUser};
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};
use reactive_stores::Store;

use crate::components::{EditIssueModal, IssueBoard, NewIssueForm, ToastStack};
use crate::context::BoardContext;
use crate::store::AppState;

#[component]
pub fn App(config: BoardConfig) -> impl IntoView {
    let store = Store::new(AppState::new());
    let theme = config.theme;
    let project_id = config.project_id;
    let (session, set_session) = signal(config.session.clone());

    // Resolve the session user unless the host page already passed one in
    if config.session.is_none() {
        let api = HttpIssueApi::new(&config.api_base);
        spawn_local(async move {
            match api.current_user().await {
                Ok(user) => {
                    info!("[APP] Signed in as {}", user.username);
                    set_session.set(Some(user));
                }
                Err(e) => warn!("[APP] Could not resolve session user: {}", e),
            }
        });
    }

    let ctx = BoardContext::new(store, config);
    provide_context(ctx);

    // Initial load
    if let Some(sync) = ctx.sync() {
        spawn_local(async move { sync.reload().await });
    }

    view! {
        <div class=format!("app-layout {}", theme.css_class())>
            <header class="board-header">
                <h1>"Issues"</h1>
                <span class="project-id">{format!("Project #{}", project_id)}</span>
                <UserBadge session=session />
            </header>

            <NewIssueForm />
            <IssueBoard />
            <EditIssueModal />
            <ToastStack />
        </div>
    }
}

#[component]
fn UserBadge(session: ReadSignal<Option<SessionUser>>) -> impl IntoView {
    move || {
        session.get().map(|user| {
            let role = user.role.clone().unwrap_or_default();
            view! {
                <div class="user-badge" title=user.email.clone()>
                    <span class="user-name">{user.username.clone()}</span>
                    <span class="user-role">{role}</span>
                </div>
            }
        })
    }
}

/// Shown instead of the board when the page was opened without a usable
/// configuration
#[component]
pub fn ConfigError(message: String) -> impl IntoView {
    view! {
        <div class="app-layout config-error">
            <h1>"Issues"</h1>
            <p>{message}</p>
            <p class="hint">"Open the board with ?project=<id> in the address."</p>
        </div>
    }
}
