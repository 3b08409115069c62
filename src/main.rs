//! Issue Board Frontend Entry Point

mod app;
mod components;
mod context;
mod logging;
mod store;

use app::{App, ConfigError};
use board_core::config::BoardConfig;
use board_core::domain::DomainResult;
use leptos::prelude::*;

/// Backend origin baked in at build time
const API_BASE_ENV: Option<&str> = option_env!("ISSUE_BOARD_API_BASE");

fn load_config() -> DomainResult<BoardConfig> {
    let mut config = BoardConfig::default();
    if let Some(base) = API_BASE_ENV {
        config = config.with_api_base(base);
    }
    if let Some(search) = web_sys::window().and_then(|win| win.location().search().ok()) {
        config.apply_query(&search)?;
    }
    config.validate()?;
    Ok(config)
}

fn main() {
    console_error_panic_hook::set_once();

    match load_config() {
        Ok(config) => {
            logging::init(config.level_filter());
            log::info!("[APP] Board for project {} against {}", config.project_id, config.api_base);
            mount_to_body(move || view! { <App config=config /> });
        }
        Err(e) => {
            logging::init(log::LevelFilter::Info);
            log::error!("[APP] Invalid configuration: {}", e);
            let message = e.to_string();
            mount_to_body(move || view! { <ConfigError message=message /> });
        }
    }
}
