//! Board Configuration
//!
//! Everything the board needs from its surroundings (backend location,
//! project, theme, signed-in user) is passed in explicitly through
//! [`BoardConfig`] rather than read from ambient globals.

use std::str::FromStr;

use log::LevelFilter;
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn css_class(&self) -> &'static str {
        match self {
            Theme::Light => "theme-light",
            Theme::Dark => "theme-dark",
        }
    }
}

impl FromStr for Theme {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(DomainError::InvalidInput(format!("unknown theme '{}'", other))),
        }
    }
}

/// The signed-in user, resolved from the session cookie at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// "ROLE_PROJECT_ADMIN" -> "project admin"
pub fn format_role(authority: &str) -> String {
    authority
        .trim_start_matches("ROLE_")
        .replace('_', " ")
        .to_lowercase()
}

/// Toast auto-dismiss delays in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastTimings {
    pub success_ms: u32,
    pub other_ms: u32,
}

impl Default for ToastTimings {
    fn default() -> Self {
        Self {
            success_ms: 2000,
            other_ms: 3000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Backend origin, without the `/api` prefix
    pub api_base: String,
    /// Project whose issues the board shows
    pub project_id: u32,
    pub theme: Theme,
    pub session: Option<SessionUser>,
    pub toast: ToastTimings,
    pub log_level: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            project_id: 0,
            theme: Theme::default(),
            session: None,
            toast: ToastTimings::default(),
            log_level: "info".to_string(),
        }
    }
}

impl BoardConfig {
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        let api_base = api_base.into();
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    pub fn with_project(mut self, project_id: u32) -> Self {
        self.project_id = project_id;
        self
    }

    /// Overlay settings from a URL query string (`?project=12&theme=dark`).
    /// Unknown keys are ignored.
    pub fn apply_query(&mut self, query: &str) -> DomainResult<()> {
        for pair in query.trim_start_matches('?').split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = percent_decode_str(value).decode_utf8_lossy();
            match key {
                "project" => {
                    self.project_id = value.parse().map_err(|_| {
                        DomainError::InvalidInput(format!("project must be a number, got '{}'", value))
                    })?;
                }
                "theme" => self.theme = value.parse()?,
                "log" => self.log_level = value.into_owned(),
                _ => {}
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.api_base.trim().is_empty() {
            return Err(DomainError::InvalidInput("api_base must not be empty".to_string()));
        }
        if self.project_id == 0 {
            return Err(DomainError::InvalidInput("no project selected".to_string()));
        }
        Ok(())
    }

    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}
