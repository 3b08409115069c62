//! Wire Formats
//!
//! JSON shapes exchanged with the backend.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::{format_role, SessionUser};
use crate::domain::{Status, WorkItem};

/// Issue as returned by the list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRecord {
    pub id: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: String,
    #[serde(default)]
    pub position: Option<i64>,
}

impl IssueRecord {
    /// Convert to a work item. `array_index` stands in for a missing or
    /// negative position. Records with an unknown status yield `None`.
    pub fn into_item(self, array_index: usize) -> Option<WorkItem> {
        let status = match self.status.parse::<Status>() {
            Ok(status) => status,
            Err(e) => {
                warn!("[API] Skipping issue {}: {}", self.id, e);
                return None;
            }
        };
        let position = self
            .position
            .and_then(|p| u32::try_from(p).ok())
            .unwrap_or(array_index as u32);
        Some(WorkItem {
            id: self.id,
            title: self.title,
            description: self.description.unwrap_or_default(),
            status,
            position,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Authority {
    pub authority: String,
}

/// Session user as returned by the auth endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub roles: Vec<Authority>,
}

impl From<UserRecord> for SessionUser {
    fn from(record: UserRecord) -> Self {
        SessionUser {
            username: record.username,
            email: record.email,
            role: record.roles.first().map(|r| format_role(&r.authority)),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateIssueBody<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub status: Status,
    pub priority: &'static str,
    pub project_id: u32,
}

#[derive(Serialize)]
pub(crate) struct UpdateIssueBody<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub status: Status,
    pub priority: &'static str,
}

/// The board has no priority editor; the backend requires one
pub(crate) const DEFAULT_PRIORITY: &str = "MEDIUM";
