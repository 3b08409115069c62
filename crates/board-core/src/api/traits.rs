//! Backend Access - Core Traits
//!
//! Abstract interface for the issue endpoints. Futures are not `Send`
//! because browser fetch futures are not.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SessionUser;
use crate::domain::{DomainError, DomainResult, ReorderEntry, Status, WorkItem};

pub type ApiResult<T> = Result<T, ApiError>;

/// Failure talking to the backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Connection refused, timeout, aborted fetch
    #[error("network error: {0}")]
    Transport(String),
    /// Non-2xx response; `message` is the server's `{"message": ...}` if any
    #[error("server responded with status {status}")]
    Status { status: u16, message: Option<String> },
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Text for a notice: the server's own message when it sent one
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status { message: Some(message), .. } if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Status { status: status.as_u16(), message: None }
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// Editable fields of an issue, shared by create and edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueDraft {
    pub title: String,
    pub description: String,
    pub status: Status,
}

impl IssueDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            status: Status::Pending,
        }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Title and description are both required
    pub fn validate(&self) -> DomainResult<()> {
        if self.title.trim().is_empty() || self.description.trim().is_empty() {
            return Err(DomainError::InvalidInput("Title and description required".to_string()));
        }
        Ok(())
    }
}

/// Issue endpoints of the REST backend
#[async_trait(?Send)]
pub trait IssueApi {
    /// All issues of a project, in backend order
    async fn list_issues(&self, project_id: u32) -> ApiResult<Vec<WorkItem>>;

    /// Status-only update, used after a cross-column move
    async fn update_status(&self, id: u32, status: Status) -> ApiResult<()>;

    /// Batch update of `{id, position, status}` for every listed item
    async fn reorder(&self, entries: &[ReorderEntry]) -> ApiResult<()>;

    async fn create_issue(&self, project_id: u32, draft: &IssueDraft) -> ApiResult<()>;

    async fn update_issue(&self, id: u32, draft: &IssueDraft) -> ApiResult<()>;

    async fn delete_issue(&self, id: u32) -> ApiResult<()>;

    /// User bound to the session cookie
    async fn current_user(&self) -> ApiResult<SessionUser>;
}
