//! Backend Access
//!
//! The REST contract the board talks to, behind the [`IssueApi`] trait so the
//! synchronizer can be driven by a fake in tests.

mod http_api;
mod traits;
mod wire;

pub use http_api::HttpIssueApi;
pub use traits::{ApiError, ApiResult, IssueApi, IssueDraft};
pub use wire::{IssueRecord, UserRecord};
