//! Domain Errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Rule violations and lookups that failed, independent of transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// A state transition that is not allowed from the current state
    #[error("Conflict: {0}")]
    Conflict(String),
}
