//! Domain Layer
//!
//! Work items, their statuses and the board that groups them into columns.
//! This layer has no network access.

pub(crate) mod board;
mod error;
mod item;

pub use board::{BoardSnapshot, BoardState, Columns, ReorderEntry};
pub use error::{DomainError, DomainResult};
pub use item::{Status, WorkItem};
