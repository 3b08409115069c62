//! Persistence Synchronizer
//!
//! Optimistic apply, backend calls and rollback for board mutations.

mod phase;
mod synchronizer;

#[cfg(test)]
mod tests;

pub use phase::{PersistLifecycle, PersistPhase};
pub use synchronizer::{BoardHandle, BoardSync, SyncError, SyncOutcome, SyncResult};
