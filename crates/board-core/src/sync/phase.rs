//! Persistence Lifecycle
//!
//! One optimistic mutation moves through
//! `Idle -> Pending(snapshot) -> Committed | RolledBack`.
//! Any other transition is a [`DomainError::Conflict`].

use crate::domain::{BoardSnapshot, DomainError, DomainResult};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PersistPhase {
    #[default]
    Idle,
    /// Optimistic state is on screen, the server has not answered yet
    Pending {
        snapshot: BoardSnapshot,
        /// Board version right after the optimistic apply
        applied_version: u64,
    },
    Committed,
    RolledBack,
}

impl PersistPhase {
    pub fn name(&self) -> &'static str {
        match self {
            PersistPhase::Idle => "idle",
            PersistPhase::Pending { .. } => "pending",
            PersistPhase::Committed => "committed",
            PersistPhase::RolledBack => "rolled back",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PersistLifecycle {
    phase: PersistPhase,
}

impl PersistLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &PersistPhase {
        &self.phase
    }

    /// Version the optimistic apply produced, while pending
    pub fn applied_version(&self) -> Option<u64> {
        match &self.phase {
            PersistPhase::Pending { applied_version, .. } => Some(*applied_version),
            _ => None,
        }
    }

    pub fn begin(&mut self, snapshot: BoardSnapshot, applied_version: u64) -> DomainResult<()> {
        if !matches!(self.phase, PersistPhase::Idle) {
            return Err(invalid("begin", &self.phase));
        }
        self.phase = PersistPhase::Pending { snapshot, applied_version };
        Ok(())
    }

    pub fn commit(&mut self) -> DomainResult<()> {
        if !matches!(self.phase, PersistPhase::Pending { .. }) {
            return Err(invalid("commit", &self.phase));
        }
        self.phase = PersistPhase::Committed;
        Ok(())
    }

    /// Leave `Pending`, handing back the snapshot to restore
    pub fn roll_back(&mut self) -> DomainResult<BoardSnapshot> {
        match std::mem::take(&mut self.phase) {
            PersistPhase::Pending { snapshot, .. } => {
                self.phase = PersistPhase::RolledBack;
                Ok(snapshot)
            }
            other => {
                let err = invalid("roll back", &other);
                self.phase = other;
                Err(err)
            }
        }
    }
}

fn invalid(action: &str, phase: &PersistPhase) -> DomainError {
    DomainError::Conflict(format!("cannot {} while {}", action, phase.name()))
}
