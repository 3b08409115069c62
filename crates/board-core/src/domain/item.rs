//! Work Item Entity
//!
//! An issue on the board. Its status selects the column it renders in and its
//! position is the rank inside that column.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::DomainError;

/// Workflow status; one board column per value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Status {
    #[default]
    Pending,
    InProgress,
    Resolved,
}

impl Status {
    /// Column order, left to right
    pub const ALL: [Status; 3] = [Status::Pending, Status::InProgress, Status::Resolved];

    /// Wire name used by the REST backend
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::InProgress => "In Progress",
            Status::Resolved => "Resolved",
        }
    }

    /// Column heading
    pub fn label(&self) -> &'static str {
        match self {
            Status::Pending => "To Do",
            Status::InProgress => "In Progress",
            Status::Resolved => "Resolved",
        }
    }

    /// Next status in the card menu cycle
    pub fn next(&self) -> Self {
        match self {
            Status::Pending => Status::InProgress,
            Status::InProgress => Status::Resolved,
            Status::Resolved => Status::Pending,
        }
    }

    pub fn progress_percent(&self) -> u8 {
        match self {
            Status::Pending => 0,
            Status::InProgress => 50,
            Status::Resolved => 100,
        }
    }

    /// Index into [`Status::ALL`]
    pub fn column_index(&self) -> usize {
        match self {
            Status::Pending => 0,
            Status::InProgress => 1,
            Status::Resolved => 2,
        }
    }

    /// CSS modifier for badges and progress bars
    pub fn css_class(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::InProgress => "in-progress",
            Status::Resolved => "resolved",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = DomainError;

    /// Accepts the current wire names plus the older vocabularies the
    /// backend has used ("New", "TO_DO", "Completed", ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "pending" | "new" | "todo" => Ok(Status::Pending),
            "inprogress" => Ok(Status::InProgress),
            "resolved" | "completed" | "done" => Ok(Status::Resolved),
            _ => Err(DomainError::InvalidInput(format!("unknown status '{}'", s))),
        }
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A single issue on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Unique identifier, assigned by the backend
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: Status,
    /// Zero-based rank within the status column
    pub position: u32,
}

impl WorkItem {
    pub fn new(id: u32, title: impl Into<String>, status: Status, position: u32) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            status,
            position,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
