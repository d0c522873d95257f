//! Job domain types mirrored from the jobs REST API.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ParseError;

/// Server-assigned identifier for a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub i64);

impl JobId {
    /// Parse a job ID from a route segment.
    ///
    /// Only positive integers identify a job; anything else is rejected so
    /// that queries keyed on it stay disabled.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        match s.trim().parse::<i64>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(ParseError::JobId(s.to_string())),
        }
    }

    /// Whether this id can address a job on the server.
    pub fn is_valid(self) -> bool {
        self.0 > 0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a job, transmitted verbatim as uppercase strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatusType {
    #[default]
    Pending,
    Running,
    Completed,
    Failed,
}

impl JobStatusType {
    /// Every status, in the order selectors present them.
    pub const ALL: [JobStatusType; 4] = [
        JobStatusType::Pending,
        JobStatusType::Running,
        JobStatusType::Completed,
        JobStatusType::Failed,
    ];

    /// Wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatusType::Pending => "PENDING",
            JobStatusType::Running => "RUNNING",
            JobStatusType::Completed => "COMPLETED",
            JobStatusType::Failed => "FAILED",
        }
    }
}

impl std::fmt::Display for JobStatusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatusType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobStatusType::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseError::Status(s.to_string()))
    }
}

/// Sort order accepted by the list endpoint. A leading `-` means descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobsSortBy {
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "-name")]
    NameDesc,
    #[serde(rename = "created_at")]
    CreatedAt,
    /// Newest first.
    #[default]
    #[serde(rename = "-created_at")]
    CreatedAtDesc,
}

impl JobsSortBy {
    /// Sort options in the order the filters bar lists them.
    pub const ALL: [JobsSortBy; 4] = [
        JobsSortBy::CreatedAtDesc,
        JobsSortBy::CreatedAt,
        JobsSortBy::Name,
        JobsSortBy::NameDesc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            JobsSortBy::Name => "name",
            JobsSortBy::NameDesc => "-name",
            JobsSortBy::CreatedAt => "created_at",
            JobsSortBy::CreatedAtDesc => "-created_at",
        }
    }

    /// Human-readable label for selectors.
    pub fn label(self) -> &'static str {
        match self {
            JobsSortBy::Name => "Name A → Z",
            JobsSortBy::NameDesc => "Name Z → A",
            JobsSortBy::CreatedAt => "Created (oldest first)",
            JobsSortBy::CreatedAtDesc => "Created (newest first)",
        }
    }
}

impl std::fmt::Display for JobsSortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobsSortBy {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobsSortBy::ALL
            .into_iter()
            .find(|sort| sort.as_str() == s)
            .ok_or_else(|| ParseError::Sort(s.to_string()))
    }
}

/// A tracked job as returned by the API.
///
/// `current_status_type` is denormalized by the server from the most recent
/// [`JobStatus`] entry of the job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Server-assigned identifier.
    pub id: JobId,
    /// Unique, non-empty display name.
    pub name: String,
    /// Status of the latest history entry.
    pub current_status_type: JobStatusType,
    /// When the latest status change happened.
    pub current_status_timestamp: DateTime<Utc>,
    /// When the job was created.
    pub created_at: DateTime<Utc>,
    /// When the job was last updated.
    pub updated_at: DateTime<Utc>,
}

/// One immutable entry of a job's status history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobStatus {
    pub id: i64,
    pub status_type: JobStatusType,
    pub timestamp: DateTime<Utc>,
}
