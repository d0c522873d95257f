//! Core domain types for the job dashboard.
//!
//! This crate contains shared types used across all packages:
//! - Job and JobStatusType for tracked work items
//! - JobStatus for the append-only status history
//! - PaginatedResponse for limit/offset list envelopes

mod error;
mod job;
mod page;

pub use error::ParseError;
pub use job::{Job, JobId, JobStatus, JobStatusType, JobsSortBy};
pub use page::PaginatedResponse;
