//! This crate contains all shared UI for the job dashboard.

// Dioxus `rsx!` macro expands to unwraps internally; allow to avoid false positives.
#![allow(clippy::disallowed_methods)]

mod error_boundary;
pub use error_boundary::AppErrorBoundary;

mod hooks;
pub use hooks::{QueryState, use_job_detail, use_job_history, use_job_queries, use_jobs_query};

pub mod jobs;

#[cfg(test)]
mod test_support;
