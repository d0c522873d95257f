//! REST API client for the job dashboard.
//!
//! This crate contains everything that talks HTTP:
//! - `ApiConfig` for the base URL (build-time `API_BASE_URL` override)
//! - `HttpClient` on top of a pluggable `Transport` (reqwest by default)
//! - `JobsApi` bindings for the job endpoints
//! - Error types and the duplicate-name classifier

mod classify;
mod client;
mod config;
mod error;
mod jobs;
mod transport;

pub use classify::{CreateJobFailure, classify_create_error, is_duplicate_name_payload};
pub use client::{HttpClient, RequestOptions};
pub use config::{ApiConfig, DEFAULT_API_BASE_URL};
pub use error::{ApiError, HttpError};
pub use jobs::{CreateJobRequest, JobsApi, JobsListParams, PageParams, UpdateJobStatusRequest};
pub use transport::{
    FnTransport, HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport,
    TransportFuture,
};

// Re-export core types for convenience
pub use jobs_core::{Job, JobId, JobStatus, JobStatusType, JobsSortBy, PaginatedResponse};
