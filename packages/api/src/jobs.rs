//! Job endpoint bindings.

use jobs_core::{Job, JobId, JobStatus, JobStatusType, JobsSortBy, PaginatedResponse};
use serde::{Deserialize, Serialize};

use crate::{ApiConfig, ApiError, HttpClient, HttpMethod, RequestOptions};

/// Request type for creating a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateJobRequest {
    pub name: String,
}

/// Request type for changing a job's status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateJobStatusRequest {
    pub status_type: JobStatusType,
}

/// Query parameters of the job list endpoint. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobsListParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatusType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<JobsSortBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl JobsListParams {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(sort) = self.sort {
            pairs.push(("sort", sort.as_str().to_string()));
        }
        pairs.extend(self.page().query_pairs());
        pairs
    }

    pub fn page(&self) -> PageParams {
        PageParams {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

/// Limit/offset parameters for paginated sub-resources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl PageParams {
    pub fn new(limit: u32, offset: u32) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
        }
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        pairs
    }
}

/// Render `?a=1&b=2`, or nothing when there are no pairs.
///
/// Values are enum tokens and decimal numbers, none of which need escaping.
fn to_query_string(pairs: &[(&'static str, String)]) -> String {
    if pairs.is_empty() {
        return String::new();
    }
    let joined = pairs
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");
    format!("?{}", joined)
}

/// Typed access to the `/jobs/` endpoints.
#[derive(Clone)]
pub struct JobsApi {
    client: HttpClient,
}

impl JobsApi {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Bindings over the default reqwest transport.
    pub fn from_config(config: ApiConfig) -> Self {
        Self::new(HttpClient::from_config(config))
    }

    /// `GET /jobs/?status&sort&limit&offset`
    pub async fn list_jobs(
        &self,
        params: &JobsListParams,
    ) -> Result<PaginatedResponse<Job>, ApiError> {
        let path = format!("/jobs/{}", to_query_string(&params.query_pairs()));
        self.client.request(&path, RequestOptions::default()).await
    }

    /// `POST /jobs/`
    pub async fn create_job(&self, request: &CreateJobRequest) -> Result<Job, ApiError> {
        let body = serde_json::to_value(request).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.client
            .request("/jobs/", RequestOptions::method(HttpMethod::Post).with_body(body))
            .await
    }

    /// `GET /jobs/{id}/`
    pub async fn get_job(&self, id: JobId) -> Result<Job, ApiError> {
        self.client
            .request(&format!("/jobs/{}/", id), RequestOptions::default())
            .await
    }

    /// `PATCH /jobs/{id}/`
    pub async fn update_job_status(
        &self,
        id: JobId,
        request: &UpdateJobStatusRequest,
    ) -> Result<Job, ApiError> {
        let body = serde_json::to_value(request).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.client
            .request(
                &format!("/jobs/{}/", id),
                RequestOptions::method(HttpMethod::Patch).with_body(body),
            )
            .await
    }

    /// `DELETE /jobs/{id}/`, expecting an empty body.
    pub async fn delete_job(&self, id: JobId) -> Result<(), ApiError> {
        self.client
            .request::<Option<serde_json::Value>>(
                &format!("/jobs/{}/", id),
                RequestOptions::method(HttpMethod::Delete),
            )
            .await
            .map(|_| ())
    }

    /// `GET /jobs/{id}/statuses/?limit&offset`
    pub async fn list_job_statuses(
        &self,
        id: JobId,
        page: PageParams,
    ) -> Result<PaginatedResponse<JobStatus>, ApiError> {
        let path = format!(
            "/jobs/{}/statuses/{}",
            id,
            to_query_string(&page.query_pairs())
        );
        self.client.request(&path, RequestOptions::default()).await
    }
}
