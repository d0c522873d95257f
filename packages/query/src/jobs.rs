//! Job queries and mutations over the cache.

use std::rc::Rc;

use api::{
    ApiConfig, ApiError, CreateJobRequest, JobsApi, JobsListParams, PageParams,
    UpdateJobStatusRequest,
};
use jobs_core::{Job, JobId, JobStatus, JobStatusType, PaginatedResponse};

use crate::QueryClient;

/// Key builders for every job query.
pub mod job_keys {
    use api::{JobsListParams, PageParams};
    use jobs_core::JobId;

    use crate::QueryKey;

    pub fn all() -> QueryKey {
        QueryKey::new("jobs")
    }

    /// Prefix of every list query.
    pub fn lists() -> QueryKey {
        all().push("list")
    }

    pub fn list(params: &JobsListParams) -> QueryKey {
        lists().push_params(params)
    }

    pub fn detail(id: JobId) -> QueryKey {
        all().push("detail").push(id.0)
    }

    /// Prefix of every history page of one job.
    pub fn histories(id: JobId) -> QueryKey {
        all().push("history").push(id.0)
    }

    pub fn history(id: JobId, page: PageParams) -> QueryKey {
        histories(id).push_params(&page)
    }
}

/// The job API as seen through the cache.
///
/// Reads are cached under [`job_keys`]; writes invalidate what they change:
/// - create, delete: every list
/// - update status: every list, the job's detail and its history pages
#[derive(Clone)]
pub struct JobQueries {
    cache: QueryClient,
    api: JobsApi,
}

impl JobQueries {
    pub fn new(cache: QueryClient, api: JobsApi) -> Self {
        Self { cache, api }
    }

    /// Default cache over the reqwest transport.
    pub fn from_config(config: ApiConfig) -> Self {
        Self::new(QueryClient::default(), JobsApi::from_config(config))
    }

    pub fn cache(&self) -> &QueryClient {
        &self.cache
    }

    pub async fn list(&self, params: JobsListParams) -> Result<Rc<PaginatedResponse<Job>>, ApiError> {
        let api = self.api.clone();
        let key = job_keys::list(&params);
        self.cache
            .fetch(key, move || {
                let api = api.clone();
                let params = params.clone();
                async move { api.list_jobs(&params).await }
            })
            .await
    }

    pub async fn detail(&self, id: JobId) -> Result<Rc<Job>, ApiError> {
        let api = self.api.clone();
        self.cache
            .fetch(job_keys::detail(id), move || {
                let api = api.clone();
                async move { api.get_job(id).await }
            })
            .await
    }

    pub async fn history(
        &self,
        id: JobId,
        page: PageParams,
    ) -> Result<Rc<PaginatedResponse<JobStatus>>, ApiError> {
        let api = self.api.clone();
        self.cache
            .fetch(job_keys::history(id, page), move || {
                let api = api.clone();
                async move { api.list_job_statuses(id, page).await }
            })
            .await
    }

    pub async fn create(&self, name: &str) -> Result<Job, ApiError> {
        let request = CreateJobRequest {
            name: name.to_string(),
        };
        self.cache
            .mutate(self.api.create_job(&request), &[job_keys::lists()])
            .await
    }

    pub async fn update_status(&self, id: JobId, status: JobStatusType) -> Result<Job, ApiError> {
        let request = UpdateJobStatusRequest {
            status_type: status,
        };
        self.cache
            .mutate(
                self.api.update_job_status(id, &request),
                &[job_keys::lists(), job_keys::detail(id), job_keys::histories(id)],
            )
            .await
    }

    pub async fn delete(&self, id: JobId) -> Result<(), ApiError> {
        self.cache
            .mutate(self.api.delete_job(id), &[job_keys::lists()])
            .await
    }

    pub fn cached_detail(&self, id: JobId) -> Option<Rc<Job>> {
        self.cache.peek(&job_keys::detail(id))
    }
}
