//! Hooks bridging the query cache into Dioxus reactivity.
//!
//! Each read hook runs the cache fetch inside `use_resource` and subscribes
//! to cache invalidations for its current key, so a mutation anywhere in the
//! app re-runs the affected resources.

use std::rc::Rc;

use api::{ApiError, JobsListParams, PageParams};
use dioxus::prelude::*;
use jobs_core::{Job, JobId, JobStatus, PaginatedResponse};
use query_cache::{JobQueries, QueryClient, QueryEventKind, QueryKey, job_keys};

/// What a read hook currently has to show.
#[derive(Debug)]
pub enum QueryState<T> {
    /// Disabled: the query has no valid input yet.
    Idle,
    /// First load for this key; nothing cached.
    Loading,
    /// Data for this key, possibly stale while a refetch runs.
    Ready(Rc<T>),
    Failed(ApiError),
}

impl<T> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        match self {
            QueryState::Idle => QueryState::Idle,
            QueryState::Loading => QueryState::Loading,
            QueryState::Ready(data) => QueryState::Ready(data.clone()),
            QueryState::Failed(err) => QueryState::Failed(err.clone()),
        }
    }
}

impl<T> PartialEq for QueryState<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (QueryState::Idle, QueryState::Idle) => true,
            (QueryState::Loading, QueryState::Loading) => true,
            (QueryState::Ready(a), QueryState::Ready(b)) => Rc::ptr_eq(a, b),
            (QueryState::Failed(a), QueryState::Failed(b)) => a == b,
            _ => false,
        }
    }
}

/// A resource result tagged with the key it was fetched for.
type Fetched<T> = Option<(QueryKey, Result<Rc<T>, ApiError>)>;

/// The app's job queries, provided by the shell.
pub fn use_job_queries() -> JobQueries {
    use_context::<JobQueries>()
}

/// A counter bumped whenever the cache invalidates the key in `key`.
///
/// Reading it inside a resource makes the resource refetch on invalidation.
fn use_invalidation(cache: QueryClient, key: Memo<Option<QueryKey>>) -> Signal<u64> {
    let generation = use_signal(|| 0u64);
    use_hook(move || {
        Rc::new(cache.subscribe(move |event| {
            if event.kind != QueryEventKind::Invalidated {
                return;
            }
            if *key.peek() == Some(event.key.clone()) {
                let mut generation = generation;
                *generation.write() += 1;
            }
        }))
    });
    generation
}

fn resolve<T: 'static>(
    resource: &Resource<Fetched<T>>,
    key: Option<QueryKey>,
    cache: &QueryClient,
) -> QueryState<T> {
    let Some(key) = key else {
        return QueryState::Idle;
    };
    if let Some(Some((fetched, result))) = resource.read().as_ref()
        && *fetched == key
    {
        return match result {
            Ok(data) => QueryState::Ready(data.clone()),
            Err(err) => QueryState::Failed(err.clone()),
        };
    }
    // Keys changed and the resource has not caught up yet.
    match cache.peek::<T>(&key) {
        Some(data) => QueryState::Ready(data),
        None => QueryState::Loading,
    }
}

/// One page of the job list.
pub fn use_jobs_query(params: Memo<JobsListParams>) -> QueryState<PaginatedResponse<Job>> {
    let queries = use_job_queries();
    let key = use_memo(move || Some(job_keys::list(&params())));
    let generation = use_invalidation(queries.cache().clone(), key);

    let fetcher = queries.clone();
    let resource = use_resource(move || {
        let queries = fetcher.clone();
        let params = params();
        generation();
        async move {
            let key = job_keys::list(&params);
            Some((key, queries.list(params).await))
        }
    });

    resolve(&resource, key(), queries.cache())
}

/// A single job; idle until `id` is known.
pub fn use_job_detail(id: Memo<Option<JobId>>) -> QueryState<Job> {
    let queries = use_job_queries();
    let key = use_memo(move || id().map(job_keys::detail));
    let generation = use_invalidation(queries.cache().clone(), key);

    let fetcher = queries.clone();
    let resource = use_resource(move || {
        let queries = fetcher.clone();
        let id = id();
        generation();
        async move {
            let id = id?;
            Some((job_keys::detail(id), queries.detail(id).await))
        }
    });

    resolve(&resource, key(), queries.cache())
}

/// One page of a job's status history; idle until `id` is known.
pub fn use_job_history(
    id: Memo<Option<JobId>>,
    page: Memo<PageParams>,
) -> QueryState<PaginatedResponse<JobStatus>> {
    let queries = use_job_queries();
    let key = use_memo(move || id().map(|id| job_keys::history(id, page())));
    let generation = use_invalidation(queries.cache().clone(), key);

    let fetcher = queries.clone();
    let resource = use_resource(move || {
        let queries = fetcher.clone();
        let id = id();
        let page = page();
        generation();
        async move {
            let id = id?;
            Some((job_keys::history(id, page), queries.history(id, page).await))
        }
    });

    resolve(&resource, key(), queries.cache())
}
