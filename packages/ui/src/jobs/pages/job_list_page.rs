//! Job dashboard page: create form, filters, list and pagination.

use api::JobsListParams;
use dioxus::prelude::*;
use jobs_core::{JobId, JobStatusType, JobsSortBy};

use crate::jobs::{BusyKind, BusyRows, CreateJobForm, FiltersBar, JobList, Pagination};
use crate::{QueryState, use_job_queries, use_jobs_query};

/// Jobs per list page.
pub const PAGE_SIZE: u32 = 10;

/// Job list page component.
#[component]
pub fn JobListPage() -> Element {
    let queries = use_job_queries();
    let mut status_filter = use_signal(|| None::<JobStatusType>);
    let mut sort_by = use_signal(JobsSortBy::default);
    let mut offset = use_signal(|| 0u32);
    let mut busy = use_signal(BusyRows::default);
    let mut error = use_signal(|| None::<&'static str>);

    let params = use_memo(move || JobsListParams {
        status: status_filter(),
        sort: Some(sort_by()),
        limit: Some(PAGE_SIZE),
        offset: Some(offset()),
    });
    let jobs = use_jobs_query(params);

    let on_status_filter_change = move |filter: Option<JobStatusType>| {
        status_filter.set(filter);
        offset.set(0);
    };

    let on_sort_change = move |sort: JobsSortBy| {
        sort_by.set(sort);
        offset.set(0);
    };

    // Status change handler
    let update_queries = queries.clone();
    let on_status_change = move |(id, status): (JobId, JobStatusType)| {
        let queries = update_queries.clone();
        spawn(async move {
            busy.write().start(id, BusyKind::Updating);
            if let Err(e) = queries.update_status(id, status).await {
                tracing::warn!("failed to set job {} to {}: {}", id, status, e);
                error.set(Some("Failed to update job status. Please try again."));
            }
            busy.write().settle(id, BusyKind::Updating);
        });
    };

    // Delete handler
    let on_delete = move |id: JobId| {
        let queries = queries.clone();
        spawn(async move {
            busy.write().start(id, BusyKind::Deleting);
            if let Err(e) = queries.delete(id).await {
                tracing::warn!("failed to delete job {}: {}", id, e);
                error.set(Some("Failed to delete job. Please try again."));
            }
            busy.write().settle(id, BusyKind::Deleting);
        });
    };

    rsx! {
        div { class: "page-container",
            div { class: "page-header",
                h1 { class: "page-title", "Job Dashboard" }
            }

            CreateJobForm {}

            FiltersBar {
                status_filter: status_filter(),
                sort_by: sort_by(),
                on_status_filter_change,
                on_sort_change,
            }

            // Error banner
            if let Some(err) = error() {
                div { class: "error-banner",
                    span { "{err}" }
                    button {
                        onclick: move |_| error.set(None),
                        "×"
                    }
                }
            }

            {
                match jobs {
                    QueryState::Idle | QueryState::Loading => rsx! {
                        div { class: "loading", "Loading jobs…" }
                    },
                    QueryState::Failed(_) => rsx! {
                        div { class: "error-message", "Failed to load jobs. Please try again." }
                    },
                    QueryState::Ready(page) => rsx! {
                        JobList {
                            jobs: page.results.clone(),
                            busy: busy(),
                            on_status_change,
                            on_delete,
                        }
                        Pagination {
                            offset: u64::from(offset()),
                            limit: u64::from(PAGE_SIZE),
                            total: page.count,
                            on_page_change: move |next: u64| {
                                offset.set(u32::try_from(next).unwrap_or(u32::MAX));
                            },
                        }
                    },
                }
            }
        }
    }
}
