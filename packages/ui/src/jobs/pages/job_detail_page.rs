//! Job detail page - a single job with its status history.

use api::PageParams;
use dioxus::prelude::*;
use jobs_core::{JobId, JobStatus, JobStatusType, PaginatedResponse};

use crate::jobs::{Pagination, StatusBadge, StatusHistory, StatusSelector};
use crate::{QueryState, use_job_detail, use_job_history, use_job_queries};

/// Status history entries per page.
pub const HISTORY_PAGE_SIZE: u32 = 20;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Props for JobDetailPage.
#[derive(Props, Clone, PartialEq)]
pub struct JobDetailPageProps {
    /// Raw route segment; anything but a positive integer is not found.
    pub job_id: String,
}

/// Job detail page component.
#[component]
pub fn JobDetailPage(props: JobDetailPageProps) -> Element {
    let queries = use_job_queries();
    let raw_id = props.job_id.clone();
    let id = use_memo(move || JobId::parse(&raw_id).ok());
    let mut history_offset = use_signal(|| 0u32);
    let page = use_memo(move || PageParams::new(HISTORY_PAGE_SIZE, history_offset()));
    let mut updating = use_signal(|| false);
    let mut error = use_signal(|| None::<&'static str>);

    let job = use_job_detail(id);
    let history = use_job_history(id, page);

    // Status change handler
    let on_status_change = move |(job_id, status): (JobId, JobStatusType)| {
        let queries = queries.clone();
        spawn(async move {
            updating.set(true);
            error.set(None);
            if let Err(e) = queries.update_status(job_id, status).await {
                tracing::warn!("failed to set job {} to {}: {}", job_id, status, e);
                error.set(Some("Failed to update job status. Please try again."));
            }
            updating.set(false);
        });
    };

    let job = match job {
        QueryState::Loading => {
            return rsx! {
                div { class: "page-container",
                    div { class: "loading", "Loading job…" }
                }
            };
        }
        QueryState::Idle => return rsx! { JobNotFound {} },
        QueryState::Failed(e) => {
            tracing::warn!("failed to load job {}: {}", props.job_id, e);
            return rsx! { JobNotFound {} };
        }
        QueryState::Ready(job) => job,
    };

    let created = job.created_at.format(TIMESTAMP_FORMAT).to_string();
    let updated = job.updated_at.format(TIMESTAMP_FORMAT).to_string();
    let status_changed = job.current_status_timestamp.format(TIMESTAMP_FORMAT).to_string();

    rsx! {
        div { class: "page-container",
            nav { class: "breadcrumb",
                Link { to: "/", class: "breadcrumb-link", "← Back to dashboard" }
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

            div { class: "card",
                div { class: "card-header",
                    h1 { class: "card-title", "{job.name}" }
                }
                div { class: "card-body",
                    div { class: "detail-list",
                        div { class: "detail-item",
                            span { class: "detail-label", "Status" }
                            span { class: "detail-value",
                                StatusBadge { status: job.current_status_type }
                                StatusSelector {
                                    job_id: job.id,
                                    current_status: job.current_status_type,
                                    disabled: updating(),
                                    on_status_change,
                                }
                            }
                        }
                        div { class: "detail-item",
                            span { class: "detail-label", "Created" }
                            span { class: "detail-value tabular-nums", "{created}" }
                        }
                        div { class: "detail-item",
                            span { class: "detail-label", "Last updated" }
                            span { class: "detail-value tabular-nums", "{updated}" }
                        }
                        div { class: "detail-item",
                            span { class: "detail-label", "Status changed" }
                            span { class: "detail-value tabular-nums", "{status_changed}" }
                        }
                        div { class: "detail-item",
                            span { class: "detail-label", "ID" }
                            span { class: "detail-value job-id-display", "{job.id}" }
                        }
                    }
                }
            }

            div { class: "card",
                div { class: "card-header",
                    h2 { class: "card-title", "Status History" }
                }
                div { class: "card-body",
                    HistoryPanel {
                        history,
                        offset: history_offset(),
                        on_page_change: move |next: u32| history_offset.set(next),
                    }
                }
            }
        }
    }
}

/// Shown when a job's history cannot be loaded.
const HISTORY_LOAD_FAILED: &str = "Failed to load status history.";

/// Props for HistoryPanel.
#[derive(Props, Clone, PartialEq)]
struct HistoryPanelProps {
    history: QueryState<PaginatedResponse<JobStatus>>,
    offset: u32,
    on_page_change: EventHandler<u32>,
}

/// One page of status history with its pagination.
#[component]
fn HistoryPanel(props: HistoryPanelProps) -> Element {
    match props.history {
        QueryState::Idle | QueryState::Loading => rsx! {
            div { class: "loading", "Loading history…" }
        },
        QueryState::Failed(e) => {
            tracing::warn!("failed to load status history: {}", e);
            rsx! {
                div { class: "error-message", "{HISTORY_LOAD_FAILED}" }
            }
        }
        QueryState::Ready(entries) => rsx! {
            StatusHistory { entries: entries.results.clone() }
            Pagination {
                offset: u64::from(props.offset),
                limit: u64::from(HISTORY_PAGE_SIZE),
                total: entries.count,
                on_page_change: move |next: u64| {
                    props.on_page_change.call(u32::try_from(next).unwrap_or(u32::MAX));
                },
            }
        },
    }
}

/// Shown for unknown, invalid or vanished jobs.
#[component]
fn JobNotFound() -> Element {
    rsx! {
        div { class: "page-container",
            div { class: "error-message", "Job not found." }
            Link { to: "/", class: "breadcrumb-link", "← Back to dashboard" }
        }
    }
}
