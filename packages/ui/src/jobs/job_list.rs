//! Job list component.

use dioxus::prelude::*;
use jobs_core::{Job, JobId, JobStatusType};

use super::{BusyRows, JobRow};

/// Shown when a page has no jobs.
pub const EMPTY_LIST_MESSAGE: &str = "No jobs found. Create one above to get started.";

/// Props for JobList component.
#[derive(Props, Clone, PartialEq)]
pub struct JobListProps {
    /// Jobs in the order the backend returned them.
    pub jobs: Vec<Job>,
    /// Rows with a mutation in flight.
    #[props(default)]
    pub busy: BusyRows,
    pub on_status_change: EventHandler<(JobId, JobStatusType)>,
    pub on_delete: EventHandler<JobId>,
}

/// List component for displaying jobs.
#[component]
pub fn JobList(props: JobListProps) -> Element {
    if props.jobs.is_empty() {
        return rsx! {
            div { class: "empty-state",
                p { "{EMPTY_LIST_MESSAGE}" }
            }
        };
    }

    rsx! {
        ul { class: "job-list",
            for job in props.jobs.iter() {
                JobRow {
                    key: "{job.id}",
                    job: job.clone(),
                    updating: props.busy.is_updating(job.id),
                    deleting: props.busy.is_deleting(job.id),
                    on_status_change: props.on_status_change,
                    on_delete: props.on_delete,
                }
            }
        }
    }
}
