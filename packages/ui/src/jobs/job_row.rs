//! Job row component for displaying a single job in the list.

use dioxus::prelude::*;
use jobs_core::{Job, JobId, JobStatusType};

use super::{StatusBadge, StatusSelector};

/// The job a delete click asks to remove; nothing while a delete is in flight.
pub fn delete_target(id: JobId, deleting: bool) -> Option<JobId> {
    (!deleting).then_some(id)
}

/// Props for JobRow component.
#[derive(Props, Clone, PartialEq)]
pub struct JobRowProps {
    /// The job to display.
    pub job: Job,
    /// Callback when a different status is selected.
    pub on_status_change: EventHandler<(JobId, JobStatusType)>,
    /// Callback when delete is clicked.
    pub on_delete: EventHandler<JobId>,
    #[props(default = false)]
    pub updating: bool,
    #[props(default = false)]
    pub deleting: bool,
}

/// List item for a single job: name link, badge, status selector and delete.
#[component]
pub fn JobRow(props: JobRowProps) -> Element {
    let job = &props.job;
    let id = job.id;
    let deleting = props.deleting;

    rsx! {
        li {
            class: "job-row",
            "data-testid": "job-row-{id}",

            Link { to: "/jobs/{id}", class: "job-link",
                span { "data-testid": "job-link-{id}", "{job.name}" }
            }

            StatusBadge { status: job.current_status_type }

            StatusSelector {
                job_id: id,
                current_status: job.current_status_type,
                disabled: props.updating,
                on_status_change: props.on_status_change,
            }

            button {
                r#type: "button",
                class: "btn btn-small btn-delete",
                "data-testid": "delete-job-{id}",
                disabled: deleting,
                onclick: move |_| {
                    if let Some(id) = delete_target(id, deleting) {
                        props.on_delete.call(id);
                    }
                },
                "Delete"
            }
        }
    }
}
