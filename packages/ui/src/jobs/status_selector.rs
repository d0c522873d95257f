//! Status selector component.

use dioxus::prelude::*;
use jobs_core::{JobId, JobStatusType};

/// The status to report for a selector change, if any.
///
/// Unknown values and re-selecting the current status report nothing.
pub fn selected_status_change(current: JobStatusType, value: &str) -> Option<JobStatusType> {
    value
        .parse::<JobStatusType>()
        .ok()
        .filter(|status| *status != current)
}

/// Props for StatusSelector component.
#[derive(Props, Clone, PartialEq)]
pub struct StatusSelectorProps {
    pub job_id: JobId,
    pub current_status: JobStatusType,
    #[props(default = false)]
    pub disabled: bool,
    /// Called with `(job_id, new_status)` when a different status is picked.
    pub on_status_change: EventHandler<(JobId, JobStatusType)>,
}

/// Select offering every status; the backend decides which moves are legal.
#[component]
pub fn StatusSelector(props: StatusSelectorProps) -> Element {
    let job_id = props.job_id;
    let current = props.current_status;

    rsx! {
        select {
            class: "status-select",
            "data-testid": "status-select-{job_id}",
            value: "{current}",
            disabled: props.disabled,
            onchange: move |e| {
                if let Some(status) = selected_status_change(current, &e.value()) {
                    props.on_status_change.call((job_id, status));
                }
            },

            for status in JobStatusType::ALL {
                option {
                    value: "{status}",
                    selected: status == current,
                    "{status}"
                }
            }
        }
    }
}
