//! Status badge component.

use dioxus::prelude::*;
use jobs_core::JobStatusType;

/// CSS class for a status. Every status has its own treatment.
pub fn badge_class(status: JobStatusType) -> &'static str {
    match status {
        JobStatusType::Pending => "badge-pending",
        JobStatusType::Running => "badge-running",
        JobStatusType::Completed => "badge-completed",
        JobStatusType::Failed => "badge-failed",
    }
}

/// Badge for displaying job status.
#[component]
pub fn StatusBadge(status: JobStatusType) -> Element {
    let bg_class = badge_class(status);

    rsx! {
        span {
            class: "status-badge {bg_class}",
            "{status}"
        }
    }
}
