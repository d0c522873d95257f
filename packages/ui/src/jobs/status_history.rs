//! Status history timeline.

use dioxus::prelude::*;
use jobs_core::JobStatus;

use super::StatusBadge;

/// Props for StatusHistory component.
#[derive(Props, Clone, PartialEq)]
pub struct StatusHistoryProps {
    /// Entries in the order the backend returned them.
    pub entries: Vec<JobStatus>,
}

#[component]
pub fn StatusHistory(props: StatusHistoryProps) -> Element {
    if props.entries.is_empty() {
        return rsx! {
            p { class: "empty-state", "No history entries." }
        };
    }

    rsx! {
        ol { class: "status-history",
            for entry in props.entries.iter() {
                li { key: "{entry.id}", class: "status-history-entry",
                    StatusBadge { status: entry.status_type }
                    span { class: "status-history-time tabular-nums",
                        {entry.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()}
                    }
                }
            }
        }
    }
}
