//! Status filter and sort order selectors.

use dioxus::prelude::*;
use jobs_core::{JobStatusType, JobsSortBy};

/// Parse the status filter select value. The empty string means "All".
///
/// Returns `None` for unknown values so the caller can ignore them.
pub fn parse_status_filter(value: &str) -> Option<Option<JobStatusType>> {
    if value.is_empty() {
        return Some(None);
    }
    value.parse().ok().map(Some)
}

/// Props for FiltersBar component.
#[derive(Props, Clone, PartialEq)]
pub struct FiltersBarProps {
    /// `None` shows every status.
    pub status_filter: Option<JobStatusType>,
    pub sort_by: JobsSortBy,
    pub on_status_filter_change: EventHandler<Option<JobStatusType>>,
    pub on_sort_change: EventHandler<JobsSortBy>,
}

#[component]
pub fn FiltersBar(props: FiltersBarProps) -> Element {
    let filter_value = props.status_filter.map(JobStatusType::as_str).unwrap_or_default();
    let sort_by = props.sort_by;

    rsx! {
        div { class: "filters-bar",
            div { class: "form-group",
                label { r#for: "status-filter", "Status" }
                select {
                    id: "status-filter",
                    "data-testid": "status-filter",
                    value: "{filter_value}",
                    onchange: move |e| {
                        if let Some(filter) = parse_status_filter(&e.value()) {
                            props.on_status_filter_change.call(filter);
                        }
                    },

                    option { value: "", selected: props.status_filter.is_none(), "All" }
                    for status in JobStatusType::ALL {
                        option {
                            value: "{status}",
                            selected: props.status_filter == Some(status),
                            "{status}"
                        }
                    }
                }
            }

            div { class: "form-group",
                label { r#for: "sort-select", "Sort" }
                select {
                    id: "sort-select",
                    "data-testid": "sort-select",
                    value: "{sort_by}",
                    onchange: move |e| {
                        if let Ok(sort) = e.value().parse::<JobsSortBy>() {
                            props.on_sort_change.call(sort);
                        }
                    },

                    for sort in JobsSortBy::ALL {
                        option {
                            value: "{sort}",
                            selected: sort == sort_by,
                            {sort.label()}
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::render;

    #[test]
    fn status_filter_values() {
        assert_eq!(parse_status_filter(""), Some(None));
        assert_eq!(
            parse_status_filter("COMPLETED"),
            Some(Some(JobStatusType::Completed))
        );
        assert_eq!(parse_status_filter("DONE"), None);
    }

    #[test]
    fn sort_options_render_newest_first_by_default() {
        let html = render(|| {
            rsx! {
                FiltersBar {
                    status_filter: None,
                    sort_by: JobsSortBy::default(),
                    on_status_filter_change: |_| {},
                    on_sort_change: |_| {},
                }
            }
        });

        let newest = html.find("Created (newest first)").unwrap_or(usize::MAX);
        let oldest = html.find("Created (oldest first)").unwrap_or(usize::MAX);
        assert!(newest < oldest, "{html}");
        assert!(html.contains("Name A → Z"));
        assert!(html.contains("Name Z → A"));
        assert!(html.contains(">All</option>"));
    }
}
