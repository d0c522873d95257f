//! Offset pagination control.

use dioxus::prelude::*;

/// The page a pagination control describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: u64,
    pub limit: u64,
    pub total: u64,
}

impl PageWindow {
    pub fn new(offset: u64, limit: u64, total: u64) -> Self {
        Self {
            offset,
            limit,
            total,
        }
    }

    /// Displayed range, 1-indexed and inclusive.
    pub fn range(&self) -> (u64, u64) {
        (
            self.offset + 1,
            (self.offset + self.limit).min(self.total),
        )
    }

    pub fn has_previous(&self) -> bool {
        self.offset > 0
    }

    pub fn has_next(&self) -> bool {
        self.offset + self.limit < self.total
    }

    pub fn previous_offset(&self) -> u64 {
        self.offset.saturating_sub(self.limit)
    }

    pub fn next_offset(&self) -> u64 {
        self.offset + self.limit
    }
}

/// Props for Pagination component.
#[derive(Props, Clone, PartialEq)]
pub struct PaginationProps {
    pub offset: u64,
    pub limit: u64,
    pub total: u64,
    /// Called with the offset of the requested page.
    pub on_page_change: EventHandler<u64>,
}

/// Previous/next controls with a "start – end of total" label.
///
/// Renders nothing when there is nothing to page through.
#[component]
pub fn Pagination(props: PaginationProps) -> Element {
    if props.total == 0 {
        return rsx! {};
    }

    let window = PageWindow::new(props.offset, props.limit, props.total);
    let (start, end) = window.range();

    rsx! {
        div { class: "pagination",
            span { class: "pagination-range tabular-nums", "{start} – {end} of {window.total}" }
            div { class: "pagination-actions",
                button {
                    r#type: "button",
                    class: "btn btn-small btn-secondary",
                    "data-testid": "prev-page",
                    disabled: !window.has_previous(),
                    onclick: move |_| props.on_page_change.call(window.previous_offset()),
                    "Previous"
                }
                button {
                    r#type: "button",
                    class: "btn btn-small btn-secondary",
                    "data-testid": "next-page",
                    disabled: !window.has_next(),
                    onclick: move |_| props.on_page_change.call(window.next_offset()),
                    "Next"
                }
            }
        }
    }
}
