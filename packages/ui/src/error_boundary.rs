//! Last-resort boundary for render errors.

use dioxus::prelude::*;

/// Replaces a failed subtree with a generic message and a way home.
///
/// The failed subtree is not resumed; "Back to dashboard" clears the
/// captured errors and navigates to `/`.
#[component]
pub fn AppErrorBoundary(children: Element) -> Element {
    rsx! {
        ErrorBoundary {
            handle_error: |errors: ErrorContext| {
                tracing::error!("render error caught by boundary: {:?}", errors);
                rsx! {
                    div { class: "page-container error-boundary",
                        h1 { class: "page-title", "Something went wrong" }
                        p { class: "page-description",
                            "An unexpected error occurred. Please try refreshing the page."
                        }
                        Link {
                            to: "/",
                            class: "btn btn-primary",
                            onclick: move |_| errors.clear_errors(),
                            "Back to dashboard"
                        }
                    }
                }
            },
            {children}
        }
    }
}
