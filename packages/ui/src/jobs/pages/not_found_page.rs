//! Fallback page for unknown routes.

use dioxus::prelude::*;

#[component]
pub fn NotFoundPage() -> Element {
    rsx! {
        div { class: "page-container not-found",
            h1 { class: "page-title", "404 — Not Found" }
            p { class: "page-description", "The page you're looking for doesn't exist." }
            Link { to: "/", class: "breadcrumb-link", "← Back to dashboard" }
        }
    }
}
