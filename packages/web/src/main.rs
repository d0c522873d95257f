// Dioxus `rsx!` macro expands to unwraps internally; allow to avoid false positives.
#![allow(clippy::disallowed_methods)]

use api::ApiConfig;
use dioxus::prelude::*;
use query_cache::JobQueries;
use tracing::Level;

use ui::AppErrorBoundary;
use ui::jobs::pages::{JobDetailPage, JobListPage, NotFoundPage};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        JobList {},
        #[route("/jobs")]
        JobsRedirect {},
        #[route("/jobs/:id")]
        JobDetail { id: String },
        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    if let Err(e) = dioxus::logger::init(Level::INFO) {
        eprintln!("failed to initialize logger: {e}");
    }

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    // One cache per app instance, shared by every page.
    use_context_provider(|| {
        let config = ApiConfig::from_build_env();
        tracing::info!("using API base URL {}", config.base_url);
        JobQueries::from_config(config)
    });

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        Router::<Route> {}
    }
}

/// Layout wrapping every page in the error boundary.
#[component]
fn Shell() -> Element {
    rsx! {
        main { class: "app-main",
            AppErrorBoundary {
                Outlet::<Route> {}
            }
        }
    }
}

/// Job dashboard.
#[component]
fn JobList() -> Element {
    rsx! {
        JobListPage {}
    }
}

/// Redirect /jobs to the dashboard, replacing the history entry.
#[component]
fn JobsRedirect() -> Element {
    let nav = use_navigator();
    use_effect(move || {
        nav.replace(Route::JobList {});
    });
    rsx! {}
}

/// Job detail page.
#[component]
fn JobDetail(id: String) -> Element {
    rsx! {
        JobDetailPage { key: "{id}", job_id: id.clone() }
    }
}

/// Catch-all for unknown paths.
#[component]
fn NotFound(segments: Vec<String>) -> Element {
    tracing::debug!("no route for /{}", segments.join("/"));
    rsx! {
        NotFoundPage {}
    }
}
