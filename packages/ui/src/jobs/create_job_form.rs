//! Create job form component.

use api::{CreateJobFailure, classify_create_error};
use dioxus::prelude::*;
use jobs_core::Job;
use query_cache::JobQueries;

use crate::use_job_queries;

/// Why a submitted draft did not produce a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateJobError {
    /// Blank after trimming; nothing was sent.
    EmptyName,
    Rejected(CreateJobFailure),
}

impl CreateJobError {
    pub fn message(self) -> &'static str {
        match self {
            CreateJobError::EmptyName => "Job name is required.",
            CreateJobError::Rejected(failure) => failure.message(),
        }
    }
}

/// Trim a draft name, rejecting blank input.
pub fn validate_job_name(draft: &str) -> Result<&str, CreateJobError> {
    let name = draft.trim();
    if name.is_empty() {
        return Err(CreateJobError::EmptyName);
    }
    Ok(name)
}

/// Validate `draft` and create the job. Blank drafts never reach the network.
pub async fn submit_job(queries: &JobQueries, draft: &str) -> Result<Job, CreateJobError> {
    let name = validate_job_name(draft)?;
    queries.create(name).await.map_err(|err| {
        let failure = classify_create_error(&err);
        tracing::warn!("create job {:?} failed: {} ({:?})", name, err, failure);
        CreateJobError::Rejected(failure)
    })
}

/// What the creation form holds between keystrokes and submissions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobDraft {
    pub name: String,
    pub error: Option<CreateJobError>,
    pub submitting: bool,
}

impl JobDraft {
    /// Start a submission, returning the name to send.
    ///
    /// Blank drafts set the validation error and start nothing.
    pub fn begin(&mut self) -> Option<String> {
        match validate_job_name(&self.name) {
            Ok(name) => {
                let name = name.to_string();
                self.submitting = true;
                self.error = None;
                Some(name)
            }
            Err(err) => {
                self.error = Some(err);
                None
            }
        }
    }

    /// Finish a submission. A created job clears the input; a rejection keeps it.
    pub fn settle(&mut self, outcome: &Result<Job, CreateJobError>) {
        self.submitting = false;
        match outcome {
            Ok(_) => {
                self.name.clear();
                self.error = None;
            }
            Err(err) => self.error = Some(*err),
        }
    }
}

/// Form component for creating a new job.
#[component]
pub fn CreateJobForm() -> Element {
    let queries = use_job_queries();
    let mut draft = use_signal(JobDraft::default);

    let submit = move |e: FormEvent| {
        e.prevent_default();
        let queries = queries.clone();
        let Some(name) = draft.write().begin() else {
            return;
        };

        spawn(async move {
            let outcome = submit_job(&queries, &name).await;
            if let Ok(job) = &outcome {
                tracing::info!("created job {} ({})", job.id, job.name);
            }
            draft.write().settle(&outcome);
        });
    };

    let JobDraft {
        name,
        error,
        submitting,
    } = draft();

    rsx! {
        form {
            class: "create-job-form",
            "data-testid": "create-job-form",
            onsubmit: submit,

            div { class: "form-group",
                label { r#for: "new-job-name", "Job name" }
                input {
                    id: "new-job-name",
                    "data-testid": "new-job-input",
                    value: "{name}",
                    placeholder: "e.g. Fluid Dynamics Simulation",
                    oninput: move |e| draft.write().name = e.value(),
                }
            }

            button {
                r#type: "submit",
                class: "btn btn-primary",
                "data-testid": "create-job-button",
                disabled: submitting,
                if submitting { "Creating…" } else { "Create Job" }
            }

            if let Some(err) = error {
                p {
                    class: if err == CreateJobError::EmptyName { "form-hint" } else { "error-message" },
                    "{err.message()}"
                }
            }
        }
    }
}
