//! Maps create-job failures to user-facing messages.
//!
//! The backend reports a duplicate name as `400 {"name": ["A job with this
//! name already exists."]}`. Detecting it depends on that wording, so the
//! check lives here and nowhere else.

use serde_json::Value;

use crate::ApiError;

/// Why creating a job failed, from the form's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateJobFailure {
    /// The backend rejected the name as already taken.
    DuplicateName,
    /// Anything else: network failure, other validation, server error.
    Other,
}

impl CreateJobFailure {
    pub fn message(self) -> &'static str {
        match self {
            CreateJobFailure::DuplicateName => {
                "Duplicate name found. Please give a different name."
            }
            CreateJobFailure::Other => "Failed to create job. Please try again.",
        }
    }
}

/// Classify a failed create call.
pub fn classify_create_error(error: &ApiError) -> CreateJobFailure {
    match error {
        ApiError::Http(err) if err.status == 400 && is_duplicate_name_payload(&err.payload) => {
            CreateJobFailure::DuplicateName
        }
        _ => CreateJobFailure::Other,
    }
}

/// True for an object whose `name` field is an array of strings with at
/// least one containing "already exists" (case-insensitive).
pub fn is_duplicate_name_payload(payload: &Value) -> bool {
    let Some(messages) = payload.get("name").and_then(Value::as_array) else {
        return false;
    };
    messages
        .iter()
        .filter_map(Value::as_str)
        .any(|message| message.to_lowercase().contains("already exists"))
}
