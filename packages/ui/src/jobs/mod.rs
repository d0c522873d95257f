//! Job dashboard components.

mod busy;
mod create_job_form;
mod filters_bar;
mod job_list;
mod job_row;
mod pagination;
mod status_badge;
mod status_history;
mod status_selector;

pub mod pages;

pub use busy::{BusyKind, BusyRows};
pub use create_job_form::{CreateJobError, CreateJobForm, JobDraft, submit_job, validate_job_name};
pub use filters_bar::{FiltersBar, parse_status_filter};
pub use job_list::{EMPTY_LIST_MESSAGE, JobList};
pub use job_row::{JobRow, delete_target};
pub use pagination::{PageWindow, Pagination};
pub use status_badge::{StatusBadge, badge_class};
pub use status_history::StatusHistory;
pub use status_selector::{StatusSelector, selected_status_change};
