//! Top-level pages.

mod job_detail_page;
mod job_list_page;
mod not_found_page;

pub use job_detail_page::{HISTORY_PAGE_SIZE, JobDetailPage};
pub use job_list_page::{JobListPage, PAGE_SIZE};
pub use not_found_page::NotFoundPage;
