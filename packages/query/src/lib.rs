//! Client-side query cache for the job dashboard.
//!
//! Reads are cached under a [`QueryKey`], concurrent identical reads share
//! one request, and mutations invalidate key prefixes so that observers
//! refetch. [`JobQueries`] binds the cache to the job endpoints.
//!
//! Everything here is single-threaded: the store lives behind `Rc<RefCell>`
//! and is only touched from the UI event loop.

mod client;
mod jobs;
mod key;

pub use client::{ObserverHandle, QueryClient, QueryEvent, QueryEventKind, QueryOptions};
pub use jobs::{JobQueries, job_keys};
pub use key::QueryKey;
