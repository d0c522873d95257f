//! The query store: cached reads, request coalescing and invalidation.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::{Rc, Weak};

use api::ApiError;
use chrono::{DateTime, TimeDelta, Utc};
use futures_util::future::{FutureExt, LocalBoxFuture, Shared};

use crate::QueryKey;

/// Type-erased cached value. Each key always stores the same type.
type CachedValue = Rc<dyn Any>;

/// One in-flight read, awaited by every caller of the same key.
type SharedFetch = Shared<LocalBoxFuture<'static, Result<CachedValue, ApiError>>>;

/// Cache behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Automatic retries after a failed read. Mutations never retry.
    pub retry: u32,
    /// How long a successful read is served without refetching.
    pub stale_time: TimeDelta,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            retry: 1,
            stale_time: TimeDelta::zero(),
        }
    }
}

/// What happened to a cached key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryEventKind {
    /// A fetch stored fresh data.
    Updated,
    /// A fetch failed after its retries.
    Failed,
    /// The data was marked stale; observers should refetch.
    Invalidated,
}

/// Notification delivered to observers.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryEvent {
    pub key: QueryKey,
    pub kind: QueryEventKind,
}

type Observer = Rc<dyn Fn(&QueryEvent)>;

struct InFlight {
    id: u64,
    future: SharedFetch,
}

struct Entry {
    key: QueryKey,
    data: Option<CachedValue>,
    error: Option<ApiError>,
    updated_at: Option<DateTime<Utc>>,
    invalidated: bool,
    in_flight: Option<InFlight>,
}

impl Entry {
    fn new(key: QueryKey) -> Self {
        Self {
            key,
            data: None,
            error: None,
            updated_at: None,
            invalidated: false,
            in_flight: None,
        }
    }

    fn fresh_data(&self, stale_time: TimeDelta, now: DateTime<Utc>) -> Option<CachedValue> {
        if self.invalidated {
            return None;
        }
        match (&self.data, self.updated_at) {
            (Some(data), Some(updated_at)) if now - updated_at < stale_time => Some(data.clone()),
            _ => None,
        }
    }
}

#[derive(Default)]
struct Store {
    entries: HashMap<String, Entry>,
    observers: Vec<(u64, Observer)>,
    next_id: u64,
}

impl Store {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

enum Begin {
    Fresh(CachedValue),
    Wait(u64, SharedFetch),
}

/// Process-local query cache.
///
/// Cloning is cheap and every clone shares the same store. Construct one per
/// app (or per test) and hand it down; there is no global instance.
#[derive(Clone, Default)]
pub struct QueryClient {
    store: Rc<RefCell<Store>>,
    options: QueryOptions,
}

impl QueryClient {
    pub fn new(options: QueryOptions) -> Self {
        Self {
            store: Rc::default(),
            options,
        }
    }

    /// Read `key`, calling `fetcher` only when needed.
    ///
    /// Fresh data is returned as is. If a read for the same key is already
    /// running, this call joins it instead of issuing another request.
    /// Failures are retried `options.retry` times. A response whose fetch
    /// was superseded by an invalidation is returned to its caller but not
    /// stored.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<Rc<T>, ApiError>
    where
        T: 'static,
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<T, ApiError>> + 'static,
    {
        let (fetch_id, future) = match self.begin_fetch(&key, fetcher) {
            Begin::Fresh(value) => return downcast(value),
            Begin::Wait(id, future) => (id, future),
        };

        let result = future.await;
        self.finish_fetch(&key, fetch_id, &result);
        downcast(result?)
    }

    fn begin_fetch<T, F, Fut>(&self, key: &QueryKey, fetcher: F) -> Begin
    where
        T: 'static,
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<T, ApiError>> + 'static,
    {
        let mut store = self.store.borrow_mut();
        let id = store.next_id();
        let entry = store
            .entries
            .entry(key.hash_key())
            .or_insert_with(|| Entry::new(key.clone()));

        if let Some(data) = entry.fresh_data(self.options.stale_time, Utc::now()) {
            tracing::debug!("cache hit for {}", key);
            return Begin::Fresh(data);
        }

        if let Some(in_flight) = &entry.in_flight {
            tracing::debug!("joining in-flight fetch for {}", key);
            return Begin::Wait(in_flight.id, in_flight.future.clone());
        }

        tracing::debug!("fetching {}", key);
        let future = fetch_with_retry(fetcher, self.options.retry, key.clone())
            .boxed_local()
            .shared();
        entry.in_flight = Some(InFlight {
            id,
            future: future.clone(),
        });
        Begin::Wait(id, future)
    }

    fn finish_fetch(&self, key: &QueryKey, fetch_id: u64, result: &Result<CachedValue, ApiError>) {
        let event = {
            let mut store = self.store.borrow_mut();
            let Some(entry) = store.entries.get_mut(&key.hash_key()) else {
                return;
            };
            // Another caller of the same fetch may have stored it already,
            // or an invalidation may have superseded it.
            if !entry.in_flight.as_ref().is_some_and(|f| f.id == fetch_id) {
                tracing::debug!("discarding superseded response for {}", key);
                return;
            }
            entry.in_flight = None;

            let kind = match result {
                Ok(value) => {
                    entry.data = Some(value.clone());
                    entry.error = None;
                    entry.updated_at = Some(Utc::now());
                    entry.invalidated = false;
                    QueryEventKind::Updated
                }
                Err(err) => {
                    entry.error = Some(err.clone());
                    QueryEventKind::Failed
                }
            };
            QueryEvent {
                key: entry.key.clone(),
                kind,
            }
        };
        self.notify(vec![event]);
    }

    /// Cached value for `key`, fresh or stale.
    pub fn peek<T: 'static>(&self, key: &QueryKey) -> Option<Rc<T>> {
        let store = self.store.borrow();
        let data = store.entries.get(&key.hash_key())?.data.clone()?;
        data.downcast::<T>().ok()
    }

    /// Last error of `key`, cleared by the next successful fetch.
    pub fn error(&self, key: &QueryKey) -> Option<ApiError> {
        let store = self.store.borrow();
        store.entries.get(&key.hash_key())?.error.clone()
    }

    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        let store = self.store.borrow();
        store
            .entries
            .get(&key.hash_key())
            .is_some_and(|entry| entry.in_flight.is_some())
    }

    /// Mark every key starting with `prefix` stale and notify observers.
    ///
    /// In-flight reads under those keys are superseded: their responses
    /// will not be stored. Returns how many keys matched.
    pub fn invalidate(&self, prefix: &QueryKey) -> usize {
        let events: Vec<QueryEvent> = {
            let mut store = self.store.borrow_mut();
            store
                .entries
                .values_mut()
                .filter(|entry| entry.key.starts_with(prefix))
                .map(|entry| {
                    entry.invalidated = true;
                    entry.in_flight = None;
                    QueryEvent {
                        key: entry.key.clone(),
                        kind: QueryEventKind::Invalidated,
                    }
                })
                .collect()
        };
        tracing::debug!("invalidated {} queries under {}", events.len(), prefix);
        let count = events.len();
        self.notify(events);
        count
    }

    /// Run a write once and, if it succeeds, invalidate `invalidates`.
    ///
    /// Failures are returned immediately without retrying.
    pub async fn mutate<T, Fut>(&self, mutation: Fut, invalidates: &[QueryKey]) -> Result<T, ApiError>
    where
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let value = mutation.await.inspect_err(|err| {
            tracing::warn!("mutation failed: {}", err);
        })?;
        for prefix in invalidates {
            self.invalidate(prefix);
        }
        Ok(value)
    }

    /// Register an observer for every cache event.
    ///
    /// The observer is removed when the returned handle is dropped.
    pub fn subscribe(&self, observer: impl Fn(&QueryEvent) + 'static) -> ObserverHandle {
        let mut store = self.store.borrow_mut();
        let id = store.next_id();
        store.observers.push((id, Rc::new(observer)));
        ObserverHandle {
            store: Rc::downgrade(&self.store),
            id,
        }
    }

    fn notify(&self, events: Vec<QueryEvent>) {
        if events.is_empty() {
            return;
        }
        let observers: Vec<Observer> = self
            .store
            .borrow()
            .observers
            .iter()
            .map(|(_, observer)| observer.clone())
            .collect();
        for event in &events {
            for observer in &observers {
                observer(event);
            }
        }
    }
}

/// Keeps an observer registered while alive.
pub struct ObserverHandle {
    store: Weak<RefCell<Store>>,
    id: u64,
}

impl Drop for ObserverHandle {
    fn drop(&mut self) {
        if let Some(store) = self.store.upgrade() {
            store
                .borrow_mut()
                .observers
                .retain(|(id, _)| *id != self.id);
        }
    }
}

async fn fetch_with_retry<T, F, Fut>(
    fetcher: F,
    retry: u32,
    key: QueryKey,
) -> Result<CachedValue, ApiError>
where
    T: 'static,
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut attempt = 0;
    loop {
        match fetcher().await {
            Ok(value) => return Ok(Rc::new(value) as CachedValue),
            Err(err) if attempt < retry => {
                attempt += 1;
                tracing::warn!("fetch of {} failed, retrying ({}/{}): {}", key, attempt, retry, err);
            }
            Err(err) => return Err(err),
        }
    }
}

fn downcast<T: 'static>(value: CachedValue) -> Result<Rc<T>, ApiError> {
    value.downcast::<T>().map_err(|_| {
        ApiError::Decode(format!(
            "cached value is not a {}",
            std::any::type_name::<T>()
        ))
    })
}
