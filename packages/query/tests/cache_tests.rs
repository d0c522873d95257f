#![allow(clippy::disallowed_methods)]

use std::cell::{Cell, RefCell};
use std::error::Error;
use std::rc::Rc;

use api::{ApiError, HttpError};
use chrono::TimeDelta;
use query_cache::{QueryClient, QueryEvent, QueryEventKind, QueryKey, QueryOptions};
use serde_json::{Value, json};
use tokio::sync::Notify;

fn server_error() -> ApiError {
    ApiError::Http(HttpError::new(500, Value::Null))
}

fn counted(calls: &Rc<Cell<u32>>, value: &'static str) -> impl Fn() -> std::future::Ready<Result<String, ApiError>> + 'static {
    let calls = calls.clone();
    move || {
        calls.set(calls.get() + 1);
        std::future::ready(Ok(value.to_string()))
    }
}

#[tokio::test]
async fn concurrent_reads_share_one_request() -> Result<(), Box<dyn Error>> {
    let cache = QueryClient::default();
    let key = QueryKey::new("jobs").push("detail").push(1);
    let calls = Rc::new(Cell::new(0));

    let fetcher = {
        let calls = calls.clone();
        move || {
            let calls = calls.clone();
            async move {
                calls.set(calls.get() + 1);
                tokio::task::yield_now().await;
                Ok::<_, ApiError>("job".to_string())
            }
        }
    };

    let (first, second) = futures_util::future::join(
        cache.fetch(key.clone(), fetcher.clone()),
        cache.fetch(key.clone(), fetcher),
    )
    .await;

    let (first, second) = (first?, second?);
    assert_eq!(calls.get(), 1);
    assert!(Rc::ptr_eq(&first, &second));
    assert!(!cache.is_fetching(&key));
    Ok(())
}

#[tokio::test]
async fn stale_time_serves_cached_data() -> Result<(), Box<dyn Error>> {
    let key = QueryKey::new("jobs").push("detail").push(1);

    let calls = Rc::new(Cell::new(0));
    let cache = QueryClient::new(QueryOptions {
        stale_time: TimeDelta::minutes(5),
        ..QueryOptions::default()
    });
    cache.fetch(key.clone(), counted(&calls, "a")).await?;
    cache.fetch(key.clone(), counted(&calls, "b")).await?;
    assert_eq!(calls.get(), 1);

    // Zero stale time refetches on every read.
    let calls = Rc::new(Cell::new(0));
    let cache = QueryClient::default();
    cache.fetch(key.clone(), counted(&calls, "a")).await?;
    let value = cache.fetch(key.clone(), counted(&calls, "b")).await?;
    assert_eq!(calls.get(), 2);
    assert_eq!(value.as_str(), "b");
    Ok(())
}

#[tokio::test]
async fn reads_retry_once() -> Result<(), Box<dyn Error>> {
    let cache = QueryClient::default();
    let key = QueryKey::new("jobs").push("list");
    let calls = Rc::new(Cell::new(0));

    let flaky = {
        let calls = calls.clone();
        move || {
            calls.set(calls.get() + 1);
            let attempt = calls.get();
            std::future::ready(if attempt == 1 {
                Err(server_error())
            } else {
                Ok(attempt)
            })
        }
    };
    let value = cache.fetch(key.clone(), flaky).await?;
    assert_eq!(*value, 2);
    assert!(cache.error(&key).is_none());
    Ok(())
}

#[tokio::test]
async fn reads_fail_after_retry() -> Result<(), Box<dyn Error>> {
    let cache = QueryClient::default();
    let key = QueryKey::new("jobs").push("list");
    let calls = Rc::new(Cell::new(0));

    let broken = {
        let calls = calls.clone();
        move || {
            calls.set(calls.get() + 1);
            std::future::ready(Err::<u32, _>(server_error()))
        }
    };
    let err = cache
        .fetch(key.clone(), broken)
        .await
        .err()
        .ok_or("expected a failure")?;

    assert_eq!(calls.get(), 2);
    assert_eq!(err.status(), Some(500));
    assert_eq!(cache.error(&key), Some(err));
    assert!(cache.peek::<u32>(&key).is_none());
    Ok(())
}

#[tokio::test]
async fn mutations_do_not_retry_or_invalidate_on_failure() -> Result<(), Box<dyn Error>> {
    let cache = QueryClient::default();
    let key = QueryKey::new("jobs").push("list");
    let events = Rc::new(RefCell::new(Vec::<QueryEvent>::new()));
    let _handle = {
        let events = events.clone();
        cache.subscribe(move |event| events.borrow_mut().push(event.clone()))
    };
    cache
        .fetch(key.clone(), || std::future::ready(Ok::<_, ApiError>(1)))
        .await?;
    events.borrow_mut().clear();

    let calls = Rc::new(Cell::new(0));
    let result = cache
        .mutate(
            {
                let calls = calls.clone();
                async move {
                    calls.set(calls.get() + 1);
                    Err::<(), _>(server_error())
                }
            },
            &[key.clone()],
        )
        .await;

    assert!(result.is_err());
    assert_eq!(calls.get(), 1);
    assert!(events.borrow().is_empty());

    cache
        .mutate(async { Ok::<_, ApiError>(()) }, &[key.clone()])
        .await?;
    assert_eq!(
        *events.borrow(),
        vec![QueryEvent {
            key,
            kind: QueryEventKind::Invalidated,
        }]
    );
    Ok(())
}

#[tokio::test]
async fn superseded_response_is_not_stored() -> Result<(), Box<dyn Error>> {
    let cache = QueryClient::default();
    let key = QueryKey::new("jobs").push("detail").push(1);
    let gate = Rc::new(Notify::new());

    let slow = {
        let gate = gate.clone();
        move || {
            let gate = gate.clone();
            async move {
                gate.notified().await;
                Ok::<_, ApiError>("old".to_string())
            }
        }
    };

    let refresh = async {
        tokio::task::yield_now().await;
        assert_eq!(cache.invalidate(&key), 1);
        let fresh = cache
            .fetch(key.clone(), || std::future::ready(Ok::<_, ApiError>("new".to_string())))
            .await;
        gate.notify_one();
        fresh
    };

    let (old, fresh) = tokio::join!(cache.fetch(key.clone(), slow), refresh);

    assert_eq!(old?.as_str(), "old");
    assert_eq!(fresh?.as_str(), "new");
    let stored = cache.peek::<String>(&key).ok_or("nothing cached")?;
    assert_eq!(stored.as_str(), "new");
    Ok(())
}

#[tokio::test]
async fn invalidate_matches_by_prefix() -> Result<(), Box<dyn Error>> {
    let cache = QueryClient::default();
    let lists = QueryKey::new("jobs").push("list");
    let first = lists.clone().push_params(&json!({"offset": 0}));
    let second = lists.clone().push_params(&json!({"offset": 10}));
    let detail = QueryKey::new("jobs").push("detail").push(1);

    for key in [&first, &second, &detail] {
        cache
            .fetch(key.clone(), || std::future::ready(Ok::<_, ApiError>(0u8)))
            .await?;
    }

    assert_eq!(cache.invalidate(&lists), 2);
    assert_eq!(cache.invalidate(&QueryKey::new("other")), 0);

    // Stale data stays readable until the refetch lands.
    assert!(cache.peek::<u8>(&first).is_some());
    Ok(())
}

#[tokio::test]
async fn observers_stop_after_handle_drop() -> Result<(), Box<dyn Error>> {
    let cache = QueryClient::default();
    let key = QueryKey::new("jobs").push("detail").push(3);
    let kinds = Rc::new(RefCell::new(Vec::new()));

    let handle = {
        let kinds = kinds.clone();
        cache.subscribe(move |event| kinds.borrow_mut().push(event.kind))
    };

    cache
        .fetch(key.clone(), || std::future::ready(Ok::<_, ApiError>(3)))
        .await?;
    let _ = cache
        .fetch(key.clone(), || std::future::ready(Err::<i32, _>(server_error())))
        .await;
    cache.invalidate(&key);
    assert_eq!(
        *kinds.borrow(),
        vec![
            QueryEventKind::Updated,
            QueryEventKind::Failed,
            QueryEventKind::Invalidated,
        ]
    );

    drop(handle);
    cache.invalidate(&key);
    assert_eq!(kinds.borrow().len(), 3);
    Ok(())
}
