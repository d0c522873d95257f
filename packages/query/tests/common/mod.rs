use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

use api::{ApiConfig, FnTransport, HttpClient, HttpMethod, HttpRequest, HttpResponse, JobsApi};
use chrono::{DateTime, TimeZone, Utc};
use jobs_core::{Job, JobId, JobStatus, JobStatusType};
use query_cache::{JobQueries, QueryClient};
use serde_json::{Value, json};

#[derive(Default)]
struct BackendState {
    jobs: BTreeMap<i64, Job>,
    history: BTreeMap<i64, Vec<JobStatus>>,
    next_id: i64,
    clock: i64,
    requests: Vec<(HttpMethod, String)>,
    scripted: VecDeque<HttpResponse>,
}

impl BackendState {
    fn tick(&mut self) -> DateTime<Utc> {
        self.clock += 1;
        Utc.timestamp_opt(1_700_000_000 + self.clock, 0)
            .single()
            .unwrap_or_default()
    }

    fn append_status(&mut self, job_id: i64, status_type: JobStatusType) -> DateTime<Utc> {
        let timestamp = self.tick();
        self.next_id += 1;
        let entry = JobStatus {
            id: self.next_id,
            status_type,
            timestamp,
        };
        self.history.entry(job_id).or_default().push(entry);
        timestamp
    }

    fn create(&mut self, name: &str) -> HttpResponse {
        if self.jobs.values().any(|job| job.name == name) {
            return HttpResponse::json(
                400,
                &json!({"name": ["A job with this name already exists."]}),
            );
        }
        self.next_id += 1;
        let id = self.next_id;
        let timestamp = self.append_status(id, JobStatusType::Pending);
        let job = Job {
            id: JobId(id),
            name: name.to_string(),
            current_status_type: JobStatusType::Pending,
            current_status_timestamp: timestamp,
            created_at: timestamp,
            updated_at: timestamp,
        };
        self.jobs.insert(id, job.clone());
        HttpResponse::json(201, &to_json(&job))
    }

    fn handle(&mut self, request: &HttpRequest) -> HttpResponse {
        if let Some(response) = self.scripted.pop_front() {
            return response;
        }

        let path = request.url.trim_start_matches("/api");
        let (path, query) = path.split_once('?').unwrap_or((path, ""));
        let params = parse_query(query);
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match (request.method, segments.as_slice()) {
            (HttpMethod::Get, ["jobs"]) => {
                let mut jobs: Vec<Job> = self
                    .jobs
                    .values()
                    .filter(|job| {
                        params
                            .get("status")
                            .is_none_or(|status| job.current_status_type.as_str() == status)
                    })
                    .cloned()
                    .collect();
                match params.get("sort").map(String::as_str).unwrap_or("-created_at") {
                    "name" => jobs.sort_by(|a, b| a.name.cmp(&b.name)),
                    "-name" => jobs.sort_by(|a, b| b.name.cmp(&a.name)),
                    "created_at" => jobs.sort_by_key(|job| job.id),
                    _ => jobs.sort_by_key(|job| std::cmp::Reverse(job.id)),
                }
                page_response(jobs, &params)
            }
            (HttpMethod::Post, ["jobs"]) => {
                let body: Value = request
                    .body
                    .as_deref()
                    .and_then(|body| serde_json::from_str(body).ok())
                    .unwrap_or(Value::Null);
                let name = body.get("name").and_then(Value::as_str).unwrap_or_default();
                self.create(name)
            }
            (method, ["jobs", id, rest @ ..]) => {
                let Ok(id) = id.parse::<i64>() else {
                    return HttpResponse::json(400, &json!({"detail": "Invalid job id."}));
                };
                if !self.jobs.contains_key(&id) {
                    return HttpResponse::json(404, &json!({"detail": "Job not found."}));
                }
                match (method, rest) {
                    (HttpMethod::Get, []) => HttpResponse::json(200, &to_json(&self.jobs[&id])),
                    (HttpMethod::Patch, []) => {
                        let body: Value = request
                            .body
                            .as_deref()
                            .and_then(|body| serde_json::from_str(body).ok())
                            .unwrap_or(Value::Null);
                        let Some(status) = body
                            .get("status_type")
                            .and_then(Value::as_str)
                            .and_then(|s| s.parse::<JobStatusType>().ok())
                        else {
                            return HttpResponse::json(400, &json!({"status_type": ["Invalid."]}));
                        };
                        let timestamp = self.append_status(id, status);
                        let Some(job) = self.jobs.get_mut(&id) else {
                            return HttpResponse::json(404, &json!({"detail": "Job not found."}));
                        };
                        job.current_status_type = status;
                        job.current_status_timestamp = timestamp;
                        job.updated_at = timestamp;
                        HttpResponse::json(200, &to_json(job))
                    }
                    (HttpMethod::Delete, []) => {
                        self.jobs.remove(&id);
                        self.history.remove(&id);
                        HttpResponse::empty(204)
                    }
                    (HttpMethod::Get, ["statuses"]) => {
                        let entries = self.history.get(&id).cloned().unwrap_or_default();
                        page_response(entries, &params)
                    }
                    _ => HttpResponse::empty(405),
                }
            }
            _ => HttpResponse::empty(404),
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

fn parse_query(query: &str) -> BTreeMap<String, String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

fn page_response<T: serde::Serialize>(items: Vec<T>, params: &BTreeMap<String, String>) -> HttpResponse {
    let limit = params
        .get("limit")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(20);
    let offset = params
        .get("offset")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(0);
    let count = items.len();
    let results: Vec<T> = items.into_iter().skip(offset).take(limit).collect();
    let next = (offset + limit < count).then(|| format!("?limit={}&offset={}", limit, offset + limit));
    let previous = (offset > 0).then(|| format!("?limit={}&offset={}", limit, offset.saturating_sub(limit)));
    HttpResponse::json(
        200,
        &json!({
            "count": count,
            "next": next,
            "previous": previous,
            "results": to_json(&results),
        }),
    )
}

/// An in-memory jobs backend speaking the REST contract.
#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Rc<RefCell<BackendState>>,
}

impl FakeBackend {
    /// Answer the next request with `response` instead of the fake logic.
    pub fn script(&self, response: HttpResponse) {
        self.state.borrow_mut().scripted.push_back(response);
    }

    pub fn seed(&self, name: &str) -> JobId {
        let mut state = self.state.borrow_mut();
        state.create(name);
        JobId(state.next_id - 1)
    }

    /// Requests seen so far, as `(method, url)`.
    pub fn requests(&self) -> Vec<(HttpMethod, String)> {
        self.state.borrow().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.borrow().requests.len()
    }

    pub fn client(&self) -> HttpClient {
        let state = self.state.clone();
        let transport = FnTransport::new(move |request: HttpRequest| {
            let response = {
                let mut state = state.borrow_mut();
                state.requests.push((request.method, request.url.clone()));
                state.handle(&request)
            };
            Box::pin(async move {
                // Let other tasks interleave like a real network round trip.
                tokio::task::yield_now().await;
                Ok(response)
            })
        });
        HttpClient::new(ApiConfig::default(), Rc::new(transport))
    }

    pub fn queries(&self) -> JobQueries {
        JobQueries::new(QueryClient::default(), JobsApi::new(self.client()))
    }
}
