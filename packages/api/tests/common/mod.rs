use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use api::{ApiConfig, FnTransport, HttpClient, HttpRequest, HttpResponse, JobsApi};

/// Records every request and answers from a queue of canned responses.
#[derive(Clone, Default)]
pub struct Recorder {
    pub requests: Rc<RefCell<Vec<HttpRequest>>>,
    responses: Rc<RefCell<VecDeque<HttpResponse>>>,
}

impl Recorder {
    pub fn respond(&self, response: HttpResponse) -> &Self {
        self.responses.borrow_mut().push_back(response);
        self
    }

    pub fn last(&self) -> HttpRequest {
        self.requests
            .borrow()
            .last()
            .cloned()
            .expect("no request was sent")
    }

    pub fn count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn client(&self, base_url: &str) -> HttpClient {
        let requests = self.requests.clone();
        let responses = self.responses.clone();
        let transport = FnTransport::new(move |request: HttpRequest| {
            requests.borrow_mut().push(request);
            let response = responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| HttpResponse::empty(500));
            Box::pin(async move { Ok(response) })
        });
        HttpClient::new(ApiConfig::new(base_url), Rc::new(transport))
    }

    pub fn jobs_api(&self) -> JobsApi {
        JobsApi::new(self.client("/api"))
    }
}

pub fn job_json(id: i64, name: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "current_status_type": status,
        "current_status_timestamp": "2024-01-01T00:00:00Z",
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z",
    })
}
