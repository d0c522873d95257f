//! Transport trait and the reqwest-backed implementation.

use std::future::Future;
use std::pin::Pin;

use crate::ApiError;

/// Future type for transport sends.
///
/// Not `Send`: in the browser every request runs on the single UI thread.
pub type TransportFuture = Pin<Box<dyn Future<Output = Result<HttpResponse, ApiError>>>>;

/// HTTP methods used by the job endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A fully built request, ready to put on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// Serialized JSON body.
    pub body: Option<String>,
}

impl HttpRequest {
    /// Look up a header value, ignoring name case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw response: status, content type and body text.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    /// A JSON response with the given status.
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self {
            status,
            content_type: Some("application/json".to_string()),
            body: body.to_string(),
        }
    }

    /// A body-less response such as `204 No Content`.
    pub fn empty(status: u16) -> Self {
        Self {
            status,
            content_type: None,
            body: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|value| value.contains("application/json"))
    }
}

/// Sends requests to the backend.
///
/// Implement this trait to swap the network stack, e.g. for tests.
pub trait Transport: 'static {
    fn send(&self, request: HttpRequest) -> TransportFuture;
}

/// Transport over `reqwest`; uses the fetch API when compiled to wasm32.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: HttpRequest) -> TransportFuture {
        let client = self.client.clone();
        Box::pin(async move {
            let mut builder = client.request(request.method.into(), request.url.as_str());
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder
                .send()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;

            let status = response.status().as_u16();
            let content_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);
            let body = response
                .text()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;

            Ok(HttpResponse {
                status,
                content_type,
                body,
            })
        })
    }
}

/// A simple function-based transport.
pub struct FnTransport<F>
where
    F: Fn(HttpRequest) -> TransportFuture + 'static,
{
    handler: F,
}

impl<F> FnTransport<F>
where
    F: Fn(HttpRequest) -> TransportFuture + 'static,
{
    pub fn new(handler: F) -> Self {
        Self { handler }
    }
}

impl<F> Transport for FnTransport<F>
where
    F: Fn(HttpRequest) -> TransportFuture + 'static,
{
    fn send(&self, request: HttpRequest) -> TransportFuture {
        (self.handler)(request)
    }
}
