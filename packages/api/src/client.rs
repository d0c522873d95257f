//! JSON HTTP client bound to a base URL.

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{ApiConfig, ApiError, HttpError, HttpMethod, HttpRequest, ReqwestTransport, Transport};

/// Per-request options.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: HttpMethod,
    /// JSON body; sets `Content-Type: application/json` when present.
    pub body: Option<Value>,
    /// Extra headers. These win over the defaults.
    pub headers: Vec<(String, String)>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: HttpMethod::Get,
            body: None,
            headers: Vec::new(),
        }
    }
}

impl RequestOptions {
    pub fn method(method: HttpMethod) -> Self {
        Self {
            method,
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Issues JSON requests against the configured API.
#[derive(Clone)]
pub struct HttpClient {
    config: ApiConfig,
    transport: Rc<dyn Transport>,
}

impl HttpClient {
    pub fn new(config: ApiConfig, transport: Rc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Client over the default reqwest transport.
    pub fn from_config(config: ApiConfig) -> Self {
        Self::new(config, Rc::new(ReqwestTransport::new()))
    }

    /// Send a request to `path` (relative to the base URL) and decode the
    /// JSON response into `T`.
    ///
    /// Non-JSON responses decode from `null`, so `T = ()` fits empty bodies.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let request = self.build_request(path, options)?;
        let method = request.method;
        let url = request.url.clone();
        tracing::debug!("{} {}", method.as_str(), url);

        let response = self.transport.send(request).await?;

        let payload = if response.is_json() && !response.body.trim().is_empty() {
            serde_json::from_str::<Value>(&response.body).map_err(|e| e.to_string())
        } else {
            Ok(Value::Null)
        };

        if !response.is_success() {
            tracing::warn!(
                "{} {} failed with status {}",
                method.as_str(),
                url,
                response.status
            );
            // An unreadable error body still reports the status.
            let payload = payload.unwrap_or(Value::Null);
            return Err(HttpError::new(response.status, payload).into());
        }

        let payload = payload.map_err(ApiError::Decode)?;
        serde_json::from_value(payload).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn build_request(&self, path: &str, options: RequestOptions) -> Result<HttpRequest, ApiError> {
        let body = options
            .body
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| ApiError::Encode(e.to_string()))?;

        let mut headers: Vec<(String, String)> = Vec::new();
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        for (name, value) in options.headers {
            headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
            headers.push((name, value));
        }

        Ok(HttpRequest {
            method: options.method,
            url: self.config.url_for(path),
            headers,
            body,
        })
    }
}
