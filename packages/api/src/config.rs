//! API endpoint configuration.

/// Base path used when no override is configured.
pub const DEFAULT_API_BASE_URL: &str = "/api";

/// Where the jobs REST API lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Prefix for every request path, without a trailing slash.
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl ApiConfig {
    /// Create a config for an explicit base URL.
    ///
    /// Trailing slashes are dropped since request paths start with `/`.
    /// A blank value falls back to [`DEFAULT_API_BASE_URL`].
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Self::default();
        }
        Self {
            base_url: trimmed.to_string(),
        }
    }

    /// Build a config from the environment captured at compile time.
    ///
    /// - `API_BASE_URL` (optional, e.g. `http://localhost:8000/api`)
    ///
    /// The browser bundle has no runtime environment, so the value is baked
    /// in with `option_env!`.
    pub fn from_build_env() -> Self {
        match option_env!("API_BASE_URL") {
            Some(value) if !value.trim().is_empty() => Self::new(value),
            _ => Self::default(),
        }
    }

    /// The base URL the transport can dial.
    ///
    /// reqwest only accepts absolute URLs, so in the browser a path-only
    /// base such as `/api` is joined to the page origin.
    pub fn resolved_base_url(&self) -> String {
        if !self.base_url.starts_with('/') {
            return self.base_url.clone();
        }
        match page_origin() {
            Some(origin) => format!("{}{}", origin, self.base_url),
            None => self.base_url.clone(),
        }
    }

    /// Full URL for an API path such as `/jobs/`.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.resolved_base_url(), path)
    }
}

#[cfg(target_arch = "wasm32")]
fn page_origin() -> Option<String> {
    web_sys::window().and_then(|window| window.location().origin().ok())
}

#[cfg(not(target_arch = "wasm32"))]
fn page_origin() -> Option<String> {
    None
}
