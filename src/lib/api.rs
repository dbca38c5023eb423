//! HTTP helpers for the session endpoints with consistent credentials and error
//! handling. Every request carries the session cookie (`credentials: include`
//! in the browser, a cookie store on native) so the server can set and read the
//! `HttpOnly` session. The helpers never read the cookie themselves and never
//! log request bodies.

use super::{config::AppConfig, errors::AppError};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};

/// Default request timeout (milliseconds) applied on native targets.
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_TIMEOUT_MS: u64 = 10_000;
/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

/// Credentialed JSON client bound to one API base URL.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, AppError> {
        Ok(Self {
            http: build_http_client()?,
            base_url: base_url.into(),
        })
    }

    /// Builds a client for the configured API base URL.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when the underlying HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        Self::new(config.api_base_url.clone())
    }

    /// Fetches JSON with cookies for session-authenticated APIs.
    ///
    /// # Errors
    ///
    /// Returns an `AppError` for transport failures, non-2xx statuses, or bad JSON.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let request = credentialed(self.http.get(self.url(path)));
        let response = send(request).await?;
        handle_json_response(response).await
    }

    /// Posts JSON with cookies and parses a JSON response.
    ///
    /// # Errors
    ///
    /// Returns an `AppError` for transport failures, non-2xx statuses, or bad JSON.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let payload = serde_json::to_string(body)
            .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))?;
        let request = credentialed(
            self.http
                .post(self.url(path))
                .header("Content-Type", "application/json")
                .body(payload),
        );
        let response = send(request).await?;
        handle_json_response(response).await
    }

    /// Posts an empty body with cookies, used to clear a session.
    ///
    /// # Errors
    ///
    /// Returns an `AppError` for transport failures or non-2xx statuses.
    pub async fn post_empty(&self, path: &str) -> Result<(), AppError> {
        let request = credentialed(self.http.post(self.url(path)));
        let response = send(request).await?;
        handle_empty_response(response).await
    }

    fn url(&self, path: &str) -> String {
        build_url_with_base(&self.base_url, path)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_http_client() -> Result<Client, AppError> {
    Client::builder()
        .cookie_store(true)
        .timeout(std::time::Duration::from_millis(DEFAULT_TIMEOUT_MS))
        .build()
        .map_err(|err| AppError::Config(format!("Failed to initialize HTTP client: {err}")))
}

#[cfg(target_arch = "wasm32")]
fn build_http_client() -> Result<Client, AppError> {
    Client::builder()
        .build()
        .map_err(|err| AppError::Config(format!("Failed to initialize HTTP client: {err}")))
}

#[cfg(target_arch = "wasm32")]
fn credentialed(builder: RequestBuilder) -> RequestBuilder {
    builder.fetch_credentials_include()
}

#[cfg(not(target_arch = "wasm32"))]
fn credentialed(builder: RequestBuilder) -> RequestBuilder {
    builder
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

async fn send(request: RequestBuilder) -> Result<Response, AppError> {
    request.send().await.map_err(map_request_error)
}

/// Maps transport errors into user-facing `AppError` variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else if err.is_builder() {
        AppError::Serialization(format!("Failed to build request: {err}"))
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Parses JSON responses and surfaces HTTP errors with sanitized bodies.
async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    if response.status().is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    } else {
        Err(http_error(response).await)
    }
}

/// Handles empty responses and returns sanitized HTTP errors when needed.
async fn handle_empty_response(response: Response) -> Result<(), AppError> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(http_error(response).await)
    }
}

async fn http_error(response: Response) -> AppError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    AppError::Http {
        status,
        message: sanitize_body(&body),
    }
}

/// Sanitizes HTTP error bodies for user-facing messages by trimming and truncating.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
