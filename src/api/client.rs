//! HTTP client for the shop backend

use reqwest::{multipart::Form, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::session::SessionState;

/// Longest backend error text carried into a `RequestFailed`
const MAX_ERROR_BODY: usize = 200;

/// Client for the backend REST API.
///
/// Authenticated calls read the token from the session at send time and end
/// the session on any 401, so no screen keeps working with a dead token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionState>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: Arc<SessionState>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().timeout(config.timeout());
        if config.bypass_proxy {
            builder = builder.no_proxy();
        }
        let http = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionState> {
        &self.session
    }

    /// Absolute URL for an endpoint path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Authenticated request with an optional JSON body
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Response> {
        let mut builder = self.http.request(method.clone(), self.url(path));
        if let Some(body) = body {
            builder = builder.json(&body);
        }
        self.send_authenticated(builder, &method, path).await
    }

    /// Authenticated multipart POST
    pub async fn request_multipart(&self, path: &str, form: Form) -> Result<Response> {
        let builder = self.http.post(self.url(path)).multipart(form);
        self.send_authenticated(builder, &Method::POST, path).await
    }

    /// Unauthenticated request. Never attaches a token and never touches the
    /// session; the raw response is returned whatever its status.
    pub async fn request_public(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Response> {
        let mut builder = self.http.request(method.clone(), self.url(path));
        if let Some(body) = body {
            builder = builder.json(&body);
        }
        let response = builder.send().await?;
        debug!(%method, path, status = response.status().as_u16(), "Public request");
        Ok(response)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.request(Method::GET, path, None).await?;
        decode(response).await
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let body = serde_json::to_value(body)?;
        let response = self.request(Method::POST, path, Some(body)).await?;
        decode(response).await
    }

    pub async fn put_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let body = serde_json::to_value(body)?;
        let response = self.request(Method::PUT, path, Some(body)).await?;
        decode(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        self.request(Method::DELETE, path, None).await?;
        Ok(())
    }

    async fn send_authenticated(
        &self,
        builder: RequestBuilder,
        method: &Method,
        path: &str,
    ) -> Result<Response> {
        let builder = match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status();
        debug!(%method, path, status = status.as_u16(), "Authenticated request");

        if status == StatusCode::UNAUTHORIZED {
            warn!("{} {} returned 401, ending session", method, path);
            self.session.logout();
            return Err(Error::Unauthorized);
        }

        check_status(response).await
    }
}

/// Map non-success statuses to errors, passing 2xx through
pub async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let path = response.url().path().to_string();
    let detail = error_detail(response).await;

    match status {
        StatusCode::UNAUTHORIZED => Err(Error::Unauthorized),
        StatusCode::NOT_FOUND => Err(Error::NotFound(format!("Recurso no encontrado: {}", path))),
        _ => Err(Error::RequestFailed(match detail {
            Some(detail) => format!("Error {} del servidor: {}", status.as_u16(), detail),
            None => format!("Error {} del servidor", status.as_u16()),
        })),
    }
}

/// Check the status, then decode the JSON body
pub async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let response = check_status(response).await?;
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes)
        .map_err(|e| Error::RequestFailed(format!("Respuesta inesperada del servidor: {}", e)))
}

/// Best-effort extraction of the backend's error message
async fn error_detail(response: Response) -> Option<String> {
    let text = response.text().await.ok()?;
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(text) {
        if let Some(detail) = value.get("detail").and_then(|d| d.as_str()) {
            return Some(detail.to_string());
        }
    }

    Some(text.chars().take(MAX_ERROR_BODY).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryStore;

    fn client(base_url: &str) -> ApiClient {
        let config = ApiConfig {
            base_url: base_url.to_string(),
            timeout_secs: 1,
            bypass_proxy: true,
        };
        let session = Arc::new(SessionState::initialize(MemoryStore::new()));
        ApiClient::new(&config, session).unwrap()
    }

    #[test]
    fn test_url_joining() {
        let api = client("http://127.0.0.1:8000/api/");
        assert_eq!(api.base_url(), "http://127.0.0.1:8000/api");
        assert_eq!(api.url("/productos/"), "http://127.0.0.1:8000/api/productos/");
        assert_eq!(api.url("token/"), "http://127.0.0.1:8000/api/token/");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_request_failed() {
        // Port 9 (discard) is closed on any sane test host
        let api = client("http://127.0.0.1:9/api");
        let result = api.request(Method::GET, "/productos/", None).await;
        assert!(matches!(result, Err(Error::RequestFailed(_))));
    }
}
