//! HTTP transport for the portfolio backend.
//!
//! One [`Transport`] is shared by every API surface. It owns the base
//! URL, the mutable default bearer header, and the response checkpoint
//! that every reply passes through: failure statuses are mapped onto the
//! error taxonomy, and an authorization failure on a request that was
//! sent bearing a token is additionally published as an unauthorized
//! notice for the session manager to act on.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::{RwLock, broadcast};

use folio_core::auth::AuthGateway;
use folio_core::config::ClientConfig;
use folio_core::error::{FolioError, Result};

const LOGIN_PATH: &str = "/api/admin/login";
const GENERIC_LOGIN_ERROR: &str = "Login failed";
const UNAUTHORIZED_CHANNEL_CAPACITY: usize = 8;

/// Shared HTTP client for the portfolio backend.
#[derive(Clone)]
pub struct Transport {
    client: Client,
    base_url: String,
    timeout: Duration,
    bearer: Arc<RwLock<Option<String>>>,
    unauthorized: broadcast::Sender<()>,
}

impl Transport {
    pub fn new(config: &ClientConfig) -> Self {
        let (unauthorized, _) = broadcast::channel(UNAUTHORIZED_CHANNEL_CAPACITY);
        Self {
            client: Client::new(),
            base_url: config.base_url.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            bearer: Arc::new(RwLock::new(None)),
            unauthorized,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` and parse the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let (request, sent_with_bearer) = self.request(Method::GET, path).await;
        self.send(request, sent_with_bearer).await
    }

    /// POST `body` as JSON to `path` and parse the JSON reply.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let (request, sent_with_bearer) = self.request(Method::POST, path).await;
        self.send(request.json(body), sent_with_bearer).await
    }

    /// PUT `body` as JSON to `path` and parse the JSON reply.
    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let (request, sent_with_bearer) = self.request(Method::PUT, path).await;
        self.send(request.json(body), sent_with_bearer).await
    }

    /// DELETE `path` and parse the JSON reply.
    pub async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let (request, sent_with_bearer) = self.request(Method::DELETE, path).await;
        self.send(request, sent_with_bearer).await
    }

    /// Builds a request against the base URL, attaching the default
    /// bearer header when one is set. Returns whether it was attached,
    /// which decides how an authorization failure on the reply is
    /// classified.
    async fn request(&self, method: Method, path: &str) -> (RequestBuilder, bool) {
        let mut request = self
            .client
            .request(method, self.url(path))
            .timeout(self.timeout);

        let bearer = self.bearer.read().await.clone();
        let sent_with_bearer = bearer.is_some();
        if let Some(token) = bearer {
            request = request.header("Authorization", format!("Bearer {}", token));
        }
        (request, sent_with_bearer)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        sent_with_bearer: bool,
    ) -> Result<T> {
        let response = request.send().await.map_err(map_transport_error)?;
        let response = self.check(response, sent_with_bearer).await?;
        response.json().await.map_err(map_transport_error)
    }

    /// Response checkpoint. Success passes through; failure statuses are
    /// mapped onto the error taxonomy, extracting the backend's
    /// `{"detail": ...}` message when present.
    async fn check(&self, response: Response, sent_with_bearer: bool) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();

        if status == StatusCode::UNAUTHORIZED && sent_with_bearer {
            tracing::debug!("authorization failure on a protected call");
            let _ = self.unauthorized.send(());
            return Err(FolioError::Unauthorized);
        }

        Err(FolioError::api(
            status.as_u16(),
            error_message(status, &body),
        ))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl AuthGateway for Transport {
    /// Posts form-encoded credentials to the login endpoint.
    ///
    /// Login deliberately bypasses the unauthorized checkpoint: a 401
    /// here means rejected credentials, not an expired session, so no
    /// notice is published. Any failure surfaces as an authentication
    /// error carrying the backend's `detail` when available.
    async fn login(&self, username: &str, password: &str) -> Result<String> {
        #[derive(serde::Deserialize)]
        struct TokenResponse {
            access_token: String,
        }

        let response = self
            .client
            .post(self.url(LOGIN_PATH))
            .form(&[("username", username), ("password", password)])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                tracing::debug!("login request failed: {}", e);
                FolioError::auth(GENERIC_LOGIN_ERROR)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = parse_error_detail(&body)
                .unwrap_or_else(|| GENERIC_LOGIN_ERROR.to_string());
            return Err(FolioError::auth(detail));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            tracing::debug!("login response was not parseable: {}", e);
            FolioError::auth(GENERIC_LOGIN_ERROR)
        })?;
        Ok(token.access_token)
    }

    async fn set_bearer(&self, token: &str) {
        *self.bearer.write().await = Some(token.to_string());
    }

    async fn clear_bearer(&self) {
        *self.bearer.write().await = None;
    }

    fn subscribe_unauthorized(&self) -> broadcast::Receiver<()> {
        self.unauthorized.subscribe()
    }
}

fn map_transport_error(e: reqwest::Error) -> FolioError {
    if e.is_decode() {
        FolioError::Serialization {
            format: "JSON".to_string(),
            message: e.to_string(),
        }
    } else {
        FolioError::http(e.to_string())
    }
}

/// Extracts the backend's `{"detail": "..."}` message from an error
/// body. A non-string `detail` (FastAPI validation payloads) is treated
/// as absent.
fn parse_error_detail(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            json.get("detail")
                .and_then(|detail| detail.as_str())
                .map(|detail| detail.to_string())
        })
}

fn error_message(status: StatusCode, body: &str) -> String {
    parse_error_detail(body)
        .or_else(|| status.canonical_reason().map(String::from))
        .unwrap_or_else(|| "request failed".to_string())
}
