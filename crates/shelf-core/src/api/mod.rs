//! HTTP client for the bookmarking backend.
//!
//! Every call is fire-once: no retries, no caching and no timeout beyond the
//! transport default. Protected endpoints carry the session token as a bearer
//! credential; `/token` and `/register` never do.

mod error;
mod types;

use std::fmt;

use anyhow::Context;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
pub use error::{ApiError, ApiErrorKind, ApiResult};
pub use types::{
    Article, ArticleId, Credentials, InvalidRecordId, NewArticle, RecordId, SavedArticle, Tag,
    TagId, TokenResponse,
};

/// Standard User-Agent header for shelf requests.
pub const USER_AGENT: &str = concat!("shelf/", env!("CARGO_PKG_VERSION"));

/// Client bound to one backend address and (optionally) one session token.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_deref().map(crate::session::mask_token))
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Creates a client for `base_url` without a token.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (e.g. TLS backend
    /// initialisation fails).
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!(%method, path, "backend request");
        self.http.request(method, self.url(path))
    }

    fn authed(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.request(method, path);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and turns non-success statuses into `ApiError`.
    async fn dispatch(builder: RequestBuilder) -> ApiResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        tracing::debug!(status = status.as_u16(), "backend response");
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::http_status(status.as_u16(), &body))
    }

    async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> ApiResult<T> {
        let response = Self::dispatch(builder).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::decode(format!("Failed to decode response: {e}")))
    }

    async fn send_empty(builder: RequestBuilder) -> ApiResult<()> {
        Self::dispatch(builder).await.map(drop)
    }

    /// `POST /token` with form-encoded credentials.
    ///
    /// # Errors
    /// Returns the backend's rejection or a transport/decode failure.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<TokenResponse> {
        let form = Credentials { username, password };
        Self::send_json(self.request(Method::POST, "/token").form(&form)).await
    }

    /// `POST /register` with a JSON body. The success body is not inspected.
    ///
    /// # Errors
    /// Returns the backend's rejection (with `detail` when present).
    pub async fn register(&self, username: &str, password: &str) -> ApiResult<()> {
        let body = Credentials { username, password };
        Self::send_empty(self.request(Method::POST, "/register").json(&body)).await
    }

    /// `GET /search?query=...`.
    ///
    /// # Errors
    /// Returns the backend's rejection or a transport/decode failure.
    pub async fn search(&self, query: &str) -> ApiResult<Vec<Article>> {
        Self::send_json(
            self.authed(Method::GET, "/search")
                .query(&[("query", query)]),
        )
        .await
    }

    /// `GET /articles/`.
    ///
    /// # Errors
    /// Returns the backend's rejection or a transport/decode failure.
    pub async fn list_articles(&self) -> ApiResult<Vec<SavedArticle>> {
        Self::send_json(self.authed(Method::GET, "/articles/")).await
    }

    /// `POST /articles/`. Duplicates are rejected by the backend.
    ///
    /// # Errors
    /// Returns the backend's rejection or a transport/decode failure.
    pub async fn save_article(&self, title: &str, url: &str) -> ApiResult<SavedArticle> {
        let body = NewArticle { title, url };
        Self::send_json(self.authed(Method::POST, "/articles/").json(&body)).await
    }

    /// `POST /articles/{id}/generate_tags`.
    ///
    /// # Errors
    /// Returns the backend's rejection or a transport/decode failure.
    pub async fn generate_tags(&self, id: &ArticleId) -> ApiResult<SavedArticle> {
        let path = format!("/articles/{id}/generate_tags");
        Self::send_json(self.authed(Method::POST, &path)).await
    }

    /// `PUT /articles/{id}/tags`, replacing the whole tag set.
    ///
    /// # Errors
    /// Returns the backend's rejection or a transport/decode failure.
    pub async fn replace_tags(&self, id: &ArticleId, names: &[String]) -> ApiResult<SavedArticle> {
        let path = format!("/articles/{id}/tags");
        Self::send_json(self.authed(Method::PUT, &path).json(names)).await
    }

    /// `DELETE /articles/{id}`.
    ///
    /// # Errors
    /// Returns the backend's rejection or a transport failure.
    pub async fn delete_article(&self, id: &ArticleId) -> ApiResult<()> {
        let path = format!("/articles/{id}");
        Self::send_empty(self.authed(Method::DELETE, &path)).await
    }
}
