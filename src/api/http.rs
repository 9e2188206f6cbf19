//! HTTP client adapter for the admin API.
//!
//! Centralizes the base URL and timeout, attaches the bearer token of the
//! current session, and turns a 401 into a session invalidation.

use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::auth::SessionManager;
use crate::config::ApiConfig;
use crate::error::{AdminError, Result};

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

pub struct HttpClient {
    client: Client,
    base_url: Url,
    session: Arc<SessionManager>,
}

impl HttpClient {
    pub fn new(config: &ApiConfig, session: Arc<SessionManager>) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            session,
        })
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    /// Join an endpoint path onto the base URL, keeping any path prefix the
    /// base carries (`https://host/api/` + `/admin/users`).
    pub fn url(&self, path: &str) -> Result<Url> {
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Ok(Url::parse(&joined)?)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let (request, authenticated) = self.request(Method::GET, path)?;
        self.send(Method::GET, path, request.query(query), authenticated).await
    }

    pub async fn post<P, T>(&self, path: &str, payload: &P) -> Result<T>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let (request, authenticated) = self.request(Method::POST, path)?;
        self.send(Method::POST, path, request.json(payload), authenticated).await
    }

    pub async fn put<P, T>(&self, path: &str, payload: &P) -> Result<T>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let (request, authenticated) = self.request(Method::PUT, path)?;
        self.send(Method::PUT, path, request.json(payload), authenticated).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let (request, authenticated) = self.request(Method::DELETE, path)?;
        self.send(Method::DELETE, path, request.query(query), authenticated).await
    }

    /// Build a request, attaching the bearer token when a session exists.
    /// The flag reports whether a token went out.
    fn request(&self, method: Method, path: &str) -> Result<(RequestBuilder, bool)> {
        let url = self.url(path)?;
        let request = self.client.request(method, url);
        Ok(match self.session.token() {
            Some(token) => (request.bearer_auth(token), true),
            None => (request, false),
        })
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
        authenticated: bool,
    ) -> Result<T> {
        tracing::debug!(%method, path, "Admin API request");

        let response = request.send().await?;
        let status = response.status();

        // Only a rejected token ends the session; an anonymous 401 (bad
        // credentials on login) is an ordinary API error.
        if status == StatusCode::UNAUTHORIZED && authenticated {
            tracing::warn!(%method, path, "Unauthorized response, signing out");
            self.session.invalidate(&format!("401 from {method} {path}"));
            return Err(AdminError::Unauthorized);
        }

        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message);
            tracing::warn!(%method, path, %status, "Admin API error");
            return Err(AdminError::Api { status, message });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}
