//! Typed client for this service's authentication routes.
//!
//! Every request goes through a base URL fixed at construction time to
//! `<origin>/auth`, the path the reverse proxy forwards to the backend.
//! Individual calls cannot leave that prefix.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::dtos::auth::{LoginIn, LoginResponse, SignupIn, SignupResponse};
use crate::dtos::ApiResponse;
use crate::models::user::UserPublic;

pub const AUTH_BASE_PATH: &str = "/auth";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid origin: {0}")]
    InvalidOrigin(String),
    #[error("invalid path: {0}")]
    InvalidPath(String),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("response had no data")]
    EmptyBody,
}

#[derive(Clone, Debug)]
pub struct AuthClient {
    http: Client,
    base: Url,
}

impl AuthClient {
    /// `origin` is scheme + host (+ port), e.g. `http://localhost:8080`.
    pub fn new(origin: &str) -> Result<Self, ClientError> {
        let http = Client::builder()
            .user_agent(concat!("showcase-be-client/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::with_client(http, origin)
    }

    pub fn with_client(http: Client, origin: &str) -> Result<Self, ClientError> {
        Ok(Self {
            http,
            base: base_url_for(origin)?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    /// Appends `path` as segments under the base URL. Leading slashes are
    /// ignored; dot segments, empty segments, queries and fragments are
    /// rejected so the result always stays under `/auth/`.
    pub fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        let path = path.trim_start_matches('/');
        if path.is_empty() || path.contains(&['?', '#', '\\'][..]) {
            return Err(ClientError::InvalidPath(path.to_string()));
        }

        let segments: Vec<&str> = path.split('/').collect();
        if segments.iter().any(|s| is_unsafe_segment(s)) {
            return Err(ClientError::InvalidPath(path.to_string()));
        }

        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidPath(path.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn signup(&self, input: &SignupIn) -> Result<SignupResponse, ClientError> {
        let resp = self.http.post(self.endpoint("signup")?).json(input).send().await?;
        read_data(resp).await
    }

    pub async fn login(&self, input: &LoginIn) -> Result<LoginResponse, ClientError> {
        let resp = self.http.post(self.endpoint("login")?).json(input).send().await?;
        read_data(resp).await
    }

    pub async fn me(&self, access_token: &str) -> Result<UserPublic, ClientError> {
        let resp = self
            .http
            .get(self.endpoint("me")?)
            .bearer_auth(access_token)
            .send()
            .await?;
        read_data(resp).await
    }
}

/// Empty, `.` or `..`, including percent-encoded dots.
fn is_unsafe_segment(segment: &str) -> bool {
    let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
    decoded.is_empty() || decoded == "." || decoded == ".."
}

fn base_url_for(origin: &str) -> Result<Url, ClientError> {
    let invalid = || ClientError::InvalidOrigin(origin.to_string());

    let mut base = Url::parse(origin.trim()).map_err(|e| ClientError::InvalidOrigin(format!("{}: {}", origin, e)))?;
    if !matches!(base.scheme(), "http" | "https") || base.host().is_none() {
        return Err(invalid());
    }
    if base.query().is_some() || base.fragment().is_some() {
        return Err(invalid());
    }

    base.path_segments_mut().map_err(|_| invalid())?.pop_if_empty();
    let already_prefixed = base
        .path_segments()
        .and_then(|mut s| s.next_back())
        .is_some_and(|last| last == AUTH_BASE_PATH.trim_start_matches('/'));
    if !already_prefixed {
        base.path_segments_mut()
            .map_err(|_| invalid())?
            .push(AUTH_BASE_PATH.trim_start_matches('/'));
    }
    Ok(base)
}

/// Unwraps the `ApiResponse` envelope; non-2xx becomes `ClientError::Status`.
async fn read_data<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(&body)
            .map(|r| r.message)
            .unwrap_or(body);
        return Err(ClientError::Status {
            status: status.as_u16(),
            message,
        });
    }

    let envelope: ApiResponse<T> = serde_json::from_str(&body).map_err(|e| ClientError::Status {
        status: status.as_u16(),
        message: format!("unexpected body: {}", e),
    })?;
    envelope.data.ok_or(ClientError::EmptyBody)
}
