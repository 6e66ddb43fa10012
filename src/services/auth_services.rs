use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use log::{info, warn};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::dtos::auth::{LoginIn, SessionOut, SignupIn};
use crate::models::user::{JwtClaims, NewUser, User};
use crate::repositories::profile_repository::ProfileRepository;
use crate::repositories::supabase::{RepoError, SupabaseRest};

/// Audience Supabase puts on user access tokens.
const TOKEN_AUDIENCE: &str = "authenticated";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    /// GoTrue refused the request (4xx).
    #[error("supabase rejected request: {0}")]
    Supabase(String),
    /// GoTrue failed or answered with something unreadable.
    #[error("supabase upstream failure: {0}")]
    Upstream(String),
    #[error("profile storage error: {0}")]
    Storage(#[from] RepoError),
    #[error("invalid token")]
    InvalidToken,
    #[error("parse uuid error")]
    UuidError(#[from] uuid::Error),
    #[error("email already registered")]
    AlreadyRegistered,
    #[error("invalid credentials")]
    InvalidCredentials,
}

#[derive(Clone)]
pub struct AuthService {
    pub client: reqwest::Client,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    rest: SupabaseRest,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(client: reqwest::Client, cfg: &AppConfig) -> Self {
        let rest = SupabaseRest::new(client.clone(), &cfg.supabase_url, &cfg.supabase_service_role_key);
        Self {
            client,
            supabase_url: cfg.supabase_url.trim_end_matches('/').to_string(),
            supabase_anon_key: cfg.supabase_anon_key.clone(),
            rest,
            jwt_secret: cfg.jwt_secret.clone(),
        }
    }

    /// Creates the GoTrue account only; no session is returned.
    pub async fn signup_only(&self, input: &SignupIn) -> Result<Uuid, AuthError> {
        #[derive(Serialize)]
        struct Body<'a> {
            email: &'a str,
            password: &'a str,
        }

        let body = Body {
            email: input.email.trim(),
            password: &input.password,
        };

        let url = format!("{}/auth/v1/signup", self.supabase_url);

        let resp = self
            .client
            .post(&url)
            .header("apikey", &self.supabase_anon_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();

        if !status.is_success() {
            let msg = supabase_message(&text).unwrap_or_else(|| format!("signup failed: {}", status));
            if msg.to_lowercase().contains("already registered") {
                return Err(AuthError::AlreadyRegistered);
            }
            if status.is_client_error() {
                return Err(AuthError::Supabase(msg));
            }
            return Err(AuthError::Upstream(format!("{} {}", status, msg)));
        }

        let json_val: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| AuthError::Upstream(format!("invalid json: {}", e)))?;

        let user_id_str = json_val
            .get("user")
            .and_then(|u| u.get("id"))
            .or_else(|| json_val.get("id"))
            .and_then(|v| v.as_str())
            .ok_or_else(|| AuthError::Upstream("signup returned no user id".to_string()))?;

        Ok(Uuid::parse_str(user_id_str)?)
    }

    /// Password grant. Returns the session plus the user id GoTrue reports.
    pub async fn login_with_user_id(&self, input: &LoginIn) -> Result<(SessionOut, Uuid), AuthError> {
        #[derive(Serialize)]
        struct LoginBody<'a> {
            email: &'a str,
            password: &'a str,
        }

        #[derive(Deserialize)]
        struct TokenResp {
            access_token: String,
            refresh_token: Option<String>,
            expires_in: Option<i64>,
            token_type: Option<String>,
            user: Option<UserInfo>,
        }

        #[derive(Deserialize)]
        struct UserInfo {
            id: String,
        }

        let body = LoginBody {
            email: input.email.trim(),
            password: &input.password,
        };

        let url = format!("{}/auth/v1/token?grant_type=password", self.supabase_url);

        let resp = self
            .client
            .post(&url)
            .header("apikey", &self.supabase_anon_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let txt = resp.text().await.unwrap_or_default();

        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            return Err(AuthError::InvalidCredentials);
        }
        if status != StatusCode::OK {
            return Err(AuthError::Upstream(format!("login failed: {} {}", status, txt)));
        }

        let tr: TokenResp = serde_json::from_str(&txt)
            .map_err(|e| AuthError::Upstream(format!("invalid json in login response: {}", e)))?;

        let user_id = match tr.user {
            Some(user) => Uuid::parse_str(&user.id)?,
            None => return Err(AuthError::Upstream("No user info in login response".to_string())),
        };

        let expires_at = tr
            .expires_in
            .map(|secs| chrono::Utc::now().timestamp() + secs);

        let session = SessionOut {
            access_token: tr.access_token,
            refresh_token: tr.refresh_token,
            expires_in: tr.expires_in,
            expires_at,
            token_type: tr.token_type,
        };

        Ok((session, user_id))
    }

    /// Insert-or-merge into `profiles` with the service role key.
    pub async fn upsert_profile(&self, profile: &NewUser) -> Result<User, AuthError> {
        let user = ProfileRepository::upsert_profile(&self.rest, profile).await?;
        info!("profile stored for {}", user.id);
        Ok(user)
    }

    pub async fn get_user(&self, user_id: Uuid) -> Result<Option<User>, AuthError> {
        Ok(ProfileRepository::get_profile(&self.rest, user_id).await?)
    }

    /// Verifies signature, expiry and audience of a Supabase access token.
    pub fn verify_access_token(&self, token: &str) -> Result<Uuid, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[TOKEN_AUDIENCE]);

        let data = decode::<JwtClaims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| {
            warn!("token rejected: {}", e);
            AuthError::InvalidToken
        })?;

        Ok(Uuid::parse_str(&data.claims.sub)?)
    }
}

/// GoTrue puts the human-readable reason in `msg`, `message` or `error_description`.
fn supabase_message(body: &str) -> Option<String> {
    let v: serde_json::Value = serde_json::from_str(body).ok()?;
    ["msg", "message", "error_description"]
        .iter()
        .find_map(|k| v.get(*k).and_then(|m| m.as_str()))
        .map(str::to_string)
}
