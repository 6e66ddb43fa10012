use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::UserPublic;

#[derive(Serialize, Deserialize)]
pub struct SignupIn {
    pub email: String,
    pub password: String,
    pub username: Option<String>,
    pub full_name: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct LoginIn {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionOut {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
    /// Unix seconds, computed server-side from `expires_in`.
    pub expires_at: Option<i64>,
    pub token_type: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SignupResponse {
    pub user_id: Uuid,
    pub message: String,
    pub next_step: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub session: SessionOut,
    pub user: Option<UserPublic>,
    pub next_step: String,
}
