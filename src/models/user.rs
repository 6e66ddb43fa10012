use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Row of the `profiles` table. Passwords never live here, GoTrue owns them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,                   // same as auth.users.id
    pub email: String,
    pub username: Option<String>,
    pub full_name: Option<String>,
    #[serde(default = "default_role")]
    pub role: String,               // server-set
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Upsert payload for the `profiles` table.
#[derive(Debug, Serialize, Deserialize)]
pub struct NewUser {
    pub id: Uuid,
    pub email: String,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub role: String,
}

impl NewUser {
    pub fn new(id: Uuid, email: &str, username: Option<String>, full_name: Option<String>) -> Self {
        Self {
            id,
            email: email.trim().to_lowercase(),
            username,
            full_name,
            role: default_role(),
        }
    }
}

/// Redacted view sent to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserPublic {
    pub id: Uuid,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub role: String,
}

impl From<User> for UserPublic {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            full_name: u.full_name,
            role: u.role,
        }
    }
}

/// Claims carried by a Supabase access token.
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    /// subject / user id
    pub sub: String,
    pub aud: Option<String>,
    pub exp: u64,
    pub iat: Option<u64>,
    pub role: Option<String>,
    pub email: Option<String>,
}

fn default_role() -> String {
    "user".to_string()
}

fn default_active() -> bool {
    true
}
