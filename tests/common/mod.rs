#![allow(dead_code)]

use actix_web::web;
use httpmock::MockServer;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use uuid::Uuid;

use showcase_be::config::AppConfig;
use showcase_be::models::user::JwtClaims;
use showcase_be::repositories::supabase::SupabaseRest;
use showcase_be::services::auth_services::AuthService;
use showcase_be::AppState;

pub const JWT_SECRET: &str = "integration-test-jwt-secret-0123456789";

/// App data wired against a mocked Supabase.
pub fn app_data(server: &MockServer) -> (web::Data<AppState>, web::Data<AuthService>) {
    let cfg = AppConfig::for_tests(&server.base_url(), JWT_SECRET);
    let client = reqwest::Client::new();

    let auth = web::Data::new(AuthService::new(client.clone(), &cfg));
    let state = web::Data::new(AppState {
        rest: SupabaseRest::new(client, &cfg.supabase_url, &cfg.supabase_service_role_key),
        feed_page_size: cfg.feed_page_size,
    });
    (state, auth)
}

/// Builds the full app over a mocked Supabase.
macro_rules! test_app {
    ($server:expr) => {{
        let (state, auth) = common::app_data($server);
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(state)
                .app_data(auth)
                .configure(showcase_be::configure_routes),
        )
        .await
    }};
}

pub fn token_signed_with(user_id: Uuid, secret: &str) -> String {
    let claims = JwtClaims {
        sub: user_id.to_string(),
        aud: Some("authenticated".to_string()),
        exp: (chrono::Utc::now().timestamp() + 3600) as u64,
        iat: None,
        role: Some("authenticated".to_string()),
        email: None,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
}

pub fn bearer(user_id: Uuid) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token_signed_with(user_id, JWT_SECRET)))
}

pub fn project_row(id: &str, owner: Uuid) -> Value {
    json!({
        "id": id,
        "name": "Rust Board",
        "description": null,
        "link": "https://github.com/example/board",
        "user_id": owner,
        "created_at": "2024-05-01T10:00:00+00:00",
        "updated_at": null,
        "owner": { "id": owner, "username": "ferris", "full_name": null },
    })
}

pub fn post_row(id: Uuid, project_id: &str, author: Uuid, liked_by: &[Uuid], likes: u32, revision: i64) -> Value {
    json!({
        "id": id,
        "project_id": project_id,
        "user_id": author,
        "content": "first release is out",
        "images": ["https://img.example.com/1.png", "https://img.example.com/2.png"],
        "likes": likes,
        "liked_by": liked_by,
        "revision": revision,
        "comments": [],
        "created_at": "2024-05-02T09:00:00+00:00",
        "updated_at": null,
    })
}
