use std::env;

use anyhow::{Context, Result};

use crate::dtos::post_dtos::{page_size, DEFAULT_PAGE_SIZE};

const DEFAULT_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub supabase_service_role_key: String,
    pub jwt_secret: String,
    pub allowed_origins: Vec<String>,
    pub bind_address: String,
    pub feed_page_size: u32,
}

impl AppConfig {
    /// Reads the process environment. Call `dotenv` first to pick up `.env`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .with_context(|| format!("{} must be set", key))
        };

        let supabase_url = required("SUPABASE_URL")?.trim_end_matches('/').to_string();
        let supabase_service_role_key = required("SUPABASE_SERVICE_ROLE_KEY")?;
        let jwt_secret = required("SUPABASE_JWT_SECRET")?;
        let supabase_anon_key = lookup("SUPABASE_ANON_KEY").unwrap_or_default().trim().to_string();

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ORIGINS.into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let port: u16 = match lookup("PORT") {
            Some(p) => p.trim().parse().with_context(|| format!("PORT is not a valid port: {}", p))?,
            None => 8080,
        };

        let feed_page_size = match lookup("FEED_PAGE_SIZE") {
            Some(v) => v
                .trim()
                .parse()
                .with_context(|| format!("FEED_PAGE_SIZE is not a number: {}", v))?,
            None => DEFAULT_PAGE_SIZE,
        };

        Ok(Self {
            supabase_url,
            supabase_anon_key,
            supabase_service_role_key,
            jwt_secret,
            allowed_origins,
            bind_address: format!("0.0.0.0:{}", port),
            feed_page_size: page_size(Some(feed_page_size), DEFAULT_PAGE_SIZE),
        })
    }

    /// Minimal config pointing at a local (or mocked) Supabase.
    pub fn for_tests(supabase_url: &str, jwt_secret: &str) -> Self {
        Self {
            supabase_url: supabase_url.trim_end_matches('/').to_string(),
            supabase_anon_key: "anon-key".to_string(),
            supabase_service_role_key: "service-key".to_string(),
            jwt_secret: jwt_secret.to_string(),
            allowed_origins: vec![],
            bind_address: "127.0.0.1:0".to_string(),
            feed_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Shows only the edges of a secret in logs.
pub fn mask_key(k: &str) -> String {
    let n = k.chars().count();
    if n <= 8 {
        return "[REDACTED]".to_string();
    }
    let head: String = k.chars().take(4).collect();
    let tail: String = k.chars().skip(n - 4).collect();
    format!("{}***{}", head, tail)
}
