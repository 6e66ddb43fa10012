use log::debug;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("supabase returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("not found")]
    NotFound,
    #[error("concurrent update, please retry")]
    Conflict,
    #[error("{0}")]
    Validation(String),
}

/// PostgREST client shared by all repositories. Requests carry the service
/// role key, so row-level policies are enforced in the repositories instead.
#[derive(Clone)]
pub struct SupabaseRest {
    client: Client,
    base_url: String,
    service_key: String,
}

impl SupabaseRest {
    pub fn new(client: Client, base_url: &str, service_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            service_key: service_key.trim().to_string(),
        }
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
    }

    pub fn get(&self, table: &str) -> RequestBuilder {
        self.authed(self.client.get(self.table_url(table)))
    }

    /// Insert returning the stored rows.
    pub fn insert(&self, table: &str) -> RequestBuilder {
        self.authed(self.client.post(self.table_url(table)))
            .header("Prefer", "return=representation")
    }

    /// Insert that merges into an existing row with the same primary key.
    pub fn upsert(&self, table: &str) -> RequestBuilder {
        self.authed(self.client.post(self.table_url(table)))
            .header("Prefer", "resolution=merge-duplicates,return=representation")
    }

    /// Update returning the touched rows.
    pub fn patch(&self, table: &str) -> RequestBuilder {
        self.authed(self.client.patch(self.table_url(table)))
            .header("Prefer", "return=representation")
    }

    /// Delete returning the removed rows.
    pub fn delete(&self, table: &str) -> RequestBuilder {
        self.authed(self.client.delete(self.table_url(table)))
            .header("Prefer", "return=representation")
    }

    /// Reads a PostgREST row array, mapping non-2xx to `RepoError::Status`.
    pub async fn rows<T: DeserializeOwned>(resp: Response) -> Result<Vec<T>, RepoError> {
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            debug!("supabase {} body: {}", status, truncate(&body, 500));
            return Err(RepoError::Status { status, body });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// First row or `RepoError::NotFound`.
    pub async fn single<T: DeserializeOwned>(resp: Response) -> Result<T, RepoError> {
        Self::rows(resp)
            .await?
            .into_iter()
            .next()
            .ok_or(RepoError::NotFound)
    }

    /// Round-trip used by the health endpoint.
    pub async fn ping(&self) -> Result<StatusCode, RepoError> {
        let resp = self
            .get("profiles")
            .query(&[("select", "id"), ("limit", "1")])
            .send()
            .await?;
        Ok(resp.status())
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
