use uuid::Uuid;

use crate::models::user::{NewUser, User};
use crate::repositories::supabase::{RepoError, SupabaseRest};

const TABLE: &str = "profiles";

pub struct ProfileRepository;

impl ProfileRepository {
    /// Insert-or-merge keyed on `id`.
    pub async fn upsert_profile(rest: &SupabaseRest, profile: &NewUser) -> Result<User, RepoError> {
        let resp = rest.upsert(TABLE).json(profile).send().await?;
        SupabaseRest::single(resp).await
    }

    pub async fn get_profile(rest: &SupabaseRest, user_id: Uuid) -> Result<Option<User>, RepoError> {
        let resp = rest
            .get(TABLE)
            .query(&[("id", format!("eq.{}", user_id)), ("select", "*".to_string())])
            .send()
            .await?;

        let rows: Vec<User> = SupabaseRest::rows(resp).await?;
        Ok(rows.into_iter().next())
    }
}
