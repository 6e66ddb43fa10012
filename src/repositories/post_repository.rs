use log::{debug, info};
use serde_json::json;
use uuid::Uuid;

use crate::models::post::{NewPost, Post};
use crate::repositories::supabase::{RepoError, SupabaseRest};

const TABLE: &str = "posts";
const SELECT_WITH_COMMENTS: &str = "*,comments(*)";

pub struct PostRepository;

impl PostRepository {
    pub async fn create_post(
        rest: &SupabaseRest,
        user_id: Uuid,
        post: NewPost,
    ) -> Result<Post, RepoError> {
        post.validate().map_err(RepoError::Validation)?;

        let payload = json!({
            "project_id": post.project_id,
            "user_id": user_id,
            "content": post.content,
            "images": post.images,
            "likes": 0,
            "liked_by": [],
            "revision": 0,
        });

        debug!("creating post with payload: {}", payload);

        let resp = rest.insert(TABLE).json(&payload).send().await?;
        let created: Post = SupabaseRest::single(resp).await?;
        info!("post {} created on project {}", created.id, created.project_id);
        Ok(created)
    }

    /// Comments are embedded oldest first.
    pub async fn get_post(rest: &SupabaseRest, id: Uuid) -> Result<Option<Post>, RepoError> {
        let resp = rest
            .get(TABLE)
            .query(&[
                ("id", format!("eq.{}", id)),
                ("select", SELECT_WITH_COMMENTS.to_string()),
                ("comments.order", "created_at.asc".to_string()),
            ])
            .send()
            .await?;

        let rows: Vec<Post> = SupabaseRest::rows(resp).await?;
        Ok(rows.into_iter().next())
    }

    /// Newest first, optionally restricted to one project.
    pub async fn list_posts(
        rest: &SupabaseRest,
        project_id: Option<&str>,
        limit: u32,
    ) -> Result<Vec<Post>, RepoError> {
        let mut query = vec![
            ("select", SELECT_WITH_COMMENTS.to_string()),
            ("order", "created_at.desc".to_string()),
            ("comments.order", "created_at.asc".to_string()),
            ("limit", limit.to_string()),
        ];
        if let Some(project_id) = project_id {
            query.push(("project_id", format!("eq.{}", project_id)));
        }

        let resp = rest.get(TABLE).query(&query).send().await?;
        SupabaseRest::rows(resp).await
    }

    pub async fn delete_post(rest: &SupabaseRest, id: Uuid, owner: Uuid) -> Result<(), RepoError> {
        let resp = rest
            .delete(TABLE)
            .query(&[("id", format!("eq.{}", id)), ("user_id", format!("eq.{}", owner))])
            .send()
            .await?;

        let _deleted: Post = SupabaseRest::single(resp).await?;
        info!("post {} deleted by {}", id, owner);
        Ok(())
    }

    /// Writes `likes`/`liked_by` only if the row is still at
    /// `expected_revision`. `Ok(None)` means another writer got there first.
    pub async fn write_likes(
        rest: &SupabaseRest,
        post: &Post,
        expected_revision: i64,
    ) -> Result<Option<Post>, RepoError> {
        let payload = json!({
            "likes": post.likes,
            "liked_by": post.liked_by,
            "revision": expected_revision + 1,
        });

        let resp = rest
            .patch(TABLE)
            .query(&[
                ("id", format!("eq.{}", post.id)),
                ("revision", format!("eq.{}", expected_revision)),
            ])
            .json(&payload)
            .send()
            .await?;

        let rows: Vec<Post> = SupabaseRest::rows(resp).await?;
        Ok(rows.into_iter().next())
    }
}
