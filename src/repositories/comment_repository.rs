use serde_json::json;
use uuid::Uuid;

use crate::models::comment::{Comment, NewComment};
use crate::repositories::supabase::{RepoError, SupabaseRest};

const TABLE: &str = "comments";

pub struct CommentRepository;

impl CommentRepository {
    pub async fn add_comment(
        rest: &SupabaseRest,
        post_id: Uuid,
        user_id: Uuid,
        comment: NewComment,
    ) -> Result<Comment, RepoError> {
        comment.validate().map_err(RepoError::Validation)?;

        let resp = rest
            .insert(TABLE)
            .json(&json!({
                "post_id": post_id,
                "user_id": user_id,
                "content": comment.content,
            }))
            .send()
            .await?;

        SupabaseRest::single(resp).await
    }

    /// Only the comment author can delete it.
    pub async fn delete_comment(
        rest: &SupabaseRest,
        post_id: Uuid,
        comment_id: Uuid,
        owner: Uuid,
    ) -> Result<(), RepoError> {
        let resp = rest
            .delete(TABLE)
            .query(&[
                ("id", format!("eq.{}", comment_id)),
                ("post_id", format!("eq.{}", post_id)),
                ("user_id", format!("eq.{}", owner)),
            ])
            .send()
            .await?;

        let _deleted: Comment = SupabaseRest::single(resp).await?;
        Ok(())
    }
}
