use log::{debug, warn};
use uuid::Uuid;

use crate::models::post::Post;
use crate::repositories::post_repository::PostRepository;
use crate::repositories::supabase::{RepoError, SupabaseRest};

pub const MAX_LIKE_ATTEMPTS: usize = 3;

/// Sets whether `user_id` likes the post. Idempotent. Retries the
/// read-modify-write when another writer bumped the revision in between.
pub async fn set_like(
    rest: &SupabaseRest,
    post_id: Uuid,
    user_id: Uuid,
    liked: bool,
) -> Result<Post, RepoError> {
    for attempt in 1..=MAX_LIKE_ATTEMPTS {
        let mut post = PostRepository::get_post(rest, post_id)
            .await?
            .ok_or(RepoError::NotFound)?;

        let expected_revision = post.revision;
        let was_consistent = post.likes_consistent();
        let changed = if liked { post.like(user_id) } else { post.unlike(user_id) };

        if !changed && was_consistent {
            return Ok(post);
        }

        let comments = std::mem::take(&mut post.comments);
        match PostRepository::write_likes(rest, &post, expected_revision).await? {
            Some(mut stored) => {
                stored.comments = comments;
                return Ok(stored);
            }
            None => debug!(
                "like write on post {} lost revision {} (attempt {})",
                post_id, expected_revision, attempt
            ),
        }
    }

    warn!("giving up like update on post {} after {} attempts", post_id, MAX_LIKE_ATTEMPTS);
    Err(RepoError::Conflict)
}
