use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::comment::Comment;
use crate::models::post::{NewPost, Post};

pub const DEFAULT_PAGE_SIZE: u32 = 50;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Deserialize)]
pub struct CreatePostDTO {
    pub project_id: String,
    pub content: String,
    #[serde(default)]
    pub images: Vec<String>,
}

impl CreatePostDTO {
    pub fn into_new_post(self) -> NewPost {
        NewPost::new(&self.project_id, &self.content, self.images)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentDTO {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    pub project_id: Option<String>,
    pub limit: Option<u32>,
}

/// Clamps a requested page size to `1..=MAX_PAGE_SIZE`.
pub fn page_size(requested: Option<u32>, default: u32) -> u32 {
    requested.unwrap_or(default).clamp(1, MAX_PAGE_SIZE)
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommentOut {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: Option<String>,
}

impl From<Comment> for CommentOut {
    fn from(c: Comment) -> Self {
        Self {
            id: c.id,
            post_id: c.post_id,
            user_id: c.user_id,
            content: c.content,
            created_at: c.created_at,
        }
    }
}

/// Post payload as clients see it. `likes` always equals `likedBy.len()`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostOut {
    pub id: Uuid,
    pub project_id: String,
    pub user_id: Uuid,
    pub content: String,
    pub images: Vec<String>,
    pub likes: u32,
    pub liked_by: BTreeSet<Uuid>,
    pub comments: Vec<CommentOut>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub is_own_post: bool,
    pub liked_by_me: bool,
}

impl PostOut {
    pub fn from_post(mut post: Post, viewer: Option<Uuid>) -> Self {
        post.normalize_likes();
        let is_own_post = viewer == Some(post.user_id);
        let liked_by_me = viewer.is_some_and(|v| post.is_liked_by(&v));

        Self {
            id: post.id,
            project_id: post.project_id,
            user_id: post.user_id,
            content: post.content,
            images: post.images,
            likes: post.likes,
            liked_by: post.liked_by,
            comments: post.comments.into_iter().map(CommentOut::from).collect(),
            created_at: post.created_at,
            updated_at: post.updated_at,
            is_own_post,
            liked_by_me,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LikeOut {
    pub post_id: Uuid,
    pub likes: u32,
    pub liked: bool,
}
