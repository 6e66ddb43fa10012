use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::models::comment::Comment;
use crate::models::project::{validate_link, MAX_LINK_LEN};

const MAX_CONTENT_LEN: usize = 5000;
pub const MAX_IMAGES: usize = 10;

/// A post about a project. `project_id` and `user_id` are references, not
/// owned records. `likes` is a denormalized counter kept equal to
/// `liked_by.len()` on every write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub project_id: String,
    pub user_id: Uuid,
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<String>,
    /// Rows are repaired on read; see `normalize_likes`.
    #[serde(default, deserialize_with = "lenient_count")]
    pub likes: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub liked_by: BTreeSet<Uuid>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: Vec<Comment>,
    /// Bumped on every like write, used as the optimistic-lock token.
    #[serde(default, deserialize_with = "null_as_default")]
    pub revision: i64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Post {
    /// Returns true when the set changed.
    pub fn like(&mut self, user_id: Uuid) -> bool {
        let changed = self.liked_by.insert(user_id);
        self.normalize_likes();
        changed
    }

    /// Returns true when the set changed.
    pub fn unlike(&mut self, user_id: Uuid) -> bool {
        let changed = self.liked_by.remove(&user_id);
        self.normalize_likes();
        changed
    }

    pub fn is_liked_by(&self, user_id: &Uuid) -> bool {
        self.liked_by.contains(user_id)
    }

    pub fn likes_consistent(&self) -> bool {
        self.likes as usize == self.liked_by.len()
    }

    pub fn normalize_likes(&mut self) {
        self.likes = u32::try_from(self.liked_by.len()).unwrap_or(u32::MAX);
    }
}

fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

/// Clamps a stored counter into `u32`; null and negatives read as 0.
fn lenient_count<'de, D>(de: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<i64>::deserialize(de)?.unwrap_or(0);
    Ok(u32::try_from(raw.max(0)).unwrap_or(u32::MAX))
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub project_id: String,
    pub content: String,
    pub images: Vec<String>,
}

impl NewPost {
    pub fn new(project_id: &str, content: &str, images: Vec<String>) -> Self {
        Self {
            project_id: project_id.trim().to_string(),
            content: content.trim().to_string(),
            images: images.into_iter().map(|i| i.trim().to_string()).collect(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.project_id.is_empty() {
            return Err("project_id is required".to_string());
        }

        if self.content.is_empty() {
            return Err("Post content cannot be empty".to_string());
        }

        if self.content.chars().count() > MAX_CONTENT_LEN {
            return Err(format!("Post content must be at most {} characters", MAX_CONTENT_LEN));
        }

        if self.images.len() > MAX_IMAGES {
            return Err(format!("A post can have at most {} images", MAX_IMAGES));
        }

        for image in &self.images {
            if image.len() > MAX_LINK_LEN {
                return Err(format!("Image URL must be at most {} characters", MAX_LINK_LEN));
            }
            validate_link(image).map_err(|_| format!("Invalid image URL: {}", image))?;
        }

        Ok(())
    }
}
