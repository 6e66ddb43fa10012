use serde::{Deserialize, Serialize};
use uuid::Uuid;

const MAX_COMMENT_LEN: usize = 1000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub content: String,
}

impl NewComment {
    pub fn new(content: &str) -> Self {
        Self { content: content.trim().to_string() }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.content.is_empty() {
            return Err("Comment cannot be empty".to_string());
        }
        if self.content.chars().count() > MAX_COMMENT_LEN {
            return Err(format!("Comment must be at most {} characters", MAX_COMMENT_LEN));
        }
        Ok(())
    }
}
