use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const TITLE_MAX_CHARS: usize = 25;
pub const CONTENT_MAX_CHARS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author_nickname: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Only the author recorded at creation may edit or delete the post.
    pub fn is_authored_by(&self, nickname: &str) -> bool {
        self.author_nickname == nickname
    }
}

/// A validated post that has not been persisted yet. The store assigns
/// the identifier and both timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub author_id: Uuid,
    pub author_nickname: String,
    pub title: String,
    pub content: String,
}

impl PostDraft {
    pub fn new(author_id: Uuid, author_nickname: String, title: String, content: String) -> Self {
        Self {
            author_id,
            author_nickname,
            title,
            content,
        }
    }

    pub fn into_post(self, id: Uuid, now: DateTime<Utc>) -> Post {
        Post {
            id,
            author_id: self.author_id,
            author_nickname: self.author_nickname,
            title: self.title,
            content: self.content,
            created_at: now,
            updated_at: now,
        }
    }
}
