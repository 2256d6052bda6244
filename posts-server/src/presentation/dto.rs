use crate::domain::post::Post;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

// ======================= POSTS =======================

/// Body of create and update requests. `title` and `content` may be absent
/// or null so that they surface as validation failures; any other value type
/// is a malformed body. `fields` is the number of top-level keys sent, so an
/// object with only unknown or null keys is still not an empty body.
#[derive(Debug, Default, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct PostPayload {
    pub title: Option<String>,
    pub content: Option<String>,
    fields: usize,
}

impl PostPayload {
    pub fn new(title: Option<String>, content: Option<String>) -> Self {
        let fields = usize::from(title.is_some()) + usize::from(content.is_some());
        Self {
            title,
            content,
            fields,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields == 0
    }
}

impl TryFrom<Map<String, Value>> for PostPayload {
    type Error = String;

    fn try_from(mut body: Map<String, Value>) -> Result<Self, Self::Error> {
        let fields = body.len();
        Ok(Self {
            title: text_field(&mut body, "title")?,
            content: text_field(&mut body, "content")?,
            fields,
        })
    }
}

fn text_field(body: &mut Map<String, Value>, key: &str) -> Result<Option<String>, String> {
    match body.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(_) => Err(format!("`{key}` must be a string")),
    }
}

/// Public projection of a post.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub nickname: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostView {
    fn from(p: Post) -> Self {
        PostView {
            post_id: p.id,
            user_id: p.author_id,
            nickname: p.author_nickname,
            title: p.title,
            content: p.content,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListPostsResponse {
    pub posts: Vec<PostView>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PostResponse {
    pub post: PostView,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}
