//! Process-local post store. Used when no database is configured and by the
//! test suites. Data is lost on restart.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::data::post_repository::PostRepository;
use crate::domain::error::StoreError;
use crate::domain::post::{Post, PostDraft};

/// Newest posts are kept at the front. That order breaks ties between
/// posts sharing an `updated_at`.
#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_recent(&self) -> Result<Vec<Post>, StoreError> {
        let mut posts = self.posts.read().await.clone();
        // stable sort
        posts.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(posts)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|post| post.id == id).cloned())
    }

    async fn create(&self, draft: PostDraft) -> Result<Post, StoreError> {
        let post = draft.into_post(Uuid::new_v4(), Utc::now());
        self.posts.write().await.insert(0, post.clone());
        Ok(post)
    }

    async fn update(&self, id: Uuid, title: &str, content: &str) -> Result<bool, StoreError> {
        let mut posts = self.posts.write().await;
        let Some(post) = posts.iter_mut().find(|post| post.id == id) else {
            return Ok(false);
        };

        post.title = title.to_owned();
        post.content = content.to_owned();
        post.updated_at = Utc::now().max(post.updated_at + Duration::microseconds(1));
        Ok(true)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.posts.write().await.retain(|post| post.id != id);
        Ok(())
    }
}
