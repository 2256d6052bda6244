use crate::domain::error::StoreError;
use crate::domain::post::{Post, PostDraft};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// Persistence for posts. Every call is a single-document operation; the
/// store is responsible for assigning identifiers and timestamps.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts, most recently updated first.
    async fn list_recent(&self) -> Result<Vec<Post>, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, StoreError>;
    async fn create(&self, draft: PostDraft) -> Result<Post, StoreError>;
    /// Replaces title and content and refreshes `updated_at`. Returns whether
    /// the store acknowledged a change.
    async fn update(&self, id: Uuid, title: &str, content: &str) -> Result<bool, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_recent(&self) -> Result<Vec<Post>, StoreError> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT id, author_id, author_nickname, title, content, created_at, updated_at
            FROM posts
            ORDER BY updated_at DESC, created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::from)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT id, author_id, author_nickname, title, content, created_at, updated_at
            FROM posts WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::from)
    }

    async fn create(&self, draft: PostDraft) -> Result<Post, StoreError> {
        let post = draft.into_post(Uuid::new_v4(), Utc::now());
        sqlx::query(
            r#"
            INSERT INTO posts (id, author_id, author_nickname, title, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            "#,
        )
        .bind(post.id)
        .bind(post.author_id)
        .bind(&post.author_nickname)
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.created_at)
        .execute(&self.pool)
        .await
        .map_err(StoreError::from)?;

        info!(post_id = %post.id, author_id = %post.author_id, "post stored");
        Ok(post)
    }

    async fn update(&self, id: Uuid, title: &str, content: &str) -> Result<bool, StoreError> {
        // updated_at must strictly advance, even within clock resolution.
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET
                title = $1,
                content = $2,
                updated_at = GREATEST($3, updated_at + INTERVAL '1 microsecond')
            WHERE id = $4
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(StoreError::from)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let deleted = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StoreError::from)?;

        info!(post_id = %id, rows = deleted.rows_affected(), "post delete executed");
        Ok(())
    }
}
