use std::sync::Arc;

use crate::data::post_repository::PostRepository;
use crate::domain::error::{DomainError, Field, Operation, StoreError};
use crate::domain::post::{CONTENT_MAX_CHARS, Post, PostDraft, TITLE_MAX_CHARS};
use crate::presentation::dto::PostPayload;
use tracing::{error, info, instrument};
use uuid::Uuid;

pub struct PostService<R: PostRepository + 'static> {
    repo: Arc<R>,
}

// Stores are shared, not cloned.
impl<R: PostRepository + 'static> Clone for PostService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R> PostService<R>
where
    R: PostRepository + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn get_posts(&self) -> Result<Vec<Post>, DomainError> {
        self.repo
            .list_recent()
            .await
            .map_err(store_failure(Operation::List))
    }

    pub async fn get_post(&self, raw_id: &str) -> Result<Post, DomainError> {
        let id = parse_post_id(raw_id)?;
        self.repo
            .find_by_id(id)
            .await
            .map_err(store_failure(Operation::Read))?
            .ok_or(DomainError::NotFound(id))
    }

    #[instrument(skip(self, payload))]
    pub async fn create_post(
        &self,
        author_id: Uuid,
        nickname: &str,
        payload: PostPayload,
    ) -> Result<Post, DomainError> {
        let (title, content) = validate_payload(payload)?;
        let draft = PostDraft::new(author_id, nickname.to_owned(), title, content);
        let post = self
            .repo
            .create(draft)
            .await
            .map_err(store_failure(Operation::Create))?;

        info!(post_id = %post.id, "post created");
        Ok(post)
    }

    #[instrument(skip(self, payload))]
    pub async fn update_post(
        &self,
        nickname: &str,
        raw_id: &str,
        payload: PostPayload,
    ) -> Result<(), DomainError> {
        let (title, content) = validate_payload(payload)?;
        let post = self.authorize(nickname, raw_id, Operation::Update).await?;

        let acknowledged = self
            .repo
            .update(post.id, &title, &content)
            .await
            .map_err(store_failure(Operation::Update))?;
        if !acknowledged {
            return Err(DomainError::UpdateFailed);
        }

        info!(post_id = %post.id, "post updated");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_post(&self, nickname: &str, raw_id: &str) -> Result<(), DomainError> {
        let post = self.authorize(nickname, raw_id, Operation::Delete).await?;

        self.repo
            .delete(post.id)
            .await
            .map_err(store_failure(Operation::Delete))?;

        let remaining = self
            .repo
            .find_by_id(post.id)
            .await
            .map_err(store_failure(Operation::Delete))?;
        if remaining.is_some() {
            return Err(DomainError::DeleteFailed);
        }

        info!(post_id = %post.id, "post deleted");
        Ok(())
    }

    /// Loads the target post and checks that `nickname` authored it.
    /// Absence is reported before ownership.
    async fn authorize(
        &self,
        nickname: &str,
        raw_id: &str,
        operation: Operation,
    ) -> Result<Post, DomainError> {
        let id = parse_post_id(raw_id)?;
        let post = self
            .repo
            .find_by_id(id)
            .await
            .map_err(store_failure(operation))?
            .ok_or(DomainError::NotFound(id))?;

        if !post.is_authored_by(nickname) {
            return Err(DomainError::Forbidden(operation));
        }
        Ok(post)
    }
}

fn store_failure(operation: Operation) -> impl FnOnce(StoreError) -> DomainError {
    move |err| {
        error!(%operation, error = %err, "post store call failed");
        DomainError::StoreUnavailable(operation)
    }
}

pub fn parse_post_id(raw: &str) -> Result<Uuid, DomainError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DomainError::BadRequest);
    }
    Uuid::parse_str(raw).map_err(|_| DomainError::BadRequest)
}

/// Checks a create/update payload and returns `(title, content)`.
pub fn validate_payload(payload: PostPayload) -> Result<(String, String), DomainError> {
    if payload.is_empty() {
        return Err(DomainError::BadRequest);
    }

    let title = payload
        .title
        .filter(|t| within_bounds(t, TITLE_MAX_CHARS))
        .ok_or(DomainError::ValidationFailed(Field::Title))?;
    let content = payload
        .content
        .filter(|c| within_bounds(c, CONTENT_MAX_CHARS))
        .ok_or(DomainError::ValidationFailed(Field::Content))?;

    Ok((title, content))
}

fn within_bounds(value: &str, max_chars: usize) -> bool {
    !value.is_empty() && value.chars().count() <= max_chars
}
