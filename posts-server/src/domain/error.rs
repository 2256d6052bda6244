use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// The post operation a failure happened in. Used to pick the generic
/// message when the store itself fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Read,
    Create,
    Update,
    Delete,
}

impl Operation {
    fn failure_message(self) -> &'static str {
        match self {
            Operation::List => "failed to retrieve posts",
            Operation::Read => "failed to retrieve post",
            Operation::Create => "failed to create post",
            Operation::Update => "failed to update post",
            Operation::Delete => "failed to delete post",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::List => "list",
            Operation::Read => "read",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Content,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Title => f.write_str("title"),
            Field::Content => f.write_str("content"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("malformed request data")]
    BadRequest,
    #[error("post {0} does not match the required format")]
    ValidationFailed(Field),
    #[error("post does not exist: {0}")]
    NotFound(Uuid),
    #[error("you are not allowed to {0} this post")]
    Forbidden(Operation),
    #[error("post was not updated")]
    UpdateFailed,
    #[error("post was not deleted")]
    DeleteFailed,
    #[error("authentication required")]
    Unauthorized,
    #[error("{}", .0.failure_message())]
    StoreUnavailable(Operation),
}

/// Failures raised by a post store. They never reach clients as-is: the
/// service logs them and reports `DomainError::StoreUnavailable`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    #[serde(rename = "errorMessage", skip_serializing_if = "Option::is_none")]
    error_message: Option<&'a str>,
}

impl DomainError {
    fn client_message(&self) -> String {
        match self {
            DomainError::NotFound(_) => "post does not exist".to_string(),
            _ => self.to_string(),
        }
    }
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        match self {
            DomainError::BadRequest | DomainError::StoreUnavailable(_) => StatusCode::BAD_REQUEST,
            DomainError::ValidationFailed(_) => StatusCode::PRECONDITION_FAILED,
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
            DomainError::UpdateFailed | DomainError::DeleteFailed | DomainError::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let text = self.client_message();
        let body = match self {
            DomainError::BadRequest => ErrorBody {
                message: Some(text.as_str()),
                error_message: None,
            },
            _ => ErrorBody {
                message: None,
                error_message: Some(text.as_str()),
            },
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
