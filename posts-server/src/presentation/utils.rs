use actix_web::dev::Payload;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{Ready, ready};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::infrastructure::security::JwtKeys;
use crate::presentation::middleware::RequestId;

/// Caller identity resolved by `JwtAuthMiddleware`.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub nickname: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(DomainError::Unauthorized.into())),
        }
    }
}

pub fn extract_user_from_token(token: &str, keys: &JwtKeys) -> Result<AuthenticatedUser, DomainError> {
    let claims = keys
        .verify_token(token)
        .map_err(|_| DomainError::Unauthorized)?;
    let id = Uuid::parse_str(&claims.sub).map_err(|_| DomainError::Unauthorized)?;
    if claims.nickname.is_empty() {
        return Err(DomainError::Unauthorized);
    }

    Ok(AuthenticatedUser {
        id,
        nickname: claims.nickname,
    })
}

pub fn request_id(req: &HttpRequest) -> String {
    req.extensions()
        .get::<RequestId>()
        .map(|rid| rid.0.clone())
        .unwrap_or_else(|| "unknown".into())
}
