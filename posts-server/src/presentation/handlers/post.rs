use crate::application::post_service::PostService;
use crate::data::post_repository::PostRepository;
use crate::domain::error::DomainError;
use crate::infrastructure::security::JwtKeys;
use crate::presentation::dto::{
    ListPostsResponse, MessageResponse, PostPayload, PostResponse, PostView,
};
use crate::presentation::middleware::JwtAuthMiddleware;
use crate::presentation::utils::{AuthenticatedUser, request_id};
use actix_web::{HttpRequest, HttpResponse, Scope, web};
use tracing::info;

/// Routes for the posts resource. Reads are public; every mutating route
/// sits behind `JwtAuthMiddleware`.
pub fn scope<R: PostRepository + 'static>(keys: JwtKeys) -> Scope {
    let auth = move || JwtAuthMiddleware::new(keys.clone());
    web::scope("/posts")
        .service(
            web::resource("")
                .route(web::get().to(get_posts::<R>))
                .route(web::post().to(create_post::<R>).wrap(auth())),
        )
        .service(
            web::resource("/{post_id}")
                .route(web::get().to(get_post::<R>))
                .route(web::put().to(update_post::<R>).wrap(auth()))
                .route(web::delete().to(delete_post::<R>).wrap(auth())),
        )
}

async fn get_posts<R: PostRepository + 'static>(
    req: HttpRequest,
    post: web::Data<PostService<R>>,
) -> Result<HttpResponse, DomainError> {
    let posts = post.get_posts().await?;

    info!(
        request_id = %request_id(&req),
        count = posts.len(),
        "posts retrieved"
    );

    Ok(HttpResponse::Ok().json(ListPostsResponse {
        posts: posts.into_iter().map(PostView::from).collect(),
    }))
}

async fn get_post<R: PostRepository + 'static>(
    req: HttpRequest,
    post: web::Data<PostService<R>>,
    path: web::Path<String>,
) -> Result<HttpResponse, DomainError> {
    let found = post.get_post(&path.into_inner()).await?;

    info!(
        request_id = %request_id(&req),
        post_id = %found.id,
        "post retrieved"
    );

    Ok(HttpResponse::Ok().json(PostResponse {
        post: PostView::from(found),
    }))
}

async fn create_post<R: PostRepository + 'static>(
    req: HttpRequest,
    user: AuthenticatedUser,
    post: web::Data<PostService<R>>,
    payload: web::Json<PostPayload>,
) -> Result<HttpResponse, DomainError> {
    let created = post
        .create_post(user.id, &user.nickname, payload.into_inner())
        .await?;

    info!(
        request_id = %request_id(&req),
        nickname = %user.nickname,
        post_id = %created.id,
        "post created"
    );

    Ok(HttpResponse::Created().json(MessageResponse::new("post created")))
}

async fn update_post<R: PostRepository + 'static>(
    req: HttpRequest,
    user: AuthenticatedUser,
    post: web::Data<PostService<R>>,
    path: web::Path<String>,
    payload: web::Json<PostPayload>,
) -> Result<HttpResponse, DomainError> {
    let post_id = path.into_inner();
    post.update_post(&user.nickname, &post_id, payload.into_inner())
        .await?;

    info!(
        request_id = %request_id(&req),
        nickname = %user.nickname,
        post_id = %post_id,
        "post updated"
    );

    Ok(HttpResponse::Ok().json(MessageResponse::new("post updated")))
}

async fn delete_post<R: PostRepository + 'static>(
    req: HttpRequest,
    user: AuthenticatedUser,
    post: web::Data<PostService<R>>,
    path: web::Path<String>,
) -> Result<HttpResponse, DomainError> {
    let post_id = path.into_inner();
    post.delete_post(&user.nickname, &post_id).await?;

    info!(
        request_id = %request_id(&req),
        nickname = %user.nickname,
        post_id = %post_id,
        "post deleted"
    );

    Ok(HttpResponse::Ok().json(MessageResponse::new("post deleted")))
}
