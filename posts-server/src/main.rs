use std::sync::Arc;

use posts_server::application::post_service::PostService;
use posts_server::data::in_memory_post_repository::InMemoryPostRepository;
use posts_server::data::post_repository::PostgresPostRepository;
use posts_server::infrastructure::config::AppConfig;
use posts_server::infrastructure::database::{create_pool, run_migrations};
use posts_server::infrastructure::logging::init_logging;
use posts_server::infrastructure::security::JwtKeys;
use posts_server::server::start_rest_server;
use tracing::warn;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::from_env()?;
    let keys = JwtKeys::new(config.jwt_secret.clone());

    match config.database_url.clone() {
        Some(database_url) => {
            let pool = create_pool(&database_url).await?;
            run_migrations(&pool).await?;

            let post_repo = Arc::new(PostgresPostRepository::new(pool));
            start_rest_server(config, PostService::new(post_repo), keys).await
        }
        None => {
            warn!("DATABASE_URL not set, posts are kept in memory only");
            let post_repo = Arc::new(InMemoryPostRepository::new());
            start_rest_server(config, PostService::new(post_repo), keys).await
        }
    }
}
