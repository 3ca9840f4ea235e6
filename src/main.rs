use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use watchquest_api::config::Config;
use watchquest_api::db::{self, Cache, PgWatchedMovieStore};
use watchquest_api::routes::{create_router, AppState};
use watchquest_api::services::auth::IdentityToolkitVerifier;
use watchquest_api::services::providers::TmdbProvider;
use watchquest_api::services::rate_limit::FixedInterval;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "watchquest_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let pool = db::create_pool(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let redis_client = db::create_redis_client(&config.redis_url)?;
    let (cache, _cache_writer) = Cache::new(redis_client).await;

    let state = AppState {
        catalog: Arc::new(TmdbProvider::new(
            cache,
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
        )),
        verifier: Arc::new(IdentityToolkitVerifier::new(
            config.identity_api_key.clone(),
            config.identity_api_url.clone(),
        )),
        store: Arc::new(PgWatchedMovieStore::new(pool)),
        import_limiter: Arc::new(FixedInterval::new(Duration::from_millis(
            config.import_row_delay_ms,
        ))),
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Watch Quest API listening");
    axum::serve(listener, app).await?;

    Ok(())
}
