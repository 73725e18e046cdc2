use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::MatchedPath;
use dotenvy::dotenv;
use tower_http::trace::TraceLayer;
use tracing::info;

use itemdeck::application::ports::item_repository::ItemRepository;
use itemdeck::application::ports::user_repository::UserRepository;
use itemdeck::bootstrap::app_context::{AppContext, AppServices};
use itemdeck::bootstrap::config::Config;
use itemdeck::infrastructure::db::repositories::item_repository_sqlx::SqlxItemRepository;
use itemdeck::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "itemdeck=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(port = cfg.app_port, "Starting itemdeck");

    // Database
    let pool = itemdeck::infrastructure::db::connect_pool(&cfg.database_url).await?;
    itemdeck::infrastructure::db::migrate(&pool).await?;

    let user_repo: Arc<dyn UserRepository> = Arc::new(SqlxUserRepository::new(pool.clone()));
    let item_repo: Arc<dyn ItemRepository> = Arc::new(SqlxItemRepository::new(pool.clone()));
    let ctx = AppContext::new(cfg.clone(), AppServices::new(user_repo, item_repo));

    let app = Router::new()
        .merge(itemdeck::presentation::http::auth::routes(ctx.clone()))
        .merge(itemdeck::presentation::http::items::routes(ctx.clone()))
        .merge(itemdeck::presentation::http::health::routes(pool.clone()))
        .fallback(itemdeck::presentation::http::not_found)
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.app_port));
    info!(%addr, "HTTP listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
