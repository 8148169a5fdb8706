use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use clap::Parser;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use staybnb::config::{Cli, Config};
use staybnb::db;
use staybnb::routes;
use staybnb::state::AppState;
use staybnb::stay::repository::{DynStayRepository, MongoStayRepository};
use staybnb::stay::service::StayService;
use staybnb::users::{DynUserDirectory, MongoUserDirectory};
use staybnb::wishlist::repository::{DynWishlistRepository, MongoWishlistRepository};
use staybnb::wishlist::service::WishlistService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse CLI args and load config
    let cli = Cli::parse();
    let config = Config::load(&cli)?;

    // Connect to the document store
    let database = db::connect(&config.database).await?;

    let stay_repo: DynStayRepository = Arc::new(MongoStayRepository::new(&database));
    let wishlist_repo: DynWishlistRepository = Arc::new(MongoWishlistRepository::new(&database));
    let users: DynUserDirectory = Arc::new(MongoUserDirectory::new(&database));

    // Build app state
    let state = AppState {
        stays: StayService::new(stay_repo.clone()),
        wishlists: WishlistService::new(wishlist_repo, stay_repo, users),
        config: config.clone(),
    };

    // Build router
    let app = Router::new()
        .merge(routes::stays::router())
        .merge(routes::wishlists::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
