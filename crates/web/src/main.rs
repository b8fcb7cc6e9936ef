use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use baghchal_core::{GameService, GameStore, MemoryStore, SqliteStore};

mod config;
mod routes;

use config::Config;

pub struct AppState {
    pub games: GameService,
}

fn open_store(config: &Config) -> baghchal_core::Result<Box<dyn GameStore>> {
    match &config.database {
        Some(path) => {
            tracing::info!(path = %path.display(), "using SQLite store");
            Ok(Box::new(SqliteStore::open(path)?))
        }
        None => {
            tracing::info!("using in-memory store");
            Ok(Box::new(MemoryStore::new()))
        }
    }
}

fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/api/games", post(routes::create_game))
        .route(
            "/api/games/:id",
            get(routes::get_game).delete(routes::delete_game),
        )
        .route("/api/games/:id/moves", post(routes::submit_move))
        .route("/api/games/player/:player_id", get(routes::list_player_games))
        .route("/health", get(routes::health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().expect("Invalid configuration");
    let store = open_store(&config).expect("Failed to open game store");

    let state = Arc::new(AppState {
        games: GameService::with_store(store),
    });

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");

    tracing::info!(%addr, "server running");

    axum::serve(listener, app(state))
        .await
        .expect("Server error");
}
