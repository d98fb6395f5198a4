pub mod domain;
pub mod handlers;
pub mod shared;
pub mod system;

use std::sync::Arc;

use domain::a001_fish_order::repository::SqliteFishOrderStore;
use domain::a001_fish_order::service::FishOrderService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::http::{header, Method};
    use axum::middleware;
    use axum::{
        routing::{get, post},
        Router,
    };
    use std::net::SocketAddr;
    use tokio::net::TcpListener;
    use tower_http::cors::{Any, CorsLayer};
    use tower_http::services::ServeDir;

    system::tracing::initialize()?;

    let config = shared::config::load_config()?;
    let db_path = shared::config::get_database_path(&config);

    // Initialize database (creates missing tables)
    shared::data::db::initialize_database(&db_path)
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;

    let store = SqliteFishOrderStore::new(shared::data::db::get_connection().clone());
    let fish_orders = Arc::new(FishOrderService::new(
        Arc::new(store),
        config.server.live_channel_capacity,
    ));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // A001 Fish orders (collection inventoryFisherNane)
        // ========================================
        .route(
            "/api/inventoryFisherNane",
            get(handlers::a001_fish_order::list).post(handlers::a001_fish_order::create),
        )
        .route(
            "/api/inventoryFisherNane/live",
            get(handlers::a001_fish_order::live),
        )
        .route(
            "/api/inventoryFisherNane/testdata",
            post(handlers::a001_fish_order::insert_test_data),
        )
        .route(
            "/api/inventoryFisherNane/:id",
            get(handlers::a001_fish_order::get_by_id).patch(handlers::a001_fish_order::set_status),
        )
        // Logs handlers
        .route(
            "/api/logs",
            get(handlers::logs::list_all)
                .post(handlers::logs::create)
                .delete(handlers::logs::clear_all),
        )
        .with_state(fish_orders)
        .fallback_service(ServeDir::new("dist"))
        .layer(middleware::from_fn(
            system::middleware::request_logger::request_logger,
        ))
        .layer(cors);

    let port = config.server.port;
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    port
                );
            } else {
                tracing::error!("Failed to bind to port {}. Error: {}", port, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
