use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::db::Database;

/// The API router with the layers every deployment gets.
pub fn app(db: Database) -> Router {
    api::router(db)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve_on<F>(listener: TcpListener, db: Database, shutdown: F) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app(db))
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

pub async fn start_server(db: Database, bind_addr: &str) -> Result<()> {
    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    log::info!("Serving project API on http://{}", listener.local_addr()?);
    log::info!("Press Ctrl+C to stop");

    serve_on(listener, db, async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {}", err);
        }
        log::info!("Shutting down");
    })
    .await
}
