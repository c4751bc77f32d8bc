//! HTTP API
//!
//! Thin axum layer over [`crate::handlers`]: resolves the caller's identity,
//! decodes the request body, runs the operation on the blocking pool and
//! encodes the result.

pub mod auth;
pub mod error;
mod routes;

pub use auth::{Authenticated, TokenRegistry};
pub use error::ApiError;

use crate::config::Config;
use crate::error::{HelpdeskError, Result};
use crate::handlers::HandlerContext;
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared state of the HTTP server
#[derive(Debug)]
pub struct AppState {
    pub ctx: HandlerContext,
    pub tokens: TokenRegistry,
}

impl AppState {
    #[must_use]
    pub const fn new(ctx: HandlerContext, tokens: TokenRegistry) -> Self {
        Self { ctx, tokens }
    }

    /// Run a storage-bound operation off the async executor
    async fn run<T, F>(&self, op: F) -> std::result::Result<T, ApiError>
    where
        F: FnOnce(&HandlerContext) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let ctx = self.ctx.clone();
        tokio::task::spawn_blocking(move || op(&ctx))
            .await
            .map_err(|e| HelpdeskError::Io(std::io::Error::other(e.to_string())))?
            .map_err(ApiError::from)
    }
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/categories",
            get(routes::list_categories).post(routes::create_category),
        )
        .route(
            "/categories/:id",
            get(routes::get_category)
                .put(routes::replace_category)
                .patch(routes::patch_category)
                .delete(routes::delete_category),
        )
        .route(
            "/tickets",
            get(routes::list_tickets).post(routes::create_ticket),
        )
        .route(
            "/tickets/:id",
            get(routes::get_ticket).patch(routes::update_ticket),
        )
        .route("/tickets/:id/assign_to_me", post(routes::assign_to_me))
        .route("/tickets/:id/change_status", post(routes::change_status))
        .route(
            "/tickets/:id/comments",
            get(routes::list_comments).post(routes::post_comment),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the API until Ctrl-C
pub async fn serve(config: &Config) -> Result<()> {
    let ctx = HandlerContext::open(&config.storage.path)?;
    let tokens = TokenRegistry::from_entries(&config.tokens);
    if tokens.is_empty() {
        tracing::warn!("No tokens configured; every request will be rejected");
    }

    let app = router(Arc::new(AppState::new(ctx, tokens)));
    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!(
        "Helpdesk API listening on {} (storage {})",
        listener.local_addr()?,
        config.storage.path.display()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Helpdesk API shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
}
