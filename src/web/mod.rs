//! HTTP surface: the note list, note submission, the item lookup echo and
//! static files.
//!
//! The store handle is opened once by [`run`] and shared with every request
//! through [`AppState`].

pub mod error;
pub mod render;
pub mod routes;

use std::path::Path;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ServeConfig;
use crate::error::Result;
use crate::storage::LoroStore;

pub use error::WebError;
pub use routes::{ItemEcho, ListView, QueryValue};

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The note store, opened at startup.
    pub store: Arc<Mutex<LoroStore>>,
}

impl AppState {
    pub fn new(store: LoroStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Flush and release the store. Any handles still held elsewhere only
    /// get a final save.
    pub async fn close(self) -> Result<()> {
        match Arc::try_unwrap(self.store) {
            Ok(store) => store.into_inner().close(),
            Err(shared) => shared.lock().await.save(),
        }
    }
}

/// Build the application router.
pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(routes::list_notes))
        .route("/submit", post(routes::submit_note))
        .route("/items/{item_id}", get(routes::read_item))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Serve `router` on `listener` until `shutdown` is cancelled.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
}

/// Open the store, serve until Ctrl-C, then close the store.
pub async fn run(config: ServeConfig) -> Result<()> {
    let store = LoroStore::open_or_init(&config.root)?;
    info!(path = %store.path().display(), notes = store.count(), "note store ready");

    let state = AppState::new(store);
    let router = build_router(state.clone(), &config.static_dir);

    let listener = TcpListener::bind(config.bind).await?;
    let addr = listener.local_addr()?;
    info!(%addr, static_dir = %config.static_dir.display(), "listening");

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("shutdown requested");
                signal_token.cancel();
            }
            Err(e) => warn!("unable to listen for shutdown signal: {}", e),
        }
    });

    serve(listener, router, shutdown).await?;
    state.close().await?;
    info!("server stopped");
    Ok(())
}
