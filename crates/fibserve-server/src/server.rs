use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use fibserve_core::BinetEvaluator;

use crate::{
    cache::connect_cache,
    config::AppConfig,
    handlers::{self, AppState},
    orchestrator::Orchestrator,
};

pub struct FibServer {
    addr: SocketAddr,
    app: Router,
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route(
            "/fibonacci",
            get(handlers::get_fibonacci).post(handlers::post_fibonacci),
        )
        .route("/healthz", get(handlers::healthz))
        // The wire contract is 404 for any other method/path
        // combination, including unmatched methods on known paths.
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub struct ServerBuilder {
    addr: SocketAddr,
    config: AppConfig,
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerBuilder {
    pub fn new() -> Self {
        let cfg = AppConfig::default();
        Self {
            addr: cfg.addr(),
            config: cfg,
        }
    }

    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    pub fn with_config(mut self, cfg: AppConfig) -> Self {
        self.addr = cfg.addr();
        self.config = cfg;
        self
    }

    /// Resolve the cache capability and assemble the router. A cache
    /// connection failure degrades to uncached mode here, never an
    /// error.
    pub async fn build(self) -> FibServer {
        let cache = connect_cache(&self.config.redis).await;
        let orchestrator = Arc::new(Orchestrator::new(
            Arc::new(BinetEvaluator),
            cache,
            self.config.redis.ttl_secs,
        ));
        let app = build_app(AppState { orchestrator });

        FibServer {
            addr: self.addr,
            app,
        }
    }
}

impl FibServer {
    pub async fn run(self) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        tracing::info!("listening on {}", self.addr);
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    // Wait for Ctrl+C; in-flight work is not drained beyond what
    // axum's graceful shutdown already provides.
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
