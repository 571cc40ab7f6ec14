pub mod cache;
pub mod config;
pub mod handlers;
pub mod observability;
pub mod orchestrator;
pub mod server;

pub use cache::{connect_cache, CacheError, CacheStore, RedisCache};
pub use config::{load_config, AppConfig, ConfigError, LoggingConfig, RedisConfig, ServerConfig};
pub use handlers::AppState;
pub use observability::{init_tracing, shutdown_tracing};
pub use orchestrator::Orchestrator;
pub use server::{build_app, FibServer, ServerBuilder};
