use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub redis: RedisConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("server.port must be > 0".into());
        }
        if self.server.host.parse::<std::net::IpAddr>().is_err() {
            return Err(format!(
                "server.host is not a valid IP address: '{}'",
                self.server.host
            ));
        }
        if self.redis.ttl_secs == 0 {
            return Err("redis.ttl_secs must be > 0".into());
        }
        if self.redis.enabled {
            if self.redis.url.is_empty() {
                return Err("redis.url must not be empty when redis is enabled".into());
            }
            if self.redis.pool_size == 0 {
                return Err("redis.pool_size must be > 0".into());
            }
        }
        let lvl = self.logging.level.to_ascii_lowercase();
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&lvl.as_str()) {
            return Err(format!("logging.level must be one of {valid_levels:?}"));
        }
        Ok(())
    }

    /// Bind address for the listener. `validate()` guarantees the host
    /// parses, so the fallback below is unreachable on validated
    /// config; it exists only to keep this method infallible.
    pub fn addr(&self) -> SocketAddr {
        use std::net::{IpAddr, Ipv4Addr};
        let host: IpAddr = self
            .server
            .host
            .parse()
            .unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));
        SocketAddr::from((host, self.server.port))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    /// Connection string for the memoization store. Overridable with
    /// the `REDIS_URL` environment variable.
    #[serde(default = "default_redis_url")]
    pub url: String,
    #[serde(default = "default_redis_enabled")]
    pub enabled: bool,
    #[serde(default = "default_redis_pool_size")]
    pub pool_size: usize,
    #[serde(default = "default_redis_timeout_ms")]
    pub timeout_ms: u64,
    /// TTL applied to every stored result.
    #[serde(default = "default_redis_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_redis_url() -> String {
    "redis://redis:6379".into()
}
fn default_redis_enabled() -> bool {
    true
}
fn default_redis_pool_size() -> usize {
    10
}
fn default_redis_timeout_ms() -> u64 {
    5_000
}
fn default_redis_ttl_secs() -> u64 {
    3_600
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
            enabled: default_redis_enabled(),
            pool_size: default_redis_pool_size(),
            timeout_ms: default_redis_timeout_ms(),
            ttl_secs: default_redis_ttl_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Load configuration from an optional TOML file, then apply
/// environment overrides.
///
/// A missing file is not an error (defaults apply); a present but
/// unreadable or malformed file is. `REDIS_URL` always wins over the
/// file for the cache connection string.
pub fn load_config(path: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut cfg = match path {
        Some(p) if std::path::Path::new(p).exists() => {
            let raw = std::fs::read_to_string(p).map_err(|source| ConfigError::Read {
                path: p.to_owned(),
                source,
            })?;
            toml::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: p.to_owned(),
                source,
            })?
        }
        _ => AppConfig::default(),
    };

    if let Ok(url) = std::env::var("REDIS_URL") {
        if !url.is_empty() {
            cfg.redis.url = url;
        }
    }

    cfg.validate().map_err(ConfigError::Invalid)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = AppConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.redis.url, "redis://redis:6379");
        assert_eq!(cfg.redis.ttl_secs, 3_600);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            port = 9090

            [redis]
            url = "redis://localhost:6379"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.redis.url, "redis://localhost:6379");
        assert_eq!(cfg.redis.ttl_secs, 3_600);
    }

    #[test]
    fn zero_port_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.server.port = 0;
        assert!(cfg.validate().unwrap_err().contains("server.port"));
    }

    #[test]
    fn zero_ttl_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.redis.ttl_secs = 0;
        assert!(cfg.validate().unwrap_err().contains("redis.ttl_secs"));
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.logging.level = "loud".into();
        assert!(cfg.validate().unwrap_err().contains("logging.level"));
    }

    #[test]
    fn addr_combines_host_and_port() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "127.0.0.1".into();
        cfg.server.port = 8081;
        assert_eq!(cfg.addr().to_string(), "127.0.0.1:8081");
    }

    #[test]
    fn invalid_host_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "fibserve.internal".into();
        assert!(cfg.validate().unwrap_err().contains("server.host"));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = load_config(Some("/nonexistent/fibserve.toml")).unwrap();
        assert_eq!(cfg.server.port, 8080);
    }

    #[test]
    fn redis_url_env_overrides_the_default() {
        // The only test touching REDIS_URL; every assertion about
        // redis.url after load_config lives here so parallel test
        // threads cannot race on the variable.
        std::env::set_var("REDIS_URL", "redis://override:6380");
        let overridden = load_config(Some("/nonexistent/fibserve.toml")).unwrap();

        std::env::set_var("REDIS_URL", "");
        let empty = load_config(Some("/nonexistent/fibserve.toml")).unwrap();
        std::env::remove_var("REDIS_URL");

        assert_eq!(overridden.redis.url, "redis://override:6380");
        assert_eq!(
            empty.redis.url,
            default_redis_url(),
            "an empty REDIS_URL is ignored"
        );
    }
}
