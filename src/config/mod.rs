// Configuration module entry point
// Loads configuration once at startup and exposes the shared application state

mod state;
mod types;

use std::net::{SocketAddr, ToSocketAddrs};

pub use state::AppState;
pub use types::{BuildConfig, Config, Mode, StaticConfig};

/// Deployment variables read without a prefix, mapped to their config keys
const DEPLOYMENT_ENV: [(&str, &str); 5] = [
    ("HOSTNAME", "server.host"),
    ("PORT", "server.port"),
    ("NODE_ENV", "server.mode"),
    ("LASTMOD", "build.lastmod"),
    ("COMMIT", "build.commit"),
];

impl Config {
    /// Load configuration from the given file (without extension) and the
    /// process environment
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::load_with_env(Some(config_path), |key| std::env::var(key).ok())
    }

    /// Load configuration with an injectable lookup for the deployment
    /// variables (`HOSTNAME`, `PORT`, `NODE_ENV`, `LASTMOD`, `COMMIT`)
    pub fn load_with_env<F>(config_path: Option<&str>, env: F) -> Result<Self, config::ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 4000)?
            .set_default("server.mode", Mode::Development.as_str())?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.idle_timeout", 15)?
            .set_default("performance.request_timeout", 60)?
            .set_default("performance.backlog", 128)?
            .set_default("http.server_name", concat!("regexplanet-rust/", env!("CARGO_PKG_VERSION")))?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .set_default("http.strict_status", false)?
            .set_default("static_files.dir", "static")?
            .set_default("static_files.index_body", "running!")?;

        if let Some(path) = config_path {
            builder = builder
                .add_source(config::File::with_name(path).required(false))
                .add_source(
                    config::Environment::with_prefix("REGEXPLANET")
                        .separator("__")
                        .try_parsing(true),
                );
        }

        for (var, key) in DEPLOYMENT_ENV {
            let value = env(var).filter(|v| !v.is_empty()).map(|v| {
                if key == "server.mode" {
                    Mode::from_env_value(&v).as_str().to_string()
                } else {
                    v
                }
            });
            builder = builder.set_override_option(key, value)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Configuration built from defaults only
    pub fn defaults() -> Result<Self, config::ConfigError> {
        Self::load_with_env(None, |_| None)
    }

    /// Resolve the bind address; `host` may be an IP literal or a name
    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        let host = self.server.host.trim_start_matches('[').trim_end_matches(']');
        (host, self.server.port)
            .to_socket_addrs()
            .map_err(|e| format!("Invalid address '{host}': {e}"))?
            .next()
            .ok_or_else(|| format!("No address found for '{host}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::load_with_env(None, |key| map.get(key).cloned()).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::defaults().unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 4000);
        assert_eq!(cfg.server.mode, Mode::Development);
        assert_eq!(cfg.build.lastmod, None);
        assert_eq!(cfg.build.commit, None);
        assert_eq!(cfg.performance.idle_timeout, 15);
        assert!(!cfg.http.strict_status);
        assert_eq!(cfg.static_files.index_body, "running!");
    }

    #[test]
    fn test_deployment_env_overrides() {
        let cfg = load(&[
            ("HOSTNAME", "127.0.0.1"),
            ("PORT", "5000"),
            ("NODE_ENV", "production"),
            ("LASTMOD", "2024-01-01"),
            ("COMMIT", "abc123"),
        ]);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.server.mode, Mode::Production);
        assert_eq!(cfg.build.lastmod.as_deref(), Some("2024-01-01"));
        assert_eq!(cfg.build.commit.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_non_production_env_is_development() {
        let cfg = load(&[("NODE_ENV", "staging")]);
        assert_eq!(cfg.server.mode, Mode::Development);
        let cfg = load(&[("NODE_ENV", "")]);
        assert_eq!(cfg.server.mode, Mode::Development);
    }

    #[test]
    fn test_socket_addr() {
        let cfg = load(&[("HOSTNAME", "::1"), ("PORT", "8080")]);
        assert_eq!(cfg.get_socket_addr().unwrap().to_string(), "[::1]:8080");

        let cfg = load(&[("HOSTNAME", "[::1]")]);
        assert_eq!(cfg.get_socket_addr().unwrap().to_string(), "[::1]:4000");
    }
}
