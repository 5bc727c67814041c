// Configuration module entry point
// Loads layered configuration and holds the shared application state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    AnalysisConfig, AssetsConfig, Config, HttpConfig, LoggingConfig, PerformanceConfig,
    ServerConfig,
};

/// Config file used when no path is given on the command line
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Environment variable prefix (`SKINSCAN_SERVER__PORT=8080`)
pub const ENV_PREFIX: &str = "SKINSCAN";

impl Config {
    /// Load configuration using the first command-line argument as the file path
    pub fn load() -> Result<Self, config::ConfigError> {
        let path = std::env::args()
            .nth(1)
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path)
    }

    /// Load configuration from specified file path (extension optional)
    ///
    /// Layers, lowest first: defaults, the file (if present), `SKINSCAN_*`
    /// environment variables, then the plain `PORT` variable.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::from_sources(config_path, std::env::var("PORT").ok())
    }

    fn from_sources(
        config_path: &str,
        port_override: Option<String>,
    ) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "skinscan")?
            .set_default("http.enable_cors", false)?
            .set_default("http.max_body_size", 52_428_800)? // 50MB
            .set_default("assets.public_dir", "public")?
            .set_default("assets.index_file", "index.html")?
            .set_default("analysis.forehead_landmark", 20)?
            .set_default("analysis.cheek_landmark", 1)?
            .set_default("analysis.chin_landmark", 8)?
            .set_default("analysis.out_of_bounds", "clamp")?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.port", port_override)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::BoundsPolicy;
    use std::io::Write;

    fn missing_file() -> String {
        let dir = tempfile::tempdir().unwrap();
        dir.path().join("absent").to_string_lossy().into_owned()
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::from_sources(&missing_file(), None).unwrap();
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.http.max_body_size, 52_428_800);
        assert_eq!(cfg.assets.public_dir, "public");
        assert_eq!(cfg.assets.index_file, "index.html");
        assert!(cfg.performance.max_connections.is_none());

        let settings = cfg.analysis.settings();
        assert_eq!(settings.regions.forehead, 20);
        assert_eq!(settings.regions.cheek, 1);
        assert_eq!(settings.regions.chin, 8);
        assert_eq!(settings.bounds, BoundsPolicy::Clamp);
    }

    #[test]
    fn test_port_override() {
        let cfg = Config::from_sources(&missing_file(), Some("8123".to_string())).unwrap();
        assert_eq!(cfg.server.port, 8123);
        assert_eq!(cfg.get_socket_addr().unwrap().port(), 8123);
    }

    #[test]
    fn test_invalid_port_override_fails() {
        assert!(Config::from_sources(&missing_file(), Some("not-a-port".to_string())).is_err());
    }

    #[test]
    fn test_file_layer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skinscan.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[server]\nport = 4000\n\n[assets]\npublic_dir = \"/srv/www\"\n\n[analysis]\nout_of_bounds = \"reject\"\nforehead_landmark = 19"
        )
        .unwrap();

        let cfg = Config::from_sources(path.to_str().unwrap(), None).unwrap();
        assert_eq!(cfg.server.port, 4000);
        assert_eq!(cfg.assets.public_dir, "/srv/www");
        assert_eq!(cfg.analysis.out_of_bounds, BoundsPolicy::Reject);
        assert_eq!(cfg.analysis.settings().regions.forehead, 19);

        // PORT still wins over the file
        let cfg = Config::from_sources(path.to_str().unwrap(), Some("5000".to_string())).unwrap();
        assert_eq!(cfg.server.port, 5000);
    }

    #[test]
    fn test_invalid_host() {
        let mut cfg = Config::from_sources(&missing_file(), None).unwrap();
        cfg.server.host = "not a host".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }
}
