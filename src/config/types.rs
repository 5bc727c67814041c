// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

use crate::analysis::{AnalysisSettings, BoundsPolicy, RegionMap};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub assets: AssetsConfig,
    pub analysis: AnalysisConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub enable_cors: bool,
    /// Largest accepted request body, sized for a JSON-encoded RGBA frame
    pub max_body_size: u64,
}

/// Static asset configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AssetsConfig {
    /// Directory holding the page, scripts, styles and detector model files
    pub public_dir: String,
    /// File served for `GET /`, relative to `public_dir`
    pub index_file: String,
}

/// Analysis configuration
///
/// Landmark indices refer to the 68-point scheme of the browser's detector.
#[derive(Debug, Deserialize, Clone)]
pub struct AnalysisConfig {
    pub forehead_landmark: usize,
    pub cheek_landmark: usize,
    pub chin_landmark: usize,
    pub out_of_bounds: BoundsPolicy,
}

impl AnalysisConfig {
    pub const fn settings(&self) -> AnalysisSettings {
        AnalysisSettings {
            regions: RegionMap {
                forehead: self.forehead_landmark,
                cheek: self.cheek_landmark,
                chin: self.chin_landmark,
            },
            bounds: self.out_of_bounds,
        }
    }
}
