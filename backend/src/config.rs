//! Service configuration.
//!
//! Settings come from an optional `swift-vo.toml` file and are then
//! overridden by environment variables. Every field has a default, so the
//! service starts with no configuration at all.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//! public_base_url = "https://vo.example.org/vo"
//!
//! [engine]
//! kind = "swift-api"
//! base_url = "https://www.swift.psu.edu/api/v1/swift"
//! timeout_secs = 120
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::swift_api::DEFAULT_BASE_URL;
use crate::engine::EngineKind;

/// Configuration loading failure.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete service configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub engine: EngineSettings,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Public scheme, host and path prefix used when echoing the request URL.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

/// External engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    #[serde(default = "default_engine_kind")]
    pub kind: String,
    #[serde(default = "default_engine_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_public_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_engine_kind() -> String {
    "swift-api".to_string()
}

fn default_engine_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_user_agent() -> String {
    format!("swift-vo/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_base_url: default_public_base_url(),
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            kind: default_engine_kind(),
            base_url: default_engine_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl EngineSettings {
    pub fn kind(&self) -> Result<EngineKind, String> {
        self.kind.parse()
    }
}

impl ServerSettings {
    /// `host:port` for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl ServiceConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Read {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ServiceConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `swift-vo.toml` from the first standard location that has one.
    ///
    /// Searches:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// Returns `Ok(None)` when no file exists.
    pub fn from_default_location() -> Result<Option<Self>, ConfigError> {
        let search_paths = [
            PathBuf::from("swift-vo.toml"),
            PathBuf::from("backend/swift-vo.toml"),
            PathBuf::from("../swift-vo.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path).map(Some);
            }
        }
        Ok(None)
    }

    /// Apply environment variable overrides.
    ///
    /// # Environment Variables
    /// - `HOST`: listener host
    /// - `PORT`: listener port
    /// - `VO_SERVER`: public host or base URL echoed in `REQUEST`
    /// - `ENGINE_KIND`: `swift-api` | `static`
    /// - `ENGINE_URL`: engine base URL
    /// - `ENGINE_TIMEOUT_SECS`: engine HTTP timeout
    pub fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(host) = env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("PORT must be a valid port number, got '{}'", port)))?;
        }
        if let Ok(server) = env::var("VO_SERVER") {
            // A bare host name is served over https
            self.server.public_base_url = if server.contains("://") {
                server
            } else {
                format!("https://{}", server)
            };
        }
        if let Ok(kind) = env::var("ENGINE_KIND") {
            self.engine.kind = kind;
        }
        if let Ok(url) = env::var("ENGINE_URL") {
            self.engine.base_url = url;
        }
        if let Ok(secs) = env::var("ENGINE_TIMEOUT_SECS") {
            self.engine.timeout_secs = secs.parse().map_err(|_| {
                ConfigError::Invalid(format!("ENGINE_TIMEOUT_SECS must be an integer, got '{}'", secs))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    /// File (if any) plus environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_default_location()?
            .unwrap_or_default()
            .apply_env_overrides()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.engine.kind().map_err(ConfigError::Invalid)?;
        if self.engine.timeout_secs == 0 {
            return Err(ConfigError::Invalid("engine.timeout_secs must be positive".to_string()));
        }
        Ok(())
    }
}
