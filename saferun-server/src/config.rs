//! Server configuration from a TOML file.

use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    time::Duration,
};

use saferun_core::{DISTANCE_TOLERANCE, LoopSearchConfig, MAX_ATTEMPTS, RouteModelConfig};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid configuration in {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub nodes_path: PathBuf,
    pub edges_path: PathBuf,
    pub max_attempts: usize,
    pub tolerance: f64,
    /// Wall-clock budget of one loop search
    pub search_deadline_ms: Option<u64>,
    pub request_timeout_secs: u64,
    pub max_concurrent_requests: usize,
    pub geojson_output: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
            nodes_path: PathBuf::from("data/nodes.csv"),
            edges_path: PathBuf::from("data/edges.csv"),
            max_attempts: MAX_ATTEMPTS,
            tolerance: DISTANCE_TOLERANCE,
            search_deadline_ms: Some(20_000),
            request_timeout_secs: 30,
            max_concurrent_requests: 64,
            geojson_output: None,
        }
    }
}

impl ServerConfig {
    /// Reads the file if given, defaults otherwise
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate().map_err(|reason| ConfigError::Invalid {
            path: path.to_path_buf(),
            reason,
        })?;
        Ok(config)
    }

    /// Rejects settings under which no request could ever return a route.
    pub fn validate(&self) -> Result<(), String> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(format!(
                "tolerance must be a non-negative number, got {}",
                self.tolerance
            ));
        }
        if self.max_attempts == 0 {
            return Err("max_attempts must be at least 1".to_string());
        }
        if self.max_concurrent_requests == 0 {
            return Err("max_concurrent_requests must be at least 1".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn model_config(&self) -> RouteModelConfig {
        RouteModelConfig {
            nodes_path: self.nodes_path.clone(),
            edges_path: self.edges_path.clone(),
        }
    }

    pub fn search_config(&self) -> LoopSearchConfig {
        LoopSearchConfig {
            max_attempts: self.max_attempts,
            tolerance: self.tolerance,
            deadline: self.search_deadline_ms.map(Duration::from_millis),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ServerConfig::from_toml(
            r#"
            bind = "0.0.0.0:8080"
            edges_path = "/srv/dalseo/edges.csv"
            search_deadline_ms = 500
            "#,
        )
        .unwrap();

        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.edges_path, PathBuf::from("/srv/dalseo/edges.csv"));
        assert_eq!(config.nodes_path, PathBuf::from("data/nodes.csv"));
        assert_eq!(config.max_attempts, MAX_ATTEMPTS);
        assert_eq!(
            config.search_config().deadline,
            Some(Duration::from_millis(500))
        );
    }

    #[test]
    fn unknown_types_are_rejected() {
        assert!(ServerConfig::from_toml("max_attempts = \"ten\"").is_err());
    }

    #[test]
    fn defaults_are_valid() {
        assert!(ServerConfig::default().validate().is_ok());
    }

    #[test]
    fn unusable_search_settings_are_rejected() {
        for text in [
            "tolerance = nan",
            "tolerance = -0.15",
            "tolerance = inf",
            "max_attempts = 0",
            "max_concurrent_requests = 0",
        ] {
            let config = ServerConfig::from_toml(text).unwrap();
            assert!(config.validate().is_err(), "{text} should be rejected");
        }
    }

    #[test]
    fn load_reports_invalid_settings() {
        let path = std::env::temp_dir().join(format!("saferun-config-{}.toml", std::process::id()));
        std::fs::write(&path, "tolerance = -1.0\n").unwrap();

        let result = ServerConfig::load(Some(&path));
        let _ = std::fs::remove_file(&path);

        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn missing_file_is_reported() {
        let result = ServerConfig::load(Some(Path::new("/nonexistent/saferun.toml")));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
