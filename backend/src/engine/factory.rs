//! Engine factory.
//!
//! Builds the engine selected by configuration.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use super::{ObservatoryEngine, StaticEngine, SwiftApiEngine};
use crate::config::{ConfigError, EngineSettings};

/// Engine implementation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    /// Remote Swift observatory API
    SwiftApi,
    /// In-memory engine with no data
    Static,
}

impl FromStr for EngineKind {
    type Err = String;

    /// Parse engine kind from string ("swift-api", "static").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "swift-api" | "swift_api" | "swift" => Ok(Self::SwiftApi),
            "static" | "local" => Ok(Self::Static),
            _ => Err(format!("Unknown engine kind: {}", s)),
        }
    }
}

/// Factory for engine instances.
pub struct EngineFactory;

impl EngineFactory {
    /// Create the engine described by `settings`.
    pub fn create(settings: &EngineSettings) -> Result<Arc<dyn ObservatoryEngine>, ConfigError> {
        let kind = settings.kind().map_err(ConfigError::Invalid)?;
        match kind {
            EngineKind::SwiftApi => {
                let engine = SwiftApiEngine::new(
                    &settings.base_url,
                    Duration::from_secs(settings.timeout_secs),
                    &settings.user_agent,
                )
                .map_err(|e| ConfigError::Invalid(e.to_string()))?;
                Ok(Arc::new(engine))
            }
            EngineKind::Static => Ok(Arc::new(StaticEngine::new())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_kind_from_str() {
        assert_eq!("swift-api".parse::<EngineKind>().unwrap(), EngineKind::SwiftApi);
        assert_eq!("SWIFT".parse::<EngineKind>().unwrap(), EngineKind::SwiftApi);
        assert_eq!("static".parse::<EngineKind>().unwrap(), EngineKind::Static);
        assert!("oracle".parse::<EngineKind>().is_err());
    }

    #[test]
    fn test_create_static_engine() {
        let settings = EngineSettings {
            kind: "static".to_string(),
            ..EngineSettings::default()
        };
        let engine = EngineFactory::create(&settings).unwrap();
        assert_eq!(engine.name(), "static");
    }

    #[test]
    fn test_create_rejects_unknown_kind() {
        let settings = EngineSettings {
            kind: "oracle".to_string(),
            ..EngineSettings::default()
        };
        assert!(matches!(EngineFactory::create(&settings), Err(ConfigError::Invalid(_))));
    }
}
