use std::path::{Path, PathBuf};

use foundation::LatLon;
use scene::MapConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunables of the interactive flow. Every field has a default, so a partial
/// JSON document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    pub maps: MapConfig,
    /// Where unmatched place names resolve to.
    pub fallback_point: LatLon,
    /// Directions service; start and end are appended as `/lat,lon` segments.
    pub directions_base_url: String,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            maps: MapConfig::default(),
            fallback_point: LatLon::new(51.5074, -0.1278),
            directions_base_url: "https://www.google.com/maps/dir".to_string(),
        }
    }
}

impl FlowConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::FlowConfig;
    use foundation::LatLon;

    #[test]
    fn partial_document_keeps_defaults() {
        let cfg = FlowConfig::from_json_str(
            r#"{ "maps": { "origin_zoom": 14 }, "fallback_point": { "lat": 1.0, "lon": 2.0 } }"#,
        )
        .expect("parse");
        assert_eq!(cfg.maps.origin_zoom, 14);
        assert_eq!(cfg.maps.results_zoom, 9);
        assert_eq!(cfg.fallback_point, LatLon::new(1.0, 2.0));
        assert_eq!(cfg.directions_base_url, "https://www.google.com/maps/dir");
    }

    #[test]
    fn malformed_document_is_rejected() {
        assert!(FlowConfig::from_json_str("{ maps: 3 }").is_err());
    }
}
