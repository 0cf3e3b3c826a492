/// Optional user configuration
///
/// Stored as JSON in the user's config directory:
/// - Linux: ~/.config/inspection-report/config.json
/// - macOS: ~/Library/Application Support/inspection-report/config.json
/// - Windows: %APPDATA%\inspection-report\config.json
///
/// A missing file is normal and yields the defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::thumbnail::ThumbnailGeometry;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// Thumbnail size, resolution and JPEG quality
    pub thumbnail: ThumbnailGeometry,
    /// Zone labels for the rows a new report starts with
    pub zones: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            thumbnail: ThumbnailGeometry::default(),
            zones: vec!["Zone A".to_string(), "Zone B".to_string(), "Zone C".to_string()],
        }
    }
}

impl ReportConfig {
    /// Where the config file is expected, if the platform has a config directory
    pub fn config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("inspection-report");
        path.push("config.json");
        Some(path)
    }

    /// Load from the default location, falling back to defaults on any problem
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            tracing::warn!("no config directory on this platform, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config");
                config
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring config file");
                Self::default()
            }
        }
    }

    /// Read, parse and validate a config file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thumbnail.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization() {
        let mut config = ReportConfig::default();
        config.thumbnail.quality = 55;
        config.zones = vec!["Kitchen".into(), "Roof".into()];

        let json = config.to_json().unwrap();
        let restored = ReportConfig::from_json(&json).unwrap();

        assert_eq!(config, restored);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ReportConfig::from_json(r#"{ "thumbnail": { "quality": 60 } }"#).unwrap();
        assert_eq!(config.thumbnail.quality, 60);
        assert_eq!(config.thumbnail.width_in, 1.62);
        assert_eq!(config.zones, ReportConfig::default().zones);
    }

    #[test]
    fn test_load_from_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "thumbnail": { "quality": 0 } }"#).unwrap();

        assert!(matches!(ReportConfig::load_from(&path), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(ReportConfig::load_from(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_from_missing_file() {
        let result = ReportConfig::load_from(Path::new("/nonexistent/config.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
