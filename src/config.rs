//! Session configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use zbus::names::BusName;
use zbus::zvariant::ObjectPath;

#[derive(Error, Debug)]
pub enum ConfigError {
  #[error("Invalid config JSON: {0}")]
  Json(#[from] serde_json::Error),
  #[error("Invalid config: {0}")]
  Invalid(String),
}

/// Where to find omxplayer's bus and how to address it once connected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
  /// User owning the player session (None = `$USER`).
  #[serde(default)]
  pub user: Option<String>,

  /// Directory holding the discovery files.
  #[serde(default = "default_discovery_dir")]
  pub discovery_dir: PathBuf,

  /// Discovery file prefix, completed with `.<user>` and `.<user>.pid`.
  #[serde(default = "default_file_prefix")]
  pub file_prefix: String,

  /// Well-known bus name of the player.
  #[serde(default = "default_service_name")]
  pub service_name: String,

  /// Object path exporting the player interface.
  #[serde(default = "default_object_path")]
  pub object_path: String,
}

fn default_discovery_dir() -> PathBuf {
  PathBuf::from("/tmp")
}

fn default_file_prefix() -> String {
  "omxplayerdbus".to_string()
}

fn default_service_name() -> String {
  "org.mpris.MediaPlayer2.omxplayer".to_string()
}

fn default_object_path() -> String {
  "/org/mpris/MediaPlayer2".to_string()
}

impl Default for SessionConfig {
  fn default() -> Self {
    Self {
      user: None,
      discovery_dir: default_discovery_dir(),
      file_prefix: default_file_prefix(),
      service_name: default_service_name(),
      object_path: default_object_path(),
    }
  }
}

impl SessionConfig {
  /// Parse and validate a JSON document. Missing fields take their defaults.
  pub fn from_json(json: &str) -> Result<Self, ConfigError> {
    let config: SessionConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
  }

  /// Same as the default config, keyed on an explicit user.
  pub fn for_user(user: impl Into<String>) -> Self {
    Self {
      user: Some(user.into()),
      ..Self::default()
    }
  }

  /// Validate configuration values.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if let Some(user) = &self.user {
      if user.trim().is_empty() {
        return Err(ConfigError::Invalid("User cannot be empty".to_string()));
      }
    }
    if self.file_prefix.trim().is_empty() {
      return Err(ConfigError::Invalid(
        "Discovery file prefix cannot be empty".to_string(),
      ));
    }
    if let Err(e) = BusName::try_from(self.service_name.as_str()) {
      return Err(ConfigError::Invalid(format!(
        "Invalid service name {:?}: {}",
        self.service_name, e
      )));
    }
    if let Err(e) = ObjectPath::try_from(self.object_path.as_str()) {
      return Err(ConfigError::Invalid(format!(
        "Invalid object path {:?}: {}",
        self.object_path, e
      )));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults_match_omxplayer() {
    let config = SessionConfig::default();
    assert_eq!(config.user, None);
    assert_eq!(config.discovery_dir, PathBuf::from("/tmp"));
    assert_eq!(config.file_prefix, "omxplayerdbus");
    assert_eq!(config.service_name, "org.mpris.MediaPlayer2.omxplayer");
    assert_eq!(config.object_path, "/org/mpris/MediaPlayer2");
    assert!(config.validate().is_ok());
  }

  #[test]
  fn test_from_json_fills_defaults() {
    let config = SessionConfig::from_json(r#"{"user":"pi","discoveryDir":"/run/omx"}"#).unwrap();
    assert_eq!(config.user.as_deref(), Some("pi"));
    assert_eq!(config.discovery_dir, PathBuf::from("/run/omx"));
    assert_eq!(config.service_name, "org.mpris.MediaPlayer2.omxplayer");
  }

  #[test]
  fn test_from_json_rejects_relative_object_path() {
    let err = SessionConfig::from_json(r#"{"objectPath":"org/mpris"}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
  }

  #[test]
  fn test_from_json_rejects_malformed() {
    let err = SessionConfig::from_json("{not json").unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
  }

  #[test]
  fn test_service_name_must_be_a_bus_name() {
    for name in ["", "org..omxplayer", "omxplayer", "org.mpris player"] {
      let config = SessionConfig {
        service_name: name.to_string(),
        ..SessionConfig::default()
      };
      assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))), "{:?}", name);
    }
  }

  #[test]
  fn test_object_path_must_be_valid() {
    for path in ["", "relative", "/org//mpris", "/org/mpris/"] {
      let config = SessionConfig {
        object_path: path.to_string(),
        ..SessionConfig::default()
      };
      assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))), "{:?}", path);
    }
  }

  #[test]
  fn test_blank_user_is_invalid() {
    assert!(SessionConfig::for_user("  ").validate().is_err());
    assert!(SessionConfig::for_user("pi").validate().is_ok());
  }
}
