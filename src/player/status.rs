//! Playback status reported by the `PlaybackStatus` property.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaybackStatus {
  #[default]
  Unknown,
  Playing,
  Paused,
}

impl PlaybackStatus {
  /// Map the raw property string. Anything unrecognized is `Unknown`.
  pub fn parse(raw: &str) -> Self {
    match raw {
      "Playing" => PlaybackStatus::Playing,
      "Paused" => PlaybackStatus::Paused,
      _ => PlaybackStatus::Unknown,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      PlaybackStatus::Unknown => "Unknown",
      PlaybackStatus::Playing => "Playing",
      PlaybackStatus::Paused => "Paused",
    }
  }
}

impl From<&str> for PlaybackStatus {
  fn from(raw: &str) -> Self {
    Self::parse(raw)
  }
}

impl fmt::Display for PlaybackStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
