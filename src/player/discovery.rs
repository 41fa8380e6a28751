//! Discovery of omxplayer's private session bus.
//!
//! omxplayer starts its own dbus-daemon and writes the bus address and the
//! daemon's pid to `<dir>/<prefix>.<user>` and `<dir>/<prefix>.<user>.pid`.

use std::env;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::SessionConfig;

#[derive(Error, Debug)]
pub enum DiscoveryError {
  #[error("Cannot determine current user: {0}")]
  UnknownUser(#[from] env::VarError),
  #[error("Failed to read {path}: {source}")]
  Unreadable {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("Discovery file is empty: {0}")]
  Empty(PathBuf),
  #[error("Invalid bus pid in {path}: {value:?}")]
  InvalidPid { path: PathBuf, value: String },
}

/// Location of the two discovery files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryPaths {
  pub address: PathBuf,
  pub pid: PathBuf,
}

/// Connection parameters of the player's bus, passed explicitly to the
/// transport instead of going through `DBUS_SESSION_BUS_*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusCredentials {
  pub address: String,
  /// pid of the player's dbus-daemon. zbus needs only the address, so this is
  /// validated and logged but not used to connect.
  pub pid: u32,
}

/// User keying the discovery files: the configured one, else `$USER`.
pub fn current_user(config: &SessionConfig) -> Result<String, DiscoveryError> {
  match &config.user {
    Some(user) => Ok(user.clone()),
    None => Ok(env::var("USER")?),
  }
}

/// Get the discovery file paths for the configured user.
pub fn discovery_paths(config: &SessionConfig) -> Result<DiscoveryPaths, DiscoveryError> {
  let user = current_user(config)?;
  let base = format!("{}.{}", config.file_prefix, user);
  Ok(DiscoveryPaths {
    address: config.discovery_dir.join(&base),
    pid: config.discovery_dir.join(format!("{}.pid", base)),
  })
}

/// Read both discovery files. Both must exist and hold a value.
pub async fn read_credentials(paths: &DiscoveryPaths) -> Result<BusCredentials, DiscoveryError> {
  let address = read_trimmed(&paths.address).await?;
  let pid_raw = read_trimmed(&paths.pid).await?;
  let pid = pid_raw.parse().map_err(|_| DiscoveryError::InvalidPid {
    path: paths.pid.clone(),
    value: pid_raw.clone(),
  })?;

  log::debug!(
    "Discovered omxplayer bus {} (pid {}) from {}",
    address,
    pid,
    paths.address.display()
  );
  Ok(BusCredentials { address, pid })
}

async fn read_trimmed(path: &Path) -> Result<String, DiscoveryError> {
  let raw = tokio::fs::read_to_string(path)
    .await
    .map_err(|source| DiscoveryError::Unreadable {
      path: path.to_path_buf(),
      source,
    })?;
  let value = raw.trim();
  if value.is_empty() {
    return Err(DiscoveryError::Empty(path.to_path_buf()));
  }
  Ok(value.to_string())
}
