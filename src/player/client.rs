//! High-level omxplayer client with command methods.

use thiserror::Error;
use time::Duration;

use super::action::KeyboardAction;
use super::discovery::{discovery_paths, read_credentials, DiscoveryError};
use super::protocol::{CallArg, PlayerCall, ReplyKind, ReplyValue, NO_TRACK_PATH};
use super::status::PlaybackStatus;
use super::stream::{parse_streams, StreamDescriptor};
use super::transport::{DbusTransport, RemoteObject, Transport, TransportError};
use crate::config::{ConfigError, SessionConfig};

#[derive(Error, Debug)]
pub enum OmxError {
  #[error("Config error: {0}")]
  Config(#[from] ConfigError),
  #[error("Discovery error: {0}")]
  Discovery(#[from] DiscoveryError),
  #[error("Connection failed: {0}")]
  Connection(#[source] zbus::Error),
  #[error("Transport error: {0}")]
  Transport(#[from] TransportError),
  #[error("Rejected by player: {0}")]
  Rejected(String),
  #[error("Invalid argument: {0}")]
  InvalidArgument(String),
}

/// Remote control for a running omxplayer.
///
/// Every method sends exactly one request and waits for its reply. The client
/// owns its session; `close` consumes it.
pub struct OmxClient<T = DbusTransport> {
  transport: T,
}

impl OmxClient<DbusTransport> {
  /// Connect to the current user's omxplayer with the default config.
  pub async fn connect() -> Result<Self, OmxError> {
    Self::connect_with(&SessionConfig::default()).await
  }

  /// Discover the player's bus, open a session on it and bind the player object.
  pub async fn connect_with(config: &SessionConfig) -> Result<Self, OmxError> {
    config.validate()?;

    let paths = discovery_paths(config)?;
    let credentials = read_credentials(&paths).await?;
    log::info!(
      "Connecting to omxplayer bus at {} (bus pid {})",
      credentials.address,
      credentials.pid
    );

    let remote = RemoteObject::new(&config.service_name, &config.object_path)
      .map_err(|e| ConfigError::Invalid(e.to_string()))?;
    let transport = DbusTransport::open(&credentials, remote)
      .await
      .map_err(OmxError::Connection)?;

    log::info!("omxplayer client connected");
    Ok(Self::new(transport))
  }
}

impl<T: Transport> OmxClient<T> {
  /// Wrap an already open transport.
  pub fn new(transport: T) -> Self {
    Self { transport }
  }

  /// Release the session.
  pub async fn close(self) -> Result<(), OmxError> {
    self.transport.close().await?;
    Ok(())
  }

  /// Send a keyboard action.
  pub async fn action(&self, action: KeyboardAction) -> Result<(), OmxError> {
    self
      .call(PlayerCall::method(
        "Action",
        vec![CallArg::Int32(action.into())],
        ReplyKind::Unit,
      ))
      .await?;
    Ok(())
  }

  pub async fn play(&self) -> Result<(), OmxError> {
    self.command("Play").await
  }

  pub async fn pause(&self) -> Result<(), OmxError> {
    self.command("Pause").await
  }

  pub async fn play_pause(&self) -> Result<(), OmxError> {
    self.command("PlayPause").await
  }

  pub async fn stop(&self) -> Result<(), OmxError> {
    self.command("Stop").await
  }

  pub async fn mute(&self) -> Result<(), OmxError> {
    self.command("Mute").await
  }

  pub async fn unmute(&self) -> Result<(), OmxError> {
    self.command("Unmute").await
  }

  pub async fn show_subtitles(&self) -> Result<(), OmxError> {
    self.command("ShowSubtitles").await
  }

  pub async fn hide_subtitles(&self) -> Result<(), OmxError> {
    self.command("HideSubtitles").await
  }

  /// List audio tracks.
  pub async fn audio_tracks(&self) -> Result<Vec<StreamDescriptor>, OmxError> {
    self.list_streams("ListAudio").await
  }

  /// List subtitle tracks.
  pub async fn subtitles(&self) -> Result<Vec<StreamDescriptor>, OmxError> {
    self.list_streams("ListSubtitles").await
  }

  pub async fn can_control(&self) -> Result<bool, OmxError> {
    let call = PlayerCall::get_property("CanControl", ReplyKind::Bool);
    match self.call(call).await? {
      ReplyValue::Bool(b) => Ok(b),
      other => Err(mismatch("CanControl", ReplyKind::Bool, other)),
    }
  }

  /// Length of the current media.
  pub async fn duration(&self) -> Result<Duration, OmxError> {
    let us = self.get_micros("Duration").await?;
    Ok(from_micros(us))
  }

  /// Current playback position.
  pub async fn position(&self) -> Result<Duration, OmxError> {
    let us = self.get_micros("Position").await?;
    Ok(from_micros(us))
  }

  /// Current playback status. Unrecognized values map to `Unknown`.
  pub async fn playback_status(&self) -> Result<PlaybackStatus, OmxError> {
    let call = PlayerCall::get_property("PlaybackStatus", ReplyKind::Str);
    match self.call(call).await? {
      ReplyValue::Str(s) => Ok(PlaybackStatus::from(s.as_str())),
      other => Err(mismatch("PlaybackStatus", ReplyKind::Str, other)),
    }
  }

  /// Source (file or URL) currently loaded.
  pub async fn playing(&self) -> Result<String, OmxError> {
    let call = PlayerCall::method("GetSource", Vec::new(), ReplyKind::Str);
    match self.call(call).await? {
      ReplyValue::Str(s) => Ok(s),
      other => Err(mismatch("GetSource", ReplyKind::Str, other)),
    }
  }

  /// Seek relative to the current position. The player answers 0 when it
  /// refuses the offset.
  pub async fn seek(&self, offset: Duration) -> Result<(), OmxError> {
    let us = to_micros(offset)?;
    let call = PlayerCall::method("Seek", vec![CallArg::Int64(us)], ReplyKind::Int64);
    let res = self.call_micros("Seek", call).await?;
    if res == 0 {
      return Err(OmxError::Rejected(format!("invalid seek offset: {}", offset)));
    }
    Ok(())
  }

  /// Seek to an absolute position. A 0 reply is a refusal, except when
  /// seeking to 0 itself.
  pub async fn set_position(&self, position: Duration) -> Result<(), OmxError> {
    let us = to_micros(position)?;
    let call = PlayerCall::method(
      "SetPosition",
      vec![
        CallArg::ObjectPath(NO_TRACK_PATH.to_string()),
        CallArg::Int64(us),
      ],
      ReplyKind::Int64,
    );
    let res = self.call_micros("SetPosition", call).await?;
    if res == 0 && !position.is_zero() {
      return Err(OmxError::Rejected(format!("invalid position: {}", position)));
    }
    Ok(())
  }

  /// Select an audio track by index. Returns the player's answer as is.
  pub async fn select_audio(&self, index: u32) -> Result<bool, OmxError> {
    self.select("SelectAudio", index).await
  }

  /// Select a subtitle track by index. Returns the player's answer as is.
  pub async fn select_subtitle(&self, index: u32) -> Result<bool, OmxError> {
    self.select("SelectSubtitle", index).await
  }

  pub async fn volume(&self) -> Result<f64, OmxError> {
    let call = PlayerCall::get_property("Volume", ReplyKind::Double);
    match self.call(call).await? {
      ReplyValue::Double(v) => Ok(v),
      other => Err(mismatch("Volume", ReplyKind::Double, other)),
    }
  }

  /// Set the volume. Returns the volume the player actually applied.
  pub async fn set_volume(&self, volume: f64) -> Result<f64, OmxError> {
    let call = PlayerCall::set_property("Volume", CallArg::Double(volume), ReplyKind::Double);
    match self.call(call).await? {
      ReplyValue::Double(v) => Ok(v),
      other => Err(mismatch("Volume", ReplyKind::Double, other)),
    }
  }

  async fn call(&self, call: PlayerCall) -> Result<ReplyValue, OmxError> {
    Ok(self.transport.call(call).await?)
  }

  async fn command(&self, member: &'static str) -> Result<(), OmxError> {
    self.call(PlayerCall::command(member)).await?;
    Ok(())
  }

  async fn list_streams(&self, member: &'static str) -> Result<Vec<StreamDescriptor>, OmxError> {
    let call = PlayerCall::method(member, Vec::new(), ReplyKind::StrList);
    match self.call(call).await? {
      ReplyValue::StrList(raw) => Ok(parse_streams(&raw)),
      other => Err(mismatch(member, ReplyKind::StrList, other)),
    }
  }

  async fn get_micros(&self, property: &'static str) -> Result<i64, OmxError> {
    let call = PlayerCall::get_property(property, ReplyKind::Int64);
    self.call_micros(property, call).await
  }

  async fn call_micros(&self, member: &str, call: PlayerCall) -> Result<i64, OmxError> {
    match self.call(call).await? {
      ReplyValue::Int64(v) => Ok(v),
      other => Err(mismatch(member, ReplyKind::Int64, other)),
    }
  }

  async fn select(&self, member: &'static str, index: u32) -> Result<bool, OmxError> {
    let index = i32::try_from(index)
      .map_err(|_| OmxError::InvalidArgument(format!("track index out of range: {}", index)))?;
    let call = PlayerCall::method(member, vec![CallArg::Int32(index)], ReplyKind::Bool);
    match self.call(call).await? {
      ReplyValue::Bool(b) => Ok(b),
      other => Err(mismatch(member, ReplyKind::Bool, other)),
    }
  }
}

fn mismatch(member: &str, expected: ReplyKind, found: ReplyValue) -> OmxError {
  OmxError::Transport(TransportError::UnexpectedReply {
    call: member.to_string(),
    detail: format!("expected {:?}, got {:?}", expected, found.kind()),
  })
}

/// Protocol microseconds to a duration. Exact for every `i64`.
pub fn from_micros(us: i64) -> Duration {
  Duration::microseconds(us)
}

/// Duration to protocol microseconds. Sub-microsecond parts are truncated.
pub fn to_micros(duration: Duration) -> Result<i64, OmxError> {
  i64::try_from(duration.whole_microseconds())
    .map_err(|_| OmxError::InvalidArgument(format!("duration out of range: {}", duration)))
}
