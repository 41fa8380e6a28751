//! omxplayer D-Bus control protocol types.
//!
//! omxplayer exports its controls under the MPRIS player interface, plus a
//! handful of non-standard members (`Action`, `ListAudio`, `SelectSubtitle`,
//! ...). Properties are read and written by calling the freedesktop
//! `Properties.Get` / `Properties.Set` methods directly; omxplayer answers both
//! with the bare value, and `Set` echoes back the value it applied.

use std::fmt;

/// Interface carrying every player member.
pub const PLAYER_INTERFACE: &str = "org.mpris.MediaPlayer2.Player";

/// Interface of the property accessor methods.
pub const PROPERTIES_INTERFACE: &str = "org.freedesktop.DBus.Properties";

/// Placeholder track id passed to `SetPosition`.
pub const NO_TRACK_PATH: &str = "/";

/// Argument of a player call, tagged with its D-Bus type.
#[derive(Debug, Clone, PartialEq)]
pub enum CallArg {
  /// `i`
  Int32(i32),
  /// `x`
  Int64(i64),
  /// `d`
  Double(f64),
  /// `s`
  Str(String),
  /// `o`
  ObjectPath(String),
}

/// Reply shape a call expects back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
  /// Empty reply body.
  Unit,
  Bool,
  Int64,
  Double,
  Str,
  StrList,
}

/// Decoded reply of a player call.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyValue {
  Unit,
  Bool(bool),
  Int64(i64),
  Double(f64),
  Str(String),
  StrList(Vec<String>),
}

impl ReplyValue {
  pub fn kind(&self) -> ReplyKind {
    match self {
      ReplyValue::Unit => ReplyKind::Unit,
      ReplyValue::Bool(_) => ReplyKind::Bool,
      ReplyValue::Int64(_) => ReplyKind::Int64,
      ReplyValue::Double(_) => ReplyKind::Double,
      ReplyValue::Str(_) => ReplyKind::Str,
      ReplyValue::StrList(_) => ReplyKind::StrList,
    }
  }
}

/// One method call on the remote player object.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerCall {
  pub interface: &'static str,
  pub member: &'static str,
  pub args: Vec<CallArg>,
  pub reply: ReplyKind,
}

impl PlayerCall {
  /// Call a member of the player interface.
  pub fn method(member: &'static str, args: Vec<CallArg>, reply: ReplyKind) -> Self {
    Self {
      interface: PLAYER_INTERFACE,
      member,
      args,
      reply,
    }
  }

  /// Call a player member that takes no arguments and returns nothing.
  pub fn command(member: &'static str) -> Self {
    Self::method(member, Vec::new(), ReplyKind::Unit)
  }

  /// Read a player property through `Properties.Get`.
  pub fn get_property(name: &'static str, reply: ReplyKind) -> Self {
    Self {
      interface: PROPERTIES_INTERFACE,
      member: "Get",
      args: vec![
        CallArg::Str(PLAYER_INTERFACE.to_string()),
        CallArg::Str(name.to_string()),
      ],
      reply,
    }
  }

  /// Write a player property through `Properties.Set`.
  pub fn set_property(name: &'static str, value: CallArg, reply: ReplyKind) -> Self {
    Self {
      interface: PROPERTIES_INTERFACE,
      member: "Set",
      args: vec![
        CallArg::Str(PLAYER_INTERFACE.to_string()),
        CallArg::Str(name.to_string()),
        value,
      ],
      reply,
    }
  }

  /// Interface-qualified member name, e.g. `org.mpris.MediaPlayer2.Player.Seek`.
  pub fn full_name(&self) -> String {
    format!("{}.{}", self.interface, self.member)
  }
}

impl fmt::Display for PlayerCall {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}{:?}", self.full_name(), self.args)
  }
}
