//! omxplayer remote control over its D-Bus MPRIS interface.
//!
//! Architecture:
//! - `discovery.rs` - Locating the player's private session bus from its runtime files
//! - `transport.rs` - Session bus connection and the `Transport` seam
//! - `protocol.rs` - Interface names, call and reply types
//! - `stream.rs` - Audio/subtitle stream descriptor parsing
//! - `status.rs` - Playback status mapping
//! - `action.rs` - Keyboard action codes
//! - `client.rs` - High-level client with command methods

mod action;
mod client;
mod discovery;
mod protocol;
mod status;
mod stream;
mod transport;

pub use action::KeyboardAction;
pub use client::{from_micros, to_micros, OmxClient, OmxError};
pub use discovery::{
  current_user, discovery_paths, read_credentials, BusCredentials, DiscoveryError, DiscoveryPaths,
};
pub use protocol::{
  CallArg, PlayerCall, ReplyKind, ReplyValue, PLAYER_INTERFACE, PROPERTIES_INTERFACE,
};
pub use status::PlaybackStatus;
pub use stream::{parse_streams, StreamDescriptor};
pub use transport::{DbusTransport, RemoteObject, Transport, TransportError};
