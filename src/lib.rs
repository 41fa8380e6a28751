//! Remote control for a running omxplayer over its D-Bus interface.
//!
//! ```ignore
//! use omx_remote::{KeyboardAction, OmxClient};
//! use time::Duration;
//!
//! # async fn demo() -> Result<(), omx_remote::OmxError> {
//! let client = OmxClient::connect().await?;
//! client.seek(Duration::seconds(30)).await?;
//! for track in client.audio_tracks().await? {
//!   println!("{} [{}] {}", track.index, track.language, track.name);
//! }
//! client.action(KeyboardAction::ShowInfo).await?;
//! client.close().await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod player;

pub use config::{ConfigError, SessionConfig};
pub use player::*;
