//! Session bus transport.
//!
//! `Transport` is the seam between the client and the bus: one request in, one
//! reply (or error) out. `DbusTransport` is the zbus implementation talking to
//! omxplayer's private session bus.

use std::fmt;
use std::future::Future;

use serde::Deserialize;
use thiserror::Error;
use zbus::message::Body;
use zbus::names::BusName;
use zbus::zvariant::{ObjectPath, OwnedValue, Type};
use zbus::{Connection, Message};

use super::discovery::BusCredentials;
use super::protocol::{CallArg, PlayerCall, ReplyKind, ReplyValue};

#[derive(Error, Debug)]
pub enum TransportError {
  #[error("D-Bus error: {0}")]
  Bus(#[from] zbus::Error),
  #[error("Unsupported arguments for {call}: {args}")]
  UnsupportedArguments { call: String, args: String },
  #[error("Unexpected reply to {call}: {detail}")]
  UnexpectedReply { call: String, detail: String },
}

impl TransportError {
  pub(crate) fn unexpected_reply(call: &PlayerCall, detail: impl fmt::Display) -> Self {
    TransportError::UnexpectedReply {
      call: call.full_name(),
      detail: detail.to_string(),
    }
  }
}

/// Request/response access to the remote player object.
pub trait Transport {
  /// Send one call and wait for its reply, decoded as `call.reply`.
  fn call(
    &self,
    call: PlayerCall,
  ) -> impl Future<Output = Result<ReplyValue, TransportError>> + Send;

  /// Tear the session down.
  fn close(self) -> impl Future<Output = Result<(), TransportError>> + Send
  where
    Self: Sized;
}

/// Bus name and object path of the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteObject {
  destination: String,
  path: String,
}

impl RemoteObject {
  /// Validates both names before anything is sent.
  pub fn new(destination: &str, path: &str) -> Result<Self, zbus::Error> {
    BusName::try_from(destination)?;
    ObjectPath::try_from(path)?;
    Ok(Self {
      destination: destination.to_string(),
      path: path.to_string(),
    })
  }

  pub fn destination(&self) -> &str {
    &self.destination
  }

  pub fn path(&self) -> &str {
    &self.path
  }
}

/// zbus connection to the player's session bus, bound to the player object.
pub struct DbusTransport {
  conn: Connection,
  remote: RemoteObject,
}

impl DbusTransport {
  /// Open a session connection to the discovered bus address.
  pub async fn open(credentials: &BusCredentials, remote: RemoteObject) -> Result<Self, zbus::Error> {
    let conn = zbus::connection::Builder::address(credentials.address.as_str())?
      .build()
      .await?;
    Ok(Self::new(conn, remote))
  }

  /// Bind the player object on an already open connection.
  pub fn new(conn: Connection, remote: RemoteObject) -> Self {
    log::debug!(
      "Session bus connected, binding {} at {}",
      remote.destination(),
      remote.path()
    );
    Self { conn, remote }
  }

  async fn send(&self, call: &PlayerCall) -> Result<Message, TransportError> {
    let destination = Some(self.remote.destination.as_str());
    let path = self.remote.path.as_str();
    let interface = Some(call.interface);
    let member = call.member;

    let reply = match call.args.as_slice() {
      [] => {
        self
          .conn
          .call_method(destination, path, interface, member, &())
          .await?
      }
      [CallArg::Int32(v)] => {
        self
          .conn
          .call_method(destination, path, interface, member, &(*v,))
          .await?
      }
      [CallArg::Int64(v)] => {
        self
          .conn
          .call_method(destination, path, interface, member, &(*v,))
          .await?
      }
      [CallArg::Str(iface), CallArg::Str(name)] => {
        self
          .conn
          .call_method(destination, path, interface, member, &(iface.as_str(), name.as_str()))
          .await?
      }
      [CallArg::Str(iface), CallArg::Str(name), CallArg::Double(v)] => {
        self
          .conn
          .call_method(
            destination,
            path,
            interface,
            member,
            &(iface.as_str(), name.as_str(), *v),
          )
          .await?
      }
      [CallArg::ObjectPath(track), CallArg::Int64(v)] => {
        let track = ObjectPath::try_from(track.as_str()).map_err(zbus::Error::from)?;
        self
          .conn
          .call_method(destination, path, interface, member, &(track, *v))
          .await?
      }
      args => {
        return Err(TransportError::UnsupportedArguments {
          call: call.full_name(),
          args: format!("{:?}", args),
        })
      }
    };

    Ok(reply)
  }
}

impl Transport for DbusTransport {
  async fn call(&self, call: PlayerCall) -> Result<ReplyValue, TransportError> {
    log::debug!("D-Bus call: {}", call);
    let reply = self.send(&call).await?;
    let body = reply.body();

    let value = match call.reply {
      ReplyKind::Unit => ReplyValue::Unit,
      ReplyKind::Bool => ReplyValue::Bool(decode_scalar(&call, &body)?),
      ReplyKind::Int64 => ReplyValue::Int64(decode_scalar(&call, &body)?),
      ReplyKind::Double => ReplyValue::Double(decode_scalar(&call, &body)?),
      ReplyKind::Str => ReplyValue::Str(decode_scalar(&call, &body)?),
      ReplyKind::StrList => ReplyValue::StrList(
        body
          .deserialize::<Vec<String>>()
          .map_err(|e| TransportError::unexpected_reply(&call, e))?,
      ),
    };

    log::trace!("D-Bus reply to {}: {:?}", call.full_name(), value);
    Ok(value)
  }

  async fn close(self) -> Result<(), TransportError> {
    log::debug!("Closing session bus connection");
    self.conn.close().await?;
    Ok(())
  }
}

/// omxplayer replies with bare values; standard MPRIS property getters wrap
/// them in a variant. Accept both.
fn decode_scalar<T>(call: &PlayerCall, body: &Body) -> Result<T, TransportError>
where
  T: for<'de> Deserialize<'de> + Type + TryFrom<OwnedValue>,
  <T as TryFrom<OwnedValue>>::Error: fmt::Display,
{
  if let Ok(value) = body.deserialize::<T>() {
    return Ok(value);
  }
  let variant: OwnedValue = body
    .deserialize()
    .map_err(|e| TransportError::unexpected_reply(call, e))?;
  T::try_from(variant).map_err(|e| TransportError::unexpected_reply(call, e))
}
