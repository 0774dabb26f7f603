//! UDP channel to the bike, fixed to one peer for the whole session.
//!
//! One 4-byte datagram goes out per tick (signed incline) and one comes back
//! (measured wheel speed). Datagrams may be lost or reordered; the bridge
//! does not compensate, it just skips the tick.

use std::io;
use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;

use bevy::prelude::Resource;
use thiserror::Error;

/// Both directions carry exactly one 32-bit float.
pub const WIRE_LEN: usize = 4;

/// Failures on the bike channel.
#[derive(Debug, Error)]
pub enum LinkError {
    /// Socket creation, association, send or receive failed.
    #[error("socket error: {0}")]
    Socket(#[from] io::Error),
    /// No reply arrived within the configured receive timeout.
    #[error("no reply within the receive timeout")]
    Timeout,
    /// The peer answered with fewer than [`WIRE_LEN`] bytes.
    #[error("short datagram: {0} bytes")]
    ShortDatagram(usize),
}

/// The open channel handle. At most one exists at a time; all traffic for the
/// session goes through it. Dropping it closes the socket.
#[derive(Resource)]
pub struct BikeLink {
    socket: UdpSocket,
}

impl BikeLink {
    /// Bind an ephemeral local port and associate it with `peer` so later
    /// sends and receives omit addressing.
    pub fn open(peer: SocketAddr, timeout: Duration) -> Result<Self, LinkError> {
        let socket = UdpSocket::bind(("0.0.0.0", 0))?;
        socket.connect(peer)?;
        socket.set_read_timeout(Some(timeout))?;
        Ok(Self { socket })
    }

    /// Write one datagram. Delivery is not guaranteed.
    pub fn send(&self, payload: [u8; WIRE_LEN]) -> Result<(), LinkError> {
        self.socket.send(&payload)?;
        Ok(())
    }

    /// Block until [`WIRE_LEN`] bytes arrive or the receive timeout elapses.
    /// A timeout is reported as [`LinkError::Timeout`], never as stale or
    /// zeroed data.
    pub fn recv(&self) -> Result<[u8; WIRE_LEN], LinkError> {
        let mut buf = [0u8; WIRE_LEN];
        match self.socket.recv(&mut buf) {
            Ok(n) if n >= WIRE_LEN => Ok(buf),
            Ok(n) => Err(LinkError::ShortDatagram(n)),
            Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
                Err(LinkError::Timeout)
            }
            Err(e) => Err(LinkError::Socket(e)),
        }
    }
}
