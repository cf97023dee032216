use crate::base::error::PingError;
use crate::base::protocol::IcmpMessage;
use std::net::Ipv4Addr;
use std::time::Duration;

/// Bytes read off the socket together with the peer that sent them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedPacket {
    pub bytes: Vec<u8>,
    pub source: Option<Ipv4Addr>,
}

/// An ICMP endpoint bound to a single target.
///
/// A transport is owned by exactly one worker for as long as that worker
/// pings its target, and is dropped (closing the socket) afterwards.
pub trait Transport {
    fn target(&self) -> Ipv4Addr;

    fn send(&mut self, message: &IcmpMessage) -> Result<(), PingError>;

    /// Blocks until a datagram of at most `max_size` bytes arrives. Returns
    /// `PingError::Timeout` once `timeout` elapses without one.
    fn receive(&mut self, timeout: Duration, max_size: usize) -> Result<ReceivedPacket, PingError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportOptions {
    pub ttl: Option<u8>,
    pub bind_addr: Option<Ipv4Addr>,
}
