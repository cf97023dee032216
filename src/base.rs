mod builder;
mod engine;
mod error;
mod external;
#[cfg(not(target_os = "windows"))]
mod linux;
mod protocol;
mod result;
mod strategy;
mod sweep;
mod transport;
mod utils;

pub use builder::SweepBuilder;
pub use engine::PingEngine;
pub use error::{PingError, TransportError};
pub use external::{ExternalPing, PingSummary, parse_gnu_output, parse_microsoft_output};
#[cfg(not(target_os = "windows"))]
pub use linux::RawSocketTransport;
pub use protocol::{IcmpMessage, Ipv4Header, checksum};
pub use result::{AttemptResult, PingOutcome, SweepReport};
pub use strategy::{Platform, Strategy};
pub use sweep::{Sweep, parse_targets, resolve_v4};
pub use transport::{ReceivedPacket, Transport, TransportOptions};
