use crate::base::error::PingError;
use crate::base::protocol::{IcmpMessage, Ipv4Header};
use crate::base::result::{AttemptResult, PingOutcome, SweepReport, duration_ms};
use crate::base::transport::Transport;
use log::{debug, warn};
use rand::Rng;
use std::time::{Duration, Instant};

/// Room for IPv4 options in front of the echo reply.
const IP_OPTIONS_SLACK: usize = 40;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Runs echo cycles against the single target of its transport, one request
/// outstanding at a time.
pub struct PingEngine<T: Transport> {
    transport: T,
    identifier: u16,
    timeout: Duration,
    payload: Vec<u8>,
}

impl<T: Transport> PingEngine<T> {
    /// `size` random payload bytes are generated once and reused by every
    /// attempt; the identifier is random per engine.
    pub fn new(transport: T, timeout: Duration, size: usize) -> Self {
        let mut rng = rand::rng();
        let mut payload = vec![0_u8; size];
        rng.fill(&mut payload[..]);
        PingEngine {
            transport,
            identifier: rng.random(),
            timeout,
            payload,
        }
    }

    #[inline]
    pub fn with_identifier(mut self, identifier: u16) -> Self {
        self.identifier = identifier;
        self
    }

    #[inline]
    pub fn identifier(&self) -> u16 {
        self.identifier
    }

    #[inline]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn ping_once(&mut self, sequence: u16) -> AttemptResult {
        let outcome = match self.exchange(sequence) {
            Ok(rtt) => {
                debug!(
                    "reply from {} seq={} time={:.3}ms",
                    self.transport.target(),
                    sequence,
                    duration_ms(rtt)
                );
                PingOutcome::Reached(rtt)
            }
            Err(PingError::Timeout) => {
                debug!("request to {} seq={} timed out", self.transport.target(), sequence);
                PingOutcome::Timeout
            }
            Err(e) => {
                warn!("ping {} seq={} failed: {}", self.transport.target(), sequence, e);
                PingOutcome::Error(e)
            }
        };
        AttemptResult { sequence, outcome }
    }

    /// Pings `count` times with sequence numbers `0..count` and summarizes
    /// the attempts under `addr`.
    pub fn ping_many(&mut self, addr: &str, count: u16) -> SweepReport {
        let attempts = (0..count).map(|sequence| self.ping_once(sequence)).collect();
        SweepReport::from_attempts(addr, self.payload.len(), attempts)
    }

    fn exchange(&mut self, sequence: u16) -> Result<Duration, PingError> {
        let request = IcmpMessage::echo_request(self.identifier, sequence, self.payload.as_slice())?;
        let max_size = Ipv4Header::FIXED_HEADER_SIZE + IP_OPTIONS_SLACK + request.len();
        let target = self.transport.target();

        let start_time = Instant::now();
        let deadline = start_time + self.timeout;
        self.transport.send(&request)?;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(PingError::Timeout);
            }
            let packet = self.transport.receive(remaining, max_size)?;
            let duration = Instant::now().duration_since(start_time);

            if packet.source.is_some_and(|source| source != target) {
                continue;
            }
            let reply = IcmpMessage::parse_from_ip_datagram(&packet.bytes)?;
            if reply.is_reply_to(&request) {
                return Ok(duration);
            }
            debug!(
                "ignoring icmp type={} id={} seq={} from {}",
                reply.icmp_type(),
                reply.identifier(),
                reply.sequence(),
                target
            );
        }
    }
}
