use crate::base::engine::DEFAULT_TIMEOUT;
use crate::base::error::PingError;
use crate::base::protocol::IcmpMessage;
use crate::base::strategy::Strategy;
use crate::base::sweep::Sweep;
use crate::base::transport::TransportOptions;
use std::net::Ipv4Addr;
use std::time::Duration;

pub struct SweepBuilder {
    pub timeout: Duration,
    pub count: u16,
    pub size: usize, // payload bytes
    pub workers: usize,
    pub drain_timeout: Duration,
    pub ttl: Option<u8>,
    pub bind_addr: Option<Ipv4Addr>,
    pub strategy: Strategy,
}

impl Default for SweepBuilder {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            count: 4,
            size: 32,
            workers: 4,
            drain_timeout: Duration::from_secs(3),
            ttl: None,
            bind_addr: None,
            strategy: Strategy::RawIcmp,
        }
    }
}

impl SweepBuilder {
    pub fn new(workers: usize) -> Self {
        Self {
            workers,
            ..Self::default()
        }
    }

    pub fn build(self) -> Result<Sweep, PingError> {
        if self.count == 0 {
            return Err(PingError::InvalidInput("count must be at least 1".into()));
        }
        if self.workers == 0 {
            return Err(PingError::InvalidInput("workers must be at least 1".into()));
        }
        if self.size > IcmpMessage::MAX_PAYLOAD_SIZE {
            return Err(PingError::InvalidInput(format!(
                "size must not exceed {} bytes",
                IcmpMessage::MAX_PAYLOAD_SIZE
            )));
        }
        Ok(Sweep::new(self))
    }

    #[inline]
    pub fn transport_options(&self) -> TransportOptions {
        TransportOptions {
            ttl: self.ttl,
            bind_addr: self.bind_addr,
        }
    }

    #[inline]
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    #[inline]
    pub fn set_count(&mut self, count: u16) {
        self.count = count;
    }

    #[inline]
    pub fn set_size(&mut self, size: usize) {
        self.size = size;
    }

    #[inline]
    pub fn set_workers(&mut self, workers: usize) {
        self.workers = workers;
    }

    #[inline]
    pub fn set_drain_timeout(&mut self, drain_timeout: Duration) {
        self.drain_timeout = drain_timeout;
    }

    #[inline]
    pub fn set_ttl(&mut self, ttl: u8) {
        self.ttl = Some(ttl);
    }

    #[inline]
    pub fn set_bind_addr(&mut self, bind_addr: Option<Ipv4Addr>) {
        self.bind_addr = bind_addr;
    }

    #[inline]
    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
    }
}
