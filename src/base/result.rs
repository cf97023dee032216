use crate::base::error::PingError;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum PingOutcome {
    Reached(Duration),
    Timeout,
    Error(PingError),
}

/// One echo cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptResult {
    pub sequence: u16,
    pub outcome: PingOutcome,
}

impl AttemptResult {
    #[inline]
    pub fn is_reached(&self) -> bool {
        matches!(self.outcome, PingOutcome::Reached(_))
    }

    /// Round-trip time in milliseconds, only for a reached attempt.
    #[inline]
    pub fn rtt_ms(&self) -> Option<f64> {
        match self.outcome {
            PingOutcome::Reached(rtt) => Some(duration_ms(rtt)),
            _ => None,
        }
    }
}

/// Summary of every attempt made against one target.
///
/// `mint`, `maxt` and `avgt` only cover attempts that got a reply. When no
/// attempt did, all three are `None` and `loss` is `1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepReport {
    pub addr: String,
    pub loss: f64,
    pub mint: Option<f64>,
    pub maxt: Option<f64>,
    pub avgt: Option<f64>,
    pub ipv: u8,
    pub count: u16,
    pub size: usize,
    /// Empty when the report was parsed from an external `ping` process.
    pub attempts: Vec<AttemptResult>,
}

impl SweepReport {
    pub fn from_attempts(addr: impl Into<String>, size: usize, attempts: Vec<AttemptResult>) -> Self {
        let count = attempts.len();
        let rtts: Vec<f64> = attempts.iter().filter_map(AttemptResult::rtt_ms).collect();
        let loss = if count == 0 {
            1.0
        } else {
            (count - rtts.len()) as f64 / count as f64
        };
        let (mint, maxt, avgt) = if rtts.is_empty() {
            (None, None, None)
        } else {
            (
                Some(rtts.iter().copied().fold(f64::INFINITY, f64::min)),
                Some(rtts.iter().copied().fold(f64::NEG_INFINITY, f64::max)),
                Some(rtts.iter().sum::<f64>() / rtts.len() as f64),
            )
        };
        SweepReport {
            addr: addr.into(),
            loss,
            mint,
            maxt,
            avgt,
            ipv: 4,
            count: count as u16,
            size,
            attempts,
        }
    }

    #[inline]
    pub fn received(&self) -> usize {
        self.attempts.iter().filter(|a| a.is_reached()).count()
    }
}

#[inline]
pub(crate) fn duration_ms(duration: Duration) -> f64 {
    duration.as_micros() as f64 / 1000.0
}
