use crate::base::builder::SweepBuilder;
use crate::base::engine::PingEngine;
use crate::base::error::{PingError, TransportError};
use crate::base::external::ExternalPing;
use crate::base::result::{AttemptResult, PingOutcome, SweepReport};
use crate::base::strategy::Strategy;
use crate::base::transport::Transport;
use log::{debug, info, warn};
use std::net::{Ipv4Addr, SocketAddr, ToSocketAddrs};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::Duration;

type JobResult = Result<SweepReport, PingError>;

/// Pings many targets with a fixed pool of worker threads.
///
/// Targets are loaded into a bounded work queue that is closed before any
/// worker starts. Each worker pops one target at a time, pings it over a
/// transport it opens and owns for that target only, and pushes the report
/// onto a shared results queue. A worker stops when a pop finds the queue
/// closed and empty, or when nothing arrives within the drain timeout.
///
/// Reports come back in completion order, one per target.
pub struct Sweep {
    config: SweepBuilder,
}

impl Sweep {
    pub(crate) fn new(config: SweepBuilder) -> Self {
        Sweep { config }
    }

    #[inline]
    pub fn config(&self) -> &SweepBuilder {
        &self.config
    }

    /// Sweeps `targets` with the configured strategy. Only an error that
    /// leaves no way to ping at all (missing raw socket privilege, no `ping`
    /// executable) is returned; everything else ends up in a report.
    pub fn run(&self, targets: &[String]) -> Result<Vec<SweepReport>, PingError> {
        match self.config.strategy {
            Strategy::RawIcmp => self.run_raw(targets),
            Strategy::ExternalProcess(platform) => {
                let ping = ExternalPing::locate(
                    platform,
                    self.config.count,
                    self.config.size,
                    self.config.timeout,
                )?;
                self.run_jobs(targets, |target| match ping.run(target) {
                    Err(e) if !e.is_fatal() => {
                        warn!("ping {target} failed: {e}");
                        Ok(self.failed_report(target, e))
                    }
                    result => result,
                })
            }
        }
    }

    #[cfg(not(target_os = "windows"))]
    fn run_raw(&self, targets: &[String]) -> Result<Vec<SweepReport>, PingError> {
        let options = self.config.transport_options();
        self.run_with_transport(targets, |addr| {
            crate::base::linux::RawSocketTransport::connect(addr, &options)
        })
    }

    #[cfg(target_os = "windows")]
    fn run_raw(&self, _: &[String]) -> Result<Vec<SweepReport>, PingError> {
        Err(PingError::Unsupported("raw icmp sockets on windows".into()))
    }

    /// Sweeps `targets` over transports produced by `connect`, one per target.
    pub fn run_with_transport<T, F>(&self, targets: &[String], connect: F) -> Result<Vec<SweepReport>, PingError>
    where
        T: Transport,
        F: Fn(Ipv4Addr) -> Result<T, PingError> + Sync,
    {
        self.run_jobs(targets, |target| {
            let transport = match resolve_v4(target).and_then(&connect) {
                Ok(transport) => transport,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!("cannot ping {target}: {e}");
                    return Ok(self.failed_report(target, e));
                }
            };
            let mut engine = PingEngine::new(transport, self.config.timeout, self.config.size);
            Ok(engine.ping_many(target, self.config.count))
        })
    }

    fn run_jobs<J>(&self, targets: &[String], job: J) -> Result<Vec<SweepReport>, PingError>
    where
        J: Fn(&str) -> JobResult + Sync,
    {
        info!(
            "sweeping {} targets with {} workers, {} attempts each",
            targets.len(),
            self.config.workers,
            self.config.count
        );

        let (work_tx, work_rx) = mpsc::sync_channel::<String>(targets.len().max(1));
        for target in targets {
            if work_tx.send(target.clone()).is_err() {
                break;
            }
        }
        // closing the queue is what lets idle workers exit without waiting
        drop(work_tx);
        let work_rx = Mutex::new(work_rx);

        let (result_tx, result_rx) = mpsc::channel::<JobResult>();
        let drain_timeout = self.config.drain_timeout;
        thread::scope(|scope| {
            for id in 0..self.config.workers {
                let result_tx = result_tx.clone();
                let work_rx = &work_rx;
                let job = &job;
                scope.spawn(move || worker(id, work_rx, result_tx, job, drain_timeout));
            }
        });
        drop(result_tx);

        let mut reports = Vec::with_capacity(targets.len());
        let mut fatal = None;
        loop {
            match result_rx.recv_timeout(drain_timeout) {
                Ok(Ok(report)) => reports.push(report),
                Ok(Err(e)) => {
                    fatal.get_or_insert(e);
                }
                Err(_) => break,
            }
        }
        if let Some(e) = fatal {
            return Err(e);
        }

        info!("sweep finished with {} reports", reports.len());
        Ok(reports)
    }

    fn failed_report(&self, target: &str, error: PingError) -> SweepReport {
        let attempts = (0..self.config.count)
            .map(|sequence| AttemptResult {
                sequence,
                outcome: PingOutcome::Error(error.clone()),
            })
            .collect();
        SweepReport::from_attempts(target, self.config.size, attempts)
    }
}

fn worker<J>(id: usize, work_rx: &Mutex<Receiver<String>>, result_tx: Sender<JobResult>, job: &J, drain_timeout: Duration)
where
    J: Fn(&str) -> JobResult,
{
    debug!("worker {id} started");
    loop {
        let next = work_rx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .recv_timeout(drain_timeout);
        let target = match next {
            Ok(target) => target,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => break,
        };

        let result = job(&target);
        let fatal = result.is_err();
        if result_tx.send(result).is_err() || fatal {
            break;
        }
    }
    debug!("worker {id} stopped");
}

/// Resolves a hostname or IPv4 literal to the first IPv4 address it maps to.
pub fn resolve_v4(host: &str) -> Result<Ipv4Addr, PingError> {
    if let Ok(addr) = host.parse::<Ipv4Addr>() {
        return Ok(addr);
    }
    (host, 0)
        .to_socket_addrs()
        .map_err(|e| TransportError::ResolveFailed(format!("{host}: {e}")))?
        .find_map(|addr| match addr {
            SocketAddr::V4(addr) => Some(*addr.ip()),
            SocketAddr::V6(_) => None,
        })
        .ok_or_else(|| TransportError::ResolveFailed(format!("{host}: no ipv4 address")).into())
}

/// One host per line. Blank lines and `#` comments are skipped.
pub fn parse_targets(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_targets() {
        let text = "1.1.1.1\n  example.com  \n\n# upstream dns\n8.8.8.8\r\n";
        assert_eq!(parse_targets(text), ["1.1.1.1", "example.com", "8.8.8.8"]);
    }

    #[test]
    fn test_resolve_literal() {
        assert_eq!(resolve_v4("192.0.2.10"), Ok(Ipv4Addr::new(192, 0, 2, 10)));
        assert!(matches!(
            resolve_v4("bad\0host"),
            Err(PingError::Transport(TransportError::ResolveFailed(_)))
        ));
    }
}
