use rps_ping_sweep::{
    IcmpMessage, Ipv4Header, PingError, PingOutcome, ReceivedPacket, SweepBuilder, Transport,
};
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Mutex;
use std::time::Duration;

const SILENT: u8 = 3;
const MALFORMED: u8 = 5;

/// Answers every echo request itself, except for the hosts whose last octet
/// marks them silent or malformed.
struct Loopback {
    target: Ipv4Addr,
    pending: Option<IcmpMessage>,
}

impl Transport for Loopback {
    fn target(&self) -> Ipv4Addr {
        self.target
    }

    fn send(&mut self, message: &IcmpMessage) -> Result<(), PingError> {
        self.pending = Some(message.clone());
        Ok(())
    }

    fn receive(&mut self, _: Duration, _: usize) -> Result<ReceivedPacket, PingError> {
        let request = self.pending.take().ok_or(PingError::Timeout)?;
        let bytes = match self.target.octets()[3] {
            SILENT => return Err(PingError::Timeout),
            MALFORMED => vec![0x45; Ipv4Header::FIXED_HEADER_SIZE + 3],
            _ => {
                let reply = IcmpMessage::new(
                    IcmpMessage::ECHO_REPLY,
                    0,
                    request.identifier(),
                    request.sequence(),
                    request.payload(),
                )?;
                let mut datagram = vec![0x45; Ipv4Header::FIXED_HEADER_SIZE];
                datagram.extend_from_slice(&reply.serialize());
                datagram
            }
        };
        Ok(ReceivedPacket {
            bytes,
            source: Some(self.target),
        })
    }
}

fn targets(k: u8) -> Vec<String> {
    (1..=k).map(|i| format!("10.0.0.{i}")).collect()
}

fn builder(workers: usize) -> SweepBuilder {
    let mut builder = SweepBuilder::new(workers);
    builder.set_count(3);
    builder.set_size(24);
    builder.set_timeout(Duration::from_millis(200));
    builder.set_drain_timeout(Duration::from_millis(50));
    builder
}

#[test]
fn test_one_report_per_target_for_any_worker_count() {
    let k = 6;
    for workers in 1..=(k as usize + 2) {
        let connects = Mutex::new(HashMap::new());
        let sweep = builder(workers).build().expect("invalid sweep config");
        let reports = sweep
            .run_with_transport(&targets(k), |target| {
                *connects.lock().unwrap().entry(target).or_insert(0) += 1;
                Ok(Loopback {
                    target,
                    pending: None,
                })
            })
            .expect("sweep failed");

        assert_eq!(reports.len(), k as usize, "workers = {workers}");
        let mut addrs: Vec<&str> = reports.iter().map(|r| r.addr.as_str()).collect();
        addrs.sort_by_key(|addr| addr.parse::<Ipv4Addr>().unwrap());
        assert_eq!(addrs, targets(k), "workers = {workers}");

        let connects = connects.into_inner().unwrap();
        assert_eq!(connects.len(), k as usize);
        assert!(connects.values().all(|&n| n == 1));
    }
}

#[test]
fn test_report_contents() {
    let sweep = builder(3).build().expect("invalid sweep config");
    let reports = sweep
        .run_with_transport(&targets(6), |target| {
            Ok(Loopback {
                target,
                pending: None,
            })
        })
        .expect("sweep failed");
    let by_addr: HashMap<&str, _> = reports.iter().map(|r| (r.addr.as_str(), r)).collect();

    let reached = by_addr["10.0.0.1"];
    assert_eq!(reached.loss, 0.0);
    assert_eq!(reached.count, 3);
    assert_eq!(reached.size, 24);
    assert!(reached.mint.unwrap() <= reached.avgt.unwrap());
    assert!(reached.avgt.unwrap() <= reached.maxt.unwrap());

    let silent = by_addr["10.0.0.3"];
    assert_eq!(silent.loss, 1.0);
    assert_eq!((silent.mint, silent.maxt, silent.avgt), (None, None, None));
    assert!(silent.attempts.iter().all(|a| a.outcome == PingOutcome::Timeout));

    let malformed = by_addr["10.0.0.5"];
    assert_eq!(malformed.loss, 1.0);
    assert!(
        malformed
            .attempts
            .iter()
            .all(|a| a.outcome == PingOutcome::Error(PingError::MalformedPacket(3)))
    );

    // the malformed and silent hosts did not cost the others their reports
    assert_eq!(reports.iter().filter(|r| r.loss == 0.0).count(), 4);
}

#[test]
fn test_unresolvable_target_gets_a_failed_report() {
    let sweep = builder(2).build().expect("invalid sweep config");
    let targets = vec!["10.0.0.1".to_string(), "bad\0host".to_string()];
    let reports = sweep
        .run_with_transport(&targets, |target| {
            Ok(Loopback {
                target,
                pending: None,
            })
        })
        .expect("sweep failed");
    assert_eq!(reports.len(), 2);
    let failed = reports.iter().find(|r| r.addr == "bad\0host").unwrap();
    assert_eq!(failed.loss, 1.0);
    assert_eq!(failed.attempts.len(), 3);
}

#[test]
fn test_permission_error_is_fatal() {
    let sweep = builder(2).build().expect("invalid sweep config");
    let result = sweep.run_with_transport(&targets(4), |_| -> Result<Loopback, PingError> {
        Err(PingError::PermissionDenied("Operation not permitted".into()))
    });
    assert!(matches!(result, Err(PingError::PermissionDenied(_))));
}

#[test]
fn test_empty_sweep() {
    let sweep = builder(4).build().expect("invalid sweep config");
    let reports = sweep
        .run_with_transport(&[], |target| {
            Ok(Loopback {
                target,
                pending: None,
            })
        })
        .expect("sweep failed");
    assert!(reports.is_empty());
}
