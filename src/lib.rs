//! ICMP echo reachability and latency sweeps over IPv4.
//!
//! [`IcmpMessage`] frames echo requests and parses replies out of the raw IP
//! datagrams a raw socket returns. [`PingEngine`] runs echo cycles against
//! one target over any [`Transport`], and [`Sweep`] fans many targets out to
//! a fixed pool of worker threads, each owning its own socket.
//!
//! ```no_run
//! use rps_ping_sweep::SweepBuilder;
//!
//! let sweep = SweepBuilder::new(8).build().expect("invalid sweep config");
//! let reports = sweep
//!     .run(&["1.1.1.1".to_string(), "8.8.8.8".to_string()])
//!     .expect("raw sockets need CAP_NET_RAW or root");
//! for report in reports {
//!     println!("{} loss={} avg={:?}ms", report.addr, report.loss, report.avgt);
//! }
//! ```

mod base;

pub use base::*;
