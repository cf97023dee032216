use crate::base::error::PingError;
use crate::base::transport::TransportOptions;
use log::debug;

/// Flavor of the platform `ping` executable, which decides both its command
/// line and the shape of its summary output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// iputils, BusyBox and BSD style `ping`.
    Gnu,
    /// `ping.exe` shipped with Windows.
    Microsoft,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Microsoft
        } else {
            Platform::Gnu
        }
    }
}

/// How a sweep reaches its targets. Resolved once, before the sweep starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strategy {
    #[default]
    RawIcmp,
    ExternalProcess(Platform),
}

impl Strategy {
    /// Opens a throwaway raw socket to see whether this process may use one,
    /// falling back to the platform `ping` when it is on `PATH`.
    pub fn probe(options: &TransportOptions) -> Result<Strategy, PingError> {
        match probe_raw_socket(options) {
            Ok(()) => Ok(Strategy::RawIcmp),
            Err(e) => {
                debug!("raw icmp unavailable: {e}");
                match which::which("ping") {
                    Ok(path) => {
                        debug!("falling back to {}", path.display());
                        Ok(Strategy::ExternalProcess(Platform::current()))
                    }
                    Err(_) => Err(e),
                }
            }
        }
    }
}

#[cfg(not(target_os = "windows"))]
fn probe_raw_socket(options: &TransportOptions) -> Result<(), PingError> {
    crate::base::linux::RawSocketTransport::connect(std::net::Ipv4Addr::LOCALHOST, options)
        .map(|_| ())
}

#[cfg(target_os = "windows")]
fn probe_raw_socket(_: &TransportOptions) -> Result<(), PingError> {
    Err(PingError::Unsupported("raw icmp sockets on windows".into()))
}
