use crate::base::error::{PingError, TransportError};
use crate::base::protocol::IcmpMessage;
use crate::base::transport::{ReceivedPacket, Transport, TransportOptions};
use log::trace;
use rustix::fd::OwnedFd;
use rustix::net;
use rustix::net::SocketAddrAny;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::time::Duration;

/// Raw `AF_INET`/`SOCK_RAW`/`IPPROTO_ICMP` socket. Reads return the whole IP
/// datagram, header included.
pub struct RawSocketTransport {
    sock: OwnedFd,
    target: Ipv4Addr,
}

impl RawSocketTransport {
    pub fn connect(target: Ipv4Addr, options: &TransportOptions) -> Result<Self, PingError> {
        let sock = net::socket(
            net::AddressFamily::INET,
            net::SocketType::RAW,
            Some(net::ipproto::ICMP),
        )
        .map_err(solve_socket_error)?;

        if let Some(addr) = options.bind_addr {
            net::bind_v4(&sock, &SocketAddrV4::new(addr, 0))
                .map_err(|e| TransportError::BindError(e.to_string()))?;
        }

        if let Some(ttl) = options.ttl {
            net::sockopt::set_ip_ttl(&sock, ttl as u32)
                .map_err(|e| TransportError::SetSockOptError(e.to_string()))?;
        }

        trace!("opened raw icmp socket for {target}");
        Ok(RawSocketTransport { sock, target })
    }
}

impl Transport for RawSocketTransport {
    #[inline]
    fn target(&self) -> Ipv4Addr {
        self.target
    }

    fn send(&mut self, message: &IcmpMessage) -> Result<(), PingError> {
        net::sendto_v4(
            &self.sock,
            &message.serialize(),
            net::SendFlags::empty(),
            &SocketAddrV4::new(self.target, 0),
        )
        .map_err(|e| TransportError::SendtoFailed(e.to_string()))?;
        Ok(())
    }

    fn receive(&mut self, timeout: Duration, max_size: usize) -> Result<ReceivedPacket, PingError> {
        // a zero SO_RCVTIMEO would block forever
        let timeout = timeout.max(Duration::from_millis(1));
        net::sockopt::set_socket_timeout(&self.sock, net::sockopt::Timeout::Recv, Some(timeout))
            .map_err(|e| TransportError::SetSockOptError(e.to_string()))?;

        let mut buff = vec![0_u8; max_size];
        let (len, addr) =
            net::recvfrom(&self.sock, &mut buff, net::RecvFlags::empty()).map_err(solve_recv_error)?;
        buff.truncate(len);

        let source = match addr {
            Some(SocketAddrAny::V4(addr)) => Some(*addr.ip()),
            _ => None,
        };
        Ok(ReceivedPacket {
            bytes: buff,
            source,
        })
    }
}

fn solve_socket_error(error: rustix::io::Errno) -> PingError {
    match error.raw_os_error() {
        libc::EPERM | libc::EACCES => PingError::PermissionDenied(error.to_string()),
        _ => TransportError::SocketSetupFailed(error.to_string()).into(),
    }
}

fn solve_recv_error(error: rustix::io::Errno) -> PingError {
    match error.raw_os_error() {
        // EWOULDBLOCK shares the value of EAGAIN on linux
        libc::EAGAIN | libc::ETIMEDOUT => PingError::Timeout,
        e if e == libc::EWOULDBLOCK => PingError::Timeout,
        _ => TransportError::RecvFailed(error.to_string()).into(),
    }
}
