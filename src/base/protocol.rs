mod checksum;
mod icmp;
mod ip_header;

pub use checksum::checksum;
pub use icmp::IcmpMessage;
pub use ip_header::Ipv4Header;
