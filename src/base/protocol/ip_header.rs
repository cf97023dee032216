use crate::base::utils::SliceReader;

/// View over an IPv4 datagram as delivered by a raw ICMP socket.
///
/// The header is always taken to be the fixed 20 bytes; option words
/// announced through the IHL field are left in the payload.
pub struct Ipv4Header<'a> {
    fix_slice: &'a [u8],
    payload_slice: &'a [u8],
}

impl<'a> Ipv4Header<'a> {
    pub const FIXED_HEADER_SIZE: usize = 20;

    pub fn from_slice(datagram: &'a [u8]) -> Option<Ipv4Header<'a>> {
        let mut reader = SliceReader::from(datagram);
        Some(Ipv4Header {
            fix_slice: reader.read_slice(Self::FIXED_HEADER_SIZE)?,
            payload_slice: reader.remainder(),
        })
    }

    pub fn protocol(&self) -> u8 {
        self.fix_slice[9]
    }

    pub fn source_address(&self) -> std::net::Ipv4Addr {
        std::net::Ipv4Addr::new(
            self.fix_slice[12],
            self.fix_slice[13],
            self.fix_slice[14],
            self.fix_slice[15],
        )
    }

    pub fn destination_address(&self) -> std::net::Ipv4Addr {
        std::net::Ipv4Addr::new(
            self.fix_slice[16],
            self.fix_slice[17],
            self.fix_slice[18],
            self.fix_slice[19],
        )
    }

    pub fn payload(&self) -> &'a [u8] {
        self.payload_slice
    }
}
