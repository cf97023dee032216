use crate::base::error::PingError;
use crate::base::protocol::{Ipv4Header, checksum};
use crate::base::utils::{SliceReader, SliceWriter};

/// An ICMP message as it travels on the wire:
///
/// ```text
/// | type: u8 | code: u8 | checksum: u16 | identifier: u16 | sequence: u16 | payload ... |
/// ```
///
/// The value is immutable. Its checksum is computed once at construction over
/// the serialized message with the checksum field zeroed, so it always agrees
/// with the other fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcmpMessage {
    icmp_type: u8,
    code: u8,
    checksum: u16,
    identifier: u16,
    sequence: u16,
    payload: Vec<u8>,
}

impl IcmpMessage {
    pub const HEADER_SIZE: usize = 8;
    pub const ECHO_REPLY: u8 = 0;
    pub const ECHO_REQUEST: u8 = 8;
    /// Largest payload that still fits a 65535-byte IPv4 datagram.
    pub const MAX_PAYLOAD_SIZE: usize =
        u16::MAX as usize - Ipv4Header::FIXED_HEADER_SIZE - Self::HEADER_SIZE;

    pub fn new(
        icmp_type: u8,
        code: u8,
        identifier: u16,
        sequence: u16,
        payload: impl Into<Vec<u8>>,
    ) -> Result<Self, PingError> {
        let payload = payload.into();
        if payload.len() > Self::MAX_PAYLOAD_SIZE {
            return Err(PingError::InvalidInput(format!(
                "icmp payload of {} bytes exceeds {}",
                payload.len(),
                Self::MAX_PAYLOAD_SIZE
            )));
        }
        let mut message = IcmpMessage {
            icmp_type,
            code,
            checksum: 0,
            identifier,
            sequence,
            payload,
        };
        message.checksum = checksum(&message.write(0));
        Ok(message)
    }

    #[inline]
    pub fn echo_request(
        identifier: u16,
        sequence: u16,
        payload: impl Into<Vec<u8>>,
    ) -> Result<Self, PingError> {
        Self::new(Self::ECHO_REQUEST, 0, identifier, sequence, payload)
    }

    #[inline]
    pub fn icmp_type(&self) -> u8 {
        self.icmp_type
    }

    #[inline]
    pub fn code(&self) -> u8 {
        self.code
    }

    #[inline]
    pub fn checksum(&self) -> u16 {
        self.checksum
    }

    #[inline]
    pub fn identifier(&self) -> u16 {
        self.identifier
    }

    #[inline]
    pub fn sequence(&self) -> u16 {
        self.sequence
    }

    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    #[inline]
    pub fn len(&self) -> usize {
        Self::HEADER_SIZE + self.payload.len()
    }

    pub fn serialize(&self) -> Vec<u8> {
        self.write(self.checksum)
    }

    fn write(&self, checksum: u16) -> Vec<u8> {
        let mut writer = SliceWriter::with_capacity(self.len());
        writer
            .write_u8(self.icmp_type)
            .write_u8(self.code)
            .write_u16(checksum)
            .write_u16(self.identifier)
            .write_u16(self.sequence)
            .write_slice(&self.payload);
        writer.into_inner()
    }

    /// Parses a bare ICMP message. The checksum carried on the wire is not
    /// kept; the parsed value recomputes its own from the decoded fields.
    pub fn parse(bytes: &[u8]) -> Result<Self, PingError> {
        let mut reader = SliceReader::from(bytes);
        let malformed = || PingError::MalformedPacket(bytes.len());
        let icmp_type = reader.read_u8().ok_or_else(malformed)?;
        let code = reader.read_u8().ok_or_else(malformed)?;
        reader.skip(2).ok_or_else(malformed)?;
        let identifier = reader.read_u16().ok_or_else(malformed)?;
        let sequence = reader.read_u16().ok_or_else(malformed)?;
        Self::new(icmp_type, code, identifier, sequence, reader.remainder())
    }

    /// Strips the fixed 20-byte IPv4 header a raw socket hands back and parses
    /// the ICMP message behind it.
    pub fn parse_from_ip_datagram(datagram: &[u8]) -> Result<Self, PingError> {
        match Ipv4Header::from_slice(datagram) {
            Some(header) => Self::parse(header.payload()),
            None => Err(PingError::MalformedPacket(0)),
        }
    }

    /// Whether `self` is the echo reply answering `request`.
    pub fn is_reply_to(&self, request: &IcmpMessage) -> bool {
        self.icmp_type == Self::ECHO_REPLY
            && self.code == 0
            && self.identifier == request.identifier
            && self.sequence == request.sequence
            && self.payload == request.payload
    }
}
