/// RFC 1071 internet checksum.
///
/// The buffer is summed as big-endian 16-bit words. An odd trailing byte is
/// summed as if followed by a zero byte; the pad is never written anywhere.
pub fn checksum(data: &[u8]) -> u16 {
    let mut sum: u64 = 0;
    let mut words = data.chunks_exact(2);
    for word in &mut words {
        sum += u16::from_be_bytes([word[0], word[1]]) as u64;
    }
    if let [last] = words.remainder() {
        sum += (*last as u64) << 8;
    }

    // fold until no carry is left above bit 15
    while sum > 0xFFFF {
        sum = (sum & 0xFFFF) + (sum >> 16);
    }
    !(sum as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_zero_buffers() {
        assert_eq!(checksum(b""), 0xffff);
        assert_eq!(checksum(&[0; 4]), 0xffff);
        assert_eq!(checksum(&[0; 5]), 0xffff);
    }

    #[test]
    fn test_odd_length_pads_low_byte() {
        assert_eq!(checksum(&[0x12]), checksum(&[0x12, 0x00]));
        assert_eq!(checksum(&[0x12]), !0x1200);
    }

    #[test]
    fn test_carry_is_folded() {
        // 0xffff + 0x0001 carries once, 0x0000 + 1 after the fold
        assert_eq!(checksum(&[0xff, 0xff, 0x00, 0x01]), !0x0001);
        // large enough to carry several times
        assert_eq!(checksum(&vec![0xff; 70_000]), 0x0000);
    }

    #[test]
    fn test_self_validates_to_zero() {
        let mut data = vec![8, 0, 0, 0, 0x12, 0x34, 0x00, 0x07, b'a', b'b', b'c'];
        let sum = checksum(&data);
        data[2..4].copy_from_slice(&sum.to_be_bytes());
        assert_eq!(checksum(&data), 0);
    }
}
