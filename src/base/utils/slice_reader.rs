#![cfg_attr(debug_assertions, allow(dead_code))]

/// Big-endian cursor over a received datagram. Every read is bounds checked
/// and returns `None` past the end, so parsers never index out of range.
#[derive(Debug)]
pub struct SliceReader<'a> {
    slice: &'a [u8],
    pos: usize,
}

impl<'a> From<&'a [u8]> for SliceReader<'a> {
    #[inline]
    fn from(slice: &'a [u8]) -> Self {
        SliceReader { slice, pos: 0 }
    }
}

impl<'a> SliceReader<'a> {
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.slice.len() - self.pos
    }

    #[inline]
    pub fn read_u8(&mut self) -> Option<u8> {
        let val = *self.slice.get(self.pos)?;
        self.pos += 1;
        Some(val)
    }

    #[inline]
    pub fn read_u16(&mut self) -> Option<u16> {
        let bytes = self.read_slice(2)?;
        Some(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    #[inline]
    pub fn skip(&mut self, n: usize) -> Option<()> {
        self.read_slice(n).map(|_| ())
    }

    #[inline]
    pub fn read_slice(&mut self, len: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(len)?;
        let slice = self.slice.get(self.pos..end)?;
        self.pos = end;
        Some(slice)
    }

    #[inline]
    pub fn remainder(&mut self) -> &'a [u8] {
        let rest = &self.slice[self.pos..];
        self.pos = self.slice.len();
        rest
    }
}
