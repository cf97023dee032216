#![cfg_attr(debug_assertions, allow(dead_code))]

/// Appends big-endian fields to a buffer sized up front.
#[derive(Debug)]
pub struct SliceWriter {
    buf: Vec<u8>,
}

impl SliceWriter {
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        SliceWriter {
            buf: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn write_u8(&mut self, val: u8) -> &mut Self {
        self.buf.push(val);
        self
    }

    #[inline]
    pub fn write_u16(&mut self, val: u16) -> &mut Self {
        self.buf.extend_from_slice(&val.to_be_bytes());
        self
    }

    #[inline]
    pub fn write_slice(&mut self, slice: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(slice);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}
