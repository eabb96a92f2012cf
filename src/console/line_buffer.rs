//! Line buffer for console input

use crate::config::LINE_CAPACITY;

/// Returned by [`LineBuffer::push`] when the buffer is already full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overflow;

/// Bounded line input buffer
///
/// Never truncates silently: a push into a full buffer is refused and the
/// caller decides what to do with the partial line.
pub struct LineBuffer<const N: usize = LINE_CAPACITY> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> LineBuffer<N> {
    /// Create empty buffer
    pub const fn new() -> Self {
        Self {
            buf: [0u8; N],
            len: 0,
        }
    }

    /// Push a byte
    pub fn push(&mut self, c: u8) -> Result<(), Overflow> {
        if self.len >= N {
            return Err(Overflow);
        }
        self.buf[self.len] = c;
        self.len += 1;
        Ok(())
    }

    /// Append a slice, all or nothing
    pub fn extend(&mut self, bytes: &[u8]) -> Result<(), Overflow> {
        if bytes.len() > N - self.len {
            return Err(Overflow);
        }
        self.buf[self.len..self.len + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len();
        Ok(())
    }

    /// Remove last byte
    pub fn backspace(&mut self) {
        if self.len > 0 {
            self.len -= 1;
        }
    }

    /// Clear buffer
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Get buffer as string slice, `None` if the bytes are not UTF-8
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.buf[..self.len]).ok()
    }

    /// Get buffer length
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if full
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Get raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl<const N: usize> Default for LineBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
