//! Internal read buffer of a [`RioStream`](super::RioStream).
//!
//! A linear buffer, not a ring: every refill overwrites from offset 0.
//!
//! Invariants:
//! - `unread <= data.len()`
//! - `cursor + unread <= data.len()`
//! - `data[cursor..cursor + unread]` is exactly the not-yet-delivered data
//!   from the last refill
//!
//! When `unread == 0` the cursor is meaningless until the next refill.

use crate::errno;
use crate::sys::Descriptor;

/// Outcome of a single refill attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refill {
    /// The descriptor delivered this many bytes.
    Filled(usize),
    /// The descriptor reported end-of-stream.
    EndOfStream,
}

#[derive(Debug)]
pub struct RioBuffer {
    data: Box<[u8]>,
    /// Next unread byte.
    cursor: usize,
    /// Valid, unconsumed bytes starting at `cursor`.
    unread: usize,
    /// Refills that delivered data.
    refills: u64,
}

impl RioBuffer {
    /// Create an empty buffer. `capacity` must be non-zero.
    pub(crate) fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            data: vec![0u8; capacity].into_boxed_slice(),
            cursor: 0,
            unread: 0,
            refills: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn unread(&self) -> usize {
        self.unread
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.unread == 0
    }

    /// The bytes that the next reads will deliver, without consuming them.
    #[inline]
    pub fn buffered(&self) -> &[u8] {
        &self.data[self.cursor..self.cursor + self.unread]
    }

    #[inline]
    pub fn refills(&self) -> u64 {
        self.refills
    }

    /// Replenish an empty buffer with one single-shot read of up to
    /// `capacity` bytes, retrying on `EINTR`.
    ///
    /// On error the buffer is left untouched.
    pub(crate) fn refill<D: Descriptor + ?Sized>(
        &mut self,
        descriptor: &mut D,
    ) -> Result<Refill, i32> {
        debug_assert!(self.is_empty());
        loop {
            match descriptor.read_once(&mut self.data) {
                Ok(0) => return Ok(Refill::EndOfStream),
                Ok(n) => {
                    // A misbehaving descriptor must not break the bounds invariant.
                    let n = n.min(self.data.len());
                    self.cursor = 0;
                    self.unread = n;
                    self.refills += 1;
                    return Ok(Refill::Filled(n));
                }
                Err(e) if errno::is_transient(e) => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Copy up to `dst.len()` unread bytes into `dst` and consume them.
    pub(crate) fn take(&mut self, dst: &mut [u8]) -> usize {
        let n = dst.len().min(self.unread);
        dst[..n].copy_from_slice(&self.data[self.cursor..self.cursor + n]);
        self.cursor += n;
        self.unread -= n;
        n
    }

    /// Consume a single unread byte.
    #[inline]
    pub(crate) fn take_byte(&mut self) -> Option<u8> {
        if self.unread == 0 {
            return None;
        }
        let byte = self.data[self.cursor];
        self.cursor += 1;
        self.unread -= 1;
        Some(byte)
    }
}
