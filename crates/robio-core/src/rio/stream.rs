//! Buffered read handle.
//!
//! A [`RioStream`] binds one already-open descriptor to one fixed-size
//! internal buffer. Small reads are served from memory; the descriptor is
//! only read again once every buffered byte has been handed out.

use crate::config::{MAX_BUFSIZE, RioConfig};
use crate::error::RioError;
use crate::rio::RIO_BUFSIZE;
use crate::rio::buffer::{Refill, RioBuffer};
use crate::sys::Descriptor;

#[derive(Debug)]
pub struct RioStream<D> {
    descriptor: D,
    buf: RioBuffer,
}

impl<D: Descriptor> RioStream<D> {
    /// Bind a handle with the default [`RIO_BUFSIZE`] buffer.
    pub fn new(descriptor: D) -> Self {
        Self {
            descriptor,
            buf: RioBuffer::new(RIO_BUFSIZE),
        }
    }

    /// Bind a handle with a `capacity`-byte buffer.
    ///
    /// `capacity` must be in `1..=MAX_BUFSIZE`.
    pub fn with_capacity(descriptor: D, capacity: usize) -> Result<Self, RioError> {
        if capacity == 0 {
            return Err(RioError::InvalidArgument("buffer capacity must be non-zero"));
        }
        if capacity > MAX_BUFSIZE {
            return Err(RioError::InvalidArgument("buffer capacity exceeds MAX_BUFSIZE"));
        }
        Ok(Self {
            descriptor,
            buf: RioBuffer::new(capacity),
        })
    }

    pub fn with_config(descriptor: D, config: &RioConfig) -> Result<Self, RioError> {
        Self::with_capacity(descriptor, config.buffer_capacity)
    }

    /// Copy up to `dst.len()` bytes, refilling first if the buffer is empty.
    ///
    /// `Ok(0)` for a non-empty `dst` means end-of-stream. An error is
    /// reported before any byte is copied and leaves the handle unchanged.
    pub fn read(&mut self, dst: &mut [u8]) -> Result<usize, RioError> {
        if dst.is_empty() {
            return Ok(0);
        }
        if !self.fill()? {
            return Ok(0);
        }
        Ok(self.buf.take(dst))
    }

    /// Read until `dst` is full or the stream ends, through the buffer.
    ///
    /// A short count means end-of-stream.
    pub fn readnb(&mut self, dst: &mut [u8]) -> Result<usize, RioError> {
        let mut done = 0usize;
        while done < dst.len() {
            match self.read(&mut dst[done..])? {
                0 => break,
                n => done += n,
            }
        }
        Ok(done)
    }

    /// Make sure at least one unread byte is buffered.
    ///
    /// Returns `false` on end-of-stream.
    pub(crate) fn fill(&mut self) -> Result<bool, RioError> {
        if !self.buf.is_empty() {
            return Ok(true);
        }
        match self.buf.refill(&mut self.descriptor) {
            Ok(Refill::Filled(_)) => Ok(true),
            Ok(Refill::EndOfStream) => Ok(false),
            Err(e) => Err(RioError::from_errno(e)),
        }
    }

    /// Draw one byte; `None` on end-of-stream.
    pub(crate) fn read_byte(&mut self) -> Result<Option<u8>, RioError> {
        if !self.fill()? {
            return Ok(None);
        }
        Ok(self.buf.take_byte())
    }
}

impl<D> RioStream<D> {
    /// Internal buffer size.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Bytes buffered but not yet delivered.
    #[inline]
    pub fn unread(&self) -> usize {
        self.buf.unread()
    }

    /// View of the buffered, undelivered bytes.
    #[inline]
    pub fn buffered(&self) -> &[u8] {
        self.buf.buffered()
    }

    /// How many refills have delivered data so far.
    #[inline]
    pub fn refills(&self) -> u64 {
        self.buf.refills()
    }

    #[inline]
    pub fn descriptor(&self) -> &D {
        &self.descriptor
    }

    /// Unbind, returning the descriptor. Buffered bytes are discarded.
    pub fn into_inner(self) -> D {
        self.descriptor
    }
}
