//! Line reads over a [`RioStream`].
//!
//! Bytes are drawn one at a time from the internal buffer, so a long input
//! still costs one `read(2)` per buffer-full rather than one per byte.

use crate::error::RioError;
use crate::rio::NEWLINE;
use crate::rio::stream::RioStream;
use crate::sys::Descriptor;

/// Why a line read stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnd {
    /// The newline was read and stored as the last byte.
    Newline,
    /// The destination filled up first; the rest of the line is still unread.
    Truncated,
    /// The stream ended. With `len == 0` nothing was read at all.
    EndOfStream,
}

/// Result of [`RioStream::read_line`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    /// Bytes stored, excluding the NUL terminator.
    pub len: usize,
    pub end: LineEnd,
}

impl Line {
    /// `true` only for end-of-stream before any byte was read.
    #[inline]
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.len == 0 && self.end == LineEnd::EndOfStream
    }
}

impl<D: Descriptor> RioStream<D> {
    /// Read one line into `dst`, NUL-terminated, returning the byte count.
    ///
    /// At most `dst.len() - 1` bytes are stored. `Ok(0)` means end-of-stream
    /// before any byte. A line longer than the destination is split across
    /// calls with nothing lost; use [`read_line`](Self::read_line) to tell
    /// the two cases apart.
    pub fn readlineb(&mut self, dst: &mut [u8]) -> Result<usize, RioError> {
        self.read_line(dst).map(|line| line.len)
    }

    /// Like [`readlineb`](Self::readlineb), also reporting why it stopped.
    pub fn read_line(&mut self, dst: &mut [u8]) -> Result<Line, RioError> {
        let Some(limit) = dst.len().checked_sub(1) else {
            return Err(RioError::InvalidArgument(
                "line buffer needs room for the terminator",
            ));
        };

        let mut len = 0usize;
        let end = loop {
            if len == limit {
                break LineEnd::Truncated;
            }
            match self.read_byte()? {
                Some(byte) => {
                    dst[len] = byte;
                    len += 1;
                    if byte == NEWLINE {
                        break LineEnd::Newline;
                    }
                }
                None => break LineEnd::EndOfStream,
            }
        };
        dst[len] = 0;
        Ok(Line { len, end })
    }
}
