//! Deterministic in-memory [`Descriptor`].
//!
//! Models the awkward behaviours of real descriptors on demand: short counts
//! (`chunked`), `EINTR` on every other call (`interrupt_alternate`), a hard
//! failure after a byte offset (`fail_after`) and a sink that stops accepting
//! bytes (`write_capacity`). Used by the unit tests, the fuzz targets and the
//! benchmarks, where a real pipe would make results timing dependent.

use crate::errno;
use crate::sys::Descriptor;

#[derive(Debug, Clone)]
pub struct ScriptedDescriptor {
    input: Vec<u8>,
    read_pos: usize,
    output: Vec<u8>,
    max_chunk: usize,
    write_capacity: usize,
    interrupt_alternate: bool,
    interrupt_next: bool,
    fail_after: Option<(usize, i32)>,
    read_calls: usize,
    write_calls: usize,
}

impl ScriptedDescriptor {
    /// A source that yields `data` and then end-of-stream.
    #[must_use]
    pub fn from_bytes(data: &[u8]) -> Self {
        Self {
            input: data.to_vec(),
            read_pos: 0,
            output: Vec::new(),
            max_chunk: usize::MAX,
            write_capacity: usize::MAX,
            interrupt_alternate: false,
            interrupt_next: false,
            fail_after: None,
            read_calls: 0,
            write_calls: 0,
        }
    }

    /// An empty source that accepts writes.
    #[must_use]
    pub fn sink() -> Self {
        Self::from_bytes(&[])
    }

    /// Cap every single-shot transfer at `max` bytes (`max >= 1`).
    #[must_use]
    pub fn chunked(mut self, max: usize) -> Self {
        self.max_chunk = max.max(1);
        self
    }

    /// Fail every other call with `EINTR`, starting with the first.
    #[must_use]
    pub fn interrupt_alternate(mut self) -> Self {
        self.interrupt_alternate = true;
        self.interrupt_next = true;
        self
    }

    /// Once `offset` bytes have moved in a direction, fail calls in that
    /// direction with `errno`.
    #[must_use]
    pub fn fail_after(mut self, offset: usize, errno: i32) -> Self {
        self.fail_after = Some((offset, errno));
        self
    }

    /// Accept at most `bytes` written bytes; later writes return `Ok(0)`.
    #[must_use]
    pub fn write_capacity(mut self, bytes: usize) -> Self {
        self.write_capacity = bytes;
        self
    }

    /// Bytes accepted by `write_once` so far.
    #[must_use]
    pub fn written(&self) -> &[u8] {
        &self.output
    }

    /// Bytes handed out by `read_once` so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.read_pos
    }

    /// Bytes not yet handed out.
    #[must_use]
    pub fn remaining_input(&self) -> &[u8] {
        &self.input[self.read_pos..]
    }

    #[must_use]
    pub fn read_calls(&self) -> usize {
        self.read_calls
    }

    #[must_use]
    pub fn write_calls(&self) -> usize {
        self.write_calls
    }

    fn take_interrupt(&mut self) -> bool {
        if !self.interrupt_alternate {
            return false;
        }
        let hit = self.interrupt_next;
        self.interrupt_next = !hit;
        hit
    }

    /// Bytes allowed before the configured failure offset, or the errno if
    /// the offset has been reached.
    fn budget(&self, moved: usize) -> Result<usize, i32> {
        match self.fail_after {
            Some((offset, e)) if moved >= offset => Err(e),
            Some((offset, _)) => Ok(offset - moved),
            None => Ok(usize::MAX),
        }
    }
}

impl Descriptor for ScriptedDescriptor {
    fn read_once(&mut self, buf: &mut [u8]) -> Result<usize, i32> {
        self.read_calls += 1;
        if self.take_interrupt() {
            return Err(errno::EINTR);
        }
        let budget = self.budget(self.read_pos)?;
        let available = self.input.len() - self.read_pos;
        let n = buf.len().min(available).min(self.max_chunk).min(budget);
        buf[..n].copy_from_slice(&self.input[self.read_pos..self.read_pos + n]);
        self.read_pos += n;
        Ok(n)
    }

    fn write_once(&mut self, buf: &[u8]) -> Result<usize, i32> {
        self.write_calls += 1;
        if self.take_interrupt() {
            return Err(errno::EINTR);
        }
        let budget = self.budget(self.output.len())?;
        let room = self.write_capacity.saturating_sub(self.output.len());
        let n = buf.len().min(room).min(self.max_chunk).min(budget);
        self.output.extend_from_slice(&buf[..n]);
        Ok(n)
    }
}
