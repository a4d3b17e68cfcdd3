//! Descriptor seam.
//!
//! [`Descriptor`] is the one place the core touches the operating system: a
//! single-shot read and a single-shot write, each returning the byte count or
//! a raw errno. Everything above this module is safe code that loops over
//! these two calls.
//!
//! [`Fd`] implements the trait over `libc::read` / `libc::write`. It is a
//! plain borrowed descriptor number: it never closes what it wraps.

use std::ffi::c_void;
use std::os::fd::{AsRawFd, RawFd};

use crate::errno;

/// A source/sink of bytes with `read(2)`/`write(2)` semantics.
///
/// Each call performs exactly one transfer attempt. `Ok(0)` from
/// [`read_once`](Descriptor::read_once) is end-of-stream; `Err(EINTR)` means
/// the call was interrupted before any data moved.
pub trait Descriptor {
    fn read_once(&mut self, buf: &mut [u8]) -> Result<usize, i32>;

    fn write_once(&mut self, buf: &[u8]) -> Result<usize, i32>;
}

impl<D: Descriptor + ?Sized> Descriptor for &mut D {
    #[inline]
    fn read_once(&mut self, buf: &mut [u8]) -> Result<usize, i32> {
        (**self).read_once(buf)
    }

    #[inline]
    fn write_once(&mut self, buf: &[u8]) -> Result<usize, i32> {
        (**self).write_once(buf)
    }
}

/// An already-open OS file descriptor.
///
/// Opening and closing are the caller's business; dropping an `Fd` is a
/// no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fd(RawFd);

impl Fd {
    pub const STDIN: Fd = Fd(libc::STDIN_FILENO);
    pub const STDOUT: Fd = Fd(libc::STDOUT_FILENO);
    pub const STDERR: Fd = Fd(libc::STDERR_FILENO);

    #[inline]
    #[must_use]
    pub const fn new(fd: RawFd) -> Self {
        Self(fd)
    }

    #[inline]
    #[must_use]
    pub const fn raw(self) -> RawFd {
        self.0
    }

    /// Borrow the descriptor number of any open handle.
    #[must_use]
    pub fn of<T: AsRawFd + ?Sized>(handle: &T) -> Self {
        Self(handle.as_raw_fd())
    }
}

impl AsRawFd for Fd {
    fn as_raw_fd(&self) -> RawFd {
        self.0
    }
}

fn last_host_errno(default_errno: i32) -> i32 {
    std::io::Error::last_os_error()
        .raw_os_error()
        .unwrap_or(default_errno)
}

/// Convert a `ssize_t` return into a byte count or errno.
#[inline]
fn syscall_result(ret: isize) -> Result<usize, i32> {
    if ret < 0 {
        Err(last_host_errno(errno::EIO))
    } else {
        Ok(ret as usize)
    }
}

impl Descriptor for Fd {
    #[inline]
    fn read_once(&mut self, buf: &mut [u8]) -> Result<usize, i32> {
        // SAFETY: `buf` is a live, exclusively borrowed region of `buf.len()` bytes.
        let ret = unsafe { libc::read(self.0, buf.as_mut_ptr().cast::<c_void>(), buf.len()) };
        syscall_result(ret)
    }

    #[inline]
    fn write_once(&mut self, buf: &[u8]) -> Result<usize, i32> {
        // SAFETY: `buf` is a live region of `buf.len()` readable bytes.
        let ret = unsafe { libc::write(self.0, buf.as_ptr().cast::<c_void>(), buf.len()) };
        syscall_result(ret)
    }
}
