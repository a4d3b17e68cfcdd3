//! Shared internal utilities for ABI adapters.

use std::ffi::c_int;

use libc::ssize_t;
use robio_core::{RioError, errno};

#[inline]
pub(crate) unsafe fn set_abi_errno(val: c_int) {
    // SAFETY: `__errno_location` always returns the calling thread's errno slot.
    unsafe { *libc::__errno_location() = val };
}

/// Map a core result onto the `ssize_t` / errno convention.
#[inline]
pub(crate) unsafe fn ssize_ret(res: Result<usize, RioError>) -> ssize_t {
    match res {
        Ok(n) => n as ssize_t,
        Err(e) => {
            unsafe { set_abi_errno(e.errno()) };
            -1
        }
    }
}

/// Reject lengths a `ssize_t` return cannot represent, and null buffers
/// with a non-zero length.
///
/// Returns the errno to report, if any.
#[inline]
pub(crate) fn check_buffer<T>(ptr: *const T, len: usize) -> Option<c_int> {
    if len > isize::MAX as usize {
        return Some(errno::EINVAL);
    }
    if len > 0 && ptr.is_null() {
        return Some(errno::EFAULT);
    }
    None
}
