//! Abort-on-error `Rio_*` wrappers.
//!
//! Each wrapper calls its `rio_*` counterpart and, on `-1`, writes
//! `"<what> error: <strerror>\n"` to stderr and exits with status 1. A
//! successful result is returned unchanged. This is caller policy layered on
//! top of the core; nothing in `robio-core` ever terminates the process.

#![allow(non_snake_case)]

use std::ffi::{c_int, c_void};

use libc::{size_t, ssize_t};
use robio_core::{Fd, errno, writen};

use crate::rio_abi::{self, rio_t};

fn last_abi_errno() -> c_int {
    std::io::Error::last_os_error()
        .raw_os_error()
        .unwrap_or(errno::EIO)
}

/// Format the diagnostic `unix_error` prints.
pub fn unix_error_message(what: &str, err: c_int) -> String {
    format!("{what}: {}\n", errno::strerror(err))
}

fn unix_error(what: &str) -> ! {
    let msg = unix_error_message(what, last_abi_errno());
    // Best effort: nothing sensible remains to do if stderr is gone too.
    let mut stderr = Fd::STDERR;
    let _ = writen(&mut stderr, msg.as_bytes());
    std::process::exit(1);
}

#[inline]
fn or_exit(rc: ssize_t, what: &str) -> ssize_t {
    if rc < 0 {
        unix_error(what);
    }
    rc
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Rio_readn(fd: c_int, usrbuf: *mut c_void, n: size_t) -> ssize_t {
    or_exit(unsafe { rio_abi::rio_readn(fd, usrbuf, n) }, "Rio_readn error")
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Rio_writen(fd: c_int, usrbuf: *const c_void, n: size_t) {
    let rc = unsafe { rio_abi::rio_writen(fd, usrbuf, n) };
    if rc < 0 || rc as size_t != n {
        unix_error("Rio_writen error");
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Rio_readinitb(fd: c_int) -> *mut rio_t {
    let rp = unsafe { rio_abi::rio_readinitb(fd) };
    if rp.is_null() {
        unix_error("Rio_readinitb error");
    }
    rp
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Rio_readnb(rp: *mut rio_t, usrbuf: *mut c_void, n: size_t) -> ssize_t {
    or_exit(
        unsafe { rio_abi::rio_readnb(rp, usrbuf, n) },
        "Rio_readnb error",
    )
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Rio_readlineb(
    rp: *mut rio_t,
    usrbuf: *mut c_void,
    maxlen: size_t,
) -> ssize_t {
    or_exit(
        unsafe { rio_abi::rio_readlineb(rp, usrbuf, maxlen) },
        "Rio_readlineb error",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_matches_unix_error_format() {
        assert_eq!(
            unix_error_message("Rio_readn error", errno::EBADF),
            "Rio_readn error: Bad file descriptor\n"
        );
    }

    #[test]
    fn success_passes_through() {
        assert_eq!(or_exit(0, "unused"), 0);
        assert_eq!(or_exit(42, "unused"), 42);
    }
}
