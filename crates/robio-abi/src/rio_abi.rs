//! ABI layer for the robust I/O functions.
//!
//! Validates pointers and lengths, builds safe slices, then delegates to
//! `robio_core::rio`.

use std::ffi::{c_int, c_void};

use libc::{size_t, ssize_t};
use robio_core::{Fd, RioError, RioStream, errno, readn, writen};

use crate::util::{check_buffer, set_abi_errno, ssize_ret};

/// Opaque buffered read handle.
#[allow(non_camel_case_types)]
#[derive(Debug)]
pub struct rio_t {
    stream: RioStream<Fd>,
}

unsafe fn user_slice_mut<'a>(ptr: *mut c_void, len: usize) -> &'a mut [u8] {
    if len == 0 {
        return &mut [];
    }
    // SAFETY: caller checked non-null; C contract says `len` bytes are writable.
    unsafe { std::slice::from_raw_parts_mut(ptr.cast::<u8>(), len) }
}

unsafe fn user_slice<'a>(ptr: *const c_void, len: usize) -> &'a [u8] {
    if len == 0 {
        return &[];
    }
    // SAFETY: caller checked non-null; C contract says `len` bytes are readable.
    unsafe { std::slice::from_raw_parts(ptr.cast::<u8>(), len) }
}

// ---------------------------------------------------------------------------
// rio_readn / rio_writen
// ---------------------------------------------------------------------------

/// Read up to `n` bytes, retrying short counts and `EINTR`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rio_readn(fd: c_int, usrbuf: *mut c_void, n: size_t) -> ssize_t {
    if let Some(e) = check_buffer(usrbuf, n) {
        unsafe { set_abi_errno(e) };
        return -1;
    }
    let dst = unsafe { user_slice_mut(usrbuf, n) };
    unsafe { ssize_ret(readn(&mut Fd::new(fd), dst)) }
}

/// Write exactly `n` bytes, retrying short counts and `EINTR`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rio_writen(fd: c_int, usrbuf: *const c_void, n: size_t) -> ssize_t {
    if let Some(e) = check_buffer(usrbuf, n) {
        unsafe { set_abi_errno(e) };
        return -1;
    }
    let src = unsafe { user_slice(usrbuf, n) };
    unsafe { ssize_ret(writen(&mut Fd::new(fd), src)) }
}

// ---------------------------------------------------------------------------
// rio_readinitb / rio_free
// ---------------------------------------------------------------------------

/// Bind a buffered handle to `fd` with the default buffer size.
///
/// Returns null with `errno = EBADF` for a negative descriptor.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rio_readinitb(fd: c_int) -> *mut rio_t {
    unsafe { rio_readinitb_sized(fd, robio_core::RIO_BUFSIZE) }
}

/// Bind a buffered handle to `fd` with a `bufsize`-byte buffer.
///
/// Returns null with `errno = EINVAL` when `bufsize` is 0 or above
/// `MAX_BUFSIZE`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rio_readinitb_sized(fd: c_int, bufsize: size_t) -> *mut rio_t {
    if fd < 0 {
        unsafe { set_abi_errno(errno::EBADF) };
        return std::ptr::null_mut();
    }
    match RioStream::with_capacity(Fd::new(fd), bufsize) {
        Ok(stream) => Box::into_raw(Box::new(rio_t { stream })),
        Err(e) => {
            unsafe { set_abi_errno(e.errno()) };
            std::ptr::null_mut()
        }
    }
}

/// Release a handle from `rio_readinitb`. The descriptor stays open.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rio_free(rp: *mut rio_t) {
    if rp.is_null() {
        return;
    }
    // SAFETY: non-null `rp` came from `Box::into_raw` in `rio_readinitb_sized`.
    drop(unsafe { Box::from_raw(rp) });
}

// ---------------------------------------------------------------------------
// rio_readnb / rio_readlineb
// ---------------------------------------------------------------------------

unsafe fn handle<'a>(rp: *mut rio_t) -> Result<&'a mut rio_t, RioError> {
    // SAFETY: non-null `rp` is a live handle exclusively used by this call.
    unsafe { rp.as_mut() }.ok_or(RioError::from_errno(errno::EFAULT))
}

/// Buffered read of up to `n` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rio_readnb(rp: *mut rio_t, usrbuf: *mut c_void, n: size_t) -> ssize_t {
    if let Some(e) = check_buffer(usrbuf, n) {
        unsafe { set_abi_errno(e) };
        return -1;
    }
    let res = unsafe { handle(rp) }.and_then(|rio| {
        let dst = unsafe { user_slice_mut(usrbuf, n) };
        rio.stream.readnb(dst)
    });
    unsafe { ssize_ret(res) }
}

/// Read one NUL-terminated line of at most `maxlen - 1` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rio_readlineb(
    rp: *mut rio_t,
    usrbuf: *mut c_void,
    maxlen: size_t,
) -> ssize_t {
    if let Some(e) = check_buffer(usrbuf, maxlen) {
        unsafe { set_abi_errno(e) };
        return -1;
    }
    let res = unsafe { handle(rp) }.and_then(|rio| {
        let dst = unsafe { user_slice_mut(usrbuf, maxlen) };
        rio.stream.readlineb(dst)
    });
    unsafe { ssize_ret(res) }
}
