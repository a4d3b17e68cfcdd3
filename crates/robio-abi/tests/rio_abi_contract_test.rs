//! C ABI contract checks for the rio_* exports over real socket pairs.

use std::ffi::c_int;
use std::io::Write;
use std::os::fd::AsRawFd;
use std::os::unix::net::UnixStream;

use robio_abi::rio_abi::{
    rio_free, rio_readinitb, rio_readinitb_sized, rio_readlineb, rio_readn, rio_readnb,
    rio_writen,
};
use robio_core::errno;

fn last_errno() -> c_int {
    std::io::Error::last_os_error().raw_os_error().unwrap_or(0)
}

#[test]
fn readn_writen_round_trip() {
    let (a, b) = UnixStream::pair().unwrap();
    let msg = b"robust payload";
    let wrote = unsafe { rio_writen(a.as_raw_fd(), msg.as_ptr().cast(), msg.len()) };
    assert_eq!(wrote, msg.len() as isize);
    drop(a);

    let mut buf = [0u8; 64];
    let got = unsafe { rio_readn(b.as_raw_fd(), buf.as_mut_ptr().cast(), buf.len()) };
    assert_eq!(got, msg.len() as isize);
    assert_eq!(&buf[..msg.len()], msg);
}

#[test]
fn readlineb_sequence_matches_c_contract() {
    let (mut a, b) = UnixStream::pair().unwrap();
    a.write_all(b"abc\ndef\n").unwrap();
    drop(a);

    let rp = unsafe { rio_readinitb(b.as_raw_fd()) };
    assert!(!rp.is_null());
    let mut line = [0xEEu8; 80];
    let n = unsafe { rio_readlineb(rp, line.as_mut_ptr().cast(), line.len()) };
    assert_eq!(n, 4);
    assert_eq!(&line[..5], b"abc\n\0");
    let n = unsafe { rio_readlineb(rp, line.as_mut_ptr().cast(), line.len()) };
    assert_eq!(n, 4);
    assert_eq!(&line[..5], b"def\n\0");
    let n = unsafe { rio_readlineb(rp, line.as_mut_ptr().cast(), line.len()) };
    assert_eq!(n, 0);
    unsafe { rio_free(rp) };
}

#[test]
fn readlineb_truncates_then_resumes() {
    let (mut a, b) = UnixStream::pair().unwrap();
    a.write_all(b"abcdef\n").unwrap();
    drop(a);

    let rp = unsafe { rio_readinitb_sized(b.as_raw_fd(), 2) };
    assert!(!rp.is_null());
    let mut line = [0u8; 4];
    assert_eq!(
        unsafe { rio_readlineb(rp, line.as_mut_ptr().cast(), line.len()) },
        3
    );
    assert_eq!(&line, b"abc\0");
    assert_eq!(
        unsafe { rio_readlineb(rp, line.as_mut_ptr().cast(), line.len()) },
        4
    );
    assert_eq!(&line, b"def\n");
    unsafe { rio_free(rp) };
}

#[test]
fn readnb_after_line() {
    let (mut a, b) = UnixStream::pair().unwrap();
    a.write_all(b"size 3\nxyz").unwrap();
    drop(a);

    let rp = unsafe { rio_readinitb(b.as_raw_fd()) };
    let mut line = [0u8; 16];
    assert_eq!(
        unsafe { rio_readlineb(rp, line.as_mut_ptr().cast(), line.len()) },
        7
    );
    let mut body = [0u8; 8];
    assert_eq!(
        unsafe { rio_readnb(rp, body.as_mut_ptr().cast(), body.len()) },
        3
    );
    assert_eq!(&body[..3], b"xyz");
    unsafe { rio_free(rp) };
}

#[test]
fn readlineb_zero_maxlen_is_einval() {
    let (_a, b) = UnixStream::pair().unwrap();
    let rp = unsafe { rio_readinitb(b.as_raw_fd()) };
    let mut line = [0u8; 1];
    assert_eq!(unsafe { rio_readlineb(rp, line.as_mut_ptr().cast(), 0) }, -1);
    assert_eq!(last_errno(), errno::EINVAL);
    unsafe { rio_free(rp) };
}

#[test]
fn writen_to_closed_peer_sets_epipe() {
    let (a, b) = UnixStream::pair().unwrap();
    drop(b);
    let rc = unsafe { rio_writen(a.as_raw_fd(), b"x".as_ptr().cast(), 1) };
    assert_eq!(rc, -1);
    assert_eq!(last_errno(), errno::EPIPE);
}

#[test]
fn readn_bad_fd_sets_ebadf() {
    let mut buf = [0u8; 4];
    let rc = unsafe { rio_readn(-1, buf.as_mut_ptr().cast(), buf.len()) };
    assert_eq!(rc, -1);
    assert_eq!(last_errno(), errno::EBADF);
}
