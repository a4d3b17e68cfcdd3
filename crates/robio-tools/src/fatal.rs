//! Abort-on-error wrappers.
//!
//! Small programs often have no better recovery from an I/O failure than
//! printing a message and exiting. These wrappers call the corresponding
//! `robio-core` operation and, on error, print `"<msg>: <error>"` to stderr
//! and exit with status 1. Successful results pass through unchanged.

use std::fmt::Display;

use robio_core::{Descriptor, RioError, RioStream, readn, writen};

/// Print `"{msg}: {err}"` to stderr and exit with status 1.
pub fn unix_error(msg: &str, err: &dyn Display) -> ! {
    eprintln!("{}", error_line(msg, err));
    std::process::exit(1);
}

fn error_line(msg: &str, err: &dyn Display) -> String {
    format!("{msg}: {err}")
}

/// Unwrap `res`, or report `msg` and exit.
pub fn or_exit<T>(res: Result<T, RioError>, msg: &str) -> T {
    match res {
        Ok(v) => v,
        Err(e) => unix_error(msg, &e),
    }
}

pub fn rio_readn_or_exit<D: Descriptor + ?Sized>(descriptor: &mut D, dst: &mut [u8]) -> usize {
    or_exit(readn(descriptor, dst), "Rio_readn error")
}

pub fn rio_writen_or_exit<D: Descriptor + ?Sized>(descriptor: &mut D, src: &[u8]) -> usize {
    or_exit(writen(descriptor, src), "Rio_writen error")
}

pub fn rio_readnb_or_exit<D: Descriptor>(stream: &mut RioStream<D>, dst: &mut [u8]) -> usize {
    or_exit(stream.readnb(dst), "Rio_readnb error")
}

pub fn rio_readlineb_or_exit<D: Descriptor>(stream: &mut RioStream<D>, dst: &mut [u8]) -> usize {
    or_exit(stream.readlineb(dst), "Rio_readlineb error")
}

#[cfg(test)]
mod tests {
    use super::*;
    use robio_core::errno;
    use robio_core::scripted::ScriptedDescriptor;

    #[test]
    fn error_line_format() {
        let err = RioError::from_errno(errno::EBADF);
        assert_eq!(
            error_line("Rio_readn error", &err),
            "Rio_readn error: Bad file descriptor (os error 9)"
        );
    }

    #[test]
    fn successes_pass_through() {
        let mut src = ScriptedDescriptor::from_bytes(b"abc\nrest").chunked(1);
        let mut buf = [0u8; 2];
        assert_eq!(rio_readn_or_exit(&mut src, &mut buf), 2);

        let mut stream = RioStream::new(src);
        let mut line = [0u8; 16];
        assert_eq!(rio_readlineb_or_exit(&mut stream, &mut line), 2);
        assert_eq!(&line[..2], b"c\n");
        assert_eq!(rio_readnb_or_exit(&mut stream, &mut line), 4);

        let mut sink = ScriptedDescriptor::sink().chunked(3);
        assert_eq!(rio_writen_or_exit(&mut sink, b"written"), 7);
        assert_eq!(sink.written(), b"written");
    }

    #[test]
    fn or_exit_returns_ok_value() {
        assert_eq!(or_exit(Ok::<_, RioError>(5usize), "unused"), 5);
    }
}
