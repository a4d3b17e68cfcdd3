//! # robio-core
//!
//! Robust I/O over raw file descriptors.
//!
//! A single `read(2)` or `write(2)` may move fewer bytes than asked for: a
//! pipe is momentarily drained, a socket delivers one segment, a signal lands
//! mid-call. This crate hides those short counts behind two layers:
//!
//! - [`rio::readn`] / [`rio::writen`]: unbuffered loops that keep issuing
//!   single-shot transfers until the request is satisfied, the stream ends,
//!   or a hard error occurs. `EINTR` is retried transparently.
//! - [`rio::RioStream`]: a buffered read handle with one fixed-size internal
//!   buffer, serving small requests and line reads from memory and refilling
//!   from the descriptor only when the buffer is exhausted.
//!
//! No `unsafe` code is permitted outside the [`sys`] seam.
//!
//! ```text
//! caller -> RioStream::{readnb, readlineb} -> RioStream::read -> refill -> Descriptor::read_once
//! caller -> readn / writen ------------------------------------------> Descriptor::{read,write}_once
//! ```

#![deny(unsafe_code)]

pub mod config;
pub mod errno;
pub mod error;
pub mod rio;
#[cfg(any(test, feature = "scripted"))]
pub mod scripted;
#[allow(unsafe_code)]
pub mod sys;

pub use config::RioConfig;
pub use error::RioError;
pub use rio::{Line, LineEnd, RIO_BUFSIZE, RioStream, readn, writen};
pub use sys::{Descriptor, Fd};

/// Result alias for robio operations.
pub type Result<T> = std::result::Result<T, RioError>;
