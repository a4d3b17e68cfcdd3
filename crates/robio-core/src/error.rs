//! Error type for robust I/O operations.
//!
//! `EINTR` never appears here: it is retried internally. End-of-stream is a
//! value (a short count or `Ok(0)`), not an error.

use thiserror::Error;

use crate::errno;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RioError {
    /// A read or write failed with an errno other than `EINTR`.
    #[error("{} (os error {errno})", os_message(.errno))]
    Os { errno: i32 },
    /// A single-shot write accepted zero bytes; writes have no end-of-stream.
    #[error("write accepted zero bytes")]
    WriteZero,
    /// The caller violated an operation precondition.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

fn os_message(errno: &i32) -> &'static str {
    errno::strerror(*errno)
}

impl RioError {
    /// Build from a raw errno value.
    #[must_use]
    pub const fn from_errno(errno: i32) -> Self {
        Self::Os { errno }
    }

    /// The errno a C caller would observe for this failure.
    #[must_use]
    pub const fn errno(&self) -> i32 {
        match self {
            Self::Os { errno } => *errno,
            Self::WriteZero => errno::EIO,
            Self::InvalidArgument(_) => errno::EINVAL,
        }
    }
}

impl From<RioError> for std::io::Error {
    fn from(err: RioError) -> Self {
        match err {
            RioError::Os { errno } => std::io::Error::from_raw_os_error(errno),
            RioError::WriteZero => std::io::Error::new(std::io::ErrorKind::WriteZero, err),
            RioError::InvalidArgument(_) => {
                std::io::Error::new(std::io::ErrorKind::InvalidInput, err)
            }
        }
    }
}
