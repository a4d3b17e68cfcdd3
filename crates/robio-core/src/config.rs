//! Stream handle configuration.
//!
//! The internal buffer size is read from the `ROBIO_BUFSIZE` environment
//! variable when [`RioConfig::from_env`] is used:
//! - unset, empty, non-numeric or `0`: the default [`RIO_BUFSIZE`] (8192).
//! - anything larger than [`MAX_BUFSIZE`] is clamped down to it.
//!
//! Explicit construction via [`RioConfig::with_buffer_capacity`] bypasses the
//! environment entirely and is not clamped; `RioStream::with_config` rejects
//! a capacity outside `1..=MAX_BUFSIZE`.

use crate::rio::RIO_BUFSIZE;

/// Name of the environment variable consulted by [`RioConfig::from_env`].
pub const BUFSIZE_ENV: &str = "ROBIO_BUFSIZE";

/// Upper bound on a stream handle's internal buffer (1 MiB).
pub const MAX_BUFSIZE: usize = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RioConfig {
    /// Capacity of the internal read buffer, in bytes.
    pub buffer_capacity: usize,
}

impl Default for RioConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: RIO_BUFSIZE,
        }
    }
}

impl RioConfig {
    #[must_use]
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    /// Build from `ROBIO_BUFSIZE`, falling back to defaults on bad input.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(BUFSIZE_ENV).ok().as_deref())
    }

    /// Parse an (optional) raw `ROBIO_BUFSIZE` value.
    #[must_use]
    pub fn from_env_value(raw: Option<&str>) -> Self {
        let buffer_capacity = raw
            .and_then(parse_bufsize_loose)
            .unwrap_or(RIO_BUFSIZE);
        Self { buffer_capacity }
    }
}

/// Accepts decimal with optional `_` separators and a `k`/`K` suffix.
fn parse_bufsize_loose(raw: &str) -> Option<usize> {
    let trimmed = raw.trim();
    let (digits, scale) = match trimmed.strip_suffix(['k', 'K']) {
        Some(rest) => (rest, 1024usize),
        None => (trimmed, 1usize),
    };
    let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
    let value = cleaned.parse::<usize>().ok()?.checked_mul(scale)?;
    if value == 0 {
        return None;
    }
    Some(value.min(MAX_BUFSIZE))
}
