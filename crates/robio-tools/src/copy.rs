//! Descriptor-to-descriptor copy loops.
//!
//! Three strategies, one per public read path of `robio-core`:
//! - `raw`: `readn` into a chunk buffer, `writen` it out
//! - `buffered`: the same through a `RioStream` with `readnb`
//! - `lines`: one `readlineb` per iteration, at most `chunk - 1` bytes each

use robio_core::config::MAX_BUFSIZE;
use robio_core::{Descriptor, RioConfig, RioError, RioStream, readn, writen};
use serde::Serialize;
use thiserror::Error;

/// Default chunk/line size of a copy.
pub const MAXLINE: usize = 8192;

/// Largest accepted chunk, the same bound as a stream buffer.
pub const MAX_CHUNK: usize = MAX_BUFSIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyMode {
    Raw,
    Buffered,
    Lines,
}

impl CopyMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Buffered => "buffered",
            Self::Lines => "lines",
        }
    }

    /// Name of the read operation this mode uses.
    #[must_use]
    pub const fn read_op(self) -> &'static str {
        match self {
            Self::Raw => "rio_readn",
            Self::Buffered => "rio_readnb",
            Self::Lines => "rio_readlineb",
        }
    }
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("{op} error: {source}")]
    Read {
        op: &'static str,
        #[source]
        source: RioError,
        /// Bytes copied before the failure.
        copied: u64,
    },
    #[error("write error: {source}")]
    Write {
        #[source]
        source: RioError,
        copied: u64,
    },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("log error: {0}")]
    Log(#[from] std::io::Error),
}

impl ToolError {
    /// Errno to report in logs, when the failure came from a descriptor.
    #[must_use]
    pub fn errno(&self) -> Option<i32> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source.errno()),
            Self::InvalidArgument(_) | Self::Log(_) => None,
        }
    }

    /// The robust I/O operation that failed, if any.
    #[must_use]
    pub fn op(&self) -> Option<&'static str> {
        match self {
            Self::Read { op, .. } => Some(*op),
            Self::Write { .. } => Some("rio_writen"),
            Self::InvalidArgument(_) | Self::Log(_) => None,
        }
    }

    /// Bytes successfully copied before the failure.
    #[must_use]
    pub fn copied(&self) -> u64 {
        match self {
            Self::Read { copied, .. } | Self::Write { copied, .. } => *copied,
            Self::InvalidArgument(_) | Self::Log(_) => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyOptions {
    pub mode: CopyMode,
    /// Chunk size for `raw`/`buffered`, line buffer size for `lines`.
    pub chunk: usize,
    pub config: RioConfig,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            mode: CopyMode::Raw,
            chunk: MAXLINE,
            config: RioConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CopyReport {
    /// Bytes written to the destination.
    pub bytes: u64,
    /// Read calls that returned data.
    pub reads: u64,
    /// Buffer refills, for the buffered modes.
    pub refills: Option<u64>,
}

/// Copy everything from `src` to `dst` until end-of-stream.
pub fn copy<R: Descriptor, W: Descriptor>(
    src: R,
    dst: &mut W,
    opts: &CopyOptions,
) -> Result<CopyReport, ToolError> {
    let min_chunk = if opts.mode == CopyMode::Lines { 2 } else { 1 };
    if opts.chunk < min_chunk {
        return Err(ToolError::InvalidArgument(format!(
            "chunk must be at least {min_chunk} for {} mode",
            opts.mode.as_str()
        )));
    }
    if opts.chunk > MAX_CHUNK {
        return Err(ToolError::InvalidArgument(format!(
            "chunk must be at most {MAX_CHUNK}"
        )));
    }
    let mut buf = vec![0u8; opts.chunk];
    let mut report = CopyReport::default();

    match opts.mode {
        CopyMode::Raw => {
            let mut src = src;
            pump(&mut report, dst, &mut buf, opts.mode, |b| readn(&mut src, b))?;
        }
        CopyMode::Buffered | CopyMode::Lines => {
            let mut stream = RioStream::with_config(src, &opts.config)
                .map_err(|e| match e {
                    RioError::InvalidArgument(msg) => ToolError::InvalidArgument(msg.to_string()),
                    other => ToolError::InvalidArgument(other.to_string()),
                })?;
            let lines = opts.mode == CopyMode::Lines;
            let res = pump(&mut report, dst, &mut buf, opts.mode, |b| {
                if lines {
                    stream.readlineb(b)
                } else {
                    stream.readnb(b)
                }
            });
            report.refills = Some(stream.refills());
            res?;
        }
    }
    Ok(report)
}

fn pump<W, F>(
    report: &mut CopyReport,
    dst: &mut W,
    buf: &mut [u8],
    mode: CopyMode,
    mut read: F,
) -> Result<(), ToolError>
where
    W: Descriptor,
    F: FnMut(&mut [u8]) -> Result<usize, RioError>,
{
    loop {
        let n = read(buf).map_err(|source| ToolError::Read {
            op: mode.read_op(),
            source,
            copied: report.bytes,
        })?;
        if n == 0 {
            return Ok(());
        }
        report.reads += 1;
        writen(dst, &buf[..n]).map_err(|source| ToolError::Write {
            source,
            copied: report.bytes,
        })?;
        report.bytes += n as u64;
    }
}
