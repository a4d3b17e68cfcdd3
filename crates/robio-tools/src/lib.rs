//! Tooling layered on top of `robio-core`.
//!
//! This crate provides:
//! - [`copy`]: stream copy loops (raw, buffered and line-at-a-time) used by `robio-cat`
//! - [`fatal`]: abort-on-error wrappers for callers that prefer dying over handling errors
//! - [`structured_log`]: JSONL log records for copy runs and failures

#![forbid(unsafe_code)]

pub mod copy;
pub mod fatal;
pub mod structured_log;

pub use copy::{CopyMode, CopyReport, ToolError};
pub use structured_log::{LogEmitter, LogEntry, LogLevel};
