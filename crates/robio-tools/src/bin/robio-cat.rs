//! Copy standard input to standard output with robust I/O.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use robio_core::{Fd, RioConfig};
use robio_tools::copy::{self, CopyMode, CopyOptions, MAXLINE, ToolError};
use robio_tools::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome};

/// Copy stdin to stdout, tolerating short counts and interrupted calls.
#[derive(Debug, Parser)]
#[command(name = "robio-cat")]
#[command(about = "Copy stdin to stdout using robust I/O")]
struct Cli {
    /// Read strategy.
    #[arg(long, value_enum, default_value_t = CopyMode::Raw)]
    mode: CopyMode,
    /// Internal buffer size for buffered modes (overrides ROBIO_BUFSIZE).
    #[arg(long)]
    bufsize: Option<usize>,
    /// Bytes per read call; maximum line length + 1 in `lines` mode.
    #[arg(long, default_value_t = MAXLINE)]
    chunk: usize,
    /// Write a JSONL run log to this path.
    #[arg(long)]
    log: Option<PathBuf>,
}

fn open_log(path: Option<&Path>) -> Result<Option<LogEmitter>, ToolError> {
    match path {
        Some(path) => Ok(Some(LogEmitter::to_file(path, "robio-cat")?)),
        None => Ok(None),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut emitter = match open_log(cli.log.as_deref()) {
        Ok(emitter) => emitter,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let mut config = RioConfig::from_env();
    if let Some(size) = cli.bufsize {
        config = config.with_buffer_capacity(size);
    }
    let opts = CopyOptions {
        mode: cli.mode,
        chunk: cli.chunk,
        config,
    };

    if let Some(em) = emitter.as_mut() {
        let _ = em.emit_entry(
            LogEntry::new("", LogLevel::Info, "copy_start")
                .with_mode(cli.mode.as_str())
                .with_fd(Fd::STDIN.raw())
                .with_details(serde_json::json!({
                    "chunk": opts.chunk,
                    "bufsize": opts.config.buffer_capacity,
                })),
        );
    }

    let started = Instant::now();
    let mut stdout = Fd::STDOUT;
    let result = copy::copy(Fd::STDIN, &mut stdout, &opts);
    let elapsed_ms = started.elapsed().as_millis() as u64;

    let code = match &result {
        Ok(report) => {
            if let Some(em) = emitter.as_mut() {
                let _ = em.emit_entry(
                    LogEntry::new("", LogLevel::Info, "copy_done")
                        .with_mode(cli.mode.as_str())
                        .with_bytes(report.bytes)
                        .with_outcome(Outcome::Eof)
                        .with_exit_code(0)
                        .with_duration_ms(elapsed_ms)
                        .with_details(serde_json::to_value(report).unwrap_or_default()),
                );
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            if let Some(em) = emitter.as_mut() {
                let mut entry = LogEntry::new("", LogLevel::Error, "rio_error")
                    .with_mode(cli.mode.as_str())
                    .with_bytes(err.copied())
                    .with_outcome(Outcome::Fail)
                    .with_exit_code(1)
                    .with_duration_ms(elapsed_ms)
                    .with_details(serde_json::json!({ "message": err.to_string() }));
                if let Some(op) = err.op() {
                    entry = entry.with_op(op);
                }
                if let Some(e) = err.errno() {
                    entry = entry.with_errno(e);
                }
                let _ = em.emit_entry(entry);
            }
            ExitCode::FAILURE
        }
    };

    if let Some(em) = emitter.as_mut() {
        let _ = em.flush();
    }
    code
}
