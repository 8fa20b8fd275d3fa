// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 Nexlog Contributors

//! Sink abstraction and the console sink.

use std::io::{self, Write};

use crate::error::SinkResult;
use crate::record::LogRecord;

/// A destination that durably or visibly delivers one formatted event.
///
/// A logger holds an ordered list of sink values and treats them uniformly;
/// any mutual exclusion a sink needs around its underlying resource (a file
/// handle, a network session) is the sink's private concern.
pub trait Sink: Send + Sync {
    /// Short stable name used in failure diagnostics.
    fn name(&self) -> &'static str;

    /// Deliver one event. `formatted` is the rendered line; `record` is the
    /// immutable snapshot for sinks that need structured access.
    fn deliver(&self, formatted: &str, record: &LogRecord) -> SinkResult<()>;

    /// Flush any buffered output.
    fn flush(&self) -> SinkResult<()> {
        Ok(())
    }

    /// Release owned resources. Must be idempotent: a second call is a
    /// no-op, not an error.
    fn shutdown(&self) {}
}

/// Writes newline-terminated lines to the process's stdout.
///
/// Every call is a complete write: the line is written and flushed before
/// `deliver` returns, so output is never held in a buffer indefinitely.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        ConsoleSink
    }
}

impl Sink for ConsoleSink {
    fn name(&self) -> &'static str {
        "console"
    }

    fn deliver(&self, formatted: &str, _record: &LogRecord) -> SinkResult<()> {
        let mut out = io::stdout().lock();
        out.write_all(formatted.as_bytes())?;
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(())
    }

    fn flush(&self) -> SinkResult<()> {
        io::stdout().lock().flush()?;
        Ok(())
    }
}
