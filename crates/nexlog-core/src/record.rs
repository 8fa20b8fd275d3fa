// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 Nexlog Contributors

//! The immutable log-event snapshot.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::sync::Arc;

use chrono::{DateTime, Local};

use crate::severity::Severity;

/// An error captured at the log call site, rendered for sinks.
#[derive(Debug, Clone)]
pub struct CapturedError {
    /// Rust type name of the captured error.
    pub type_name: String,
    /// The error's display message.
    pub message: String,
    /// Formatted source chain plus, when available, a captured backtrace.
    pub details: String,
}

impl CapturedError {
    /// Capture `err` with its full source chain.
    ///
    /// A backtrace is appended when the process runs with backtraces
    /// enabled (`RUST_BACKTRACE`); otherwise only the chain is kept.
    pub fn from_error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        let mut details = String::new();
        let mut source = err.source();
        while let Some(cause) = source {
            details.push_str("Caused by: ");
            details.push_str(&cause.to_string());
            details.push('\n');
            source = cause.source();
        }
        let backtrace = Backtrace::capture();
        if backtrace.status() == BacktraceStatus::Captured {
            details.push_str("stack backtrace:\n");
            details.push_str(&backtrace.to_string());
        }
        CapturedError {
            type_name: std::any::type_name::<E>().to_string(),
            message: err.to_string(),
            details: details.trim_end().to_string(),
        }
    }

    /// Build from already-rendered parts, for callers that carry errors in
    /// a non-`std::error::Error` shape.
    pub fn from_parts(
        type_name: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        CapturedError {
            type_name: type_name.into(),
            message: message.into(),
            details: details.into(),
        }
    }
}

/// Immutable snapshot of one log event.
///
/// Created at the moment of the log call and never mutated afterwards;
/// sinks may read it concurrently. Extra fields keep the caller's insertion
/// order and are stored apart from the standard fields, so neither the
/// built-ins nor the trace id can leak into the extras section.
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// Wall-clock time of the log call.
    pub timestamp: DateTime<Local>,
    pub severity: Severity,
    /// Name of the logger the event was emitted through.
    pub logger: Arc<str>,
    pub message: String,
    /// Source module path (`module_path!()` form, `::`-separated).
    pub module: &'static str,
    pub line: u32,
    /// Enclosing function, when the call site supplies it.
    pub function: Option<&'static str>,
    /// Caller-supplied structured fields, in insertion order.
    pub extras: Vec<(String, String)>,
    /// Present only when the caller explicitly captured an error.
    pub exception: Option<CapturedError>,
    pub process_id: u32,
    /// Thread name, or the thread id's debug form for unnamed threads.
    pub thread: String,
}

impl LogRecord {
    /// Snapshot a new record at the current instant.
    pub fn new(
        severity: Severity,
        logger: Arc<str>,
        message: String,
        module: &'static str,
        line: u32,
    ) -> Self {
        let current = std::thread::current();
        LogRecord {
            timestamp: Local::now(),
            severity,
            logger,
            message,
            module,
            line,
            function: None,
            extras: Vec::new(),
            exception: None,
            process_id: std::process::id(),
            thread: current
                .name()
                .map(str::to_string)
                .unwrap_or_else(|| format!("{:?}", current.id())),
        }
    }

    /// Attach caller-supplied structured fields (insertion order kept).
    pub fn with_extras(mut self, extras: Vec<(String, String)>) -> Self {
        self.extras = extras;
        self
    }

    /// Attach an explicitly captured error.
    pub fn with_exception(mut self, exception: CapturedError) -> Self {
        self.exception = Some(exception);
        self
    }

    /// One-line summary used in failure diagnostics.
    pub fn summary(&self) -> String {
        format!("{} {}: {}", self.severity, self.logger, self.message)
    }
}
