// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 Nexlog Contributors

//! The logger handle and its emission path.

use std::io::Write;
use std::sync::{Arc, RwLock};

use chrono::Local;

use crate::error::SinkError;
use crate::format::{Formatter, TextFormatter};
use crate::record::{CapturedError, LogRecord};
use crate::severity::Severity;
use crate::sink::{ConsoleSink, Sink};

/// Immutable configuration a logger delivers through.
///
/// Built once and swapped wholesale on (re)configuration; log calls in
/// flight keep reading the core they started with, so a call always sees a
/// fully-old or fully-new sink set, never a mix. Sink order is insertion
/// order and equals delivery order.
pub struct LoggerCore {
    pub min_severity: Severity,
    pub sinks: Vec<Arc<dyn Sink>>,
    pub formatter: Arc<dyn Formatter>,
}

impl LoggerCore {
    /// Default core used before any configuration: console only, INFO.
    ///
    /// Exists so a logger obtained before startup configuration does not
    /// silently drop events.
    pub fn default_console() -> Self {
        LoggerCore {
            min_severity: Severity::Info,
            sinks: vec![Arc::new(ConsoleSink::new())],
            formatter: Arc::new(TextFormatter::new()),
        }
    }
}

/// Shared, atomically swappable slot holding a logger core.
pub(crate) type CoreCell = Arc<RwLock<Arc<LoggerCore>>>;

/// Cheap cloneable handle to a named logger.
///
/// Handles created for child names (`app.db`) share the parent's core
/// cell: they deliver through the same sinks and threshold.
#[derive(Clone)]
pub struct Logger {
    name: Arc<str>,
    core: CoreCell,
}

impl Logger {
    pub(crate) fn new(name: Arc<str>, core: CoreCell) -> Self {
        Logger { name, core }
    }

    /// Standalone logger over its own core, bypassing the registry. Used
    /// by tests and by embedders that manage their own lifecycle.
    pub fn standalone(name: impl Into<Arc<str>>, core: LoggerCore) -> Self {
        Logger {
            name: name.into(),
            core: Arc::new(RwLock::new(Arc::new(core))),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handle to the same sink set under a child name (`<name>.<suffix>`).
    pub fn child(&self, suffix: &str) -> Logger {
        Logger {
            name: Arc::from(format!("{}.{}", self.name, suffix)),
            core: Arc::clone(&self.core),
        }
    }

    fn snapshot(&self) -> Arc<LoggerCore> {
        match self.core.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    pub(crate) fn swap_core(&self, core: Arc<LoggerCore>) {
        match self.core.write() {
            Ok(mut guard) => *guard = core,
            Err(poisoned) => *poisoned.into_inner() = core,
        }
    }

    /// True when a record at `severity` would pass this logger's threshold.
    pub fn enabled(&self, severity: Severity) -> bool {
        severity >= self.snapshot().min_severity
    }

    /// Entry point used by the `log_*!` macros.
    pub fn log(
        &self,
        severity: Severity,
        message: String,
        module: &'static str,
        line: u32,
        extras: Vec<(String, String)>,
        exception: Option<CapturedError>,
    ) {
        let mut record = LogRecord::new(severity, Arc::clone(&self.name), message, module, line)
            .with_extras(extras);
        if let Some(exception) = exception {
            record = record.with_exception(exception);
        }
        self.emit(record);
    }

    /// Deliver one record: threshold gate, render once, fan out to every
    /// sink in order. A sink failure is reported on stderr and the
    /// remaining sinks still run; nothing raises into the caller.
    pub fn emit(&self, record: LogRecord) {
        let core = self.snapshot();
        if record.severity < core.min_severity {
            return;
        }
        let formatted = core.formatter.render(&record);
        for sink in &core.sinks {
            if let Err(error) = sink.deliver(&formatted, &record) {
                report_sink_failure(sink.name(), &error, &record);
            }
        }
    }

    /// Flush every sink; first error wins but all sinks are attempted.
    pub fn flush(&self) -> Result<(), SinkError> {
        let core = self.snapshot();
        let mut first_error = None;
        for sink in &core.sinks {
            if let Err(error) = sink.flush() {
                first_error.get_or_insert(error);
            }
        }
        match first_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Names of the configured sinks, in delivery order. Intended for
    /// startup diagnostics and tests.
    pub fn sink_names(&self) -> Vec<&'static str> {
        self.snapshot().sinks.iter().map(|sink| sink.name()).collect()
    }

    pub(crate) fn core_cell(&self) -> CoreCell {
        Arc::clone(&self.core)
    }
}

/// Per-sink failure diagnostic, written to stderr as one block so
/// concurrent flows do not interleave inside it.
fn report_sink_failure(sink_name: &str, error: &SinkError, record: &LogRecord) {
    let block = format!(
        "--- nexlog sink failure ---\n\
         time: {}\n\
         sink: {}\n\
         error: {}\n\
         record: {}\n\
         ---\n",
        Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        sink_name,
        error,
        record.summary(),
    );
    let mut stderr = std::io::stderr().lock();
    let _ = stderr.write_all(block.as_bytes());
}
