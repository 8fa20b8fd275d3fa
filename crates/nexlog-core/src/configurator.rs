// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 Nexlog Contributors

//! Fluent, self-consuming builder for the startup logger configuration.

use std::sync::Arc;

use crate::error::SinkResult;
use crate::format::{AccessFormatter, TextFormatter};
use crate::logger::{Logger, LoggerCore};
use crate::registry::{self, ConfigureOutcome};
use crate::rotating::{FileSinkConfig, RotatingFileSink};
use crate::severity::Severity;
use crate::sink::{ConsoleSink, Sink};

/// Builds the application logger as an ordered set of sinks plus a minimum
/// severity, then installs it process-wide.
///
/// Every `with_*` step consumes the builder, so a half-built configuration
/// can never be shared across threads:
///
/// ```ignore
/// let logger = LoggerConfigurator::new("app")
///     .with_level(Severity::Debug)
///     .with_console_sink()
///     .with_file_sink(FileSinkConfig::new("logs/app.log"))?
///     .configure();
/// ```
pub struct LoggerConfigurator {
    app_name: String,
    min_severity: Severity,
    sinks: Vec<Arc<dyn Sink>>,
    server_log_redirect: bool,
}

impl LoggerConfigurator {
    pub fn new(app_name: impl Into<String>) -> Self {
        LoggerConfigurator {
            app_name: app_name.into(),
            min_severity: Severity::Info,
            sinks: Vec::new(),
            server_log_redirect: false,
        }
    }

    pub fn with_level(mut self, min_severity: Severity) -> Self {
        self.min_severity = min_severity;
        self
    }

    /// Append a console sink (stdout).
    pub fn with_console_sink(mut self) -> Self {
        self.sinks.push(Arc::new(ConsoleSink::new()));
        self
    }

    /// Append a rotating file sink. Opening the file can fail (permissions,
    /// unwritable path), which surfaces here rather than at log time.
    pub fn with_file_sink(mut self, config: FileSinkConfig) -> SinkResult<Self> {
        self.sinks.push(Arc::new(RotatingFileSink::new(config)?));
        Ok(self)
    }

    /// Append an already-built sink, e.g. a remote sink.
    pub fn with_sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Also install `<app>.server.access` / `<app>.server.error` loggers
    /// over a copy of this sink set, so an embedded HTTP server's own
    /// access and error lines flow through the same sinks and carry the
    /// ambient trace id.
    pub fn with_server_log_redirect(mut self) -> Self {
        self.server_log_redirect = true;
        self
    }

    /// Install this configuration process-wide and return the application
    /// logger.
    ///
    /// Building with zero explicit sinks yields exactly one default console
    /// sink, never a logger that drops everything. If the process is
    /// already configured this is a no-op that emits a one-time warning and
    /// returns the existing logger (see [`ConfigureOutcome`]).
    pub fn configure(self) -> (Logger, ConfigureOutcome) {
        let mut sinks = self.sinks;
        if sinks.is_empty() {
            sinks.push(Arc::new(ConsoleSink::new()));
        }

        let (server_access, server_error) = if self.server_log_redirect {
            (
                Some(LoggerCore {
                    min_severity: self.min_severity,
                    sinks: sinks.clone(),
                    formatter: Arc::new(AccessFormatter::new()),
                }),
                Some(LoggerCore {
                    min_severity: self.min_severity,
                    sinks: sinks.clone(),
                    formatter: Arc::new(TextFormatter::new()),
                }),
            )
        } else {
            (None, None)
        };

        let core = LoggerCore {
            min_severity: self.min_severity,
            sinks,
            formatter: Arc::new(TextFormatter::new()),
        };
        registry::install(&self.app_name, core, server_access, server_error)
    }

    /// Build without touching the process-wide registry.
    ///
    /// Useful in tests and in libraries that embed their own logger; the
    /// zero-sinks default applies here too.
    pub fn build_standalone(self) -> Logger {
        let mut sinks = self.sinks;
        if sinks.is_empty() {
            sinks.push(Arc::new(ConsoleSink::new()));
        }
        Logger::standalone(
            self.app_name,
            LoggerCore {
                min_severity: self.min_severity,
                sinks,
                formatter: Arc::new(TextFormatter::new()),
            },
        )
    }
}
