// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 Nexlog Contributors

//! Nexlog core: record model, formatters, sinks and the named-logger
//! registry.
//!
//! A log event flows through the pipeline as:
//!
//! 1. the caller emits through a [`Logger`] (usually via the `log_*!`
//!    macros, which capture source location),
//! 2. the logger checks its severity threshold,
//! 3. the configured [`Formatter`] renders the event once, reading the
//!    ambient trace id from `nexlog-context`,
//! 4. the rendered line is delivered to every configured [`Sink`] in
//!    insertion order.
//!
//! Sink failures are isolated: a failing sink is reported on stderr and the
//! remaining sinks still run; nothing propagates into the calling code.

pub mod configurator;
pub mod error;
pub mod format;
pub mod logger;
pub mod macros;
pub mod record;
pub mod registry;
pub mod rotating;
pub mod severity;
pub mod sink;

pub use configurator::LoggerConfigurator;
pub use error::{SinkError, SinkResult};
pub use format::{AccessFormatter, Formatter, TextFormatter, NO_TRACE_SENTINEL};
pub use logger::{Logger, LoggerCore};
pub use record::{CapturedError, LogRecord};
pub use registry::{
    get_logger, redundant_configure_count, server_access_logger, server_error_logger, shutdown,
    ConfigureOutcome,
};
pub use rotating::{FileSinkConfig, RotatingFileSink, RotationPolicy};
pub use severity::{InvalidSeverity, Severity};
pub use sink::{ConsoleSink, Sink};
