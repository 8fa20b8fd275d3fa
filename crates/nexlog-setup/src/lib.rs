// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 Nexlog Contributors

//! One-call initialization for Nexlog, plus the public facade applications
//! depend on.
//!
//! Most services initialize from the environment at startup and use the
//! re-exported macros afterwards:
//!
//! ```ignore
//! let logger = nexlog_setup::init_from_env()?;
//! log_info!(logger, "service starting");
//! // ...
//! nexlog_setup::shutdown();
//! ```
//!
//! Explicit configuration goes through [`LoggerConfigurator`]; both paths
//! share the once-only configure contract: the first configuration wins
//! and later attempts are a warned no-op.

pub mod init;
pub mod settings;

pub use init::{init_from_env, init_from_settings, init_logging, SetupError};
pub use settings::Settings;

// Facade re-exports so applications depend on one crate.
pub use nexlog_context::{
    clear, current, current_or_create, push, restore, scope, ContextError, RestoreToken, TraceId,
    TraceScope, WithTrace,
};
pub use nexlog_core::{
    get_logger, log_critical, log_debug, log_error, log_info, log_warn, server_access_logger,
    server_error_logger, shutdown, CapturedError, ConfigureOutcome, FileSinkConfig, Logger,
    LoggerConfigurator, RotationPolicy, Severity, Sink, SinkError,
};
pub use nexlog_remote::{Credentials, RemoteConfig, RemoteSink};
