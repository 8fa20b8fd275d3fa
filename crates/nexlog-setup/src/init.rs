// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 Nexlog Contributors

//! Startup wiring from [`Settings`] to an installed logger.

use std::str::FromStr;
use std::sync::Arc;

use nexlog_core::{
    FileSinkConfig, InvalidSeverity, Logger, LoggerConfigurator, Severity, SinkError,
};
use nexlog_remote::RemoteSink;

use crate::settings::Settings;

/// Errors surfaced while turning settings into a running configuration.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    InvalidLevel(#[from] InvalidSeverity),

    /// A sink could not be constructed, e.g. the log file path is not
    /// writable.
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Translate settings into a configurator without touching the
/// process-wide registry.
///
/// An enabled remote sink with incomplete coordinates is skipped with a
/// single stderr warning rather than aborting startup; logging must come
/// up even when the ingestion credentials are absent.
pub fn configurator_from_settings(settings: &Settings) -> Result<LoggerConfigurator, SetupError> {
    let level = Severity::from_str(&settings.level)?;
    let mut configurator = LoggerConfigurator::new(&settings.app_name).with_level(level);

    if settings.console_enabled {
        configurator = configurator.with_console_sink();
    }
    if settings.file_enabled {
        configurator = configurator.with_file_sink(FileSinkConfig::new(&settings.file_path))?;
    }
    if settings.remote_enabled {
        match settings.remote_config() {
            Some(remote) => {
                configurator = configurator.with_sink(Arc::new(RemoteSink::new(remote)?));
            }
            None => warn(
                "remote sink enabled but endpoint, access keys, project or logstore \
                 are missing; continuing without it",
            ),
        }
    }
    if settings.server_log_redirect {
        configurator = configurator.with_server_log_redirect();
    }
    Ok(configurator)
}

/// Install the configuration described by `settings` and return the
/// application logger.
pub fn init_from_settings(settings: &Settings) -> Result<Logger, SetupError> {
    let (logger, _outcome) = configurator_from_settings(settings)?.configure();
    Ok(logger)
}

/// Read `NEXLOG_*` from the environment and install the resulting
/// configuration. The usual first call in `main`.
pub fn init_from_env() -> Result<Logger, SetupError> {
    init_from_settings(&Settings::from_env())
}

/// Install an explicitly built configuration.
///
/// Equivalent to `configurator.configure().0`; exists so `main` reads as
/// one verb for either startup path.
pub fn init_logging(configurator: LoggerConfigurator) -> Logger {
    configurator.configure().0
}

fn warn(message: &str) {
    eprintln!("nexlog: warning: {message}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_build_a_console_logger() {
        let logger = configurator_from_settings(&Settings::defaults())
            .expect("defaults are valid")
            .build_standalone();
        assert_eq!(logger.sink_names(), vec!["console"]);
    }

    #[test]
    fn test_file_sink_follows_settings() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut settings = Settings::defaults();
        settings.file_enabled = true;
        settings.file_path = dir
            .path()
            .join("app.log")
            .to_string_lossy()
            .into_owned();
        let logger = configurator_from_settings(&settings)
            .expect("file path is writable")
            .build_standalone();
        assert_eq!(logger.sink_names(), vec!["console", "file"]);
    }

    #[test]
    fn test_incomplete_remote_coordinates_are_skipped() {
        let mut settings = Settings::defaults();
        settings.remote_enabled = true;
        settings.remote_endpoint = Some("https://ingest.example.com".to_string());
        // No keys, project or logstore: the remote sink must be dropped,
        // not turned into a startup error.
        let logger = configurator_from_settings(&settings)
            .expect("incomplete remote coordinates are not fatal")
            .build_standalone();
        assert_eq!(logger.sink_names(), vec!["console"]);
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        let mut settings = Settings::defaults();
        settings.level = "LOUD".to_string();
        assert!(matches!(
            configurator_from_settings(&settings),
            Err(SetupError::InvalidLevel(_))
        ));
    }

    #[test]
    fn test_unwritable_file_path_fails_eagerly() {
        let mut settings = Settings::defaults();
        settings.file_enabled = true;
        settings.file_path = "/proc/nexlog-cannot-write-here/app.log".to_string();
        assert!(matches!(
            configurator_from_settings(&settings),
            Err(SetupError::Sink(_))
        ));
    }
}
