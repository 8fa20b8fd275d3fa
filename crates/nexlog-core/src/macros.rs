// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 Nexlog Contributors

//! Logging macros.
//!
//! The macros capture `module_path!()` and `line!()` at the call site, so
//! the rendered location column points at the caller, not at this crate.
//!
//! ```ignore
//! log_info!(logger, "listening on {}", addr);
//! log_info!(logger, { "user_id" => user.id, "action" => "login" }, "login ok");
//! log_error!(logger, err = e, "failed to persist session");
//! ```

/// Shared expansion behind the per-level macros. Not part of the public
/// surface; use `log_info!` and friends.
#[doc(hidden)]
#[macro_export]
macro_rules! __log_event {
    ($logger:expr, $severity:expr, err = $err:expr, { $($key:expr => $value:expr),* $(,)? }, $($arg:tt)+) => {
        $logger.log(
            $severity,
            format!($($arg)+),
            module_path!(),
            line!(),
            vec![$(($key.to_string(), $value.to_string())),*],
            Some($crate::record::CapturedError::from_error(&$err)),
        )
    };
    ($logger:expr, $severity:expr, err = $err:expr, $($arg:tt)+) => {
        $logger.log(
            $severity,
            format!($($arg)+),
            module_path!(),
            line!(),
            ::std::vec::Vec::new(),
            Some($crate::record::CapturedError::from_error(&$err)),
        )
    };
    ($logger:expr, $severity:expr, { $($key:expr => $value:expr),* $(,)? }, $($arg:tt)+) => {
        $logger.log(
            $severity,
            format!($($arg)+),
            module_path!(),
            line!(),
            vec![$(($key.to_string(), $value.to_string())),*],
            ::std::option::Option::None,
        )
    };
    ($logger:expr, $severity:expr, $($arg:tt)+) => {
        $logger.log(
            $severity,
            format!($($arg)+),
            module_path!(),
            line!(),
            ::std::vec::Vec::new(),
            ::std::option::Option::None,
        )
    };
}

/// Log at DEBUG.
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($rest:tt)+) => {
        $crate::__log_event!($logger, $crate::Severity::Debug, $($rest)+)
    };
}

/// Log at INFO.
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($rest:tt)+) => {
        $crate::__log_event!($logger, $crate::Severity::Info, $($rest)+)
    };
}

/// Log at WARNING.
#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($rest:tt)+) => {
        $crate::__log_event!($logger, $crate::Severity::Warning, $($rest)+)
    };
}

/// Log at ERROR. Pass `err = expr` to capture the error's chain in the
/// record.
#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($rest:tt)+) => {
        $crate::__log_event!($logger, $crate::Severity::Error, $($rest)+)
    };
}

/// Log at CRITICAL.
#[macro_export]
macro_rules! log_critical {
    ($logger:expr, $($rest:tt)+) => {
        $crate::__log_event!($logger, $crate::Severity::Critical, $($rest)+)
    };
}
