// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 Nexlog Contributors

//! Tests for the `log_*!` macros.
//!
//! These live as integration tests (not a unit-test module) because they
//! use `nexlog-test-utils`, which itself depends on `nexlog-core`; inside
//! the unit-test build that yields two incompatible copies of the crate.

use nexlog_core::{log_critical, log_debug, log_error, log_info, log_warn};
use nexlog_core::{Logger, LoggerConfigurator, Severity};
use nexlog_test_utils::CaptureSink;
use std::sync::Arc;

fn logger_with_capture() -> (Logger, CaptureSink) {
    let capture = CaptureSink::new();
    let logger = LoggerConfigurator::new("app")
        .with_level(Severity::Debug)
        .with_sink(Arc::new(capture.clone()))
        .build_standalone();
    (logger, capture)
}

#[test]
fn test_plain_message() {
    let (logger, capture) = logger_with_capture();
    log_info!(logger, "hello {}", "world");
    let lines = capture.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("| hello world"));
    assert!(lines[0].contains(&format!("{}:", module_path!().replace("::", "."))));
}

#[test]
fn test_structured_fields_keep_order() {
    let (logger, capture) = logger_with_capture();
    log_info!(logger, { "user_id" => "u1", "action" => "login" }, "login ok");
    let lines = capture.lines();
    assert!(lines[0].ends_with("login ok | user_id=u1 | action=login"));
}

#[test]
fn test_err_capture_appends_exception_block() {
    let (logger, capture) = logger_with_capture();
    let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    log_error!(logger, err = err, "cannot write state");
    let lines = capture.lines();
    assert!(lines[0].contains("cannot write state"));
    assert!(lines[0].contains("denied"));
    let records = capture.records();
    assert!(records[0].exception.is_some());
}

#[test]
fn test_each_level_maps_to_its_severity() {
    let (logger, capture) = logger_with_capture();
    log_debug!(logger, "d");
    log_warn!(logger, "w");
    log_critical!(logger, "c");
    let records = capture.records();
    assert_eq!(records[0].severity, Severity::Debug);
    assert_eq!(records[1].severity, Severity::Warning);
    assert_eq!(records[2].severity, Severity::Critical);
}
