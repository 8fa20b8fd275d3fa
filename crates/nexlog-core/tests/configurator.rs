// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 Nexlog Contributors

//! Tests for `LoggerConfigurator`.
//!
//! These live as integration tests (not a unit-test module) because they
//! use `nexlog-test-utils`, which itself depends on `nexlog-core`; inside
//! the unit-test build that yields two incompatible copies of the crate.

use nexlog_core::LoggerConfigurator;
use std::sync::Arc;

#[test]
fn test_zero_sinks_yields_exactly_one_console_sink() {
    let logger = LoggerConfigurator::new("app").build_standalone();
    assert_eq!(logger.sink_names(), vec!["console"]);
}

#[test]
fn test_sink_order_is_insertion_order() {
    let capture = nexlog_test_utils::CaptureSink::new();
    let logger = LoggerConfigurator::new("app")
        .with_console_sink()
        .with_sink(Arc::new(capture))
        .build_standalone();
    assert_eq!(logger.sink_names(), vec!["console", "capture"]);
}
