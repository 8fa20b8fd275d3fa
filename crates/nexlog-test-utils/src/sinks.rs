// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 Nexlog Contributors

//! Test sinks.

use std::sync::{Arc, Mutex};

use nexlog_core::{LogRecord, Sink, SinkError, SinkResult};

/// Sink that captures every delivered event for later assertions.
///
/// Cloning shares the underlying buffer, so a test can keep one handle and
/// hand the other to a logger.
#[derive(Clone, Default)]
pub struct CaptureSink {
    captured: Arc<Mutex<Vec<(String, LogRecord)>>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        CaptureSink::default()
    }

    /// All formatted lines delivered so far, in delivery order.
    pub fn lines(&self) -> Vec<String> {
        match self.captured.lock() {
            Ok(entries) => entries.iter().map(|(line, _)| line.clone()).collect(),
            Err(poisoned) => poisoned
                .into_inner()
                .iter()
                .map(|(line, _)| line.clone())
                .collect(),
        }
    }

    /// All record snapshots delivered so far, in delivery order.
    pub fn records(&self) -> Vec<LogRecord> {
        match self.captured.lock() {
            Ok(entries) => entries.iter().map(|(_, record)| record.clone()).collect(),
            Err(poisoned) => poisoned
                .into_inner()
                .iter()
                .map(|(_, record)| record.clone())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines().is_empty()
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.captured.lock() {
            entries.clear();
        }
    }
}

impl Sink for CaptureSink {
    fn name(&self) -> &'static str {
        "capture"
    }

    fn deliver(&self, formatted: &str, record: &LogRecord) -> SinkResult<()> {
        let mut entries = self
            .captured
            .lock()
            .map_err(|_| SinkError::Delivery("capture buffer poisoned".to_string()))?;
        entries.push((formatted.to_string(), record.clone()));
        Ok(())
    }
}

/// Sink whose delivery always fails with the configured message.
pub struct FailingSink {
    message: &'static str,
}

impl FailingSink {
    pub fn new(message: &'static str) -> Self {
        FailingSink { message }
    }
}

impl Sink for FailingSink {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn deliver(&self, _formatted: &str, _record: &LogRecord) -> SinkResult<()> {
        Err(SinkError::Delivery(self.message.to_string()))
    }
}
