// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 Nexlog Contributors

//! Sink delivery errors.

use std::io;

use thiserror::Error;

/// Failure to deliver one formatted event to one sink.
///
/// Delivery errors are isolated per sink: the logger reports them on stderr
/// and continues with the remaining sinks; they never raise into the
/// logging call site.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("delivery queue full (capacity {capacity})")]
    QueueFull { capacity: usize },

    #[error("sink is shut down")]
    Closed,

    #[error("delivery failed: {0}")]
    Delivery(String),
}

pub type SinkResult<T> = Result<T, SinkError>;
