// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 Nexlog Contributors

//! Failure reporting for the remote path.
//!
//! A broken remote endpoint must never raise into application code and
//! must never silently swallow the log content. Every failed delivery is
//! written to stderr as one self-contained block.

use std::backtrace::Backtrace;
use std::io::Write;

use chrono::Local;

use crate::config::RemoteCoords;
use crate::item::DeliveryItem;
use crate::transport::TransportError;

/// Render the diagnostic block for one failed delivery.
///
/// Contains a timestamp, the failure's type and message, the destination's
/// logical coordinates (never credentials), a one-line summary of the
/// original record, and the stack trace of the delivery failure itself.
pub(crate) fn render_failure_block(
    coords: &RemoteCoords,
    error: &TransportError,
    item: &DeliveryItem,
) -> String {
    format!(
        "--- nexlog remote delivery failure ---\n\
         time: {}\n\
         error: {}: {}\n\
         destination: {}\n\
         record: {}\n\
         backtrace:\n{}\n\
         ---\n",
        Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        error.kind_name(),
        error,
        coords,
        item.summary(),
        Backtrace::force_capture(),
    )
}

/// Write the block to stderr in a single call so concurrent failures do
/// not interleave inside one block.
pub(crate) fn report_delivery_failure(
    coords: &RemoteCoords,
    error: &TransportError,
    item: &DeliveryItem,
) {
    let block = render_failure_block(coords, error, item);
    let mut stderr = std::io::stderr().lock();
    let _ = stderr.write_all(block.as_bytes());
}
