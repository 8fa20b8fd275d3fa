// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 Nexlog Contributors

//! Remote log-ingestion sink.
//!
//! Best-effort delivery of log records to a network log-ingestion service
//! that must never propagate a failure back into the caller's business
//! logic. Delivery items are built on the calling flow (so the ambient
//! trace id is the caller's), enqueued without blocking on a bounded
//! queue, and transmitted exactly once each by a background worker. Any
//! failure is reported as a self-contained diagnostic block on stderr so
//! the original log content is never silently dropped.

pub mod config;
pub mod diagnostics;
pub mod item;
pub mod sink;
pub mod transport;

pub use config::{Credentials, RemoteConfig, RemoteCoords};
pub use item::DeliveryItem;
pub use sink::RemoteSink;
pub use transport::{HttpTransport, LogTransport, TransportError};
