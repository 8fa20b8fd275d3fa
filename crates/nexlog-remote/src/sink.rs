// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 Nexlog Contributors

//! The remote sink: bounded queue, single delivery attempt, idempotent
//! shutdown.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, SyncSender, TrySendError};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use nexlog_core::{LogRecord, Sink, SinkError, SinkResult};

use crate::config::{RemoteConfig, RemoteCoords};
use crate::diagnostics::report_delivery_failure;
use crate::item::DeliveryItem;
use crate::transport::{HttpTransport, LogTransport};

/// Sink that ships records to a remote ingestion service.
///
/// `deliver` builds the item on the calling flow and enqueues it without
/// blocking; a full queue is a bounded drop surfaced as
/// [`SinkError::QueueFull`]. A background worker drains the queue and makes
/// exactly one transmission attempt per item; failures are reported on
/// stderr, never raised.
///
/// The sink owns the transport session. [`Sink::shutdown`] releases it
/// exactly once: the queue is closed, the worker drains what is already
/// queued and exits, and the transport is closed. Calling shutdown twice is
/// a no-op, and dropping the sink shuts it down as well, so the session is
/// released even on unwinding exits.
pub struct RemoteSink {
    coords: RemoteCoords,
    capacity: usize,
    sender: Mutex<Option<SyncSender<DeliveryItem>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
    shut_down: AtomicBool,
}

impl RemoteSink {
    /// Build the sink with the real HTTP transport.
    pub fn new(config: RemoteConfig) -> SinkResult<Self> {
        let transport =
            HttpTransport::new(&config).map_err(|e| SinkError::Delivery(e.to_string()))?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Build the sink over an arbitrary transport; the seam tests use to
    /// simulate endpoint failures.
    pub fn with_transport(
        config: RemoteConfig,
        transport: Arc<dyn LogTransport>,
    ) -> SinkResult<Self> {
        let (sender, receiver) = std::sync::mpsc::sync_channel(config.queue_capacity);
        let coords = config.coords();
        let worker_coords = coords.clone();
        let worker = std::thread::Builder::new()
            .name("nexlog-remote".to_string())
            .spawn(move || worker_loop(receiver, transport, worker_coords))
            .map_err(SinkError::Io)?;

        Ok(RemoteSink {
            coords,
            capacity: config.queue_capacity,
            sender: Mutex::new(Some(sender)),
            worker: Mutex::new(Some(worker)),
            shut_down: AtomicBool::new(false),
        })
    }

    /// The credential-free destination coordinates.
    pub fn coords(&self) -> &RemoteCoords {
        &self.coords
    }

    fn shutdown_inner(&self) {
        if self.shut_down.swap(true, Ordering::SeqCst) {
            return;
        }
        // Dropping the sender ends the worker's recv loop after it drains
        // everything already queued.
        if let Ok(mut sender) = self.sender.lock() {
            sender.take();
        }
        let handle = match self.worker.lock() {
            Ok(mut worker) => worker.take(),
            Err(_) => None,
        };
        if let Some(handle) = handle {
            let _ = handle.join();
        }
    }
}

fn worker_loop(
    receiver: Receiver<DeliveryItem>,
    transport: Arc<dyn LogTransport>,
    coords: RemoteCoords,
) {
    while let Ok(item) = receiver.recv() {
        if let Err(error) = transport.send(std::slice::from_ref(&item)) {
            report_delivery_failure(&coords, &error, &item);
        }
    }
    transport.close();
}

impl Sink for RemoteSink {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn deliver(&self, _formatted: &str, record: &LogRecord) -> SinkResult<()> {
        let item = DeliveryItem::from_record(record);
        let sender = self
            .sender
            .lock()
            .map_err(|_| SinkError::Delivery("remote queue lock poisoned".to_string()))?;
        let Some(sender) = sender.as_ref() else {
            return Err(SinkError::Closed);
        };
        match sender.try_send(item) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(SinkError::QueueFull {
                capacity: self.capacity,
            }),
            Err(TrySendError::Disconnected(_)) => Err(SinkError::Closed),
        }
    }

    fn shutdown(&self) {
        self.shutdown_inner();
    }
}

impl Drop for RemoteSink {
    fn drop(&mut self) {
        self.shutdown_inner();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credentials;
    use crate::transport::TransportError;
    use nexlog_core::Severity;
    use std::sync::atomic::AtomicUsize;

    struct RecordingTransport {
        sent: Mutex<Vec<DeliveryItem>>,
        attempts: AtomicUsize,
        closes: AtomicUsize,
        fail: bool,
    }

    impl RecordingTransport {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(RecordingTransport {
                sent: Mutex::new(Vec::new()),
                attempts: AtomicUsize::new(0),
                closes: AtomicUsize::new(0),
                fail,
            })
        }
    }

    impl LogTransport for RecordingTransport {
        fn send(&self, items: &[DeliveryItem]) -> Result<(), TransportError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(TransportError::Status {
                    status: 503,
                    body: "unavailable".to_string(),
                });
            }
            if let Ok(mut sent) = self.sent.lock() {
                sent.extend(items.iter().cloned());
            }
            Ok(())
        }

        fn close(&self) {
            self.closes.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn config() -> RemoteConfig {
        RemoteConfig::new(
            "https://ingest.example.com",
            Credentials::new("id", "secret"),
            "proj",
            "store",
        )
        .with_topic("app")
    }

    fn record(message: &str) -> LogRecord {
        LogRecord::new(
            Severity::Info,
            Arc::from("app"),
            message.to_string(),
            module_path!(),
            line!(),
        )
    }

    #[test]
    fn test_successful_delivery_reaches_transport() {
        let transport = RecordingTransport::new(false);
        let sink = RemoteSink::with_transport(config(), Arc::clone(&transport) as _)
            .expect("spawn worker");
        sink.deliver("line", &record("shipped")).expect("enqueue");
        sink.shutdown();
        let sent = transport.sent.lock().expect("sent");
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].field("message"), Some("shipped"));
    }

    #[test]
    fn test_transport_failure_does_not_raise_and_is_not_retried() {
        let transport = RecordingTransport::new(true);
        let sink = RemoteSink::with_transport(config(), Arc::clone(&transport) as _)
            .expect("spawn worker");
        // The failing endpoint must not surface through the log call path.
        sink.deliver("line", &record("lost upstream")).expect("enqueue");
        sink.shutdown();
        assert_eq!(transport.attempts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_full_queue_is_a_bounded_drop() {
        let transport = RecordingTransport::new(false);
        let sink = RemoteSink::with_transport(
            config().with_queue_capacity(1),
            Arc::clone(&transport) as _,
        )
        .expect("spawn worker");
        // Saturate: with capacity 1 at least one of a quick burst must
        // either land or be dropped as QueueFull, never block.
        let mut outcomes = Vec::new();
        for i in 0..64 {
            outcomes.push(sink.deliver("line", &record(&format!("burst {i}"))));
        }
        assert!(outcomes.iter().all(|r| matches!(
            r,
            Ok(()) | Err(SinkError::QueueFull { capacity: 1 })
        )));
        sink.shutdown();
    }

    #[test]
    fn test_shutdown_drains_then_closes_exactly_once() {
        let transport = RecordingTransport::new(false);
        let sink = RemoteSink::with_transport(config(), Arc::clone(&transport) as _)
            .expect("spawn worker");
        for i in 0..5 {
            let _ = sink.deliver("line", &record(&format!("queued {i}")));
        }
        sink.shutdown();
        sink.shutdown();
        assert_eq!(transport.closes.load(Ordering::SeqCst), 1);
        // Everything accepted before shutdown was attempted.
        let sent = transport.sent.lock().expect("sent");
        assert_eq!(
            sent.len(),
            transport.attempts.load(Ordering::SeqCst),
            "every drained item got exactly one attempt"
        );
    }

    #[test]
    fn test_deliver_after_shutdown_reports_closed() {
        let transport = RecordingTransport::new(false);
        let sink = RemoteSink::with_transport(config(), Arc::clone(&transport) as _)
            .expect("spawn worker");
        sink.shutdown();
        assert!(matches!(
            sink.deliver("line", &record("late")),
            Err(SinkError::Closed)
        ));
    }
}
