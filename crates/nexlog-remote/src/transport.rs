// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 Nexlog Contributors

//! Transmission seam between the remote sink and the ingestion service.

use serde::Serialize;
use thiserror::Error;

use crate::config::RemoteConfig;
use crate::item::DeliveryItem;

/// A transmission failure. Timeouts surface through the same path as any
/// other delivery error; the worker treats them identically.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("remote returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),
}

impl TransportError {
    /// Stable name of the failure kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            TransportError::Http(error) if error.is_timeout() => "TransportError::Timeout",
            TransportError::Http(_) => "TransportError::Http",
            TransportError::Status { .. } => "TransportError::Status",
            TransportError::Encode(_) => "TransportError::Encode",
        }
    }
}

/// One-shot delivery to the remote endpoint.
///
/// Implementations must apply a bounded timeout; the worker performs at
/// most one `send` per item and never retries.
pub trait LogTransport: Send + Sync {
    fn send(&self, items: &[DeliveryItem]) -> Result<(), TransportError>;

    /// Release the underlying session. Must be idempotent.
    fn close(&self) {}
}

#[derive(Serialize)]
struct PutLogsBody<'a> {
    topic: &'a str,
    source: &'a str,
    logs: &'a [DeliveryItem],
}

/// HTTP client for the ingestion service.
///
/// Posts a JSON body to
/// `{endpoint}/projects/{project}/logstores/{logstore}/logs` with the
/// access keys as headers; everything beyond that shape is the remote
/// side's concern.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    url: String,
    topic: String,
    source: String,
    access_key_id: String,
    access_key_secret: String,
}

impl HttpTransport {
    pub fn new(config: &RemoteConfig) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(HttpTransport {
            client,
            url: format!(
                "{}/projects/{}/logstores/{}/logs",
                config.endpoint.trim_end_matches('/'),
                config.project,
                config.logstore
            ),
            topic: config.topic.clone(),
            source: config.source.clone(),
            access_key_id: config.credentials.access_key_id.clone(),
            access_key_secret: config.credentials.access_key_secret.clone(),
        })
    }
}

impl LogTransport for HttpTransport {
    fn send(&self, items: &[DeliveryItem]) -> Result<(), TransportError> {
        let body = serde_json::to_vec(&PutLogsBody {
            topic: &self.topic,
            source: &self.source,
            logs: items,
        })?;

        let response = self
            .client
            .post(&self.url)
            .header("content-type", "application/json")
            .header("x-log-accesskeyid", &self.access_key_id)
            .header("x-log-accesskeysecret", &self.access_key_secret)
            .body(body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().unwrap_or_default();
            body.truncate(512);
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}
