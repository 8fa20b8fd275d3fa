// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 Nexlog Contributors

//! Remote-sink configuration.

use std::fmt;
use std::time::Duration;

/// Access credentials for the ingestion endpoint.
///
/// Kept out of `Debug`/`Display` output and out of failure diagnostics.
#[derive(Clone)]
pub struct Credentials {
    pub access_key_id: String,
    pub access_key_secret: String,
}

impl Credentials {
    pub fn new(access_key_id: impl Into<String>, access_key_secret: impl Into<String>) -> Self {
        Credentials {
            access_key_id: access_key_id.into(),
            access_key_secret: access_key_secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &"<redacted>")
            .field("access_key_secret", &"<redacted>")
            .finish()
    }
}

/// Full remote-sink configuration.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub endpoint: String,
    pub credentials: Credentials,
    /// Project identifier on the remote service.
    pub project: String,
    /// Log stream (logstore) within the project.
    pub logstore: String,
    /// Topic tag attached to every item; conventionally the app name.
    pub topic: String,
    /// Source tag attached to every item; defaults to the host name.
    pub source: String,
    /// Upper bound on one transmission attempt.
    pub request_timeout: Duration,
    /// Bounded queue size between callers and the delivery worker.
    pub queue_capacity: usize,
}

impl RemoteConfig {
    pub fn new(
        endpoint: impl Into<String>,
        credentials: Credentials,
        project: impl Into<String>,
        logstore: impl Into<String>,
    ) -> Self {
        RemoteConfig {
            endpoint: endpoint.into(),
            credentials,
            project: project.into(),
            logstore: logstore.into(),
            topic: String::new(),
            source: default_source(),
            request_timeout: Duration::from_secs(10),
            queue_capacity: 1024,
        }
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }

    /// The credential-free coordinates used in failure diagnostics.
    pub fn coords(&self) -> RemoteCoords {
        RemoteCoords {
            endpoint: self.endpoint.clone(),
            project: self.project.clone(),
            logstore: self.logstore.clone(),
            topic: self.topic.clone(),
        }
    }
}

/// Logical coordinates of the remote destination, safe to print.
#[derive(Debug, Clone)]
pub struct RemoteCoords {
    pub endpoint: String,
    pub project: String,
    pub logstore: String,
    pub topic: String,
}

impl fmt::Display for RemoteCoords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "endpoint={} project={} logstore={} topic={}",
            self.endpoint, self.project, self.logstore, self.topic
        )
    }
}

/// Best-effort host identification for the source tag.
fn default_source() -> String {
    std::env::var("HOSTNAME")
        .ok()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "unknown-source".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RemoteConfig {
        RemoteConfig::new(
            "https://ingest.example.com",
            Credentials::new("key-id", "key-secret"),
            "proj",
            "store",
        )
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let rendered = format!("{:?}", config());
        assert!(!rendered.contains("key-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_coords_exclude_credentials() {
        let coords = config().coords().to_string();
        assert!(coords.contains("project=proj"));
        assert!(!coords.contains("key-id"));
        assert!(!coords.contains("key-secret"));
    }

    #[test]
    fn test_queue_capacity_has_a_floor() {
        assert_eq!(config().with_queue_capacity(0).queue_capacity, 1);
    }
}
