// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 Nexlog Contributors

//! The per-record delivery payload.

use nexlog_core::{LogRecord, NO_TRACE_SENTINEL};
use serde::Serialize;

/// One record serialized into the remote service's item shape.
///
/// `contents` is an ordered field list:
/// `message, level, logger, module, function, line, process_id, thread_id,
/// trace_id, extra_<key>…, exception?`. Caller-supplied extras are prefixed
/// with `extra_` so they can never collide with the built-in fields.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryItem {
    /// Unix timestamp (seconds) of the original record.
    pub timestamp: i64,
    pub contents: Vec<(String, String)>,
}

impl DeliveryItem {
    /// Build the item on the calling flow, so the ambient trace id is the
    /// caller's, not the delivery worker's.
    pub fn from_record(record: &LogRecord) -> Self {
        let trace_id = nexlog_context::current()
            .map(|id| id.to_string())
            .unwrap_or_else(|| NO_TRACE_SENTINEL.to_string());

        let mut contents = vec![
            ("message".to_string(), record.message.clone()),
            ("level".to_string(), record.severity.to_string()),
            ("logger".to_string(), record.logger.to_string()),
            ("module".to_string(), record.module.to_string()),
            (
                "function".to_string(),
                record.function.unwrap_or("-").to_string(),
            ),
            ("line".to_string(), record.line.to_string()),
            ("process_id".to_string(), record.process_id.to_string()),
            ("thread_id".to_string(), record.thread.clone()),
            ("trace_id".to_string(), trace_id),
        ];

        for (key, value) in &record.extras {
            contents.push((format!("extra_{key}"), value.clone()));
        }

        if let Some(exception) = &record.exception {
            let mut rendered = format!("{}: {}", exception.type_name, exception.message);
            if !exception.details.is_empty() {
                rendered.push('\n');
                rendered.push_str(&exception.details);
            }
            contents.push(("exception".to_string(), rendered));
        }

        DeliveryItem {
            timestamp: record.timestamp.timestamp(),
            contents,
        }
    }

    /// Value of a named field, for diagnostics and tests.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.contents
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// One-line summary of the original record for failure diagnostics.
    pub fn summary(&self) -> String {
        format!(
            "{} {}: {}",
            self.field("level").unwrap_or("?"),
            self.field("logger").unwrap_or("?"),
            self.field("message").unwrap_or(""),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexlog_core::{CapturedError, Severity};
    use std::sync::Arc;

    fn record() -> LogRecord {
        LogRecord::new(
            Severity::Warning,
            Arc::from("app.db"),
            "slow query".to_string(),
            "app::db::pool",
            77,
        )
    }

    #[test]
    fn test_field_order_matches_contract() {
        nexlog_context::clear();
        let item = DeliveryItem::from_record(
            &record().with_extras(vec![("query_ms".to_string(), "950".to_string())]),
        );
        let keys: Vec<&str> = item.contents.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "message",
                "level",
                "logger",
                "module",
                "function",
                "line",
                "process_id",
                "thread_id",
                "trace_id",
                "extra_query_ms",
            ]
        );
    }

    #[test]
    fn test_trace_id_read_on_calling_flow() {
        nexlog_context::clear();
        let _guard = nexlog_context::scope(nexlog_context::TraceId::new("req-1"));
        let item = DeliveryItem::from_record(&record());
        assert_eq!(item.field("trace_id"), Some("req-1"));
    }

    #[test]
    fn test_missing_trace_id_uses_sentinel() {
        nexlog_context::clear();
        let item = DeliveryItem::from_record(&record());
        assert_eq!(item.field("trace_id"), Some(NO_TRACE_SENTINEL));
    }

    #[test]
    fn test_exception_is_last_field() {
        nexlog_context::clear();
        let rec = record()
            .with_extras(vec![("a".to_string(), "1".to_string())])
            .with_exception(CapturedError::from_parts("io::Error", "disk full", ""));
        let item = DeliveryItem::from_record(&rec);
        let (last_key, last_value) = item.contents.last().expect("non-empty contents");
        assert_eq!(last_key, "exception");
        assert_eq!(last_value, "io::Error: disk full");
    }

    #[test]
    fn test_summary_names_the_original_record() {
        nexlog_context::clear();
        let item = DeliveryItem::from_record(&record());
        assert_eq!(item.summary(), "WARNING app.db: slow query");
    }
}
