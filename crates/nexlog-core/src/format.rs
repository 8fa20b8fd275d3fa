// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 Nexlog Contributors

//! Record rendering.
//!
//! Formatting is deterministic and side-effect free apart from reading the
//! ambient trace id. The text line format is stable and parseable:
//!
//! ```text
//! TIMESTAMP.mmm | LEVEL   | abbreviated.module:line | [TRACE_ID] | message | key1=value1 ...
//! ```

use std::fmt::Write as _;

use crate::record::LogRecord;

/// Rendered in place of the trace id when the flow has none.
///
/// A fixed sentinel rather than an empty bracket pair, so downstream
/// parsers always find a token between the brackets.
pub const NO_TRACE_SENTINEL: &str = "No-Trace-ID";

/// Renders a [`LogRecord`] into one text line (plus trailing exception
/// block when present).
pub trait Formatter: Send + Sync {
    fn render(&self, record: &LogRecord) -> String;
}

/// The default pipe-separated text formatter.
#[derive(Debug, Clone, Default)]
pub struct TextFormatter {
    _private: (),
}

impl TextFormatter {
    pub fn new() -> Self {
        TextFormatter::default()
    }
}

impl Formatter for TextFormatter {
    fn render(&self, record: &LogRecord) -> String {
        let trace = nexlog_context::current();
        let trace = trace
            .as_ref()
            .map(|id| id.as_str())
            .unwrap_or(NO_TRACE_SENTINEL);

        let mut line = format!(
            "{} | {} | {}:{} | [{}] | {}",
            record.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
            record.severity.padded(),
            abbreviate_module(record.module),
            record.line,
            trace,
            record.message,
        );

        for (key, value) in &record.extras {
            let _ = write!(line, " | {key}={value}");
        }

        // Exception blocks are appended whenever the caller captured one,
        // regardless of severity.
        if let Some(exception) = &record.exception {
            let _ = write!(line, "\n{}: {}", exception.type_name, exception.message);
            if !exception.details.is_empty() {
                let _ = write!(line, "\n{}", exception.details);
            }
        }

        line
    }
}

/// Formatter for an embedded HTTP server's access lines.
///
/// Prefixes the ambient trace id so one correlation id ties the server's
/// own access logging to the application logs for the same request. The
/// access line itself (client, request line, status) arrives as the record
/// message.
#[derive(Debug, Clone, Default)]
pub struct AccessFormatter {
    _private: (),
}

impl AccessFormatter {
    pub fn new() -> Self {
        AccessFormatter::default()
    }
}

impl Formatter for AccessFormatter {
    fn render(&self, record: &LogRecord) -> String {
        let trace = nexlog_context::current();
        let trace = trace
            .as_ref()
            .map(|id| id.as_str())
            .unwrap_or(NO_TRACE_SENTINEL);
        format!("[{}] | {}", trace, record.message)
    }
}

/// Compress a module path for the location column.
///
/// `::` separators are normalized to dots first. A dotted path longer than
/// 3 segments keeps its last segment and reduces every earlier segment to
/// its first character, but only for purely alphabetic segments; mixed
/// segments such as `v1` stay whole. Shorter paths are left untouched.
pub fn abbreviate_module(module: &str) -> String {
    let dotted = module.replace("::", ".");
    let parts: Vec<&str> = dotted.split('.').collect();
    if parts.len() <= 3 {
        return dotted;
    }

    let mut abbreviated: Vec<String> = parts[..parts.len() - 1]
        .iter()
        .map(|part| {
            if part.chars().all(char::is_alphabetic) {
                part.chars().take(1).collect()
            } else {
                (*part).to_string()
            }
        })
        .collect();
    abbreviated.push(parts[parts.len() - 1].to_string());
    abbreviated.join(".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::CapturedError;
    use crate::severity::Severity;
    use std::sync::Arc;

    fn record(message: &str) -> LogRecord {
        LogRecord::new(
            Severity::Info,
            Arc::from("app"),
            message.to_string(),
            "app.services.users",
            42,
        )
    }

    #[test]
    fn test_abbreviation_rules() {
        assert_eq!(
            abbreviate_module("src.app.api.v1.endpoints"),
            "s.a.a.v1.endpoints"
        );
        assert_eq!(abbreviate_module("app.services.users"), "app.services.users");
        assert_eq!(abbreviate_module("main"), "main");
    }

    #[test]
    fn test_rust_module_paths_are_normalized() {
        assert_eq!(
            abbreviate_module("nexlog::core::format::tests"),
            "n.c.f.tests"
        );
        assert_eq!(abbreviate_module("app::server"), "app.server");
    }

    #[test]
    fn test_line_shape_and_sentinel() {
        nexlog_context::clear();
        let line = TextFormatter::new().render(&record("hello"));
        let fields: Vec<&str> = line.split(" | ").collect();
        assert_eq!(fields.len(), 5);
        assert_eq!(fields[1], "INFO   ");
        assert_eq!(fields[2], "app.services.users:42");
        assert_eq!(fields[3], "[No-Trace-ID]");
        assert_eq!(fields[4], "hello");
        // Millisecond precision: "YYYY-mm-dd HH:MM:SS.mmm".
        assert_eq!(fields[0].len(), 23);
    }

    #[test]
    fn test_trace_id_is_rendered_when_present() {
        nexlog_context::clear();
        let _guard = nexlog_context::scope(nexlog_context::TraceId::new("req-7"));
        let line = TextFormatter::new().render(&record("hello"));
        assert!(line.contains("| [req-7] |"));
    }

    #[test]
    fn test_extras_render_in_insertion_order() {
        nexlog_context::clear();
        let rec = record("login ok").with_extras(vec![
            ("user_id".to_string(), "u1".to_string()),
            ("action".to_string(), "login".to_string()),
        ]);
        let line = TextFormatter::new().render(&rec);
        assert!(line.ends_with("login ok | user_id=u1 | action=login"));
    }

    #[test]
    fn test_exception_block_appended_below_error_severity() {
        nexlog_context::clear();
        let rec = record("lookup failed").with_exception(CapturedError::from_parts(
            "std::io::Error",
            "permission denied",
            "Caused by: mount is read-only",
        ));
        // The record is INFO; the block must still be appended.
        let line = TextFormatter::new().render(&rec);
        let mut lines = line.lines();
        assert!(lines.next().is_some_and(|l| l.ends_with("lookup failed")));
        assert_eq!(lines.next(), Some("std::io::Error: permission denied"));
        assert_eq!(lines.next(), Some("Caused by: mount is read-only"));
    }

    #[test]
    fn test_access_formatter_prefixes_trace_id() {
        nexlog_context::clear();
        let rec = record(r#"127.0.0.1 "GET /health HTTP/1.1" 200"#);
        assert_eq!(
            AccessFormatter::new().render(&rec),
            r#"[No-Trace-ID] | 127.0.0.1 "GET /health HTTP/1.1" 200"#
        );
        let _guard = nexlog_context::scope(nexlog_context::TraceId::new("req-9"));
        assert!(AccessFormatter::new()
            .render(&rec)
            .starts_with("[req-9] | "));
    }
}
