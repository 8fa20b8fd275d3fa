// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 Nexlog Contributors

//! Trace identifier type.

use std::fmt;

/// Correlation identifier tying together all log events of one logical
/// operation.
///
/// The value is opaque; by convention it is a UUIDv4, but callers wiring a
/// correlation header from an upstream service may install any non-empty
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TraceId(String);

impl TraceId {
    /// Wrap an existing identifier, e.g. one extracted from a request header.
    pub fn new(id: impl Into<String>) -> Self {
        TraceId(id.into())
    }

    /// Generate a fresh random identifier (UUIDv4, 122 bits of randomness).
    pub fn generate() -> Self {
        TraceId(uuid::Uuid::new_v4().to_string())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TraceId {
    fn from(id: String) -> Self {
        TraceId(id)
    }
}

impl From<&str> for TraceId {
    fn from(id: &str) -> Self {
        TraceId(id.to_string())
    }
}
