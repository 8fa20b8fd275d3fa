// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 Nexlog Contributors

//! Log severity levels.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Minimum-severity threshold and per-record level.
///
/// Ordered from least to most severe; a logger delivers a record when
/// `record.severity >= logger.min_severity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

/// Error for unrecognized severity names.
#[derive(Error, Debug)]
#[error("invalid severity: {0}. Expected one of: DEBUG, INFO, WARNING, ERROR, CRITICAL")]
pub struct InvalidSeverity(pub String);

impl Severity {
    /// Upper-case name as it appears in rendered lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }

    /// Name padded to the stable 7-wide column of the text line format.
    ///
    /// Width 7 is a minimum, matching the original `%-7s` convention:
    /// `CRITICAL` stays 8 characters rather than being truncated.
    pub fn padded(&self) -> String {
        format!("{:<7}", self.as_str())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = InvalidSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(Severity::Debug),
            "INFO" => Ok(Severity::Info),
            "WARNING" | "WARN" => Ok(Severity::Warning),
            "ERROR" => Ok(Severity::Error),
            "CRITICAL" => Ok(Severity::Critical),
            _ => Err(InvalidSeverity(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
        assert!(Severity::Error < Severity::Critical);
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("info".parse::<Severity>().unwrap(), Severity::Info);
        assert_eq!("WARNING".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("warn".parse::<Severity>().unwrap(), Severity::Warning);
        assert!("verbose".parse::<Severity>().is_err());
    }

    #[test]
    fn test_padded_width() {
        assert_eq!(Severity::Info.padded(), "INFO   ");
        assert_eq!(Severity::Warning.padded(), "WARNING");
        // Minimum width, not truncation.
        assert_eq!(Severity::Critical.padded(), "CRITICAL");
    }
}
