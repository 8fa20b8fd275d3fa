// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 Nexlog Contributors

//! Time-rotating file sink.
//!
//! Appends to a single active file and rotates when a time boundary is
//! crossed: the active file is renamed with the period's date suffix, old
//! backups beyond the retention count are pruned oldest first, and a fresh
//! file is opened. The whole sequence runs under the sink's mutex and the
//! triggering line is written to the new file, so no line is lost across
//! the boundary.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Local};

use crate::error::{SinkError, SinkResult};
use crate::record::LogRecord;
use crate::sink::Sink;

/// When the active file rolls over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationPolicy {
    /// Rotate at midnight, local time.
    Daily,
    /// Rotate on the hour.
    Hourly,
}

impl RotationPolicy {
    /// Key identifying the period `at` falls into; doubles as the backup
    /// filename suffix. Lexical order equals chronological order.
    fn period_key(&self, at: &DateTime<Local>) -> String {
        match self {
            RotationPolicy::Daily => at.format("%Y-%m-%d").to_string(),
            RotationPolicy::Hourly => at.format("%Y-%m-%d_%H").to_string(),
        }
    }
}

/// Configuration for [`RotatingFileSink`].
#[derive(Debug, Clone)]
pub struct FileSinkConfig {
    /// Path of the active log file; parent directories are created when
    /// missing.
    pub path: PathBuf,
    pub policy: RotationPolicy,
    /// How many rotated files to retain; the oldest are deleted first.
    pub backup_count: usize,
}

impl FileSinkConfig {
    /// Daily rotation retaining 30 backups, matching the defaults services
    /// have relied on historically.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSinkConfig {
            path: path.into(),
            policy: RotationPolicy::Daily,
            backup_count: 30,
        }
    }

    pub fn with_policy(mut self, policy: RotationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_backup_count(mut self, backup_count: usize) -> Self {
        self.backup_count = backup_count;
        self
    }
}

struct FileState {
    file: Option<File>,
    period: String,
    closed: bool,
}

/// Appending file sink with time-based rotation and bounded retention.
pub struct RotatingFileSink {
    config: FileSinkConfig,
    state: Mutex<FileState>,
}

impl RotatingFileSink {
    /// Open (or create) the active file, creating parent directories.
    pub fn new(config: FileSinkConfig) -> SinkResult<Self> {
        Self::new_at(config, Local::now())
    }

    /// Like [`RotatingFileSink::new`] but with an explicit clock, so tests
    /// can start the sink inside a chosen period.
    fn new_at(config: FileSinkConfig, now: DateTime<Local>) -> SinkResult<Self> {
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = open_append(&config.path)?;
        let period = config.policy.period_key(&now);
        Ok(RotatingFileSink {
            config,
            state: Mutex::new(FileState {
                file: Some(file),
                period,
                closed: false,
            }),
        })
    }

    /// Write one line with `now` as the rotation clock. Split out from
    /// [`Sink::deliver`] so tests can drive the sink across a simulated
    /// day boundary.
    fn write_at(&self, now: DateTime<Local>, line: &str) -> SinkResult<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| SinkError::Delivery("file sink lock poisoned".to_string()))?;

        if state.closed {
            return Err(SinkError::Closed);
        }

        let key = self.config.policy.period_key(&now);
        if key != state.period {
            self.rotate(&mut state, key)?;
        }

        let file = state.file.as_mut().ok_or(SinkError::Closed)?;
        file.write_all(line.as_bytes())?;
        file.write_all(b"\n")?;
        file.flush()?;
        Ok(())
    }

    /// Close the active file, rename it after the period that just ended,
    /// prune old backups, open a fresh file.
    fn rotate(&self, state: &mut FileState, new_period: String) -> SinkResult<()> {
        if let Some(file) = state.file.take() {
            drop(file);
        }

        let backup = backup_path(&self.config.path, &state.period);
        match fs::rename(&self.config.path, &backup) {
            Ok(()) => {}
            // Nothing was written in the old period; no backup to keep.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(SinkError::Io(e)),
        }

        self.prune_backups()?;

        state.file = Some(open_append(&self.config.path)?);
        state.period = new_period;
        Ok(())
    }

    fn prune_backups(&self) -> SinkResult<()> {
        let Some(parent) = self.config.path.parent() else {
            return Ok(());
        };
        let parent = if parent.as_os_str().is_empty() {
            Path::new(".")
        } else {
            parent
        };
        let Some(file_name) = self.config.path.file_name().and_then(|n| n.to_str()) else {
            return Ok(());
        };
        let prefix = format!("{file_name}.");

        let mut backups: Vec<PathBuf> = Vec::new();
        for entry in fs::read_dir(parent)? {
            let entry = entry?;
            let name = entry.file_name();
            if let Some(name) = name.to_str() {
                if name.starts_with(&prefix) {
                    backups.push(entry.path());
                }
            }
        }

        // Suffixes sort chronologically, so the head of the sorted list is
        // the oldest backup.
        backups.sort();
        while backups.len() > self.config.backup_count {
            let oldest = backups.remove(0);
            fs::remove_file(oldest)?;
        }
        Ok(())
    }
}

impl Sink for RotatingFileSink {
    fn name(&self) -> &'static str {
        "file"
    }

    fn deliver(&self, formatted: &str, _record: &LogRecord) -> SinkResult<()> {
        self.write_at(Local::now(), formatted)
    }

    fn flush(&self) -> SinkResult<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| SinkError::Delivery("file sink lock poisoned".to_string()))?;
        if let Some(file) = state.file.as_mut() {
            file.flush()?;
        }
        Ok(())
    }

    fn shutdown(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.closed = true;
            if let Some(mut file) = state.file.take() {
                let _ = file.flush();
            }
        }
    }
}

fn open_append(path: &Path) -> SinkResult<File> {
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

fn backup_path(path: &Path, period: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(period);
    PathBuf::from(name)
}
