// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 Nexlog Contributors

//! Shared test utilities for Nexlog crates:
//! - [`CaptureSink`]: records every delivered line for assertions
//! - [`FailingSink`]: always fails, for failure-isolation tests
//! - [`EnvGuard`]: scoped environment-variable overrides

pub mod env;
pub mod sinks;

pub use env::EnvGuard;
pub use sinks::{CaptureSink, FailingSink};
