// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 Nexlog Contributors

//! Trace-context propagation for Nexlog.
//!
//! A trace id correlates every log event that belongs to one logical
//! operation (for example one inbound request). This crate stores the
//! current id in a per-thread stack and offers three ways to manage it:
//!
//! - [`push`]/[`restore`] with an explicit [`RestoreToken`] (stack
//!   discipline, misuse is an error, never silent)
//! - [`scope`], an RAII guard that restores on every exit path
//! - [`WithTrace`], a future adapter that carries a private copy of the
//!   context across `.await` points so sibling tasks sharing a worker
//!   thread never observe each other's ids
//!
//! Reading the current id never creates one as a side effect; creation
//! happens only through [`current_or_create`].

pub mod context;
pub mod future;
pub mod id;

pub use context::{
    clear, current, current_or_create, push, restore, scope, ContextError, RestoreToken,
    TraceScope,
};
pub use future::WithTrace;
pub use id::TraceId;
