// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 Nexlog Contributors

//! The per-flow trace-id slot.
//!
//! Each OS thread owns a private stack of trace ids; the innermost pushed
//! value is the one visible to log calls. Async tasks get the same
//! exclusivity through [`crate::future::WithTrace`], which swaps a private
//! copy of the stack in around every poll.

use std::cell::RefCell;
use std::mem;

use thiserror::Error;

use crate::id::TraceId;

thread_local! {
    static TRACE_STACK: RefCell<Vec<TraceId>> = const { RefCell::new(Vec::new()) };
}

/// Errors from misusing the push/restore discipline.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ContextError {
    #[error("restore called out of order: token expects depth {expected}, stack depth is {found}")]
    OutOfOrderRestore { expected: usize, found: usize },

    #[error("restore token does not belong to the innermost pushed trace id")]
    ForeignToken,
}

/// Capability returned by [`push`]; required to unwind that push.
///
/// A token must be consumed by exactly one [`restore`] call, in reverse
/// push order. It is deliberately neither `Clone` nor `Copy`.
#[must_use = "a push without a matching restore leaks the trace id into the flow"]
#[derive(Debug)]
pub struct RestoreToken {
    /// Stack depth immediately after the matching push.
    depth: usize,
    /// The id that was pushed, used to reject tokens from other scopes.
    id: TraceId,
}

/// Returns the innermost trace id visible to the calling flow.
///
/// This is a pure read: it never generates an id as a side effect. Use
/// [`current_or_create`] when an id must exist.
pub fn current() -> Option<TraceId> {
    TRACE_STACK.with(|stack| stack.borrow().last().cloned())
}

/// Returns the current trace id, generating and installing a fresh one if
/// the flow has none.
///
/// Unlike [`current`] this call has a side effect: the generated id becomes
/// the flow's current value (a base frame removable with [`clear`]). All
/// later reads in the same flow return the same id.
pub fn current_or_create() -> TraceId {
    TRACE_STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        if let Some(id) = stack.last() {
            return id.clone();
        }
        let id = TraceId::generate();
        stack.push(id.clone());
        id
    })
}

/// Installs `id` as the calling flow's current trace id.
///
/// Pushes nest with stack discipline: an inner push shadows an outer one
/// until its token is restored. Prefer [`scope`] unless the restore point
/// cannot be expressed as a lexical scope.
pub fn push(id: TraceId) -> RestoreToken {
    TRACE_STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        stack.push(id.clone());
        RestoreToken {
            depth: stack.len(),
            id,
        }
    })
}

/// Reverts the flow's current trace id to what it was before the matching
/// [`push`].
///
/// Restoring out of order is a hard error and leaves the stack unchanged:
/// the token must match the innermost push. This is a caller bug surfaced
/// explicitly rather than silently reordering scopes.
pub fn restore(token: RestoreToken) -> Result<(), ContextError> {
    TRACE_STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        if stack.len() != token.depth {
            return Err(ContextError::OutOfOrderRestore {
                expected: token.depth,
                found: stack.len(),
            });
        }
        match stack.last() {
            Some(top) if *top == token.id => {
                stack.pop();
                Ok(())
            }
            _ => Err(ContextError::ForeignToken),
        }
    })
}

/// Pushes `id` and returns a guard that restores the previous value when
/// dropped, on every exit path including panics.
pub fn scope(id: TraceId) -> TraceScope {
    TraceScope {
        token: Some(push(id)),
    }
}

/// Forcibly empties the calling flow's trace stack.
///
/// Intended for test isolation between unrelated logical operations that
/// share a thread or worker; outstanding [`RestoreToken`]s become invalid.
pub fn clear() {
    TRACE_STACK.with(|stack| stack.borrow_mut().clear());
}

/// Swaps the calling thread's whole stack, returning the previous one.
///
/// Used by [`crate::future::WithTrace`] to give each task a private copy of
/// the context across polls.
pub(crate) fn swap_stack(new: Vec<TraceId>) -> Vec<TraceId> {
    TRACE_STACK.with(|stack| mem::replace(&mut *stack.borrow_mut(), new))
}

/// RAII guard created by [`scope`].
///
/// Dropping the guard restores the previous trace id. If an enclosing scope
/// already unwound the stack (e.g. [`clear`] ran first), the drop is a
/// best-effort no-op; call [`TraceScope::restore`] to observe the error.
#[derive(Debug)]
pub struct TraceScope {
    token: Option<RestoreToken>,
}

impl TraceScope {
    /// Consume the guard and restore eagerly, surfacing any misuse error.
    pub fn restore(mut self) -> Result<(), ContextError> {
        match self.token.take() {
            Some(token) => restore(token),
            None => Ok(()),
        }
    }
}

impl Drop for TraceScope {
    fn drop(&mut self) {
        if let Some(token) = self.token.take() {
            let _ = restore(token);
        }
    }
}
