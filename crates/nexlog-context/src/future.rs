// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 Nexlog Contributors

//! Trace propagation across spawned tasks.
//!
//! A value pushed in one task must never be observable from a sibling task
//! that happens to share a worker thread, and a child task inherits a copy
//! of the spawner's current id, not a live reference. [`WithTrace`] provides
//! both: it owns a private stack for the wrapped future and swaps it into
//! the thread slot around every poll.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::context::swap_stack;
use crate::id::TraceId;

/// Future adapter that runs the inner future under its own trace context.
///
/// Create one with [`WithTrace::inherit`] right before spawning, so the
/// child snapshots the spawner's then-current id:
///
/// ```ignore
/// let child = WithTrace::inherit(async { /* sees the spawner's id */ });
/// tokio::spawn(child);
/// ```
pub struct WithTrace<F> {
    inner: Pin<Box<F>>,
    /// The task's private trace stack between polls.
    stack: Vec<TraceId>,
}

impl<F: Future> WithTrace<F> {
    /// Wrap `inner` with a copy of the calling flow's current trace id.
    ///
    /// The snapshot is taken now, at construction; later changes in the
    /// parent flow are not reflected in the child.
    pub fn inherit(inner: F) -> Self {
        WithTrace {
            inner: Box::pin(inner),
            stack: crate::context::current().into_iter().collect(),
        }
    }

    /// Wrap `inner` with an explicit trace id, ignoring the caller's
    /// context.
    pub fn with_id(id: TraceId, inner: F) -> Self {
        WithTrace {
            inner: Box::pin(inner),
            stack: vec![id],
        }
    }

    /// Wrap `inner` with no trace id at all.
    pub fn detached(inner: F) -> Self {
        WithTrace {
            inner: Box::pin(inner),
            stack: Vec::new(),
        }
    }
}

/// Restores the thread's previous stack when the poll ends, saving the
/// task's stack back into the adapter even if the inner future panics.
struct SwapGuard<'a> {
    task_stack: &'a mut Vec<TraceId>,
    saved: Option<Vec<TraceId>>,
}

impl Drop for SwapGuard<'_> {
    fn drop(&mut self) {
        *self.task_stack = swap_stack(self.saved.take().unwrap_or_default());
    }
}

impl<F: Future> Future for WithTrace<F> {
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        // All fields are Unpin (the inner future is boxed), so this
        // projection is safe without unsafe code.
        let WithTrace { inner, stack } = self.get_mut();
        let saved = swap_stack(std::mem::take(stack));
        let _guard = SwapGuard {
            task_stack: stack,
            saved: Some(saved),
        };
        inner.as_mut().poll(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{clear, current, push, scope};

    #[tokio::test(flavor = "current_thread")]
    async fn test_inherit_snapshots_spawner_id() {
        clear();
        let _guard = scope(TraceId::new("parent"));
        let child = WithTrace::inherit(async { current() });
        let seen = tokio::spawn(child).await.expect("child task");
        assert_eq!(seen, Some(TraceId::new("parent")));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_snapshot_is_a_copy_not_a_live_reference() {
        clear();
        let token = push(TraceId::new("before"));
        let child = WithTrace::inherit(async { current() });
        crate::context::restore(token).expect("restore");
        let _after = scope(TraceId::new("after"));
        let seen = tokio::spawn(child).await.expect("child task");
        assert_eq!(seen, Some(TraceId::new("before")));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_sibling_tasks_sharing_a_thread_are_isolated() {
        clear();
        // Two tasks interleave on the same worker thread; each must see
        // only its own id across await points.
        let task = |name: &'static str| {
            WithTrace::with_id(TraceId::new(name), async move {
                for _ in 0..10 {
                    assert_eq!(current(), Some(TraceId::new(name)));
                    tokio::task::yield_now().await;
                }
                current()
            })
        };
        let (a, b) = tokio::join!(tokio::spawn(task("flow-a")), tokio::spawn(task("flow-b")));
        assert_eq!(a.expect("flow-a"), Some(TraceId::new("flow-a")));
        assert_eq!(b.expect("flow-b"), Some(TraceId::new("flow-b")));
        // The worker thread's own slot is untouched.
        assert_eq!(current(), None);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_pushes_inside_a_task_stay_in_the_task() {
        clear();
        let child = WithTrace::detached(async {
            let _guard = scope(TraceId::new("inner-only"));
            tokio::task::yield_now().await;
            current()
        });
        let probe = WithTrace::detached(async {
            tokio::task::yield_now().await;
            current()
        });
        let (inner, outside) = tokio::join!(tokio::spawn(child), tokio::spawn(probe));
        assert_eq!(inner.expect("child"), Some(TraceId::new("inner-only")));
        assert_eq!(outside.expect("probe"), None);
    }
}
