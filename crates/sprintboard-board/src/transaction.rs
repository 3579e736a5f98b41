//! Runner for [`Optimistic`] mutations against shared local state.

use parking_lot::Mutex;
use sprintboard_core::{BoardError, BoardResult, Optimistic};
use std::sync::Arc;
use std::time::Duration;

/// A mutation whose local half has been applied and whose remote half is
/// still outstanding.
#[must_use = "an applied mutation must be committed or it is never confirmed"]
pub struct Applied<S, O> {
    state: Arc<Mutex<S>>,
    op: O,
}

/// Apply `op` to `state` immediately and hand back the pending commit.
pub fn apply<S, O>(state: Arc<Mutex<S>>, op: O) -> Applied<S, O>
where
    O: Optimistic<S>,
{
    tracing::debug!("Applying optimistically: {}", op.description());
    op.apply(&mut state.lock());
    Applied { state, op }
}

impl<S, O> Applied<S, O>
where
    S: Send,
    O: Optimistic<S>,
{
    /// Persist remotely within `timeout`; on any failure run the
    /// compensation before returning the error. Never retries.
    pub async fn commit(self, timeout: Duration) -> BoardResult<O::Output> {
        let result = match tokio::time::timeout(timeout, self.op.commit()).await {
            Ok(result) => result,
            Err(_) => Err(BoardError::Timeout(timeout)),
        };

        if let Err(ref e) = result {
            tracing::warn!("Rolling back '{}': {}", self.op.description(), e);
            self.op.compensate(&mut self.state.lock());
        }
        result
    }
}

/// Apply, commit and compensate-on-failure in one call.
pub async fn run_optimistic<S, O>(
    state: Arc<Mutex<S>>,
    op: O,
    timeout: Duration,
) -> BoardResult<O::Output>
where
    S: Send,
    O: Optimistic<S>,
{
    apply(state, op).commit(timeout).await
}
