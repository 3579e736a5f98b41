//! Trailing-edge debounce for the host's refresh callback.

use parking_lot::Mutex;
use sprintboard_core::BoardResult;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Callback asking the host to refetch authoritative board state.
pub type RefreshHook = Arc<dyn Fn() -> BoardResult<()> + Send + Sync>;

/// Fires the refresh hook once a quiet period has elapsed since the last
/// [`RefreshDebouncer::schedule`] call.
///
/// Each call aborts the pending timer and arms a new one, so a burst of
/// confirmed changes produces a single refresh. The timer handle belongs to
/// this instance; separate boards never cancel each other's refreshes.
pub struct RefreshDebouncer {
    delay: Duration,
    hook: Option<RefreshHook>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl RefreshDebouncer {
    pub fn new(delay: Duration, hook: Option<RefreshHook>) -> Self {
        Self {
            delay,
            hook,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm (or re-arm) the refresh timer. Must be called inside a tokio
    /// runtime. Without a hook this is a no-op.
    pub fn schedule(&self) {
        let Some(hook) = self.hook.clone() else {
            return;
        };
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::debug!("Invoking debounced board refresh");
            if let Err(e) = hook() {
                tracing::warn!("Error in refresh callback: {}", e);
            }
        });

        if let Some(previous) = self.pending.lock().replace(handle) {
            previous.abort();
        }
    }

    /// Drop any armed timer without firing it.
    pub fn cancel(&self) {
        if let Some(previous) = self.pending.lock().take() {
            previous.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for RefreshDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
