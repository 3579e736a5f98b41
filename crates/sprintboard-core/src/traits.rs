use async_trait::async_trait;

use crate::BoardResult;

/// A local mutation that is shown before the remote system confirms it.
///
/// `apply` runs against local state first, `commit` persists remotely, and
/// `compensate` undoes `apply` if the commit fails. `apply` and `compensate`
/// must not block; `commit` is the only suspension point.
#[async_trait]
pub trait Optimistic<S>: Send + Sync {
    type Output: Send;

    /// Mutate local state ahead of confirmation
    fn apply(&self, state: &mut S);

    /// Persist the mutation remotely
    async fn commit(&self) -> BoardResult<Self::Output>;

    /// Revert whatever `apply` did
    fn compensate(&self, state: &mut S);

    /// Human-readable description of the mutation
    fn description(&self) -> String;
}
