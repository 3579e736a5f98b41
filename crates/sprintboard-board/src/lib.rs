pub mod coordinator;
pub mod debounce;
pub mod notice;
pub mod status_move;
pub mod transaction;

pub use coordinator::{
    DragCoordinator, DragOutcome, DragPhase, RejectReason, Transaction, TransactionOutcome,
};
pub use debounce::{RefreshDebouncer, RefreshHook};
pub use notice::{NoticeLog, Notices};
pub use status_move::StatusMove;
pub use transaction::{apply, run_optimistic, Applied};
