use crate::cli::{DeleteArgs, MoveArgs};
use crate::context::CliContext;
use crate::output;
use serde_json::json;
use sprintboard_board::{DragOutcome, RejectReason, TransactionOutcome};
use sprintboard_core::error::AUTH_REQUIRED_MESSAGE;

pub async fn handle_move(ctx: &mut CliContext, args: MoveArgs) -> anyhow::Result<()> {
    ctx.load_sprint(args.sprint).await?;

    ctx.coordinator.drag_start(args.task.to_string());
    match ctx.coordinator.drag_end(Some(&args.to)) {
        DragOutcome::Cancelled => {
            output::output_error(&format!(
                "Cannot move task {} onto '{}': no such task or drop target",
                args.task, args.to
            ));
        }
        DragOutcome::Unchanged => {
            output::output_success(json!({
                "task": args.task,
                "changed": false,
            }));
        }
        DragOutcome::Rejected(RejectReason::Unauthenticated) => {
            output::output_error(AUTH_REQUIRED_MESSAGE);
        }
        DragOutcome::Rejected(RejectReason::InFlight) => {
            output::output_error(&format!("Task {} is already being updated", args.task));
        }
        DragOutcome::Resolving(txn) => {
            let (transaction, from, to) = (txn.id, txn.from, txn.to);
            match txn.outcome().await {
                TransactionOutcome::Committed => {
                    let message = ctx
                        .coordinator
                        .notices()
                        .last()
                        .map(|entry| entry.message)
                        .unwrap_or_default();
                    output::output_success(json!({
                        "task": args.task,
                        "changed": true,
                        "from": from,
                        "to": to,
                        "transaction": transaction.to_string(),
                        "message": message,
                    }));
                }
                TransactionOutcome::RolledBack(e) => {
                    tracing::debug!("Move rolled back: {}", e);
                    let message = ctx
                        .coordinator
                        .notices()
                        .last()
                        .map(|entry| entry.message)
                        .unwrap_or_else(|| e.to_string());
                    output::output_error(&message);
                }
            }
        }
    }
    Ok(())
}

pub async fn handle_delete(ctx: &CliContext, args: DeleteArgs) -> anyhow::Result<()> {
    ctx.load_sprint(args.sprint).await?;

    match ctx.coordinator.delete_task(args.task).await {
        Ok(()) => output::output_success(json!({"deleted": args.task})),
        Err(e) => {
            tracing::debug!("Delete failed: {}", e);
            let message = ctx
                .coordinator
                .notices()
                .last()
                .filter(|entry| entry.is_error())
                .map(|entry| entry.message)
                .unwrap_or_else(|| e.to_string());
            output::output_error(&message);
        }
    }
    Ok(())
}
