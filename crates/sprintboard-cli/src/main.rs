mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("SPRINTBOARD_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::WARN)
            .init();
    }

    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(
            shell,
            &mut Cli::command(),
            "sprintboard",
            &mut std::io::stdout(),
        );
        return Ok(());
    }

    let mut ctx = CliContext::new(cli.url, cli.token, cli.config.as_deref())?;

    match cli.command {
        Commands::Board(args) => handlers::board::handle(&ctx, args).await?,
        Commands::Move(args) => handlers::task::handle_move(&mut ctx, args).await?,
        Commands::Delete(args) => handlers::task::handle_delete(&ctx, args).await?,
        Commands::Completions { .. } => {}
    }

    Ok(())
}
