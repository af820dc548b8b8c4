// src/main.rs

use anyhow::Result;
use clap::Parser;
use terminfo_backport::env::SystemEnv;
use terminfo_backport::exec::SystemRunner;

#[derive(Parser)]
#[command(name = "terminfo-backport")]
#[command(
    author,
    version,
    about = "Backports the tmux-256color terminfo entry to the stock ncurses",
    long_about = None
)]
struct Cli {}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let _cli = Cli::parse();

    terminfo_backport::backport::run(&SystemRunner, &SystemEnv)?;
    Ok(())
}
