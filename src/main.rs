//! # upcheck
//!
//! **upcheck** reports upstream activity at session start.
//!
//! Features:
//! - `upcheck` / `upcheck check` prints a `{"systemMessage": ...}` payload when
//!   new releases or commits exist past the recorded checkpoints
//! - `upcheck preview` shows the same message in readable form
//! - `upcheck paths` prints the files upcheck reads
//!
//! This CLI is built with [clap](https://docs.rs/clap).

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};
use upcheck::{cmd_check, cmd_preview, paths};

/// Command-line interface definition.
#[derive(Parser, Debug)]
#[command(
    name = "upcheck",
    version,
    about = "upcheck - report new upstream releases and commits at session start"
)]
struct Cli {
    /// Project root (defaults to $CLAUDE_PROJECT_DIR, then the binary's location)
    #[arg(long, global = true)]
    project_dir: Option<PathBuf>,

    /// Log to stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Emit the hook payload, or nothing when nothing changed (default)
    Check,
    /// Print the message in readable form
    Preview,
    /// Print the resolved project, checkpoint and settings paths
    Paths,
}

/// stderr only: stdout carries the payload.
fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "upcheck=error",
        1 => "upcheck=info",
        _ => "upcheck=debug",
    };
    let filter = EnvFilter::try_from_env("UPCHECK_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let dir = cli.project_dir.as_deref();

    match cli.cmd.unwrap_or(Cmd::Check) {
        Cmd::Check => cmd_check(dir),
        Cmd::Preview => cmd_preview(dir),
        Cmd::Paths => {
            let p = paths(dir)?;
            println!("project:    {}", p.project.display());
            println!("checkpoint: {}", p.checkpoint.display());
            println!("settings:   {}", p.settings.display());
            Ok(())
        }
    }
}
