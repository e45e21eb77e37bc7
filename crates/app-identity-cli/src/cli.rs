//! Argument parsing for the `app-identity` command-line tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Generate or run AppIdentity test-vector suites.
///
/// `--version`/`-V` is overridden in `main` to report the suite schema
/// version and supported proof versions alongside the crate version, so
/// the derived bare `CARGO_PKG_VERSION` string here is never shown.
#[derive(Parser)]
#[command(name = "app-identity", version, about = "AppIdentity suite generator and TAP runner")]
pub struct Cli {
    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the canonical suite document.
    Generate {
        /// Destination path. Defaults to `app-identity-suite-<impl>.json`.
        suite_path: Option<String>,
        /// Print the suite to standard output instead of writing a file.
        #[arg(long)]
        stdout: bool,
        /// Suppress the "wrote suite to ..." progress message.
        #[arg(short, long)]
        quiet: bool,
    },
    /// Run one or more suite documents and report results as TAP v14.
    Run {
        /// Suite files, or directories to glob for `*.json`.
        paths: Vec<PathBuf>,
        /// Read one additional suite document from standard input.
        #[arg(long)]
        stdin: bool,
        /// Treat optional, non-required failing tests as hard failures.
        #[arg(short = 'S', long)]
        strict: bool,
        /// Emit a YAML diagnostic block under each failing line.
        #[arg(short = 'D', long)]
        diagnostic: bool,
    },
}
