//! `app-identity`: generate and run AppIdentity TAP v14 test-vector suites.

mod cli;

use std::fs;
use std::process::ExitCode;

use clap::{CommandFactory, FromArgMatches};

use app_identity_suite::{
    destination_path, generate_suite, load_suites, run, GeneratorOptions, RunnerOptions,
    RUNNER_SPEC_VERSION,
};

use cli::{Cli, Commands};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let version = format!(
        "{} (suite schema {RUNNER_SPEC_VERSION}, proof versions 1-4)",
        env!("CARGO_PKG_VERSION")
    );
    let matches = Cli::command().version(version).get_matches();
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };

    match cli.command {
        Commands::Generate {
            suite_path,
            stdout,
            quiet,
        } => generate(suite_path, stdout, quiet),
        Commands::Run {
            paths,
            stdin,
            strict,
            diagnostic,
        } => run_suites(paths, stdin, strict, diagnostic),
    }
}

fn generate(suite_path: Option<String>, stdout: bool, quiet: bool) -> ExitCode {
    let options = GeneratorOptions {
        suite_name: suite_path,
        stdout,
        quiet,
    };

    let suite = match generate_suite() {
        Ok(suite) => suite,
        Err(err) => {
            eprintln!("error: failed to generate suite: {err}");
            return ExitCode::from(2);
        }
    };

    let json = match suite.to_json() {
        Ok(json) => json,
        Err(err) => {
            eprintln!("error: failed to serialize suite: {err}");
            return ExitCode::from(2);
        }
    };

    if options.stdout {
        println!("{json}");
        return ExitCode::SUCCESS;
    }

    let path = destination_path(&options);
    if let Err(err) = fs::write(&path, json) {
        eprintln!("error: failed to write {path}: {err}");
        return ExitCode::from(2);
    }

    if !options.quiet {
        eprintln!("wrote suite to {path}");
    }

    ExitCode::SUCCESS
}

fn run_suites(paths: Vec<std::path::PathBuf>, stdin: bool, strict: bool, diagnostic: bool) -> ExitCode {
    let options = RunnerOptions {
        strict,
        stdin,
        diagnostic,
    };

    let suites = match load_suites(&paths, &options) {
        Ok(suites) => suites,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };

    let (output, success) = run(&suites, &options);
    print!("{output}");

    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
