//! Suite generator and TAP v14 runner for AppIdentity proofs.
//!
//! Built on top of [`app_identity`], this crate produces a reproducible
//! [`suite::Suite`] of proof test vectors and runs one against a
//! conforming implementation, reporting the result as a TAP v14 stream.
//! Neither concern belongs in the core crate: generation reaches for
//! clock time and randomness the core deliberately stays free of, and
//! running a suite is an I/O-bound activity (files, stdin) the core has
//! no opinion about.

pub mod error;
pub mod generate;
pub mod run;
pub mod suite;
pub mod tap;

pub use error::{Result, SuiteError};
pub use generate::{destination_path, generate_suite, GeneratorInfo, GeneratorOptions, DISALLOWED_VERSION_MARKER, GENERATOR_INFO};
pub use run::{load_suites, run, RunnerOptions};
pub use suite::{AppSpec, Expect, Suite, Test, RUNNER_SPEC_VERSION};
pub use tap::{render_line, suite_diagnostics, preamble, TapLine, TestOutcome};
