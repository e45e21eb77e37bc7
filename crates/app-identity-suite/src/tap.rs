//! TAP v14 output formatting.

use std::fmt::Write as _;

/// The outcome of running a single test.
#[derive(Debug, Clone)]
pub enum TestOutcome {
    /// The test passed.
    Ok,
    /// The test failed. Carries a human-readable reason for diagnostics.
    NotOk {
        /// Why the test failed.
        reason: String,
    },
    /// The test was skipped (its `spec_version` exceeds the runner's).
    Skip {
        /// The suite's declared spec version.
        suite_spec_version: u32,
        /// This runner's supported spec version.
        runner_spec_version: u32,
    },
    /// A non-required test failed but strict mode is off, so it is
    /// reported as a TODO rather than a hard failure.
    TodoFailing {
        /// Why the test failed.
        reason: String,
    },
}

impl TestOutcome {
    /// Whether this outcome counts as a pass for the run's exit code:
    /// `Ok`, `Skip`, and `TodoFailing` all count; only `NotOk` does not.
    pub fn counts_as_ok(&self) -> bool {
        !matches!(self, TestOutcome::NotOk { .. })
    }
}

/// A single numbered line (plus optional diagnostic block) in the TAP stream.
pub struct TapLine {
    /// 1-based global test number.
    pub number: u32,
    /// The test's description, used as the TAP test name.
    pub description: String,
    /// The outcome.
    pub outcome: TestOutcome,
}

/// Render the TAP v14 preamble: version line and plan.
pub fn preamble(total: u32) -> String {
    if total == 0 {
        return "TAP Version 14\n1..0\n# No suites provided.\n".to_string();
    }
    format!("TAP Version 14\n1..{total}\n")
}

/// Render a `# generator: ...` / `# runner: ...` diagnostic pair for a suite.
pub fn suite_diagnostics(generator_name: &str, generator_version: &str, runner_version: &str) -> String {
    format!(
        "# generator: {generator_name} {generator_version}\n# runner: app-identity-rs {runner_version}\n"
    )
}

/// Render one TAP line, including its diagnostic YAML block if requested.
pub fn render_line(line: &TapLine, diagnostic: bool) -> String {
    let mut out = String::new();
    match &line.outcome {
        TestOutcome::Ok => {
            let _ = writeln!(out, "ok {} - {}", line.number, line.description);
        }
        TestOutcome::Skip {
            suite_spec_version,
            runner_spec_version,
        } => {
            let _ = writeln!(
                out,
                "ok {} - {} # SKIP unsupported spec version {} < {}",
                line.number, line.description, runner_spec_version, suite_spec_version
            );
        }
        TestOutcome::TodoFailing { reason } => {
            let _ = writeln!(
                out,
                "not ok {} - {} # TODO optional failing test",
                line.number, line.description
            );
            if diagnostic {
                let _ = write!(out, "{}", diagnostic_block(reason));
            }
        }
        TestOutcome::NotOk { reason } => {
            let _ = writeln!(out, "not ok {} - {}", line.number, line.description);
            if diagnostic {
                let _ = write!(out, "{}", diagnostic_block(reason));
            }
        }
    }
    out
}

fn diagnostic_block(message: &str) -> String {
    format!("  ---\n  message: {message}\n  ...\n")
}
