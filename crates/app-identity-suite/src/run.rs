//! The suite runner: consumes one or more [`Suite`] documents and produces
//! a TAP v14 stream.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use app_identity::registry;
use app_identity::verify::verify_proof_str_strict;

use crate::error::{Result, SuiteError};
use crate::generate::DISALLOWED_VERSION_MARKER;
use crate::suite::{Expect, Suite, Test, RUNNER_SPEC_VERSION};
use crate::tap::{self, TapLine, TestOutcome};

/// Options controlling a runner invocation.
#[derive(Debug, Clone, Default)]
pub struct RunnerOptions {
    /// Promote TODO (non-required, failing) tests to hard failures.
    pub strict: bool,
    /// Read one suite document from standard input.
    pub stdin: bool,
    /// Append a YAML diagnostic block after failing lines.
    pub diagnostic: bool,
}

/// Resolve `paths` (files, directories globbed for `*.json`) and, if
/// `options.stdin` is set, standard input, into the suites to run.
pub fn load_suites(paths: &[PathBuf], options: &RunnerOptions) -> Result<Vec<Suite>> {
    if paths.is_empty() && !options.stdin {
        return Err(SuiteError::NoSuites);
    }

    let mut suites = Vec::new();

    for path in paths {
        if path.is_dir() {
            let mut entries: Vec<PathBuf> = fs::read_dir(path)?
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|p| p.extension().map(|ext| ext == "json").unwrap_or(false))
                .collect();
            entries.sort();
            for entry in entries {
                suites.push(load_file(&entry)?);
            }
        } else {
            suites.push(load_file(path)?);
        }
    }

    if options.stdin {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        suites.push(Suite::from_json(&text)?);
    }

    Ok(suites)
}

fn load_file(path: &Path) -> Result<Suite> {
    let text = fs::read_to_string(path)?;
    Suite::from_json(&text)
}

/// Run every test in `suites` and render the full TAP v14 stream.
///
/// Returns the rendered output and whether the run is an overall success
/// (exit code 0).
pub fn run(suites: &[Suite], options: &RunnerOptions) -> (String, bool) {
    let total: u32 = suites.iter().map(|s| s.tests.len() as u32).sum();
    let mut output = tap::preamble(total);

    if total == 0 {
        return (output, true);
    }

    let mut number = 0u32;
    let mut success = true;

    for suite in suites {
        output.push_str(&tap::suite_diagnostics(
            &suite.name,
            &suite.version,
            env!("CARGO_PKG_VERSION"),
        ));
        for test in &suite.tests {
            number += 1;
            let outcome = run_one(suite, test, options);
            if !outcome.counts_as_ok() {
                success = false;
            }
            if options.strict {
                if let TestOutcome::TodoFailing { reason } = &outcome {
                    success = false;
                    let line = TapLine {
                        number,
                        description: test.description.clone(),
                        outcome: TestOutcome::NotOk {
                            reason: reason.clone(),
                        },
                    };
                    output.push_str(&tap::render_line(&line, options.diagnostic));
                    continue;
                }
            }
            let line = TapLine {
                number,
                description: test.description.clone(),
                outcome,
            };
            output.push_str(&tap::render_line(&line, options.diagnostic));
        }
    }

    (output, success)
}

fn run_one(suite: &Suite, test: &Test, options: &RunnerOptions) -> TestOutcome {
    if test.spec_version > RUNNER_SPEC_VERSION {
        return TestOutcome::Skip {
            suite_spec_version: test.spec_version,
            runner_spec_version: RUNNER_SPEC_VERSION,
        };
    }

    let _ = suite; // suite-level fields are echoed via diagnostics only.

    match execute_test(test) {
        Ok(()) => TestOutcome::Ok,
        Err(reason) => {
            if test.required || options.strict {
                TestOutcome::NotOk { reason }
            } else {
                TestOutcome::TodoFailing { reason }
            }
        }
    }
}

/// Run a single test's verification, scoping the disallowed-version
/// registry around it per [`DISALLOWED_VERSION_MARKER`], and return `Ok`
/// if the observed outcome matched `test.expect`.
fn execute_test(test: &Test) -> std::result::Result<(), String> {
    let app = match test.app.to_app() {
        Ok(app) => app,
        Err(err) => return Err(format!("app construction failed: {err}")),
    };

    let scoped_version = test
        .description
        .starts_with(DISALLOWED_VERSION_MARKER)
        .then_some(app.version());
    if let Some(version) = scoped_version {
        registry::disallow(version);
    }

    let result = verify_proof_str_strict(&test.proof, &app);

    if let Some(version) = scoped_version {
        registry::allow(version);
    }

    let passed = result.is_ok();
    match (test.expect, passed) {
        (Expect::Pass, true) => Ok(()),
        (Expect::Fail, false) => Ok(()),
        (Expect::Pass, false) => Err(format!(
            "expected proof to verify but it did not ({})",
            result.err().map(|e| e.to_string()).unwrap_or_default()
        )),
        (Expect::Fail, true) => Err("expected proof to fail verification but it verified".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::generate_suite;
    use std::sync::Mutex;

    static LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn generated_suite_is_all_ok() {
        let _guard = LOCK.lock().unwrap();
        registry::reset();
        let suite = generate_suite().unwrap();
        let options = RunnerOptions::default();
        let (output, success) = run(&[suite], &options);
        assert!(success, "run was not successful:\n{output}");
        assert!(!output.contains("not ok"));
    }

    #[test]
    fn empty_suite_list_reports_no_suites() {
        let (output, success) = run(&[], &RunnerOptions::default());
        assert!(success);
        assert!(output.contains("No suites provided"));
    }

    #[test]
    fn future_spec_version_is_skipped() {
        let _guard = LOCK.lock().unwrap();
        registry::reset();
        let mut suite = generate_suite().unwrap();
        suite.tests.truncate(1);
        suite.tests[0].spec_version = RUNNER_SPEC_VERSION + 1;
        let (output, success) = run(&[suite], &RunnerOptions::default());
        assert!(success);
        assert!(output.contains("# SKIP"));
    }

    #[test]
    fn strict_mode_turns_todo_into_hard_failure() {
        let _guard = LOCK.lock().unwrap();
        registry::reset();
        // Build a suite with one optional test that fails verification.
        let app_spec = crate::suite::AppSpec {
            id: serde_json::json!("a"),
            secret: "s".to_string(),
            version: 1,
            config: None,
        };
        let suite = Suite {
            name: "t".to_string(),
            version: "0".to_string(),
            spec_version: RUNNER_SPEC_VERSION,
            description: None,
            tests: vec![Test {
                description: "optional failing test".to_string(),
                app: app_spec,
                proof: base64_url::encode("a:n:DEADBEEF"),
                expect: Expect::Pass,
                required: false,
                spec_version: RUNNER_SPEC_VERSION,
            }],
        };

        let (lenient_output, lenient_ok) = run(&[suite.clone()], &RunnerOptions::default());
        assert!(lenient_ok);
        assert!(lenient_output.contains("# TODO optional failing test"));

        let strict_options = RunnerOptions {
            strict: true,
            ..Default::default()
        };
        let (strict_output, strict_ok) = run(&[suite], &strict_options);
        assert!(!strict_ok);
        assert!(strict_output.contains("not ok"));
        assert!(!strict_output.contains("# TODO"));
    }
}
