//! The suite generator: produces a JSON [`Suite`] containing required and
//! optional test banks.

use serde_json::{json, Value};

use app_identity::{nonce::NonceService, padlock, proof, versions, App};

use crate::error::Result;
use crate::suite::{AppSpec, Expect, Suite, Test, RUNNER_SPEC_VERSION};

/// Tests whose description carries this prefix instruct the runner to
/// scope a temporary `disallow`/`allow` of the test's app version around
/// just that one test's execution — the one place the declarative suite
/// format needs to reach into the core's process-wide mutable registry.
/// Documented here as the fixed convention both sides must honor.
pub const DISALLOWED_VERSION_MARKER: &str = "[disallowed]";

/// Options controlling suite generation.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Destination path. `.json` is appended if missing. Ignored if `stdout` is set.
    pub suite_name: Option<String>,
    /// Print the suite to stdout instead of writing a file.
    pub stdout: bool,
    /// Suppress progress messages.
    pub quiet: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions {
            suite_name: None,
            stdout: false,
            quiet: false,
        }
    }
}

/// Identifies the generator that produced a suite, echoed back in the
/// runner's `# generator: ...` diagnostic line.
pub struct GeneratorInfo {
    /// Generator implementation name.
    pub name: &'static str,
    /// Generator implementation version.
    pub version: &'static str,
}

/// This implementation's generator identity.
pub const GENERATOR_INFO: GeneratorInfo = GeneratorInfo {
    name: "app-identity-rs",
    version: env!("CARGO_PKG_VERSION"),
};

fn app_spec(id: &str, secret: &str, version: u32, config: Option<Value>) -> AppSpec {
    AppSpec {
        id: json!(id),
        secret: secret.to_string(),
        version,
        config,
    }
}

fn build_app(spec: &AppSpec) -> Result<App> {
    spec.to_app()
}

fn fresh_nonce(version: u32) -> Result<String> {
    Ok(NonceService::generate(versions::nonce_policy_for(version)?))
}

fn proof_for(app: &App, nonce: &str) -> Result<String> {
    let padlock = padlock::compute_for_app(app, nonce)?;
    Ok(proof::build_proof(app.id(), nonce, &padlock, app.version()))
}

fn required_tests() -> Result<Vec<Test>> {
    let mut tests = Vec::new();

    // Round-trip success for each version.
    for &version in &versions::SUPPORTED_VERSIONS {
        let spec = app_spec("app-a", "correct-horse-battery-staple", version, None);
        let app = build_app(&spec)?;
        let nonce = fresh_nonce(version)?;
        let proof = proof_for(&app, &nonce)?;
        tests.push(Test {
            description: format!("v{version} proof verifies against its own app"),
            app: spec,
            proof,
            expect: Expect::Pass,
            required: true,
            spec_version: RUNNER_SPEC_VERSION,
        });
    }

    // Reject disallowed version (scoped by the marker convention above).
    {
        let version = 2;
        let spec = app_spec("app-a", "correct-horse-battery-staple", version, None);
        let app = build_app(&spec)?;
        let nonce = fresh_nonce(version)?;
        let proof = proof_for(&app, &nonce)?;
        tests.push(Test {
            description: format!(
                "{DISALLOWED_VERSION_MARKER} v{version} proof is rejected while its version is disallowed"
            ),
            app: spec,
            proof,
            expect: Expect::Fail,
            required: true,
            spec_version: RUNNER_SPEC_VERSION,
        });
    }

    // Reject mismatched id.
    {
        let signer_spec = app_spec("app-a", "shared-secret", 1, None);
        let signer = build_app(&signer_spec)?;
        let nonce = fresh_nonce(1)?;
        let proof = proof_for(&signer, &nonce)?;
        let verifier_spec = app_spec("app-b", "shared-secret", 1, None);
        tests.push(Test {
            description: "proof for app-a is rejected when verified against app-b".to_string(),
            app: verifier_spec,
            proof,
            expect: Expect::Fail,
            required: true,
            spec_version: RUNNER_SPEC_VERSION,
        });
    }

    // Reject mismatched secret.
    {
        let signer_spec = app_spec("app-a", "right-secret", 1, None);
        let signer = build_app(&signer_spec)?;
        let nonce = fresh_nonce(1)?;
        let proof = proof_for(&signer, &nonce)?;
        let verifier_spec = app_spec("app-a", "wrong-secret", 1, None);
        tests.push(Test {
            description: "proof is rejected when the verifying app has the wrong secret"
                .to_string(),
            app: verifier_spec,
            proof,
            expect: Expect::Fail,
            required: true,
            spec_version: RUNNER_SPEC_VERSION,
        });
    }

    // Reject empty nonce.
    {
        let spec = app_spec("app-a", "shared-secret", 1, None);
        let app = build_app(&spec)?;
        let padlock = padlock::compute_for_app(&app, "")?;
        let proof = proof::build_proof("app-a", "", &padlock, 1);
        tests.push(Test {
            description: "proof with an empty nonce is rejected".to_string(),
            app: spec,
            proof,
            expect: Expect::Fail,
            required: true,
            spec_version: RUNNER_SPEC_VERSION,
        });
    }

    // v2+: reject timestamps outside default fuzz.
    {
        let spec = app_spec("app-a", "shared-secret", 2, None);
        let app = build_app(&spec)?;
        let nonce = (chrono::Utc::now() - chrono::Duration::seconds(700))
            .format("%Y%m%dT%H%M%S%.6fZ")
            .to_string();
        let proof = proof_for(&app, &nonce)?;
        tests.push(Test {
            description: "v2 proof outside the default fuzz window is rejected".to_string(),
            app: spec,
            proof,
            expect: Expect::Fail,
            required: true,
            spec_version: RUNNER_SPEC_VERSION,
        });
    }

    // v2+: accept timestamps inside +-(fuzz/2).
    {
        let spec = app_spec("app-a", "shared-secret", 2, None);
        let app = build_app(&spec)?;
        let nonce = (chrono::Utc::now() - chrono::Duration::seconds(300))
            .format("%Y%m%dT%H%M%S%.6fZ")
            .to_string();
        let proof = proof_for(&app, &nonce)?;
        tests.push(Test {
            description: "v2 proof inside half the default fuzz window verifies".to_string(),
            app: spec,
            proof,
            expect: Expect::Pass,
            required: true,
            spec_version: RUNNER_SPEC_VERSION,
        });
    }

    Ok(tests)
}

fn optional_tests() -> Result<Vec<Test>> {
    let mut tests = Vec::new();

    // Custom fuzz.
    {
        let config = json!({"fuzz": 30});
        let spec = app_spec("app-a", "shared-secret", 2, Some(config));
        let app = build_app(&spec)?;
        let nonce = (chrono::Utc::now() - chrono::Duration::seconds(20))
            .format("%Y%m%dT%H%M%S%.6fZ")
            .to_string();
        let proof = proof_for(&app, &nonce)?;
        tests.push(Test {
            description: "proof inside a custom 30s fuzz window verifies".to_string(),
            app: spec,
            proof,
            expect: Expect::Pass,
            required: false,
            spec_version: RUNNER_SPEC_VERSION,
        });
    }

    // Padlock wire-case variance.
    {
        let spec = app_spec("app-a", "shared-secret", 1, None);
        let app = build_app(&spec)?;
        let nonce = fresh_nonce(1)?;
        let padlock = padlock::compute_for_app(&app, &nonce)?;
        let proof = proof::build_proof("app-a", &nonce, &padlock.to_ascii_lowercase(), 1);
        tests.push(Test {
            description: "lowercase-wire padlock still verifies".to_string(),
            app: spec,
            proof,
            expect: Expect::Pass,
            required: false,
            spec_version: RUNNER_SPEC_VERSION,
        });
    }

    // Oversized fields.
    {
        let spec = app_spec("app-a", "shared-secret", 1, None);
        let app = build_app(&spec)?;
        let huge_nonce = "n".repeat(4096);
        let padlock = padlock::compute_for_app(&app, &huge_nonce)?;
        let proof = proof::build_proof("app-a", &huge_nonce, &padlock, 1);
        tests.push(Test {
            description: "oversized nonce field still verifies".to_string(),
            app: spec,
            proof,
            expect: Expect::Pass,
            required: false,
            spec_version: RUNNER_SPEC_VERSION,
        });
    }

    // v1-framed proof given to a v2+ app.
    {
        let signer_spec = app_spec("app-a", "shared-secret", 1, None);
        let signer = build_app(&signer_spec)?;
        let nonce = fresh_nonce(1)?;
        let proof = proof_for(&signer, &nonce)?;
        let verifier_spec = app_spec("app-a", "shared-secret", 2, None);
        tests.push(Test {
            description: "a v1-framed proof is rejected by a v2 app".to_string(),
            app: verifier_spec,
            proof,
            expect: Expect::Fail,
            required: false,
            spec_version: RUNNER_SPEC_VERSION,
        });
    }

    // 4-part proof with a leading "1": must normalize identically to the
    // 3-part form (the fixed convention this core documents).
    {
        let spec = app_spec("app-a", "shared-secret", 1, None);
        let app = build_app(&spec)?;
        let nonce = fresh_nonce(1)?;
        let padlock = padlock::compute_for_app(&app, &nonce)?;
        let payload = format!("1:app-a:{nonce}:{padlock}");
        let proof = base64_url::encode(&payload);
        tests.push(Test {
            description: "a 4-part proof with leading version \"1\" verifies like the 3-part form"
                .to_string(),
            app: spec,
            proof,
            expect: Expect::Pass,
            required: false,
            spec_version: RUNNER_SPEC_VERSION,
        });
    }

    Ok(tests)
}

/// Generate the canonical suite.
pub fn generate_suite() -> Result<Suite> {
    let mut tests = required_tests()?;
    tests.extend(optional_tests()?);
    Ok(Suite {
        name: GENERATOR_INFO.name.to_string(),
        version: GENERATOR_INFO.version.to_string(),
        spec_version: RUNNER_SPEC_VERSION,
        description: Some(
            "Canonical AppIdentity proof/verify test vectors, generated by app-identity-rs."
                .to_string(),
        ),
        tests,
    })
}

/// Resolve the destination filename for a generator run, appending
/// `.json` if missing.
pub fn destination_path(options: &GeneratorOptions) -> String {
    let base = options
        .suite_name
        .clone()
        .unwrap_or_else(|| "app-identity-suite-rs".to_string());
    if base.ends_with(".json") {
        base
    } else {
        format!("{base}.json")
    }
}
