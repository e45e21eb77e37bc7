//! Verification: parse, reconcile with an app, recompute, compare.

use subtle::ConstantTimeEq;

use crate::app::App;
use crate::error::{AppIdentityError, Result};
use crate::nonce::NonceService;
use crate::padlock;
use crate::proof::{self, Proof};
use crate::registry;
use crate::versions;

/// The outcome of a soft verification: either a verified app, or nothing.
///
/// Deliberately distinct from `Result<App>` so a caller cannot accidentally
/// treat an unverified proof as an error without unwrapping an `Option`
/// first — the two failure shapes (hard error vs. soft "unverified") stay
/// visibly different in the type.
#[derive(Debug, Clone)]
pub enum VerifyOutcome {
    /// The proof verified; carries the app with `verified` set.
    Verified(App),
    /// The proof did not verify, for a verify-time (not construction-time)
    /// reason. The reason is discarded in soft mode.
    Unverified,
}

/// Verify `proof` against `app` in soft mode.
///
/// Construction-time errors and `disallowed_version` still surface as
/// `Err`; every other negative outcome collapses to `Ok(VerifyOutcome::Unverified)`.
/// Intended for middleware that wants a null-on-mismatch flow without
/// exception-driven control flow.
pub fn verify_soft(proof: &Proof, app: &App) -> Result<VerifyOutcome> {
    match verify_inner(proof, app) {
        Ok(verified_app) => Ok(VerifyOutcome::Verified(verified_app)),
        Err(AppIdentityError::DisallowedVersion) => Err(AppIdentityError::DisallowedVersion),
        Err(_) => Ok(VerifyOutcome::Unverified),
    }
}

/// Verify `proof` against `app` in strict mode.
///
/// Every negative outcome, construction-time or verify-time, surfaces as
/// a tagged `Err`. Intended for test suites and callers that want the
/// specific failure reason.
pub fn verify_strict(proof: &Proof, app: &App) -> Result<App> {
    verify_inner(proof, app)
}

/// Parse `proof_str` and verify it against `app` in strict mode.
pub fn verify_proof_str_strict(proof_str: &str, app: &App) -> Result<App> {
    let proof = proof::from_string(proof_str)?;
    verify_strict(&proof, app)
}

/// Parse `proof_str` and verify it against `app` in soft mode.
pub fn verify_proof_str_soft(proof_str: &str, app: &App) -> Result<VerifyOutcome> {
    let proof = match proof::from_string(proof_str) {
        Ok(proof) => proof,
        Err(AppIdentityError::ProofNotBase64) | Err(AppIdentityError::ProofInvalid) => {
            return Ok(VerifyOutcome::Unverified)
        }
        Err(other) => return Err(other),
    };
    verify_soft(&proof, app)
}

/// PARSED -> VERSION_OK -> ALLOWED -> VERSIONS_MATCH -> ID_MATCH -> NONCE_OK -> VERIFIED
fn verify_inner(proof: &Proof, app: &App) -> Result<App> {
    // VERSION_OK
    if !versions::is_supported(proof.version) {
        return Err(AppIdentityError::VersionNotPositiveInteger);
    }

    // ALLOWED
    if registry::is_disallowed(proof.version) {
        return Err(AppIdentityError::DisallowedVersion);
    }

    // VERSIONS_MATCH
    if proof.version != app.version() {
        return Err(AppIdentityError::VerifyVersionMismatch);
    }

    // ID_MATCH
    if proof.id != app.id() {
        return Err(AppIdentityError::VerifyAppMismatch);
    }

    // NONCE_OK
    let policy = versions::nonce_policy_for(proof.version)?;
    NonceService::validate(policy, &proof.nonce, app.effective_fuzz())?;

    // VERIFIED: recompute the padlock and compare in constant time.
    let expected = padlock::compute_for_app(app, &proof.nonce)?;
    if !constant_time_eq_ci_hex(&expected, &proof.padlock) {
        return Err(AppIdentityError::VerifyPadlockMismatch);
    }

    Ok(app.clone().mark_verified())
}

/// Case-insensitive, constant-time comparison of two hex strings.
///
/// Case is normalized first (an O(n) operation over non-secret, public
/// wire data), then the normalized bytes are compared in constant time
/// with respect to content, as a defense against remote timing attacks
/// on the secret-derived padlock.
fn constant_time_eq_ci_hex(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let a_upper = a.to_ascii_uppercase();
    let b_upper = b.to_ascii_uppercase();
    a_upper.as_bytes().ct_eq(b_upper.as_bytes()).into()
}
