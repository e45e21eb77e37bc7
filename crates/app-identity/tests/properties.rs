//! Property-based tests for the universal properties in the specification.

use std::sync::Mutex;

use app_identity::app::AppInput;
use app_identity::{nonce::NonceService, padlock, proof, registry, verify_strict, App};
use proptest::prelude::*;

static LOCK: Mutex<()> = Mutex::new(());

fn id_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,16}".prop_filter("no colon", |s| !s.contains(':'))
}

fn secret_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_!@#$%^&*]{1,32}".prop_filter("no colon", |s| !s.contains(':'))
}

fn version_strategy() -> impl Strategy<Value = u32> {
    prop_oneof![Just(1u32), Just(2u32), Just(3u32), Just(4u32)]
}

proptest! {
    /// Property 1: round-trip.
    #[test]
    fn round_trip_verifies(id in id_strategy(), secret in secret_strategy(), version in version_strategy()) {
        let _guard = LOCK.lock().unwrap();
        registry::reset();
        let app = App::new(AppInput::new().id(id.clone()).secret(secret).version(version)).unwrap();
        let policy = app_identity::versions::nonce_policy_for(version).unwrap();
        let nonce = NonceService::generate(policy);
        let padlock = padlock::compute_for_app(&app, &nonce).unwrap();
        let wire = proof::build_proof(&id, &nonce, &padlock, version);
        let parsed = proof::from_string(&wire).unwrap();
        let verified = verify_strict(&parsed, &app).unwrap();
        prop_assert!(verified.verified());
        prop_assert_eq!(verified.id(), id.as_str());
        prop_assert_eq!(verified.version(), version);
    }

    /// Property 2: tamper-evidence. Flipping a character of the decoded
    /// payload (here, a character inside the padlock field before
    /// re-encoding) must not verify.
    #[test]
    fn tamper_evidence(id in id_strategy(), secret in secret_strategy()) {
        let _guard = LOCK.lock().unwrap();
        registry::reset();
        let app = App::new(AppInput::new().id(id.clone()).secret(secret).version(1u32)).unwrap();
        let nonce = NonceService::generate(app_identity::NoncePolicy::Opaque);
        let padlock = padlock::compute_for_app(&app, &nonce).unwrap();
        let mut tampered_padlock = padlock.clone();
        let first = tampered_padlock.chars().next().unwrap();
        let replacement = if first == 'A' { 'B' } else { 'A' };
        tampered_padlock.replace_range(0..1, &replacement.to_string());

        let wire = proof::build_proof(&id, &nonce, &tampered_padlock, 1);
        let parsed = proof::from_string(&wire).unwrap();
        prop_assert!(verify_strict(&parsed, &app).is_err());
    }

    /// Property 3: mismatch between two distinct apps.
    #[test]
    fn distinct_apps_do_not_cross_verify(
        id_a in id_strategy(), secret_a in secret_strategy(),
        id_b in id_strategy(), secret_b in secret_strategy(),
    ) {
        prop_assume!(id_a != id_b || secret_a != secret_b);
        let _guard = LOCK.lock().unwrap();
        registry::reset();
        let app_a = App::new(AppInput::new().id(id_a.clone()).secret(secret_a).version(1u32)).unwrap();
        let app_b = App::new(AppInput::new().id(id_b).secret(secret_b).version(1u32)).unwrap();

        let nonce = NonceService::generate(app_identity::NoncePolicy::Opaque);
        let padlock = padlock::compute_for_app(&app_a, &nonce).unwrap();
        let wire = proof::build_proof(&id_a, &nonce, &padlock, 1);
        let parsed = proof::from_string(&wire).unwrap();

        prop_assert!(verify_strict(&parsed, &app_b).is_err());
    }

    /// Property 4: idempotence. Verifying the same proof twice yields the
    /// same outcome.
    #[test]
    fn verification_is_idempotent(id in id_strategy(), secret in secret_strategy()) {
        let _guard = LOCK.lock().unwrap();
        registry::reset();
        let app = App::new(AppInput::new().id(id.clone()).secret(secret).version(1u32)).unwrap();
        let nonce = NonceService::generate(app_identity::NoncePolicy::Opaque);
        let padlock = padlock::compute_for_app(&app, &nonce).unwrap();
        let wire = proof::build_proof(&id, &nonce, &padlock, 1);
        let parsed = proof::from_string(&wire).unwrap();

        let first = verify_strict(&parsed, &app).is_ok();
        let second = verify_strict(&parsed, &app).is_ok();
        prop_assert_eq!(first, second);
        prop_assert!(first);
    }

    /// Property 5: version gate.
    #[test]
    fn disallowing_a_version_gates_all_its_proofs(id in id_strategy(), secret in secret_strategy()) {
        let _guard = LOCK.lock().unwrap();
        registry::reset();
        let app = App::new(AppInput::new().id(id.clone()).secret(secret).version(1u32)).unwrap();
        let nonce = NonceService::generate(app_identity::NoncePolicy::Opaque);
        let padlock = padlock::compute_for_app(&app, &nonce).unwrap();
        let wire = proof::build_proof(&id, &nonce, &padlock, 1);
        let parsed = proof::from_string(&wire).unwrap();

        prop_assert!(verify_strict(&parsed, &app).is_ok());
        registry::disallow(1);
        prop_assert!(matches!(
            verify_strict(&parsed, &app),
            Err(app_identity::AppIdentityError::DisallowedVersion)
        ));
        registry::allow(1);
        prop_assert!(verify_strict(&parsed, &app).is_ok());
    }
}
