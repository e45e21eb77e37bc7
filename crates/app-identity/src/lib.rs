//! AppIdentity: a lightweight application-to-application authentication
//! scheme.
//!
//! A client holding a shared `(id, secret)` credential generates a short
//! opaque *proof* that a server holding the same credential can verify.
//! This crate implements the proof algorithm and its wire framing: app
//! credential validation, nonce policy, the keyed-digest padlock, proof
//! serialization, and verification. It does not implement HTTP middleware,
//! CLI wrappers, telemetry, or credential storage — those are thin
//! collaborators layered on top of this core by other crates.
//!
//! See [`app_identity_suite`](https://docs.rs/app-identity-suite) for the
//! integration test-suite generator and TAP runner built on top of this
//! crate.

pub mod app;
pub mod error;
pub mod nonce;
pub mod padlock;
pub mod proof;
pub mod registry;
pub mod verify;
pub mod versions;

pub use app::{App, AppInput, Config, IdInput, SecretInput, VersionInput};
pub use error::{AppIdentityError, Result};
pub use nonce::NonceService;
pub use proof::Proof;
pub use verify::{
    verify_proof_str_soft, verify_proof_str_strict, verify_soft, verify_strict, VerifyOutcome,
};
pub use versions::{Digest, NoncePolicy, DEFAULT_FUZZ_SECONDS, SUPPORTED_VERSIONS};
