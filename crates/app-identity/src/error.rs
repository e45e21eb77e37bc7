//! Error types for AppIdentity construction, verification, and registry access.

use thiserror::Error;

/// All error conditions the core can surface.
///
/// Callers distinguish outcomes by matching on the variant, never on the
/// formatted message. No variant ever carries secret material — only the
/// name of the offending field and a stable reason.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AppIdentityError {
    /// `id` was not supplied.
    #[error("id is required")]
    IdNil,
    /// `id` was supplied but empty.
    #[error("id must not be empty")]
    IdEmpty,
    /// `id` contains a `:`, which the wire format reserves as a separator.
    #[error("id must not contain ':'")]
    IdHasColon,
    /// `secret` was not supplied.
    #[error("secret is required")]
    SecretNil,
    /// `secret` resolved to an empty value.
    #[error("secret must not be empty")]
    SecretEmpty,
    /// `secret` did not resolve to a binary string.
    ///
    /// Unreachable in this port: `SecretInput` only admits `&str`, `String`,
    /// `Vec<u8>`, or a provider closure returning `Result<Vec<u8>>`, so a
    /// non-binary secret is a type error at the call site, not a runtime
    /// outcome this enum needs to report. Kept as a variant so the error
    /// tag set stays a complete match for every tag in the specification,
    /// and so a future `SecretInput` source that accepts untyped input
    /// (e.g. an arbitrary `serde_json::Value`) has somewhere to report it.
    #[error("secret must be a binary string")]
    SecretNotBinary,
    /// `secret` contains a `:`.
    #[error("secret must not contain ':'")]
    SecretHasColon,
    /// `version` was not supplied.
    #[error("version is required")]
    VersionNil,
    /// `version` was supplied but is not one of the supported positive integers.
    #[error("version must be a supported positive integer")]
    VersionNotPositiveInteger,
    /// `version` was supplied as a string that does not parse to an integer.
    #[error("version must be an integer")]
    VersionNotInteger,
    /// `config` was supplied but is not a mapping.
    #[error("config must be a map")]
    ConfigNotMap,

    /// The proof's version is not a version this build of the registry knows.
    #[error("disallowed version")]
    DisallowedVersion,
    /// The proof's version does not match the verifying app's version.
    #[error("version mismatch between proof and app")]
    VerifyVersionMismatch,
    /// The proof's id does not match the verifying app's id.
    #[error("app mismatch between proof and app")]
    VerifyAppMismatch,
    /// The nonce was empty.
    #[error("nonce must not be empty")]
    VerifyNonceEmpty,
    /// The nonce could not be parsed under the version's nonce policy.
    #[error("nonce format is invalid for this version")]
    VerifyNonceFormat,
    /// The nonce's timestamp fell outside the allowed fuzz window.
    #[error("nonce is outside the permitted fuzz window")]
    VerifyNonceFuzz,
    /// The recomputed padlock did not match the proof's padlock.
    #[error("padlock does not match")]
    VerifyPadlockMismatch,

    /// The proof string was not valid base64url.
    #[error("proof is not valid base64url")]
    ProofNotBase64,
    /// The decoded proof did not have a recognizable field layout.
    #[error("proof is malformed")]
    ProofInvalid,
}

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, AppIdentityError>;
