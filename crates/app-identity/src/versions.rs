//! The closed versions registry: digest choice, nonce policy, and default
//! fuzz window per proof version.

use crate::error::{AppIdentityError, Result};

/// Digest algorithm selected for a given proof version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Digest {
    /// SHA-256, used by versions 1 and 2.
    Sha256,
    /// SHA-384, used by version 3.
    Sha384,
    /// SHA-512, used by version 4.
    Sha512,
}

impl Digest {
    /// Size of this digest's output, in bytes.
    pub fn output_len(self) -> usize {
        match self {
            Digest::Sha256 => 32,
            Digest::Sha384 => 48,
            Digest::Sha512 => 64,
        }
    }
}

/// Nonce policy associated with a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoncePolicy {
    /// v1: any non-empty, colon-free opaque token.
    Opaque,
    /// v2-v4: a near-present UTC timestamp, checked against a fuzz window.
    TimestampFuzz,
}

/// Default fuzz window, in seconds, for versions using [`NoncePolicy::TimestampFuzz`].
pub const DEFAULT_FUZZ_SECONDS: i64 = 600;

/// The set of versions this build supports.
pub const SUPPORTED_VERSIONS: [u32; 4] = [1, 2, 3, 4];

/// Look up the digest algorithm for a version.
///
/// Returns [`AppIdentityError::VersionNotPositiveInteger`] for any version
/// outside the closed enumeration.
pub fn digest_for(version: u32) -> Result<Digest> {
    match version {
        1 | 2 => Ok(Digest::Sha256),
        3 => Ok(Digest::Sha384),
        4 => Ok(Digest::Sha512),
        _ => Err(AppIdentityError::VersionNotPositiveInteger),
    }
}

/// Look up the nonce policy for a version.
pub fn nonce_policy_for(version: u32) -> Result<NoncePolicy> {
    match version {
        1 => Ok(NoncePolicy::Opaque),
        2 | 3 | 4 => Ok(NoncePolicy::TimestampFuzz),
        _ => Err(AppIdentityError::VersionNotPositiveInteger),
    }
}

/// True if `version` is one of the four versions this build knows about.
pub fn is_supported(version: u32) -> bool {
    SUPPORTED_VERSIONS.contains(&version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_mapping_matches_table() {
        assert_eq!(digest_for(1).unwrap(), Digest::Sha256);
        assert_eq!(digest_for(2).unwrap(), Digest::Sha256);
        assert_eq!(digest_for(3).unwrap(), Digest::Sha384);
        assert_eq!(digest_for(4).unwrap(), Digest::Sha512);
        assert!(digest_for(5).is_err());
    }

    #[test]
    fn nonce_policy_mapping_matches_table() {
        assert_eq!(nonce_policy_for(1).unwrap(), NoncePolicy::Opaque);
        for v in [2, 3, 4] {
            assert_eq!(nonce_policy_for(v).unwrap(), NoncePolicy::TimestampFuzz);
        }
    }

    #[test]
    fn supported_set_is_closed() {
        assert!(is_supported(1));
        assert!(is_supported(4));
        assert!(!is_supported(0));
        assert!(!is_supported(5));
    }
}
