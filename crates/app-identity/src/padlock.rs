//! Padlock computation: the keyed digest over `id:nonce:secret`.

use sha2::{Digest as _, Sha256, Sha384, Sha512};

use crate::app::App;
use crate::error::Result;
use crate::versions::{self, Digest};

/// Compute the padlock for `(id, nonce, secret)` under `version`'s digest.
///
/// Emission is uppercase hex; comparison elsewhere is case-insensitive,
/// which is why this function does not itself normalize case on its
/// output.
pub fn compute(id: &str, nonce: &str, secret: &[u8], version: u32) -> Result<String> {
    let digest = versions::digest_for(version)?;
    Ok(hash_hex(digest, &build_message(id, nonce, secret)))
}

/// Compute the padlock for an [`App`], resolving its secret (possibly via a
/// deferred provider) exactly once.
pub fn compute_for_app(app: &App, nonce: &str) -> Result<String> {
    let secret = app.resolve_secret()?;
    compute(app.id(), nonce, &secret, app.version())
}

fn build_message(id: &str, nonce: &str, secret: &[u8]) -> Vec<u8> {
    let mut message = Vec::with_capacity(id.len() + nonce.len() + secret.len() + 2);
    message.extend_from_slice(id.as_bytes());
    message.push(b':');
    message.extend_from_slice(nonce.as_bytes());
    message.push(b':');
    message.extend_from_slice(secret);
    message
}

fn hash_hex(digest: Digest, message: &[u8]) -> String {
    let bytes = match digest {
        Digest::Sha256 => Sha256::digest(message).to_vec(),
        Digest::Sha384 => Sha384::digest(message).to_vec(),
        Digest::Sha512 => Sha512::digest(message).to_vec(),
    };
    debug_assert_eq!(bytes.len(), digest.output_len());
    hex::encode_upper(bytes)
}
