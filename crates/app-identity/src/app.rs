//! App credential construction and validation.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use zeroize::Zeroizing;

use crate::error::{AppIdentityError, Result};
use crate::versions;

/// An `id` as supplied by a caller: either already a string, or an integer
/// that must be stringified.
#[derive(Debug, Clone)]
pub enum IdInput {
    /// A string id.
    Str(String),
    /// An integer id, stringified during normalization.
    Int(i64),
}

impl From<&str> for IdInput {
    fn from(value: &str) -> Self {
        IdInput::Str(value.to_string())
    }
}

impl From<String> for IdInput {
    fn from(value: String) -> Self {
        IdInput::Str(value)
    }
}

impl From<i64> for IdInput {
    fn from(value: i64) -> Self {
        IdInput::Int(value)
    }
}

/// A `version` as supplied by a caller.
#[derive(Debug, Clone)]
pub enum VersionInput {
    /// Already an integer.
    Int(u32),
    /// A string that must parse to an integer.
    Str(String),
}

impl From<u32> for VersionInput {
    fn from(value: u32) -> Self {
        VersionInput::Int(value)
    }
}

impl From<&str> for VersionInput {
    fn from(value: &str) -> Self {
        VersionInput::Str(value.to_string())
    }
}

/// A secret as supplied by a caller: a raw value, or a zero-argument
/// provider invoked lazily. Mirrors the teacher's
/// `MasterKeyProvider`/`KeyProviderBuilder` pattern of resolving key
/// material behind a trait object rather than forcing eager retrieval.
#[derive(Clone)]
pub enum SecretInput {
    /// A secret value supplied directly.
    Literal(Vec<u8>),
    /// A zero-argument closure resolved at most once per use.
    Provider(Arc<dyn Fn() -> Result<Vec<u8>> + Send + Sync>),
}

impl fmt::Debug for SecretInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretInput::Literal(_) => write!(f, "Literal(..)"),
            SecretInput::Provider(_) => write!(f, "Provider(..)"),
        }
    }
}

impl From<&str> for SecretInput {
    fn from(value: &str) -> Self {
        SecretInput::Literal(value.as_bytes().to_vec())
    }
}

impl From<String> for SecretInput {
    fn from(value: String) -> Self {
        SecretInput::Literal(value.into_bytes())
    }
}

impl From<Vec<u8>> for SecretInput {
    fn from(value: Vec<u8>) -> Self {
        SecretInput::Literal(value)
    }
}

impl<F> From<F> for SecretInput
where
    F: Fn() -> Result<Vec<u8>> + Send + Sync + 'static,
{
    fn from(f: F) -> Self {
        SecretInput::Provider(Arc::new(f))
    }
}

/// Recognized app configuration. Unknown keys are preserved but ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Override for the nonce fuzz window, in seconds.
    pub fuzz: Option<i64>,
    /// Keys the core does not recognize, kept for round-tripping.
    pub extra: BTreeMap<String, Value>,
}

impl Config {
    fn from_value(value: Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(AppIdentityError::ConfigNotMap);
        };
        let mut config = Config::default();
        for (key, val) in map {
            if key == "fuzz" {
                config.fuzz = val.as_i64().filter(|f| *f > 0);
            } else {
                config.extra.insert(key, val);
            }
        }
        Ok(config)
    }
}

/// Caller-facing input to [`App::new`].
#[derive(Debug, Clone)]
pub struct AppInput {
    /// The app id.
    pub id: Option<IdInput>,
    /// The shared secret, literal or deferred.
    pub secret: Option<SecretInput>,
    /// The proof version this app speaks.
    pub version: Option<VersionInput>,
    /// Optional config, recognized key `fuzz`.
    pub config: Option<Value>,
}

impl AppInput {
    /// Start building an input with no fields set.
    pub fn new() -> Self {
        AppInput {
            id: None,
            secret: None,
            version: None,
            config: None,
        }
    }

    /// Set the id.
    pub fn id(mut self, id: impl Into<IdInput>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the secret.
    pub fn secret(mut self, secret: impl Into<SecretInput>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Set the version.
    pub fn version(mut self, version: impl Into<VersionInput>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the config map.
    pub fn config(mut self, config: Value) -> Self {
        self.config = Some(config);
        self
    }
}

impl Default for AppInput {
    fn default() -> Self {
        Self::new()
    }
}

/// A normalized, validated AppIdentity credential.
///
/// Once constructed, `id`/`secret`/`version`/`config` are immutable; the
/// same logical app hashes identically every time it is re-verified.
/// `verified` starts `false` and is only ever set by a successful
/// verification, never mutated back to `false`.
#[derive(Clone)]
pub struct App {
    id: String,
    secret: SecretInput,
    version: u32,
    config: Config,
    verified: bool,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("id", &self.id)
            .field("secret", &"Secret(..)")
            .field("version", &self.version)
            .field("config", &self.config)
            .field("verified", &self.verified)
            .finish()
    }
}

impl App {
    /// Construct and validate an App from caller input.
    pub fn new(input: AppInput) -> Result<Self> {
        let id = normalize_id(input.id)?;
        validate_secret_input(&input.secret)?;
        let secret = input.secret.ok_or(AppIdentityError::SecretNil)?;
        let version = normalize_version(input.version)?;
        let config = match input.config {
            Some(value) => Config::from_value(value)?,
            None => Config::default(),
        };

        Ok(App {
            id,
            secret,
            version,
            config,
            verified: false,
        })
    }

    /// The app's id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The app's proof version.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// The app's config.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether this app has been successfully verified.
    pub fn verified(&self) -> bool {
        self.verified
    }

    /// The effective fuzz window for this app: its config override, or the
    /// version's default.
    pub fn effective_fuzz(&self) -> i64 {
        self.config.fuzz.unwrap_or(versions::DEFAULT_FUZZ_SECONDS)
    }

    /// Resolve the secret, invoking a provider closure at most once.
    ///
    /// The returned bytes are zeroized on drop and must not outlive the
    /// single padlock computation that needs them.
    pub fn resolve_secret(&self) -> Result<Zeroizing<Vec<u8>>> {
        let raw = match &self.secret {
            SecretInput::Literal(bytes) => bytes.clone(),
            SecretInput::Provider(provider) => provider()?,
        };
        validate_secret_bytes(&raw)?;
        Ok(Zeroizing::new(raw))
    }

    /// Return a copy of this app with `verified` set to `true`.
    ///
    /// Crate-private: only the verifier may mint a verified App.
    pub(crate) fn mark_verified(mut self) -> Self {
        self.verified = true;
        self
    }
}

fn normalize_id(id: Option<IdInput>) -> Result<String> {
    let id = match id {
        None => return Err(AppIdentityError::IdNil),
        Some(IdInput::Str(s)) => s,
        Some(IdInput::Int(i)) => i.to_string(),
    };
    if id.is_empty() {
        return Err(AppIdentityError::IdEmpty);
    }
    if id.contains(':') {
        return Err(AppIdentityError::IdHasColon);
    }
    Ok(id)
}

fn validate_secret_input(secret: &Option<SecretInput>) -> Result<()> {
    match secret {
        None => Err(AppIdentityError::SecretNil),
        Some(SecretInput::Literal(bytes)) => validate_secret_bytes(bytes),
        Some(SecretInput::Provider(_)) => Ok(()),
    }
}

fn validate_secret_bytes(bytes: &[u8]) -> Result<()> {
    if bytes.is_empty() {
        return Err(AppIdentityError::SecretEmpty);
    }
    if bytes.contains(&b':') {
        return Err(AppIdentityError::SecretHasColon);
    }
    Ok(())
}

fn normalize_version(version: Option<VersionInput>) -> Result<u32> {
    let version = match version {
        None => return Err(AppIdentityError::VersionNil),
        Some(VersionInput::Int(v)) => v,
        Some(VersionInput::Str(s)) => {
            // Parse as a signed integer first so a syntactically valid but
            // non-positive string (e.g. "-5") is reported as
            // `VersionNotPositiveInteger`, not `VersionNotInteger`.
            let signed: i64 = s.parse().map_err(|_| AppIdentityError::VersionNotInteger)?;
            let unsigned: u32 = signed
                .try_into()
                .map_err(|_| AppIdentityError::VersionNotPositiveInteger)?;
            unsigned
        }
    };
    if version == 0 || !versions::is_supported(version) {
        return Err(AppIdentityError::VersionNotPositiveInteger);
    }
    Ok(version)
}
