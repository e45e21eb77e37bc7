//! The canonical Suite JSON document: a reproducible set of proof test
//! vectors, generated once and consumed repeatedly, possibly by another
//! language's implementation of the same scheme.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use app_identity::app::{AppInput, IdInput};
use app_identity::App;

use crate::error::{Result, SuiteError};

/// The spec version this crate's suite documents are generated under, and
/// the highest spec version this runner understands.
pub const RUNNER_SPEC_VERSION: u32 = 1;

/// An app's credential, as it appears inside a [`Test`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppSpec {
    /// The app id. Accepted as either a JSON string or number.
    pub id: Value,
    /// The shared secret.
    pub secret: String,
    /// The proof version this app speaks.
    pub version: u32,
    /// Optional config map, recognized key `fuzz`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
}

impl AppSpec {
    /// Build a core [`App`] from this spec.
    pub fn to_app(&self) -> Result<App> {
        let id_input: IdInput = match &self.id {
            Value::String(s) => IdInput::Str(s.clone()),
            Value::Number(n) => IdInput::Int(n.as_i64().unwrap_or_default()),
            _ => IdInput::Str(self.id.to_string()),
        };
        let mut input = AppInput::new()
            .id(id_input)
            .secret(self.secret.as_str())
            .version(self.version);
        if let Some(config) = self.config.clone() {
            input = input.config(config);
        }
        Ok(App::new(input)?)
    }
}

/// Expected outcome of verifying a [`Test`]'s proof against its app.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Expect {
    /// The proof must verify.
    Pass,
    /// The proof must not verify.
    Fail,
}

/// A single test vector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Test {
    /// Human-readable description, used as the TAP test name.
    pub description: String,
    /// The app to verify the proof against.
    pub app: AppSpec,
    /// The wire-form proof string.
    pub proof: String,
    /// Whether verification is expected to pass or fail.
    pub expect: Expect,
    /// Whether a conforming implementation MUST pass this test (vs. SHOULD).
    pub required: bool,
    /// The spec version this test was generated under.
    pub spec_version: u32,
}

/// A complete suite document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Suite {
    /// Suite name, e.g. the implementation that produced it.
    pub name: String,
    /// Suite version string.
    pub version: String,
    /// The spec version this suite targets.
    pub spec_version: u32,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The test vectors. Must be non-empty.
    pub tests: Vec<Test>,
}

impl Suite {
    /// Parse a suite document from JSON text, validating the non-empty
    /// `tests` invariant.
    pub fn from_json(text: &str) -> Result<Self> {
        let suite: Suite = serde_json::from_str(text)?;
        if suite.tests.is_empty() {
            return Err(SuiteError::InvalidSuite(
                "tests must be non-empty".to_string(),
            ));
        }
        Ok(suite)
    }

    /// Serialize this suite to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
