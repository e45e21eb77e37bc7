//! Nonce generation and validation, per-version.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{AppIdentityError, Result};
use crate::versions::NoncePolicy;

/// Stateless nonce generation and validation. A unit struct: there is no
/// instance state to carry, matching the "no shared mutable state" posture
/// the core's concurrency model requires.
pub struct NonceService;

/// Format string for the basic ISO-8601 nonce: date/time delimiters
/// removed, microsecond precision, trailing `Z`.
const BASIC_ISO8601_FORMAT: &str = "%Y%m%dT%H%M%S%.6fZ";

impl NonceService {
    /// Generate a nonce appropriate for `version`.
    pub fn generate(policy: NoncePolicy) -> String {
        match policy {
            NoncePolicy::Opaque => Uuid::new_v4().to_string(),
            NoncePolicy::TimestampFuzz => Utc::now().format(BASIC_ISO8601_FORMAT).to_string(),
        }
    }

    /// Validate `nonce` under `policy`, with `fuzz` seconds of tolerance
    /// for timestamp-based policies.
    pub fn validate(policy: NoncePolicy, nonce: &str, fuzz: i64) -> Result<()> {
        if nonce.is_empty() {
            return Err(AppIdentityError::VerifyNonceEmpty);
        }

        match policy {
            // A nonce reaching here through the proof codec can never
            // contain a `:` (it is a field produced by splitting on `:`),
            // so opaque validation only needs the emptiness check above.
            NoncePolicy::Opaque => Ok(()),
            NoncePolicy::TimestampFuzz => {
                let nonce_time = parse_timestamp(nonce)?;
                let delta = (Utc::now() - nonce_time).num_seconds().abs();
                if delta > fuzz {
                    return Err(AppIdentityError::VerifyNonceFuzz);
                }
                Ok(())
            }
        }
    }
}

/// Parse a nonce timestamp, tolerating both the basic (`YYYYMMDDTHHMMSS.ffffffZ`)
/// and extended (RFC 3339) ISO-8601 forms.
fn parse_timestamp(nonce: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(nonce) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(nonce, BASIC_ISO8601_FORMAT) {
        return Ok(DateTime::from_naive_utc_and_offset(naive, Utc));
    }
    // Tolerate missing sub-second precision on the basic form.
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(nonce, "%Y%m%dT%H%M%SZ") {
        return Ok(DateTime::from_naive_utc_and_offset(naive, Utc));
    }
    Err(AppIdentityError::VerifyNonceFormat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn opaque_nonce_is_a_uuid_shape() {
        let nonce = NonceService::generate(NoncePolicy::Opaque);
        assert_eq!(nonce.len(), 36);
        assert!(!nonce.contains(':'));
    }

    #[test]
    fn timestamp_nonce_round_trips_through_validation() {
        let nonce = NonceService::generate(NoncePolicy::TimestampFuzz);
        assert!(NonceService::validate(NoncePolicy::TimestampFuzz, &nonce, 600).is_ok());
    }

    #[test]
    fn opaque_validation_accepts_any_non_empty_colon_free_string() {
        assert!(NonceService::validate(NoncePolicy::Opaque, "anything-goes", 0).is_ok());
    }

    #[test]
    fn empty_nonce_is_rejected_for_both_policies() {
        assert_eq!(
            NonceService::validate(NoncePolicy::Opaque, "", 0).unwrap_err(),
            AppIdentityError::VerifyNonceEmpty
        );
        assert_eq!(
            NonceService::validate(NoncePolicy::TimestampFuzz, "", 600).unwrap_err(),
            AppIdentityError::VerifyNonceEmpty
        );
    }

    #[test]
    fn unparseable_timestamp_is_rejected() {
        let err = NonceService::validate(NoncePolicy::TimestampFuzz, "not-a-timestamp", 600)
            .unwrap_err();
        assert_eq!(err, AppIdentityError::VerifyNonceFormat);
    }

    #[test]
    fn out_of_window_timestamp_is_rejected() {
        let old = (Utc::now() - Duration::seconds(650)).format(BASIC_ISO8601_FORMAT).to_string();
        let err = NonceService::validate(NoncePolicy::TimestampFuzz, &old, 600).unwrap_err();
        assert_eq!(err, AppIdentityError::VerifyNonceFuzz);
    }

    #[test]
    fn in_window_timestamp_is_accepted() {
        let recent = (Utc::now() - Duration::seconds(300)).format(BASIC_ISO8601_FORMAT).to_string();
        assert!(NonceService::validate(NoncePolicy::TimestampFuzz, &recent, 600).is_ok());
    }

    #[test]
    fn extended_iso8601_form_is_tolerated() {
        let extended = Utc::now().to_rfc3339();
        assert!(NonceService::validate(NoncePolicy::TimestampFuzz, &extended, 600).is_ok());
    }
}
