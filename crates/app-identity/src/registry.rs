//! Process-wide registry of disallowed proof versions.
//!
//! Reads must be safe under concurrent writes; writes are expected to be
//! rare (typically once at startup). A [`DashSet`] gives lock-free reads
//! for the common case and fine-grained locking for the rare mutation,
//! the same shape the teacher workspace reaches for to share a small
//! concurrent set across threads.

use dashmap::DashSet;
use once_cell::sync::Lazy;

static DISALLOWED: Lazy<DashSet<u32>> = Lazy::new(DashSet::new);

/// Mark `version` as disallowed. Idempotent.
pub fn disallow(version: u32) {
    DISALLOWED.insert(version);
    tracing::debug!(version, "version disallowed");
}

/// Remove `version` from the disallowed set. Idempotent.
pub fn allow(version: u32) {
    DISALLOWED.remove(&version);
    tracing::debug!(version, "version allowed");
}

/// True if `version` is currently disallowed.
pub fn is_disallowed(version: u32) -> bool {
    DISALLOWED.contains(&version)
}

/// Clear the disallowed set entirely.
///
/// Exists for test isolation: the design notes call for "no implicit
/// globals in tests (fresh set per test)". Production callers have no
/// reason to call this other than a full policy reset.
pub fn reset() {
    DISALLOWED.clear();
}

/// Serializes every test in this crate that touches [`DISALLOWED`], since
/// it is a single process-wide static shared by every test in the same
/// binary, including tests in other modules.
#[cfg(test)]
pub(crate) fn test_lock() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: once_cell::sync::Lazy<std::sync::Mutex<()>> =
        once_cell::sync::Lazy::new(|| std::sync::Mutex::new(()));
    LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_disallow_round_trip() {
        let _guard = test_lock();
        reset();
        assert!(!is_disallowed(2));
        disallow(2);
        assert!(is_disallowed(2));
        allow(2);
        assert!(!is_disallowed(2));
    }

    #[test]
    fn disallow_is_idempotent() {
        let _guard = test_lock();
        reset();
        disallow(3);
        disallow(3);
        assert!(is_disallowed(3));
        allow(3);
        assert!(!is_disallowed(3));
    }
}
