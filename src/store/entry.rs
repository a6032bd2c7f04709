//! Entry representation and the expiry predicate.

use std::time::Instant;

/// When an entry stops being valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// No expiry instant was recorded. Such an entry is treated as always
    /// expired and is removed on the very next sweep. `put` never produces
    /// this; it exists so an entry without a computed lifetime can never
    /// linger.
    Unset,
    /// Expired once `now` is strictly past the instant. At the exact
    /// instant of equality the entry is not yet expired.
    At(Instant),
}

impl Expiry {
    /// The sweep predicate.
    pub fn is_expired(self, now: Instant) -> bool {
        match self {
            Expiry::Unset => true,
            Expiry::At(instant) => now > instant,
        }
    }
}

/// A stored value plus its expiry.
///
/// Entries are replaced wholesale on overwrite; there are no merge
/// semantics.
#[derive(Debug, Clone)]
pub struct Entry {
    pub value: String,
    pub expires: Expiry,
}

impl Entry {
    pub fn new(value: String, expires: Expiry) -> Self {
        Self { value, expires }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_unset_is_always_expired() {
        assert!(Expiry::Unset.is_expired(Instant::now()));
    }

    #[test]
    fn test_future_instant_is_not_expired() {
        let now = Instant::now();
        assert!(!Expiry::At(now + Duration::from_secs(60)).is_expired(now));
    }

    #[test]
    fn test_past_instant_is_expired() {
        let now = Instant::now();
        assert!(Expiry::At(now).is_expired(now + Duration::from_nanos(1)));
    }

    #[test]
    fn test_not_expired_at_exact_equality() {
        let now = Instant::now();
        assert!(!Expiry::At(now).is_expired(now));
    }
}
