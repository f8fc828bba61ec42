//! Time and identifier capabilities injected into the core.
//!
//! The service layer never reads the system clock or mints identifiers
//! directly; it goes through these traits so tests can pin both.

use time::{OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339};
use uuid::Uuid;

/// Source of the current instant and the local calendar date.
pub trait Clock {
    /// Current instant formatted as RFC 3339, recorded on saved snapshots.
    fn now_rfc3339(&self) -> String;

    /// Current calendar date on this device, `YYYY-MM-DD`, local time.
    fn today(&self) -> String;
}

/// Source of fresh history-entry identifiers.
pub trait IdSource {
    /// Produce a new identifier, unique with overwhelming probability.
    fn fresh(&self) -> Uuid;
}

/// Capabilities backed by the system clock and random UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_rfc3339(&self) -> String {
        OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_else(|_| "invalid-timestamp".into())
    }

    fn today(&self) -> String {
        let now = OffsetDateTime::now_utc();
        // Device-local date when the offset is known, UTC otherwise.
        let local = UtcOffset::current_local_offset()
            .map(|offset| now.to_offset(offset))
            .unwrap_or(now);
        let date = local.date();
        format!(
            "{:04}-{:02}-{:02}",
            date.year(),
            u8::from(date.month()),
            date.day()
        )
    }
}

impl IdSource for SystemClock {
    fn fresh(&self) -> Uuid {
        Uuid::new_v4()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn today_is_iso_shaped() {
        let today = SystemClock.today();
        assert_eq!(today.len(), 10);
        let bytes = today.as_bytes();
        assert_eq!(bytes[4], b'-');
        assert_eq!(bytes[7], b'-');
    }

    #[test]
    fn now_is_rfc3339_parseable() {
        let now = SystemClock.now_rfc3339();
        assert!(OffsetDateTime::parse(&now, &Rfc3339).is_ok());
    }

    #[test]
    fn fresh_ids_do_not_repeat() {
        assert_ne!(SystemClock.fresh(), SystemClock.fresh());
    }
}
