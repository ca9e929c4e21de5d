//! Injectable sources of time and identifiers.
//!
//! `now` and `uuid` are the only non-deterministic template functions. The
//! registry draws them from a [`Clock`] and an [`IdGenerator`] so tests can
//! substitute fixed values.

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;

    /// The current instant as RFC 3339 text, as returned to templates.
    fn now_rfc3339(&self) -> String {
        self.now().to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Source of random identifiers.
pub trait IdGenerator: Send + Sync {
    /// A new UUID.
    fn uuid(&self) -> Uuid;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Random version 4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn uuid(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// An id generator that always returns the same UUID.
#[derive(Debug, Clone, Copy)]
pub struct FixedIds(pub Uuid);

impl IdGenerator for FixedIds {
    fn uuid(&self) -> Uuid {
        self.0
    }
}
