use std::sync::{PoisonError, RwLock};

use chrono::{NaiveDateTime, Utc};

/// Source of "now" for release decisions. Timestamps are naive UTC, the same
/// convention the attempts table stores.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().naive_utc()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    at: RwLock<NaiveDateTime>,
}

impl FixedClock {
    #[must_use]
    pub const fn new(at: NaiveDateTime) -> Self {
        Self {
            at: RwLock::new(at),
        }
    }

    pub fn set(&self, at: NaiveDateTime) {
        *self.at.write().unwrap_or_else(PoisonError::into_inner) = at;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.at.read().unwrap_or_else(PoisonError::into_inner)
    }
}
