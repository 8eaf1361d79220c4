use chrono::{DateTime, Utc};

///
/// Clock
///
/// Source of "now" for open-ended temporal intervals built during rewrite.
///

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

///
/// SystemClock
///

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

///
/// FixedClock
///
/// Clock pinned to a single instant.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
