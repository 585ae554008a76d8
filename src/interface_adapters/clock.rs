use chrono::{DateTime, FixedOffset, Local};

use crate::domain::Clock;

// System clock adapter. Reports local time with the offset in force right now.
#[derive(Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}
