//! Local record of the last successful code validation.
//!
//! Validity is recomputed from the stored timestamp on every check. The record
//! lives in local storage and can be edited by the user, so this is a soft
//! rate limit on casual code reuse, not a security boundary.

use chrono::{DateTime, FixedOffset, TimeDelta};

use crate::domain::{Clock, KeyValueStore};
use crate::use_cases::LAST_ACCESS_KEY;

#[derive(Clone)]
pub struct AccessLedger<C, S> {
    pub clock: C,
    pub store: S,
}

impl<C, S> AccessLedger<C, S>
where
    C: Clock,
    S: KeyValueStore,
{
    /// Overwrites the access record with the current instant. Best effort.
    pub async fn record_access_now(&self) {
        let stamp = self.clock.now().to_rfc3339();
        if let Err(err) = self.store.set(LAST_ACCESS_KEY, &stamp).await {
            tracing::warn!(error = %err, "failed to record access time.");
        }
    }

    /// True while the record was made today (local calendar), it is still
    /// before next midnight, and less than 24 hours have elapsed.
    pub async fn has_valid_access(&self) -> bool {
        let Some(last_access) = self.last_access().await else {
            return false;
        };
        let now = self.clock.now();
        let Some(start_of_tomorrow) = start_of_next_day(&now) else {
            return false;
        };

        // All three must hold; they only disagree around day boundaries.
        let granted_today = last_access.date_naive() == now.date_naive();
        let before_next_midnight = now < start_of_tomorrow;
        let within_a_day = now.signed_duration_since(last_access) < TimeDelta::hours(24);

        granted_today && before_next_midnight && within_a_day
    }

    /// Start of tomorrow when the record was made today, otherwise `None`.
    pub async fn access_expires_at(&self) -> Option<DateTime<FixedOffset>> {
        let last_access = self.last_access().await?;
        let now = self.clock.now();
        if last_access.date_naive() != now.date_naive() {
            return None;
        }
        start_of_next_day(&now)
    }

    /// Removes the access record. Best effort.
    pub async fn clear(&self) {
        if let Err(err) = self.store.remove(LAST_ACCESS_KEY).await {
            tracing::warn!(error = %err, "failed to clear access record.");
        }
    }

    // Stored record expressed in the current local offset, so calendar dates
    // compare on the same wall clock.
    async fn last_access(&self) -> Option<DateTime<FixedOffset>> {
        let raw = match self.store.get(LAST_ACCESS_KEY).await {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return None,
            Err(err) => {
                tracing::debug!(error = %err, "failed to read access record.");
                return None;
            }
        };

        match DateTime::parse_from_rfc3339(&raw) {
            Ok(stamp) => Some(stamp.with_timezone(self.clock.now().offset())),
            Err(err) => {
                tracing::debug!(error = %err, "ignoring unparsable access record.");
                None
            }
        }
    }
}

fn start_of_next_day(now: &DateTime<FixedOffset>) -> Option<DateTime<FixedOffset>> {
    now.date_naive()
        .succ_opt()?
        .and_hms_opt(0, 0, 0)?
        .and_local_timezone(*now.offset())
        .single()
}
