//! Review scheduling.

pub mod sm2;

use crate::types::ReviewRecord;
use chrono::{Duration, NaiveDateTime};

pub use sm2::Sm2;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Result of scheduling an item after an attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulingResult {
    pub new_record: ReviewRecord,
    pub next_review: NaiveDateTime,
}

/// `at` plus a possibly fractional number of days, saturating at the
/// calendar limits.
pub fn add_days(at: NaiveDateTime, days: f64) -> NaiveDateTime {
    let millis = (days * MILLIS_PER_DAY).round() as i64;
    Duration::try_milliseconds(millis)
        .and_then(|delta| at.checked_add_signed(delta))
        .unwrap_or(if millis < 0 {
            NaiveDateTime::MIN
        } else {
            NaiveDateTime::MAX
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn whole_days() {
        assert_eq!(add_days(noon(), 6.0), noon() + Duration::days(6));
    }

    #[test]
    fn fractional_days_keep_the_remainder() {
        assert_eq!(add_days(noon(), 2.5), noon() + Duration::hours(60));
    }

    #[test]
    fn absurd_interval_saturates() {
        assert_eq!(add_days(noon(), 1e300), NaiveDateTime::MAX);
    }
}
