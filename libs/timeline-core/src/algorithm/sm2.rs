//! SM-2 spaced repetition algorithm.
//!
//! Intervals are real-valued days: once past the fixed 1 and 6 day steps the
//! interval is multiplied by the ease factor without rounding.
//!
//! The ease floor is only enforced on a pass. A failed attempt subtracts 0.2
//! whenever the ease is at or above the floor, and does not clamp afterwards,
//! so repeated failures can take the ease below the floor. Stored statistics
//! depend on this exact behavior.

use super::{add_days, SchedulingResult};
use crate::types::{format_timestamp, PerformanceScore, ReviewRecord};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Ease penalty applied on a failed attempt.
const LAPSE_PENALTY: f64 = 0.2;

/// SM-2 algorithm with configurable parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sm2 {
    pub initial_ease: f64,
    pub minimum_ease: f64,
    pub initial_interval: f64,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            initial_ease: 2.5,
            minimum_ease: 1.3,
            initial_interval: 1.0,
        }
    }
}

impl Sm2 {
    /// Record for an item attempted for the first time.
    pub fn initial_record(&self, now: NaiveDateTime) -> ReviewRecord {
        ReviewRecord::new(self.initial_interval, self.initial_ease, now)
    }

    /// Calculate the record that follows an attempt scored `score`.
    ///
    /// Attempt counters and the running time are left alone; they are
    /// updated when the attempt itself is recorded.
    pub fn schedule(
        &self,
        record: &ReviewRecord,
        score: PerformanceScore,
        now: NaiveDateTime,
    ) -> SchedulingResult {
        let (interval, ease_factor) = if score.is_passing() {
            self.schedule_pass(record, score)
        } else {
            self.schedule_fail(record)
        };

        let next_review = add_days(now, interval);

        SchedulingResult {
            new_record: ReviewRecord {
                interval,
                ease_factor,
                last_review: format_timestamp(now),
                next_review: format_timestamp(next_review),
                ..record.clone()
            },
            next_review,
        }
    }

    fn schedule_pass(&self, record: &ReviewRecord, score: PerformanceScore) -> (f64, f64) {
        let interval = if record.interval == 1.0 {
            1.0
        } else if record.interval == 2.0 {
            6.0
        } else {
            record.interval * record.ease_factor
        };

        let shortfall = f64::from(PerformanceScore::MAX - score.value());
        let ease = record.ease_factor + (0.1 - shortfall * (0.08 + shortfall * 0.02));
        (interval, ease.max(self.minimum_ease))
    }

    fn schedule_fail(&self, record: &ReviewRecord) -> (f64, f64) {
        let ease = if record.ease_factor >= self.minimum_ease {
            record.ease_factor - LAPSE_PENALTY
        } else {
            record.ease_factor
        };
        (1.0, ease)
    }
}
