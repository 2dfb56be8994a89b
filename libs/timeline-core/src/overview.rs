//! Progress figures for the current item set and for a single session.

use crate::store::StatStore;
use crate::types::ItemSet;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Snapshot of study progress over an item set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudyOverview {
    pub total_items: usize,
    /// Items that have a review record.
    pub studied_items: usize,
    /// Share of correct attempts over studied items, `None` before any attempt.
    /// Only records of items still in the set count; records left behind by
    /// removed items are ignored.
    pub accuracy: Option<f64>,
    /// Studied items due before the end of today.
    pub due_today: usize,
}

impl StudyOverview {
    pub fn compute<S: StatStore + ?Sized>(items: &ItemSet, store: &S, now: NaiveDateTime) -> Self {
        let end_of_today = now.date().and_hms_opt(23, 59, 59).unwrap_or(now);

        let records: Vec<_> = items.ids().filter_map(|id| store.get(id)).collect();

        let total_attempts: u64 = records.iter().map(|r| u64::from(r.total_attempts)).sum();
        let correct_attempts: u64 = records.iter().map(|r| u64::from(r.correct_attempts)).sum();
        let accuracy = (total_attempts > 0).then(|| correct_attempts as f64 / total_attempts as f64);

        let due_today = records
            .iter()
            .filter(|r| r.next_review_at().is_some_and(|at| at <= end_of_today))
            .count();

        Self {
            total_items: items.len(),
            studied_items: records.len(),
            accuracy,
            due_today,
        }
    }

    /// Studied share of the item set, 0 for an empty set.
    pub fn studied_ratio(&self) -> f64 {
        if self.total_items == 0 {
            0.0
        } else {
            self.studied_items as f64 / self.total_items as f64
        }
    }
}

/// Running tally of one study session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionSummary {
    pub questions_asked: u32,
    pub correct_answers: u32,
    pub wrong_answers: u32,
    /// Seconds spent answering.
    pub total_time: f64,
}

impl SessionSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, correct: bool, elapsed_secs: f64) {
        self.questions_asked += 1;
        if correct {
            self.correct_answers += 1;
        } else {
            self.wrong_answers += 1;
        }
        self.total_time += elapsed_secs;
    }

    pub fn is_empty(&self) -> bool {
        self.questions_asked == 0
    }

    pub fn accuracy(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            f64::from(self.correct_answers) / f64::from(self.questions_asked)
        }
    }

    pub fn average_time(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.total_time / f64::from(self.questions_asked)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::{format_timestamp, ReviewRecord};
    use chrono::{Duration, NaiveDate};
    use pretty_assertions::assert_eq;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 2)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn record(total: u32, correct: u32, next_review: &str) -> ReviewRecord {
        ReviewRecord {
            total_attempts: total,
            correct_attempts: correct,
            wrong_attempts: total - correct,
            next_review: next_review.to_string(),
            ..ReviewRecord::new(1.0, 2.5, now())
        }
    }

    #[test]
    fn overview_counts_only_current_items() {
        let items: ItemSet = [("a", "1"), ("b", "2"), ("c", "3"), ("d", "4")].into_iter().collect();
        let mut store = MemoryStore::new();
        let tonight = format_timestamp(now() + Duration::hours(13));
        let tomorrow = format_timestamp(now() + Duration::days(1));
        store.put("a", record(4, 3, &tonight)).unwrap();
        store.put("b", record(4, 1, &tomorrow)).unwrap();
        store.put("c", record(2, 2, "garbage")).unwrap();
        store.put("gone", record(10, 0, &tonight)).unwrap();

        let overview = StudyOverview::compute(&items, &store, now());

        assert_eq!(
            overview,
            StudyOverview {
                total_items: 4,
                studied_items: 3,
                accuracy: Some(0.6),
                due_today: 1,
            }
        );
        assert_eq!(overview.studied_ratio(), 0.75);
    }

    #[test]
    fn overview_of_untouched_set_has_no_accuracy() {
        let items: ItemSet = [("a", "1")].into_iter().collect();
        let overview = StudyOverview::compute(&items, &MemoryStore::new(), now());
        assert_eq!(overview.accuracy, None);
        assert_eq!(overview.due_today, 0);
        assert_eq!(StudyOverview::compute(&ItemSet::new(), &MemoryStore::new(), now()).studied_ratio(), 0.0);
    }

    #[test]
    fn session_summary_tallies() {
        let mut summary = SessionSummary::new();
        assert!(summary.is_empty());
        assert_eq!(summary.accuracy(), 0.0);

        summary.record(true, 4.0);
        summary.record(false, 8.0);
        summary.record(true, 3.0);

        assert_eq!(summary.questions_asked, 3);
        assert_eq!(summary.correct_answers, 2);
        assert_eq!(summary.wrong_answers, 1);
        assert!((summary.accuracy() - 2.0 / 3.0).abs() < 1e-9);
        assert!((summary.average_time() - 5.0).abs() < 1e-9);
    }
}
