//! Due item selection for a study session.
//!
//! Candidates come from three places, in this order:
//! - items that have never been attempted;
//! - items whose next review time has passed;
//! - when those fall short of the limit, the remaining items ranked by
//!   error rate and then average answer time, worst first.
//!
//! The combined list is shuffled before it is cut down to the limit. When the
//! first two groups already exceed the limit, the cut therefore drops random
//! items rather than the lowest priority ones.

use crate::store::StatStore;
use crate::types::{ItemId, ItemSet, ReviewRecord};
use chrono::NaiveDateTime;
use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Select up to `limit` distinct items from `items` for the current session.
pub fn select_due<S, R>(
    items: &ItemSet,
    store: &S,
    limit: usize,
    now: NaiveDateTime,
    rng: &mut R,
) -> Vec<ItemId>
where
    S: StatStore + ?Sized,
    R: Rng + ?Sized,
{
    if limit == 0 || items.is_empty() {
        return Vec::new();
    }

    let records = store.all();

    let mut due: Vec<&str> = items
        .ids()
        .filter(|id| !records.contains_key(*id))
        .collect();
    let never_reviewed = due.len();

    due.extend(items.ids().filter(|id| match records.get(*id) {
        Some(record) => is_due(id, record, now),
        None => false,
    }));

    tracing::debug!(
        never_reviewed,
        scheduled = due.len() - never_reviewed,
        limit,
        "collected due items"
    );

    if due.len() < limit {
        let taken: HashSet<&str> = due.iter().copied().collect();
        let mut remaining: Vec<(&str, Priority)> = items
            .ids()
            .filter(|id| !taken.contains(id))
            .map(|id| (id, Priority::of(records.get(id))))
            .collect();
        remaining.sort_by(|a, b| b.1.cmp_key(&a.1));

        let needed = limit - due.len();
        due.extend(remaining.into_iter().take(needed).map(|(id, _)| id));
    }

    due.shuffle(rng);
    due.truncate(limit);
    due.into_iter().map(str::to_string).collect()
}

/// Whether a record is due at `now`. Records with an unreadable next review
/// time are never due.
fn is_due(id: &str, record: &ReviewRecord, now: NaiveDateTime) -> bool {
    match record.next_review_at() {
        Some(next_review) => next_review <= now,
        None => {
            tracing::warn!(
                item = id,
                next_review = %record.next_review,
                "skipping item with unreadable next review time"
            );
            false
        }
    }
}

/// Fallback ranking key: higher error rate first, then slower answers.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Priority {
    error_rate: f64,
    avg_time: f64,
}

impl Priority {
    fn of(record: Option<&ReviewRecord>) -> Self {
        match record {
            Some(record) => Self {
                error_rate: record.error_rate(),
                avg_time: record.avg_time,
            },
            None => Self {
                error_rate: 0.0,
                avg_time: 0.0,
            },
        }
    }

    fn cmp_key(&self, other: &Self) -> Ordering {
        self.error_rate
            .total_cmp(&other.error_rate)
            .then(self.avg_time.total_cmp(&other.avg_time))
    }
}
