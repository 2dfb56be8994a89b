//! Recording attempts and outcomes against a stat store.

use crate::algorithm::{add_days, Sm2};
use crate::selector;
use crate::store::StatStore;
use crate::types::{ItemId, ItemSet, PerformanceScore};
use chrono::{Local, NaiveDateTime};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Days until review for an item that has no record yet.
const UNTRACKED_REVIEW_DAYS: f64 = 1.0;

/// Update attempt statistics for `id`, creating its record on first use.
pub fn record_attempt<S: StatStore + ?Sized>(
    store: &mut S,
    sm2: &Sm2,
    id: &str,
    correct: bool,
    elapsed_secs: f64,
    now: NaiveDateTime,
) -> Result<(), S::Error> {
    let mut record = match store.get(id) {
        Some(record) => record,
        None => {
            tracing::debug!(item = id, "creating review record");
            sm2.initial_record(now)
        }
    };
    record.register_attempt(correct, elapsed_secs);
    store.put(id, record)
}

/// Reschedule `id` after an attempt scored `score` and return its next
/// review time.
///
/// An item without a record is reported as due one day from `now` and no
/// record is created for it.
pub fn record_outcome<S: StatStore + ?Sized>(
    store: &mut S,
    sm2: &Sm2,
    id: &str,
    score: PerformanceScore,
    now: NaiveDateTime,
) -> Result<NaiveDateTime, S::Error> {
    let Some(record) = store.get(id) else {
        tracing::debug!(item = id, "no review record, using default schedule");
        return Ok(add_days(now, UNTRACKED_REVIEW_DAYS));
    };

    let result = sm2.schedule(&record, score, now);
    tracing::debug!(
        item = id,
        score = score.value(),
        interval = result.new_record.interval,
        ease_factor = result.new_record.ease_factor,
        "rescheduled item"
    );
    store.put(id, result.new_record)?;
    Ok(result.next_review)
}

/// Current local wall-clock time, the reference for all scheduling.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Review engine bound to one stat store.
#[derive(Debug)]
pub struct ReviewSystem<S> {
    store: S,
    sm2: Sm2,
    rng: ChaCha8Rng,
}

impl<S: StatStore> ReviewSystem<S> {
    pub fn new(store: S, sm2: Sm2) -> Self {
        Self {
            store,
            sm2,
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Engine whose shuffles are reproducible.
    pub fn with_seed(store: S, sm2: Sm2, seed: u64) -> Self {
        Self {
            store,
            sm2,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn select_due(&mut self, items: &ItemSet, limit: usize) -> Vec<ItemId> {
        self.select_due_at(items, limit, local_now())
    }

    pub fn select_due_at(&mut self, items: &ItemSet, limit: usize, now: NaiveDateTime) -> Vec<ItemId> {
        selector::select_due(items, &self.store, limit, now, &mut self.rng)
    }

    pub fn record_attempt(&mut self, id: &str, correct: bool, elapsed_secs: f64) -> Result<(), S::Error> {
        self.record_attempt_at(id, correct, elapsed_secs, local_now())
    }

    pub fn record_attempt_at(
        &mut self,
        id: &str,
        correct: bool,
        elapsed_secs: f64,
        now: NaiveDateTime,
    ) -> Result<(), S::Error> {
        record_attempt(&mut self.store, &self.sm2, id, correct, elapsed_secs, now)
    }

    pub fn record_outcome(&mut self, id: &str, score: PerformanceScore) -> Result<NaiveDateTime, S::Error> {
        self.record_outcome_at(id, score, local_now())
    }

    pub fn record_outcome_at(
        &mut self,
        id: &str,
        score: PerformanceScore,
        now: NaiveDateTime,
    ) -> Result<NaiveDateTime, S::Error> {
        record_outcome(&mut self.store, &self.sm2, id, score, now)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn sm2(&self) -> &Sm2 {
        &self.sm2
    }

    /// Random source shared with question building, so one seed covers a
    /// whole session.
    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 9, 1)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap()
    }

    fn score(value: u8) -> PerformanceScore {
        PerformanceScore::new(value).unwrap()
    }

    #[test]
    fn outcome_without_record_is_one_day_out_and_creates_nothing() {
        let mut store = MemoryStore::new();
        let next = record_outcome(&mut store, &Sm2::default(), "ghost", score(5), now()).unwrap();
        assert_eq!(next, now() + Duration::days(1));
        assert!(store.get("ghost").is_none());
    }

    #[test]
    fn first_attempt_creates_default_record() {
        let mut store = MemoryStore::new();
        record_attempt(&mut store, &Sm2::default(), "Wuchang Uprising", true, 2.0, now()).unwrap();

        let record = store.get("Wuchang Uprising").unwrap();
        assert_eq!(record.total_attempts, 1);
        assert_eq!(record.correct_attempts, 1);
        assert_eq!(record.wrong_attempts, 0);
        assert_eq!(record.avg_time, 2.0);
        assert_eq!(record.interval, 1.0);
        assert_eq!(record.ease_factor, 2.5);
        assert_eq!(record.last_review_at(), Some(now()));
    }

    #[test]
    fn fresh_fast_correct_answer_scenario() {
        let mut system = ReviewSystem::with_seed(MemoryStore::new(), Sm2::default(), 1);
        let elapsed = 2.0;
        let score = PerformanceScore::from_attempt(true, elapsed);
        assert_eq!(score.value(), 5);

        system.record_attempt_at("May Fourth", true, elapsed, now()).unwrap();
        let next = system.record_outcome_at("May Fourth", score, now()).unwrap();

        let record = system.store().get("May Fourth").unwrap();
        assert_eq!(record.interval, 1.0);
        assert!((record.ease_factor - 2.6).abs() < 1e-9);
        assert_eq!(next, now() + Duration::days(1));
        assert_eq!(record.next_review_at(), Some(next));
    }

    #[test]
    fn average_time_is_the_mean_of_all_attempts() {
        let mut store = MemoryStore::new();
        let times = [3.0, 7.5, 1.25, 12.0];
        for (i, t) in times.iter().enumerate() {
            record_attempt(&mut store, &Sm2::default(), "x", i % 2 == 0, *t, now()).unwrap();
        }
        let record = store.get("x").unwrap();
        let mean = times.iter().sum::<f64>() / times.len() as f64;
        assert!((record.avg_time - mean).abs() < 1e-9);
        assert_eq!(record.total_attempts, record.correct_attempts + record.wrong_attempts);
    }

    #[test]
    fn answered_item_drops_out_of_due_list() {
        let items: ItemSet = [("a", "1911"), ("b", "1919")].into_iter().collect();
        let mut system = ReviewSystem::with_seed(MemoryStore::new(), Sm2::default(), 3);

        system.record_attempt_at("a", true, 1.0, now()).unwrap();
        system
            .record_outcome_at("a", PerformanceScore::from_attempt(true, 1.0), now())
            .unwrap();

        // "a" is scheduled a day out, "b" was never seen
        let due = system.select_due_at(&items, 1, now());
        assert_eq!(due, vec!["b".to_string()]);
        let tomorrow = system.select_due_at(&items, 2, now() + Duration::days(1));
        assert_eq!(tomorrow.len(), 2);
    }

    #[test]
    fn system_can_borrow_an_outside_store() {
        let mut store = MemoryStore::new();
        {
            let mut system = ReviewSystem::with_seed(&mut store, Sm2::default(), 9);
            system.record_attempt_at("c", false, 4.0, now()).unwrap();
            system
                .record_outcome_at("c", PerformanceScore::INCORRECT, now())
                .unwrap();
        }
        let record = store.get("c").unwrap();
        assert_eq!(record.wrong_attempts, 1);
        assert!((record.ease_factor - 2.3).abs() < 1e-9);
    }
}
