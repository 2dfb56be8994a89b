//! Core types for the review engine.

use crate::error::ScoreError;
use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Identifier of an item (the fact being tested).
pub type ItemId = String;

/// Map of item identifier to its review record, as held by a stat store.
pub type StatMap = HashMap<ItemId, ReviewRecord>;

/// Format used for persisted timestamps (ISO-8601 local time, no offset).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Render a timestamp the way records persist it.
pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a persisted timestamp.
///
/// Accepts `T` or space separated local date-times with optional fractional
/// seconds, and RFC 3339 strings (converted to local time). Returns `None`
/// for anything else.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(at) = raw.parse::<NaiveDateTime>() {
        return Some(at);
    }
    if let Ok(at) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(at);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|at| at.with_timezone(&Local).naive_local())
}

/// Read a stored timestamp field. Non-string values become an empty string,
/// which never parses, so the record loads but is never due.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(raw) => raw,
        _ => String::new(),
    })
}

/// Per-item review statistics.
///
/// Timestamps are kept in their persisted string form so that one corrupt
/// value only affects the item it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub total_attempts: u32,
    pub correct_attempts: u32,
    pub wrong_attempts: u32,
    /// Running mean of elapsed seconds per attempt.
    pub avg_time: f64,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub last_review: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub next_review: String,
    /// Review interval in days.
    pub interval: f64,
    pub ease_factor: f64,
}

impl ReviewRecord {
    /// Fresh record with zero counters and both timestamps set to `now`.
    pub fn new(interval: f64, ease_factor: f64, now: NaiveDateTime) -> Self {
        let stamp = format_timestamp(now);
        Self {
            total_attempts: 0,
            correct_attempts: 0,
            wrong_attempts: 0,
            avg_time: 0.0,
            last_review: stamp.clone(),
            next_review: stamp,
            interval,
            ease_factor,
        }
    }

    pub fn last_review_at(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.last_review)
    }

    pub fn next_review_at(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.next_review)
    }

    /// Share of attempts answered wrong; 0 when nothing was attempted.
    pub fn error_rate(&self) -> f64 {
        if self.total_attempts == 0 {
            0.0
        } else {
            f64::from(self.wrong_attempts) / f64::from(self.total_attempts)
        }
    }

    /// Count one attempt and fold its elapsed time into the running mean.
    pub fn register_attempt(&mut self, correct: bool, elapsed_secs: f64) {
        self.total_attempts += 1;
        if correct {
            self.correct_attempts += 1;
        } else {
            self.wrong_attempts += 1;
        }
        let n = f64::from(self.total_attempts);
        self.avg_time = (self.avg_time * (n - 1.0) + elapsed_secs) / n;
    }
}

/// Quality of recall for one attempt, 0 (total failure) to 5 (instant recall).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PerformanceScore(u8);

impl PerformanceScore {
    pub const MAX: u8 = 5;
    /// Lowest score that counts as a pass.
    pub const PASSING: u8 = 3;
    /// Score given to any wrong answer.
    pub const INCORRECT: Self = Self(2);

    pub fn new(value: u8) -> Result<Self, ScoreError> {
        if value > Self::MAX {
            Err(ScoreError::OutOfRange(value))
        } else {
            Ok(Self(value))
        }
    }

    /// Derive the score for an answered question.
    ///
    /// A correct answer starts at 5 and loses a point for every full five
    /// seconds taken, bottoming out at 1. A wrong answer is always 2.
    pub fn from_attempt(correct: bool, elapsed_secs: f64) -> Self {
        if !correct {
            return Self::INCORRECT;
        }
        let slow_steps = (elapsed_secs.max(0.0) / 5.0).floor().min(4.0) as u8;
        Self(Self::MAX - slow_steps)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_passing(self) -> bool {
        self.0 >= Self::PASSING
    }
}

impl TryFrom<u8> for PerformanceScore {
    type Error = ScoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PerformanceScore> for u8 {
    fn from(score: PerformanceScore) -> Self {
        score.0
    }
}

/// A fact to memorize together with its reference answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub answer: String,
}

/// Ordered set of items keyed by identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemSet {
    items: Vec<Item>,
    index: HashMap<ItemId, usize>,
}

impl ItemSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item, or replace the answer of an existing one in place.
    pub fn insert(&mut self, id: impl Into<ItemId>, answer: impl Into<String>) {
        let id = id.into();
        let answer = answer.into();
        match self.index.get(&id) {
            Some(&pos) => self.items[pos].answer = answer,
            None => {
                self.index.insert(id.clone(), self.items.len());
                self.items.push(Item { id, answer });
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.index.get(id).map(|&pos| self.items[pos].answer.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.id.as_str())
    }

    pub fn answers(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.answer.as_str())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ItemSet
where
    K: Into<ItemId>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut set = Self::new();
        for (id, answer) in iter {
            set.insert(id, answer);
        }
        set
    }
}
