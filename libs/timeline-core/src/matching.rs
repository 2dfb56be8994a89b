//! Answer matching for typed and multiple-choice questions.

use serde::{Deserialize, Serialize};

/// Result of comparing a typed answer to the reference answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Whether the answer is considered correct.
    pub is_correct: bool,
    /// Normalized typed answer (for display).
    pub typed_normalized: String,
    /// Normalized reference answer (for display).
    pub correct_normalized: String,
}

/// Compare a typed answer to the reference answer on their digits.
pub fn compare_answers(typed: &str, correct: &str) -> MatchResult {
    let typed_normalized = normalize_answer(typed.trim());
    let correct_normalized = normalize_answer(correct);
    MatchResult {
        is_correct: typed_normalized == correct_normalized,
        typed_normalized,
        correct_normalized,
    }
}

/// Reduce a date answer to its digits.
///
/// "1840 年 - 1842 年", "1840-1842" and "18401842" all become "18401842".
/// Runs of more than eight digits are split after the first four, so longer
/// dates read as a start year followed by the rest. Full-width digits count
/// as digits.
pub fn normalize_answer(answer: &str) -> String {
    let digits: String = answer.chars().filter_map(ascii_digit).collect();

    if digits.len() > 8 {
        let (start, end) = digits.split_at(4);
        return format!("{start}-{end}");
    }
    digits
}

fn ascii_digit(c: char) -> Option<char> {
    match c {
        '0'..='9' => Some(c),
        '\u{FF10}'..='\u{FF19}' => char::from_u32(c as u32 - 0xFF10 + '0' as u32),
        _ => None,
    }
}

/// Letter shown next to the option at `index` ("A", "B", ...).
pub fn option_letter(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .and_then(|i| b'A'.checked_add(i))
        .map(char::from)
        .unwrap_or('?')
}

/// Read an option letter typed by the learner, case-insensitively.
/// Returns `None` unless it names one of the first `option_count` options.
pub fn parse_option_letter(input: &str, option_count: usize) -> Option<usize> {
    let mut chars = input.trim().chars();
    let letter = chars.next()?.to_ascii_uppercase();
    if chars.next().is_some() || !letter.is_ascii_uppercase() {
        return None;
    }
    let index = (letter as u8 - b'A') as usize;
    (index < option_count).then_some(index)
}
