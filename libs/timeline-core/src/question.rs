//! Question building.

use crate::matching::{compare_answers, parse_option_letter};
use crate::types::ItemSet;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Options shown for a multiple-choice question, correct answer included.
pub const OPTION_COUNT: usize = 4;

/// How a question is asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice,
    FillBlank,
    /// Either of the above, picked per question.
    #[default]
    Random,
}

impl QuestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MultipleChoice => "multiple_choice",
            Self::FillBlank => "fill_blank",
            Self::Random => "random",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "multiple_choice" => Some(Self::MultipleChoice),
            "fill_blank" => Some(Self::FillBlank),
            "random" => Some(Self::Random),
            _ => None,
        }
    }

    /// Pin `Random` down to a concrete kind.
    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        match self {
            Self::Random if rng.gen_bool(0.5) => Self::MultipleChoice,
            Self::Random => Self::FillBlank,
            kind => kind,
        }
    }
}

/// A rendered question about one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Question {
    MultipleChoice {
        prompt: String,
        options: Vec<String>,
        correct_index: usize,
    },
    FillBlank {
        prompt: String,
        answer: String,
    },
}

impl Question {
    /// Build a question about `item` whose reference answer is `answer`.
    ///
    /// Multiple-choice distractors are distinct answers of other items in
    /// `items`. A small set yields fewer than [`OPTION_COUNT`] options.
    pub fn build<R: Rng + ?Sized>(
        kind: QuestionKind,
        item: &str,
        answer: &str,
        items: &ItemSet,
        rng: &mut R,
    ) -> Self {
        match kind.resolve(rng) {
            QuestionKind::FillBlank => Self::FillBlank {
                prompt: format!("When did {item} happen?"),
                answer: answer.to_string(),
            },
            _ => multiple_choice(item, answer, items, rng),
        }
    }

    pub fn prompt(&self) -> &str {
        match self {
            Self::MultipleChoice { prompt, .. } | Self::FillBlank { prompt, .. } => prompt,
        }
    }

    /// Judge a learner's input. `None` means the input is not a valid
    /// option letter and should be asked for again.
    pub fn check(&self, input: &str) -> Option<bool> {
        match self {
            Self::MultipleChoice {
                options,
                correct_index,
                ..
            } => parse_option_letter(input, options.len()).map(|index| index == *correct_index),
            Self::FillBlank { answer, .. } => Some(compare_answers(input, answer).is_correct),
        }
    }
}

fn multiple_choice<R: Rng + ?Sized>(item: &str, answer: &str, items: &ItemSet, rng: &mut R) -> Question {
    let mut seen = HashSet::from([answer]);
    let candidates: Vec<&str> = items.answers().filter(|a| seen.insert(*a)).collect();

    let mut options: Vec<String> = candidates
        .choose_multiple(rng, OPTION_COUNT - 1)
        .map(|a| a.to_string())
        .collect();
    options.push(answer.to_string());
    options.shuffle(rng);

    let correct_index = options.iter().position(|o| o == answer).unwrap_or_default();

    Question::MultipleChoice {
        prompt: format!("Which of these is the date of {item}?"),
        options,
        correct_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn items() -> ItemSet {
        [
            ("Opium War", "1840 - 1842"),
            ("Wuchang Uprising", "1911"),
            ("May Fourth Movement", "1919"),
            ("Long March", "1934 - 1936"),
            ("Founding of the PRC", "1949"),
            ("Hundred Days' Reform", "1898"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn kind_names_round_trip() {
        for kind in [QuestionKind::MultipleChoice, QuestionKind::FillBlank, QuestionKind::Random] {
            assert_eq!(QuestionKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(QuestionKind::parse("essay"), None);
    }

    #[test]
    fn random_kind_resolves_to_both() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let kinds: HashSet<_> = (0..32)
            .map(|_| format!("{:?}", QuestionKind::Random.resolve(&mut rng)))
            .collect();
        assert_eq!(kinds.len(), 2);
        assert!(!kinds.contains("Random"));
    }

    #[test]
    fn multiple_choice_has_four_distinct_options_with_the_answer() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let question = Question::build(QuestionKind::MultipleChoice, "Wuchang Uprising", "1911", &items(), &mut rng);
        let Question::MultipleChoice { options, correct_index, prompt } = &question else {
            panic!("expected multiple choice");
        };
        assert_eq!(options.len(), OPTION_COUNT);
        assert_eq!(options[*correct_index], "1911");
        let distinct: HashSet<_> = options.iter().collect();
        assert_eq!(distinct.len(), OPTION_COUNT);
        assert!(prompt.contains("Wuchang Uprising"));
    }

    #[test]
    fn multiple_choice_with_few_answers_is_shorter_instead_of_hanging() {
        let small: ItemSet = [("a", "1900"), ("b", "1900"), ("c", "1901")].into_iter().collect();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let question = Question::build(QuestionKind::MultipleChoice, "a", "1900", &small, &mut rng);
        let Question::MultipleChoice { options, .. } = question else {
            panic!("expected multiple choice");
        };
        let mut options = options;
        options.sort();
        assert_eq!(options, vec!["1900".to_string(), "1901".to_string()]);
    }

    #[test]
    fn check_multiple_choice_letters() {
        let question = Question::MultipleChoice {
            prompt: String::new(),
            options: vec!["1911".into(), "1919".into(), "1949".into()],
            correct_index: 2,
        };
        assert_eq!(question.check("c"), Some(true));
        assert_eq!(question.check("A"), Some(false));
        assert_eq!(question.check("D"), None);
    }

    #[test]
    fn check_fill_blank_normalizes() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let question = Question::build(QuestionKind::FillBlank, "Long March", "1934 - 1936", &items(), &mut rng);
        assert_eq!(question.prompt(), "When did Long March happen?");
        assert_eq!(question.check("1934-1936"), Some(true));
        assert_eq!(question.check("1935"), Some(false));
    }
}
