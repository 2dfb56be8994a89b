//! Study sessions.

use crate::console::Console;
use crate::state::AppState;
use anyhow::Result;
use rand::seq::SliceRandom;
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::time::Instant;
use timeline_core::matching::option_letter;
use timeline_core::{PerformanceScore, Question, QuestionKind, SessionSummary};

const RULE: &str = "==================================================";

/// Outcome of a single question.
#[derive(Debug, Clone, PartialEq)]
pub struct Answered {
    pub item: String,
    pub correct: bool,
    pub elapsed_secs: f64,
}

/// Ask up to `count` questions, then print the session summary.
///
/// The session ends early when nothing is left to study or input runs out.
pub fn run_session<R: BufRead, W: Write>(
    state: &mut AppState,
    console: &mut Console<R, W>,
    count: usize,
    kind: QuestionKind,
) -> Result<SessionSummary> {
    console.say("")?;
    console.say("Starting a timeline session!")?;
    console.say(format!("This session has {count} questions."))?;
    console.say("Close input (Ctrl+D) to stop early.")?;

    let mut summary = SessionSummary::new();
    for _ in 0..count {
        let Some(answered) = ask_question(state, console, kind)? else {
            break;
        };
        summary.record(answered.correct, answered.elapsed_secs);

        console.say("")?;
        if !console.pause()? {
            console.say("")?;
            console.say("Session interrupted.")?;
            break;
        }
    }

    tracing::info!(
        asked = summary.questions_asked,
        correct = summary.correct_answers,
        "session finished"
    );
    print_summary(console, &summary)?;
    Ok(summary)
}

/// Ask one question drawn from the due pool and record the result.
///
/// Returns `None` when there is nothing to ask or input has ended.
pub fn ask_question<R: BufRead, W: Write>(
    state: &mut AppState,
    console: &mut Console<R, W>,
    kind: QuestionKind,
) -> Result<Option<Answered>> {
    let pool = state
        .system
        .select_due(&state.items, state.config.session.due_pool_size);
    let Some(item) = pool.choose(state.system.rng()).cloned() else {
        console.say("Nothing to review right now!")?;
        return Ok(None);
    };
    let Some(answer) = state.items.get(&item).map(str::to_string) else {
        return Ok(None);
    };

    let question = Question::build(kind, &item, &answer, &state.items, state.system.rng());
    let started = Instant::now();

    console.say("")?;
    console.say(RULE)?;
    console.say(question.prompt())?;

    let correct = match &question {
        Question::MultipleChoice { options, .. } => {
            for (i, option) in options.iter().enumerate() {
                console.say(format!("{}. {option}", option_letter(i)))?;
            }
            let letters: Vec<String> = (0..options.len()).map(|i| option_letter(i).to_string()).collect();
            let prompt = format!("\nChoose ({}): ", letters.join("/"));
            loop {
                let Some(input) = console.ask(&prompt)? else {
                    return Ok(None);
                };
                if let Some(correct) = question.check(&input) {
                    break correct;
                }
            }
        }
        Question::FillBlank { .. } => {
            let Some(input) = console.ask("\nYour answer: ")? else {
                return Ok(None);
            };
            question.check(&input).unwrap_or(false)
        }
    };
    let elapsed_secs = started.elapsed().as_secs_f64();

    console.say("")?;
    if correct {
        console.say("✓ Correct!")?;
    } else {
        console.say("✗ Wrong!")?;
        console.say(format!("The answer is: {answer}"))?;
    }

    let score = PerformanceScore::from_attempt(correct, elapsed_secs);
    tracing::debug!(%item, correct, elapsed_secs, score = score.value(), "answered");

    if let Err(err) = state.system.record_attempt(&item, correct, elapsed_secs) {
        report_save_failure(console, &err)?;
    }
    match state.system.record_outcome(&item, score) {
        Ok(next_review) => {
            console.say(format!("Next review: {}", next_review.format("%Y-%m-%d %H:%M")))?;
        }
        Err(err) => report_save_failure(console, &err)?,
    }

    Ok(Some(Answered {
        item,
        correct,
        elapsed_secs,
    }))
}

fn report_save_failure<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    err: &dyn Display,
) -> std::io::Result<()> {
    tracing::error!(error = %err, "failed to save statistics");
    console.say(format!("Could not save statistics: {err}"))
}

pub fn print_summary<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    summary: &SessionSummary,
) -> std::io::Result<()> {
    if summary.is_empty() {
        console.say("")?;
        return console.say("No questions were answered this session.");
    }

    console.say("")?;
    console.say(RULE)?;
    console.say("Session summary")?;
    console.say(RULE)?;
    console.say(format!("Questions: {}", summary.questions_asked))?;
    console.say(format!("Correct: {}", summary.correct_answers))?;
    console.say(format!("Wrong: {}", summary.wrong_answers))?;
    console.say(format!("Accuracy: {:.1}%", summary.accuracy() * 100.0))?;
    console.say(format!("Average time: {:.1} s per question", summary.average_time()))?;
    console.say(format!("Total time: {:.1} s", summary.total_time))?;
    console.say(RULE)
}
