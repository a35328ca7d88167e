//! Interactive study session.

use crate::catalog::load_deck;
use crate::cli::StudyArgs;
use crate::config::Config;
use anyhow::Context;
use review_core::{
    AnswerLabel, Clock, MatchingMode, ReviewScheduler, ReviewStore, SessionDriver, SessionOptions,
    SessionPhase, SessionSnapshot, SessionSummary, StudyError, StudySession, SubmitOutcome,
};
use std::io::{self, BufRead, Write};

/// How answers are entered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnswerMode {
    /// Reveal the back, then grade yourself.
    Flip,
    /// Type the answer; it is checked against the back.
    Typed {
        matching_mode: MatchingMode,
        fuzzy_threshold: f64,
    },
}

/// One line of learner input.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Reveal,
    Grade(u8),
    Label(AnswerLabel),
    Back,
    Hint,
    Quit,
    Text(String),
}

/// How the study loop ended.
#[derive(Debug, Clone, PartialEq)]
pub enum LoopExit {
    Finished(SessionSummary),
    Abandoned(SessionSnapshot),
}

pub fn run(config: &Config, args: &StudyArgs) -> anyhow::Result<()> {
    let cards = load_deck(&args.deck).with_context(|| format!("loading {}", args.deck.display()))?;
    let store = super::open_store(config)?;
    let mut driver = SessionDriver::new(store);

    let options = SessionOptions {
        shuffle: args.shuffle,
        due_only: args.due_only,
        limit: args.limit,
    };
    let mut session = match driver.start_session(cards, &options) {
        Ok(session) => session,
        Err(StudyError::EmptyCardSet) => {
            println!("Nothing to study right now.");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let mode = if args.typed {
        AnswerMode::Typed {
            matching_mode: config.matching_mode,
            fuzzy_threshold: config.fuzzy_threshold,
        }
    } else {
        AnswerMode::Flip
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    study_loop(
        &mut driver,
        &mut session,
        mode,
        &mut stdin.lock(),
        &mut stdout.lock(),
    )?;
    Ok(())
}

/// Parse a line of input.
///
/// In typed mode anything that is not a `:`-prefixed command is an answer.
/// A blank line is never an answer; in typed mode it just prompts again.
pub fn parse_input(line: &str, mode: AnswerMode) -> Input {
    let trimmed = line.trim();
    let command = match mode {
        AnswerMode::Flip => trimmed,
        AnswerMode::Typed { .. } if trimmed.is_empty() => return Input::Reveal,
        AnswerMode::Typed { .. } => match trimmed.strip_prefix(':') {
            Some(command) => command,
            None => return Input::Text(line.to_string()),
        },
    };

    match command.to_lowercase().as_str() {
        "" => Input::Reveal,
        "b" | "back" => Input::Back,
        "?" | "hint" => Input::Hint,
        "q" | "quit" => Input::Quit,
        other => {
            if let Ok(grade) = other.parse::<u8>() {
                return Input::Grade(grade);
            }
            match other.parse::<AnswerLabel>() {
                Ok(label) => Input::Label(label),
                Err(_) => Input::Text(line.to_string()),
            }
        }
    }
}

pub fn study_loop<S, C, A, R, W>(
    driver: &mut SessionDriver<S, C, A>,
    session: &mut StudySession,
    mode: AnswerMode,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<LoopExit>
where
    S: ReviewStore,
    C: Clock,
    A: ReviewScheduler,
    R: BufRead,
    W: Write,
{
    let mut shown = None;

    loop {
        let Some(card) = session.current_card() else {
            break;
        };
        let index = session.current_index();
        if shown != Some(session.phase()) {
            if let SessionPhase::Active(_) = session.phase() {
                writeln!(out, "\n[{}/{}] {}", index + 1, session.len(), card.front)?;
            }
            match (mode, session.phase()) {
                (AnswerMode::Flip, SessionPhase::Active(_)) => {
                    writeln!(out, "(Enter to reveal, ? hint, b back, q quit)")?
                }
                (AnswerMode::Flip, _) => {
                    writeln!(out, "{}", card.back)?;
                    writeln!(out, "again / hard / good / easy, or 0-5")?;
                }
                (AnswerMode::Typed { .. }, _) => {
                    writeln!(out, "Your answer (:hint, :back, :quit):")?
                }
            }
            shown = Some(session.phase());
        }
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(LoopExit::Abandoned(session.snapshot()));
        }

        let submitted = match parse_input(&line, mode) {
            Input::Quit => return Ok(LoopExit::Abandoned(session.snapshot())),
            Input::Hint => {
                match &card.hint {
                    Some(hint) => writeln!(out, "Hint: {hint}")?,
                    None => writeln!(out, "No hint for this card.")?,
                }
                continue;
            }
            Input::Back => {
                if session.previous_card() {
                    shown = None;
                } else {
                    writeln!(out, "Already at the first card.")?;
                }
                continue;
            }
            Input::Reveal => {
                if mode == AnswerMode::Flip {
                    session.reveal();
                }
                continue;
            }
            Input::Grade(grade) => driver.submit_answer(session, grade).map(|o| (None, o)),
            Input::Label(label) => driver.submit_label(session, label).map(|o| (None, o)),
            Input::Text(text) => match mode {
                AnswerMode::Typed {
                    matching_mode,
                    fuzzy_threshold,
                } => driver
                    .submit_typed(session, &text, matching_mode, fuzzy_threshold)
                    .map(|(result, o)| (Some(result), o)),
                AnswerMode::Flip => {
                    writeln!(out, "Unrecognised input: {}", text.trim())?;
                    continue;
                }
            },
        };

        match submitted {
            Ok((matched, outcome)) => {
                if let Some(matched) = matched {
                    if matched.is_correct {
                        writeln!(out, "Correct.")?;
                    } else {
                        writeln!(out, "Expected: {}", matched.expected_normalized)?;
                    }
                }
                write_outcome(out, &outcome)?;
                shown = None;
                if let Some(summary) = outcome.summary {
                    write_summary(out, &summary)?;
                    return Ok(LoopExit::Finished(summary));
                }
            }
            Err(err @ StudyError::InvalidQuality(_)) => writeln!(out, "{err}")?,
            Err(err @ StudyError::RecordStoreUnavailable(_)) => {
                writeln!(out, "Could not save this review ({err}); answer again to retry.")?
            }
            Err(err) => return Err(err.into()),
        }
    }

    let summary = session.summary().ok_or(StudyError::SessionComplete)?;
    Ok(LoopExit::Finished(summary))
}

fn write_outcome<W: Write>(out: &mut W, outcome: &SubmitOutcome) -> io::Result<()> {
    let record = &outcome.updated_record;
    let when = match record.interval_days {
        0 => "later this session".to_string(),
        1 => "tomorrow".to_string(),
        days => format!("in {days} days"),
    };
    writeln!(
        out,
        "Next review {when}. Streak: {}  ({}/{} correct)",
        outcome.snapshot.streak, outcome.snapshot.session_correct, outcome.snapshot.session_total
    )
}

fn write_summary<W: Write>(out: &mut W, summary: &SessionSummary) -> io::Result<()> {
    writeln!(
        out,
        "\nSession complete: {}/{} correct ({:.0}%)",
        summary.session_correct,
        summary.session_total,
        summary.accuracy() * 100.0
    )
}
