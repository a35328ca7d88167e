//! Study session driver.
//!
//! A [`StudySession`] is the ephemeral state of one study pass: the ordered
//! card queue, the current position and the per-session counters. The
//! [`SessionDriver`] owns the injected store, clock and scheduler, and is the
//! only thing that mutates a session in response to an answer.

use crate::algorithm::{ReviewScheduler, Sm2};
use crate::clock::{Clock, SystemClock};
use crate::error::{Result, StudyError};
use crate::matching::{compare_answers, MatchResult};
use crate::stats::is_due;
use crate::store::ReviewStore;
use crate::types::{AnswerLabel, Card, CardId, MatchingMode, Quality, ReviewRecord, SessionOptions};
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::HashMap;

/// Where a session is in its pass over the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "phase", content = "index")]
pub enum SessionPhase {
    /// Front of the card at this index is shown.
    Active(usize),
    /// Back of the card at this index is revealed.
    AwaitingAnswer(usize),
    Complete,
}

/// Point-in-time view of a session's progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub current_index: usize,
    pub total_cards: usize,
    pub session_correct: u32,
    pub session_total: u32,
    pub streak: u32,
    pub complete: bool,
}

/// Result of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub session_correct: u32,
    pub session_total: u32,
}

impl SessionSummary {
    pub fn accuracy(&self) -> f64 {
        if self.session_total == 0 {
            0.0
        } else {
            f64::from(self.session_correct) / f64::from(self.session_total)
        }
    }
}

/// What one answer submission produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitOutcome {
    pub updated_record: ReviewRecord,
    pub snapshot: SessionSnapshot,
    /// Present when this answer finished the session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SessionSummary>,
}

/// One study pass over a fixed queue of cards.
#[derive(Debug, Clone)]
pub struct StudySession {
    cards: Vec<Card>,
    phase: SessionPhase,
    session_correct: u32,
    session_total: u32,
    streak: u32,
}

impl StudySession {
    /// Build the session queue.
    ///
    /// Fails with `EmptyCardSet` when there are no cards or none of them is
    /// due. Otherwise cards are ordered never-reviewed first, then by
    /// `next_review_at` ascending; ties keep catalog order. `due_only` and
    /// `limit` are applied to that order, and the shuffle (if any) runs last.
    pub fn start<R: Rng + ?Sized>(
        cards: Vec<Card>,
        prior_records: &HashMap<CardId, ReviewRecord>,
        options: &SessionOptions,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Self> {
        if !cards.iter().any(|card| is_due(prior_records.get(&card.id), now)) {
            return Err(StudyError::EmptyCardSet);
        }

        let mut queue = cards;
        queue.sort_by_key(|card| prior_records.get(&card.id).map(|r| r.next_review_at));

        if options.due_only {
            queue.retain(|card| is_due(prior_records.get(&card.id), now));
        }
        if let Some(limit) = options.limit {
            queue.truncate(limit);
        }
        if queue.is_empty() {
            return Err(StudyError::EmptyCardSet);
        }
        if options.shuffle {
            queue.shuffle(rng);
        }

        Ok(Self {
            cards: queue,
            phase: SessionPhase::Active(0),
            session_correct: 0,
            session_total: 0,
            streak: 0,
        })
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == SessionPhase::Complete
    }

    /// Index of the card on screen, or `len()` once complete.
    pub fn current_index(&self) -> usize {
        match self.phase {
            SessionPhase::Active(i) | SessionPhase::AwaitingAnswer(i) => i,
            SessionPhase::Complete => self.cards.len(),
        }
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.cards.get(self.current_index())
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Show the back of the current card.
    pub fn reveal(&mut self) -> bool {
        match self.phase {
            SessionPhase::Active(i) => {
                self.phase = SessionPhase::AwaitingAnswer(i);
                true
            }
            _ => false,
        }
    }

    /// Step back one card for another look. Never touches scheduling.
    pub fn previous_card(&mut self) -> bool {
        match self.phase {
            SessionPhase::Active(i) | SessionPhase::AwaitingAnswer(i) if i > 0 => {
                self.phase = SessionPhase::Active(i - 1);
                true
            }
            _ => false,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            current_index: self.current_index(),
            total_cards: self.cards.len(),
            session_correct: self.session_correct,
            session_total: self.session_total,
            streak: self.streak,
            complete: self.is_complete(),
        }
    }

    /// Totals for the pass, available once the last card is answered.
    pub fn summary(&self) -> Option<SessionSummary> {
        self.is_complete().then(|| SessionSummary {
            session_correct: self.session_correct,
            session_total: self.session_total,
        })
    }

    fn record_answer(&mut self, passed: bool) -> Option<SessionSummary> {
        self.session_total += 1;
        if passed {
            self.session_correct += 1;
            self.streak += 1;
        } else {
            self.streak = 0;
        }

        let next = self.current_index() + 1;
        self.phase = if next < self.cards.len() {
            SessionPhase::Active(next)
        } else {
            SessionPhase::Complete
        };
        self.summary()
    }
}

/// Runs study sessions against an injected store, clock and scheduler.
#[derive(Debug)]
pub struct SessionDriver<S, C = SystemClock, A = Sm2> {
    store: S,
    clock: C,
    scheduler: A,
}

impl<S: ReviewStore> SessionDriver<S> {
    /// Driver with the wall clock and default SM-2 parameters.
    pub fn new(store: S) -> Self {
        Self::with_parts(store, SystemClock, Sm2::default())
    }
}

impl<S, C, A> SessionDriver<S, C, A>
where
    S: ReviewStore,
    C: Clock,
    A: ReviewScheduler,
{
    pub fn with_parts(store: S, clock: C, scheduler: A) -> Self {
        Self {
            store,
            clock,
            scheduler,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Load prior records for `cards` and start a session with a thread-local RNG.
    pub fn start_session(&self, cards: Vec<Card>, options: &SessionOptions) -> Result<StudySession> {
        self.start_session_with_rng(cards, options, &mut rand::thread_rng())
    }

    pub fn start_session_with_rng<R: Rng + ?Sized>(
        &self,
        cards: Vec<Card>,
        options: &SessionOptions,
        rng: &mut R,
    ) -> Result<StudySession> {
        let mut prior = HashMap::new();
        for card in &cards {
            if let Some(record) = self.store.get(card.id).map_err(StudyError::store)? {
                prior.insert(card.id, record);
            }
        }

        let session = StudySession::start(cards, &prior, options, self.clock.now(), rng)?;
        tracing::info!(
            cards = session.len(),
            shuffle = options.shuffle,
            due_only = options.due_only,
            "study session started"
        );
        Ok(session)
    }

    /// Grade the current card with a raw 0-5 quality.
    pub fn submit_answer(&mut self, session: &mut StudySession, quality: u8) -> Result<SubmitOutcome> {
        let quality = Quality::new(quality)?;
        self.submit_quality(session, quality)
    }

    pub fn submit_label(
        &mut self,
        session: &mut StudySession,
        label: AnswerLabel,
    ) -> Result<SubmitOutcome> {
        self.submit_quality(session, label.quality())
    }

    /// Check a typed answer against the current card's back and grade it.
    pub fn submit_typed(
        &mut self,
        session: &mut StudySession,
        typed: &str,
        mode: MatchingMode,
        fuzzy_threshold: f64,
    ) -> Result<(MatchResult, SubmitOutcome)> {
        let card = session.current_card().ok_or(StudyError::SessionComplete)?;
        let result = compare_answers(typed, &card.back, mode, fuzzy_threshold);
        let outcome = self.submit_label(session, AnswerLabel::from_correct(result.is_correct))?;
        Ok((result, outcome))
    }

    pub fn submit_quality(
        &mut self,
        session: &mut StudySession,
        quality: Quality,
    ) -> Result<SubmitOutcome> {
        let card_id = session
            .current_card()
            .map(|card| card.id)
            .ok_or(StudyError::SessionComplete)?;

        let prior = self.store.get(card_id).map_err(StudyError::store)?;
        let record = self
            .scheduler
            .next_state(prior.as_ref(), quality, self.clock.now());

        if let Err(err) = self.store.put(card_id, &record) {
            tracing::warn!(card_id, error = %err, "failed to save review record");
            return Err(StudyError::store(err));
        }
        tracing::debug!(
            card_id,
            quality = quality.value(),
            interval_days = record.interval_days,
            ease_factor = record.ease_factor,
            algorithm = self.scheduler.name(),
            "review scheduled"
        );

        let summary = session.record_answer(quality.is_pass());
        if let Some(summary) = &summary {
            tracing::info!(
                correct = summary.session_correct,
                total = summary.session_total,
                "study session complete"
            );
        }

        Ok(SubmitOutcome {
            updated_record: record,
            snapshot: session.snapshot(),
            summary,
        })
    }
}
