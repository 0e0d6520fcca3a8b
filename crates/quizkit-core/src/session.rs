//! The quiz session state machine.
//!
//! Each question moves through `Unanswered -> (select) -> (confirm) ->
//! CorrectFeedback | IncorrectFeedback -> (advance) -> next question`. The
//! timer is cooperative: an external clock calls [`QuizSession::tick`] once
//! per second, and when the budget runs out the question resolves as wrong.
//!
//! The session has no internal synchronization. Callers that share it across
//! threads must wrap it in a lock.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::Rng;

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::model::{AnswerState, Question, QuestionOutcome, Verdict};
use crate::sampler::QuestionSampler;

/// What a call to [`QuizSession::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timing disabled or feedback already showing; nothing changed.
    Ignored,
    /// The countdown moved; this many seconds remain.
    Counting { remaining: u32 },
    /// The countdown hit zero and the question resolved as incorrect.
    TimedOut,
}

/// A single playthrough over a sampled subset of a question bank.
#[derive(Debug, Clone)]
pub struct QuizSession<R = StdRng> {
    bank: Arc<[Question]>,
    sampler: QuestionSampler<R>,
    config: SessionConfig,
    questions: Vec<Question>,
    current: usize,
    selected: Option<usize>,
    state: AnswerState,
    score: usize,
    time_remaining: u32,
    timing_enabled: bool,
    outcomes: Vec<QuestionOutcome>,
}

impl QuizSession<StdRng> {
    /// Start a session drawing from `bank` with an OS-seeded sampler.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptySession` if the bank is empty or the
    /// configured question count is zero.
    pub fn new(
        bank: impl Into<Arc<[Question]>>,
        config: SessionConfig,
    ) -> Result<Self, SessionError> {
        Self::with_sampler(bank, config, QuestionSampler::from_os_rng())
    }
}

impl<R: Rng> QuizSession<R> {
    /// Start a session drawing from `bank` with the given sampler.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptySession` if the bank is empty or the
    /// configured question count is zero.
    pub fn with_sampler(
        bank: impl Into<Arc<[Question]>>,
        config: SessionConfig,
        mut sampler: QuestionSampler<R>,
    ) -> Result<Self, SessionError> {
        let bank = bank.into();
        let questions = sampler.sample(&bank, config.question_count);
        if questions.is_empty() {
            return Err(SessionError::EmptySession);
        }

        tracing::info!(
            bank_size = bank.len(),
            questions = questions.len(),
            "quiz session started"
        );

        Ok(Self {
            time_remaining: config.seconds_per_question,
            timing_enabled: config.timing_enabled,
            bank,
            sampler,
            config,
            questions,
            current: 0,
            selected: None,
            state: AnswerState::Unanswered,
            score: 0,
            outcomes: Vec::new(),
        })
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// Choose option `index` for the current question.
    ///
    /// The choice can be changed freely until it is confirmed.
    ///
    /// # Errors
    ///
    /// `AnswerLocked` once feedback is showing, `OptionOutOfRange` for an
    /// index the question does not have. The selection is unchanged.
    pub fn select_option(&mut self, index: usize) -> Result<(), SessionError> {
        if self.state.is_resolved() {
            return Err(SessionError::AnswerLocked);
        }
        let len = self.current_question().options.len();
        if index >= len {
            return Err(SessionError::OptionOutOfRange { index, len });
        }
        self.selected = Some(index);
        tracing::debug!(question = self.current, option = index, "option selected");
        Ok(())
    }

    /// Lock in the selected option and reveal feedback.
    ///
    /// Returns whether the answer was correct. A correct answer adds one
    /// point; this can happen at most once per question.
    ///
    /// # Errors
    ///
    /// `AnswerLocked` if feedback is already showing, `NoSelection` if no
    /// option has been chosen.
    pub fn confirm(&mut self) -> Result<bool, SessionError> {
        if self.state.is_resolved() {
            return Err(SessionError::AnswerLocked);
        }
        let selected = self.selected.ok_or(SessionError::NoSelection)?;
        let correct = selected == self.current_question().correct_index;
        if correct {
            self.score += 1;
            self.state = AnswerState::CorrectFeedback;
        } else {
            self.state = AnswerState::IncorrectFeedback;
        }
        self.record_outcome(correct, false);
        tracing::debug!(question = self.current, correct, score = self.score, "answer confirmed");
        Ok(correct)
    }

    /// Advance the countdown by one second.
    ///
    /// When the budget reaches zero the question resolves as incorrect,
    /// regardless of any pending selection. Ticks arriving while timing is
    /// disabled or after the question resolved are ignored.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.timing_enabled || self.state.is_resolved() {
            return TickOutcome::Ignored;
        }
        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining > 0 {
            return TickOutcome::Counting {
                remaining: self.time_remaining,
            };
        }

        self.state = AnswerState::IncorrectFeedback;
        self.record_outcome(false, true);
        tracing::debug!(question = self.current, "question timed out");
        TickOutcome::TimedOut
    }

    /// Move to the next question.
    ///
    /// # Errors
    ///
    /// `NotAnswered` while the current question is unresolved,
    /// `LastQuestion` when there is nothing to advance to. Neither changes
    /// the session; after the last question the adapter should offer
    /// [`QuizSession::reset`].
    pub fn advance(&mut self) -> Result<(), SessionError> {
        if !self.state.is_resolved() {
            return Err(SessionError::NotAnswered);
        }
        if self.current + 1 >= self.questions.len() {
            return Err(SessionError::LastQuestion);
        }
        self.current += 1;
        self.clear_question_state();
        tracing::debug!(question = self.current, "advanced to next question");
        Ok(())
    }

    /// Start over with a freshly drawn set of questions.
    ///
    /// Valid in every state. The timing toggle is kept.
    pub fn reset(&mut self) {
        self.questions = self
            .sampler
            .sample(&self.bank, self.config.question_count);
        self.current = 0;
        self.score = 0;
        self.outcomes.clear();
        self.clear_question_state();
        tracing::info!(questions = self.questions.len(), "quiz session reset");
    }

    /// Turn the countdown on or off. Turning it off pauses the remaining
    /// time rather than discarding it.
    pub fn set_timing_enabled(&mut self, enabled: bool) {
        self.timing_enabled = enabled;
    }

    fn clear_question_state(&mut self) {
        self.selected = None;
        self.state = AnswerState::Unanswered;
        self.time_remaining = self.config.seconds_per_question;
    }

    fn record_outcome(&mut self, correct: bool, timed_out: bool) {
        let question = &self.questions[self.current];
        self.outcomes.push(QuestionOutcome {
            question: question.text.clone(),
            selected: self.selected,
            correct_index: question.correct_index,
            correct,
            timed_out,
            elapsed_secs: self
                .config
                .seconds_per_question
                .saturating_sub(self.time_remaining),
        });
    }
}

impl<R> QuizSession<R> {
    // -----------------------------------------------------------------------
    // Read-only view for adapters
    // -----------------------------------------------------------------------

    /// The question currently on screen.
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    /// Zero-based index of the current question.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Number of questions in this session.
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn selected_option(&self) -> Option<usize> {
        self.selected
    }

    pub fn answer_state(&self) -> AnswerState {
        self.state
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn timing_enabled(&self) -> bool {
        self.timing_enabled
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Resolved questions so far, in order.
    pub fn outcomes(&self) -> &[QuestionOutcome] {
        &self.outcomes
    }

    /// Fraction of the session completed, in `[0, 1]`.
    ///
    /// The current question counts as done only once its feedback shows,
    /// so this reaches 1.0 exactly when the last answer is revealed.
    pub fn progress(&self) -> f64 {
        let done = self.current + usize::from(self.state.is_resolved());
        done as f64 / self.questions.len() as f64
    }

    /// `true` once feedback is showing on the last question.
    pub fn finished(&self) -> bool {
        self.current + 1 == self.questions.len() && self.state.is_resolved()
    }

    /// Rating of the current score over the whole session.
    pub fn verdict(&self) -> Verdict {
        Verdict::from_score(self.score, self.questions.len())
    }
}
