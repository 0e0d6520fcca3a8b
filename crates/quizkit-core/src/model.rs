//! Core data model types for quizkit.
//!
//! Questions and banks are read-only inputs; answer states, outcomes and
//! verdicts are what a session produces from them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Optional stable identifier (used for duplicate detection).
    #[serde(default)]
    pub id: Option<String>,
    /// The question prompt.
    pub text: String,
    /// Answer options in display order. At least two.
    pub options: Vec<String>,
    /// Index into `options` of the correct answer.
    pub correct_index: usize,
    /// Shown alongside the feedback once the question is resolved.
    #[serde(default)]
    pub explanation: String,
    /// Tags for filtering questions out of a bank.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Question {
    pub fn new(
        text: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            text: text.into(),
            options,
            correct_index,
            explanation: explanation.into(),
            tags: Vec::new(),
        }
    }

    /// Check the structural invariants: at least two options and a correct
    /// index that points into them.
    pub fn check(&self) -> Result<(), String> {
        if self.options.len() < 2 {
            return Err(format!(
                "question needs at least 2 options, found {}",
                self.options.len()
            ));
        }
        if self.correct_index >= self.options.len() {
            return Err(format!(
                "correct answer index {} is out of range for {} options",
                self.correct_index,
                self.options.len()
            ));
        }
        Ok(())
    }

    /// The text of the correct option.
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }
}

/// A named collection of questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBank {
    /// Unique identifier for this bank.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of this bank.
    #[serde(default)]
    pub description: String,
    /// The questions in this bank.
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl QuestionBank {
    /// Keep only questions carrying at least one of `tags`.
    pub fn retain_tags(&mut self, tags: &[&str]) {
        self.questions
            .retain(|q| q.tags.iter().any(|t| tags.contains(&t.as_str())));
    }
}

/// Where the current question is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerState {
    /// Waiting for the player to select and confirm.
    Unanswered,
    /// The confirmed option was correct.
    CorrectFeedback,
    /// The confirmed option was wrong, or time ran out.
    IncorrectFeedback,
}

impl AnswerState {
    /// Returns `true` while feedback is showing (answer locked).
    pub fn is_resolved(self) -> bool {
        !matches!(self, AnswerState::Unanswered)
    }
}

/// How a single question was resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOutcome {
    /// The question prompt.
    pub question: String,
    /// Option chosen by the player, if any.
    pub selected: Option<usize>,
    /// Index of the correct option.
    pub correct_index: usize,
    /// Whether the question was scored as correct.
    pub correct: bool,
    /// Whether the question was resolved by the timer.
    pub timed_out: bool,
    /// Seconds of the budget consumed before resolution.
    pub elapsed_secs: u32,
}

/// Coarse rating derived from the final score ratio.
///
/// Variants are declared from lowest to highest so the derived `Ord`
/// follows the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Encouragement,
    Moderate,
    Strong,
    Perfect,
}

impl Verdict {
    /// Rate `score` out of `total`.
    ///
    /// Perfect at 100%, Strong from 70%, Moderate from 40%. Integer
    /// arithmetic keeps the boundaries exact.
    pub fn from_score(score: usize, total: usize) -> Self {
        if total == 0 {
            return Verdict::Encouragement;
        }
        if score >= total {
            Verdict::Perfect
        } else if score * 10 >= total * 7 {
            Verdict::Strong
        } else if score * 10 >= total * 4 {
            Verdict::Moderate
        } else {
            Verdict::Encouragement
        }
    }

    /// Message shown with the final result.
    pub fn message(self) -> &'static str {
        match self {
            Verdict::Perfect => "Perfect! You're a legend.",
            Verdict::Strong => "Great job!",
            Verdict::Moderate => "Room to improve, go again?",
            Verdict::Encouragement => "Everyone starts somewhere!",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Perfect => write!(f, "perfect"),
            Verdict::Strong => write!(f, "strong"),
            Verdict::Moderate => write!(f, "moderate"),
            Verdict::Encouragement => write!(f, "encouragement"),
        }
    }
}

impl FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "perfect" => Ok(Verdict::Perfect),
            "strong" => Ok(Verdict::Strong),
            "moderate" => Ok(Verdict::Moderate),
            "encouragement" => Ok(Verdict::Encouragement),
            other => Err(format!("unknown verdict: {other}")),
        }
    }
}
