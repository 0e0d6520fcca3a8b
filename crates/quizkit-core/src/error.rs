//! Session error types.
//!
//! Every variant is a rejected operation: the session is left exactly as it
//! was before the call, so an adapter may ignore the error or surface it.

use thiserror::Error;

/// Errors returned by [`QuizSession`](crate::session::QuizSession) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The bank (or the requested sample size) yields no questions.
    #[error("cannot start a session with no questions")]
    EmptySession,

    /// The option index is not valid for the current question.
    #[error("option {index} is out of range (question has {len} options)")]
    OptionOutOfRange { index: usize, len: usize },

    /// Feedback is already showing; the answer is locked.
    #[error("answer already locked for this question")]
    AnswerLocked,

    /// `confirm` was called before any option was selected.
    #[error("no option selected")]
    NoSelection,

    /// `advance` was called while the current question is still unanswered.
    #[error("current question has not been answered yet")]
    NotAnswered,

    /// `advance` was called on the last question.
    #[error("already on the last question")]
    LastQuestion,
}

impl SessionError {
    /// Returns `true` if this is a precondition violation on an otherwise
    /// valid session (as opposed to a construction failure).
    pub fn is_precondition(&self) -> bool {
        !matches!(self, SessionError::EmptySession)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precondition_classification() {
        assert!(SessionError::NoSelection.is_precondition());
        assert!(SessionError::LastQuestion.is_precondition());
        assert!(!SessionError::EmptySession.is_precondition());
    }

    #[test]
    fn display_messages() {
        let err = SessionError::OptionOutOfRange { index: 5, len: 4 };
        assert_eq!(
            err.to_string(),
            "option 5 is out of range (question has 4 options)"
        );
    }
}
