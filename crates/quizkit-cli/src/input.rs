//! Keyboard-style input binding.
//!
//! Translates one line of terminal input into a player intent and routes it
//! to the matching session operation. Digits `1`..`9` pick an option; an
//! empty line (Enter) confirms the selection or, once feedback shows, moves
//! on to the next question.

use rand::Rng;

use quizkit_core::{QuizSession, SessionError};

/// A player intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Pick the option at this zero-based index.
    Select(usize),
    /// Confirm or advance, depending on the answer state.
    Accept,
    ToggleTimer,
    Reset,
    Quit,
}

/// What an applied command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Selected(usize),
    Answered { correct: bool },
    Advanced,
    Reset,
    TimerToggled { enabled: bool },
}

/// Parse a line of input. Returns `None` for anything unrecognised.
pub fn parse(line: &str) -> Option<Command> {
    let line = line.trim();
    match line.to_lowercase().as_str() {
        "" | "enter" | "ok" => Some(Command::Accept),
        "t" | "timer" => Some(Command::ToggleTimer),
        "r" | "reset" | "restart" => Some(Command::Reset),
        "q" | "quit" | "exit" => Some(Command::Quit),
        _ => match line.parse::<usize>() {
            Ok(n @ 1..=9) => Some(Command::Select(n - 1)),
            _ => None,
        },
    }
}

/// Apply a command to the session.
///
/// `Quit` is the caller's business and is rejected here as a no-op.
pub fn apply<R: Rng>(
    session: &mut QuizSession<R>,
    command: Command,
) -> Result<Option<Effect>, SessionError> {
    match command {
        Command::Select(index) => {
            session.select_option(index)?;
            Ok(Some(Effect::Selected(index)))
        }
        Command::Accept => {
            if session.answer_state().is_resolved() {
                session.advance()?;
                Ok(Some(Effect::Advanced))
            } else {
                let correct = session.confirm()?;
                Ok(Some(Effect::Answered { correct }))
            }
        }
        Command::ToggleTimer => {
            let enabled = !session.timing_enabled();
            session.set_timing_enabled(enabled);
            Ok(Some(Effect::TimerToggled { enabled }))
        }
        Command::Reset => {
            session.reset();
            Ok(Some(Effect::Reset))
        }
        Command::Quit => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizkit_core::{AnswerState, Question, QuestionSampler, SessionConfig};

    fn session() -> QuizSession {
        let bank: Vec<Question> = (0..3)
            .map(|i| {
                Question::new(
                    format!("q{i}"),
                    vec!["a".into(), "b".into(), "c".into()],
                    2,
                    "",
                )
            })
            .collect();
        QuizSession::with_sampler(bank, SessionConfig::default(), QuestionSampler::seeded(1))
            .unwrap()
    }

    #[test]
    fn parse_digits_and_keys() {
        assert_eq!(parse("1"), Some(Command::Select(0)));
        assert_eq!(parse(" 4 "), Some(Command::Select(3)));
        assert_eq!(parse("9"), Some(Command::Select(8)));
        assert_eq!(parse("0"), None);
        assert_eq!(parse("10"), None);
        assert_eq!(parse(""), Some(Command::Accept));
        assert_eq!(parse("Enter"), Some(Command::Accept));
        assert_eq!(parse("t"), Some(Command::ToggleTimer));
        assert_eq!(parse("R"), Some(Command::Reset));
        assert_eq!(parse("quit"), Some(Command::Quit));
        assert_eq!(parse("banana"), None);
    }

    #[test]
    fn accept_confirms_then_advances() {
        let mut s = session();
        assert_eq!(apply(&mut s, Command::Accept), Err(SessionError::NoSelection));

        apply(&mut s, Command::Select(2)).unwrap();
        assert_eq!(
            apply(&mut s, Command::Accept),
            Ok(Some(Effect::Answered { correct: true }))
        );
        assert_eq!(s.answer_state(), AnswerState::CorrectFeedback);

        assert_eq!(apply(&mut s, Command::Accept), Ok(Some(Effect::Advanced)));
        assert_eq!(s.current_index(), 1);
        assert_eq!(s.answer_state(), AnswerState::Unanswered);
    }

    #[test]
    fn digits_are_ignored_while_feedback_shows() {
        let mut s = session();
        apply(&mut s, Command::Select(0)).unwrap();
        apply(&mut s, Command::Accept).unwrap();
        assert_eq!(apply(&mut s, Command::Select(2)), Err(SessionError::AnswerLocked));
        assert_eq!(s.selected_option(), Some(0));
    }

    #[test]
    fn out_of_range_digit_is_rejected() {
        let mut s = session();
        assert_eq!(
            apply(&mut s, Command::Select(3)),
            Err(SessionError::OptionOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn accept_on_finished_session_reports_last_question() {
        let mut s = session();
        for _ in 0..3 {
            apply(&mut s, Command::Select(1)).unwrap();
            apply(&mut s, Command::Accept).unwrap();
            if !s.finished() {
                apply(&mut s, Command::Accept).unwrap();
            }
        }
        assert!(s.finished());
        assert_eq!(apply(&mut s, Command::Accept), Err(SessionError::LastQuestion));
        assert_eq!(apply(&mut s, Command::Reset), Ok(Some(Effect::Reset)));
        assert!(!s.finished());
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn toggle_timer_flips_flag() {
        let mut s = session();
        assert_eq!(
            apply(&mut s, Command::ToggleTimer),
            Ok(Some(Effect::TimerToggled { enabled: false }))
        );
        assert!(!s.timing_enabled());
        assert_eq!(apply(&mut s, Command::Quit), Ok(None));
    }
}
