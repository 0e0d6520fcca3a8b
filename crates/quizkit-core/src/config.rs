//! Session configuration.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Default number of questions drawn per session.
pub const DEFAULT_QUESTION_COUNT: usize = 10;

/// Default time budget per question, in seconds.
pub const DEFAULT_SECONDS_PER_QUESTION: u32 = 30;

/// Configuration for a quiz session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Questions drawn from the bank per session.
    #[serde(default = "default_question_count")]
    pub question_count: usize,
    /// Seconds the player has for each question.
    #[serde(default = "default_seconds_per_question")]
    pub seconds_per_question: u32,
    /// Whether the countdown resolves unanswered questions.
    #[serde(default = "default_true")]
    pub timing_enabled: bool,
}

fn default_question_count() -> usize {
    DEFAULT_QUESTION_COUNT
}

fn default_seconds_per_question() -> u32 {
    DEFAULT_SECONDS_PER_QUESTION
}

fn default_true() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            question_count: default_question_count(),
            seconds_per_question: default_seconds_per_question(),
            timing_enabled: true,
        }
    }
}

impl SessionConfig {
    /// Reject settings a session cannot run with.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.question_count >= 1, "question_count must be at least 1");
        anyhow::ensure!(
            self.seconds_per_question >= 1,
            "seconds_per_question must be at least 1"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.question_count, 10);
        assert_eq!(config.seconds_per_question, 30);
        assert!(config.timing_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let config: SessionConfig = toml::from_str("seconds_per_question = 15").unwrap();
        assert_eq!(config.question_count, 10);
        assert_eq!(config.seconds_per_question, 15);
        assert!(config.timing_enabled);
    }

    #[test]
    fn validate_rejects_zeroes() {
        let config = SessionConfig {
            question_count: 0,
            ..SessionConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SessionConfig {
            seconds_per_question: 0,
            ..SessionConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
