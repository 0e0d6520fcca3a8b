//! quizkit-core: Quiz session state machine, sampling, and bank loading.
//!
//! This crate defines the question model, the sampler that draws a session's
//! questions, and the `QuizSession` state machine that front-ends drive.

pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod sampler;
pub mod session;

pub use config::SessionConfig;
pub use error::SessionError;
pub use model::{AnswerState, Question, QuestionBank, QuestionOutcome, Verdict};
pub use report::{BankSummary, SessionReport};
pub use sampler::QuestionSampler;
pub use session::{QuizSession, TickOutcome};
