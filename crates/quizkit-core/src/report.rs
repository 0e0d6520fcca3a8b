//! Session report types with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{QuestionBank, QuestionOutcome, Verdict};
use crate::session::QuizSession;

/// Final summary of a played session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// The bank the questions were drawn from.
    pub bank: BankSummary,
    /// Correct answers.
    pub score: usize,
    /// Questions in the session.
    pub total: usize,
    pub verdict: Verdict,
    /// One entry per resolved question, in play order.
    pub outcomes: Vec<QuestionOutcome>,
    /// Sum of per-question elapsed seconds.
    pub elapsed_secs: u32,
    /// Whether the countdown was on when the report was taken.
    pub timing_enabled: bool,
}

/// Summary of a question bank (without the questions themselves).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankSummary {
    pub id: String,
    pub name: String,
    pub question_count: usize,
}

impl From<&QuestionBank> for BankSummary {
    fn from(bank: &QuestionBank) -> Self {
        Self {
            id: bank.id.clone(),
            name: bank.name.clone(),
            question_count: bank.questions.len(),
        }
    }
}

impl SessionReport {
    /// Snapshot a session. Normally taken once the session has finished,
    /// but any state is accepted; unresolved questions are simply absent.
    pub fn from_session<R>(session: &QuizSession<R>, bank: BankSummary) -> Self {
        let outcomes = session.outcomes().to_vec();
        let elapsed_secs = outcomes.iter().map(|o| o.elapsed_secs).sum();
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            bank,
            score: session.score(),
            total: session.total(),
            verdict: session.verdict(),
            outcomes,
            elapsed_secs,
            timing_enabled: session.timing_enabled(),
        }
    }

    /// Questions that ran out of time.
    pub fn timeouts(&self) -> usize {
        self.outcomes.iter().filter(|o| o.timed_out).count()
    }

    /// Score as a fraction of the total.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.score as f64 / self.total as f64
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: SessionReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("## {}\n\n", self.bank.name));
        md.push_str(&format!(
            "**Score:** {}/{} ({:.0}%), {}\n\n",
            self.score,
            self.total,
            self.ratio() * 100.0,
            self.verdict.message()
        ));

        if !self.outcomes.is_empty() {
            md.push_str("| # | Question | Answer | Result | Time |\n");
            md.push_str("|---|----------|--------|--------|------|\n");
            for (i, o) in self.outcomes.iter().enumerate() {
                let answer = o
                    .selected
                    .map(|s| (s + 1).to_string())
                    .unwrap_or_else(|| "-".into());
                let result = if o.correct {
                    "correct"
                } else if o.timed_out {
                    "timed out"
                } else {
                    "wrong"
                };
                md.push_str(&format!(
                    "| {} | {} | {} | {} | {}s |\n",
                    i + 1,
                    o.question.replace('|', "\\|"),
                    answer,
                    result,
                    o.elapsed_secs
                ));
            }
            md.push('\n');
        }

        md.push_str(&format!(
            "Total time: {}s, {} timeout(s)\n",
            self.elapsed_secs,
            self.timeouts()
        ));

        md
    }
}
