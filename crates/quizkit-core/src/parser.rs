//! TOML question bank parser.
//!
//! Loads question banks from TOML files and directories, and validates them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Question, QuestionBank};

/// Options reachable with the single-digit keys `1`..`9`.
pub const MAX_KEYED_OPTIONS: usize = 9;

/// Intermediate TOML structure for parsing bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    #[serde(default)]
    id: Option<String>,
    text: String,
    options: Vec<String>,
    /// Zero-based index of the correct option.
    answer: usize,
    #[serde(default)]
    explanation: String,
    #[serde(default)]
    tags: Vec<String>,
}

/// Parse a single TOML file into a `QuestionBank`.
pub fn parse_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    parse_bank_str(&content, path)
}

/// Parse a TOML string into a `QuestionBank` (useful for testing).
///
/// Questions with fewer than two options or an out-of-range `answer` are
/// rejected here, so sessions only ever see well-formed questions.
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .enumerate()
        .map(|(i, q)| {
            let label = q.id.clone().unwrap_or_else(|| format!("#{}", i + 1));
            let question = Question {
                id: q.id,
                text: q.text,
                options: q.options,
                correct_index: q.answer,
                explanation: q.explanation,
                tags: q.tags,
            };
            question.check().map_err(|e| {
                anyhow::anyhow!("question {label} in {}: {e}", source_path.display())
            })?;
            Ok(question)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(QuestionBank {
        id: parsed.bank.id,
        name: parsed.bank.name,
        description: parsed.bank.description,
        questions,
    })
}

/// Recursively load all `.toml` banks from a directory.
///
/// Files that fail to parse are skipped with a warning.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(banks)
}

/// Load a bank file, or merge every bank found under a directory.
pub fn load_banks(path: &Path) -> Result<Vec<QuestionBank>> {
    if path.is_dir() {
        load_bank_directory(path)
    } else {
        Ok(vec![parse_bank(path)?])
    }
}

/// Merge several banks into one, keeping question order.
///
/// A single bank is returned unchanged.
pub fn merge_banks(mut banks: Vec<QuestionBank>) -> Option<QuestionBank> {
    if banks.len() <= 1 {
        return banks.pop();
    }
    let name = banks
        .iter()
        .map(|b| b.name.as_str())
        .collect::<Vec<_>>()
        .join(" + ");
    let id = banks
        .iter()
        .map(|b| b.id.as_str())
        .collect::<Vec<_>>()
        .join("+");
    let questions = banks.into_iter().flat_map(|b| b.questions).collect();
    Some(QuestionBank {
        id,
        name,
        description: String::new(),
        questions,
    })
}

/// A warning from bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question label (id, or 1-based position).
    pub question: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a bank for issues that do not prevent play.
pub fn validate_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if bank.questions.is_empty() {
        warnings.push(ValidationWarning {
            question: None,
            message: "bank has no questions".into(),
        });
    }

    let label = |i: usize, q: &Question| q.id.clone().unwrap_or_else(|| format!("#{}", i + 1));

    // Duplicate IDs
    let mut seen_ids = HashSet::new();
    for (i, q) in bank.questions.iter().enumerate() {
        if let Some(id) = &q.id {
            if !seen_ids.insert(id) {
                warnings.push(ValidationWarning {
                    question: Some(label(i, q)),
                    message: format!("duplicate question ID: {id}"),
                });
            }
        }
    }

    // Duplicate prompts
    let mut seen_text = HashSet::new();
    for (i, q) in bank.questions.iter().enumerate() {
        if !seen_text.insert(q.text.trim()) {
            warnings.push(ValidationWarning {
                question: Some(label(i, q)),
                message: "duplicate question text".into(),
            });
        }
    }

    for (i, q) in bank.questions.iter().enumerate() {
        if q.text.trim().is_empty() {
            warnings.push(ValidationWarning {
                question: Some(label(i, q)),
                message: "question text is empty".into(),
            });
        }

        let distinct: HashSet<&str> = q.options.iter().map(|o| o.trim()).collect();
        if distinct.len() != q.options.len() {
            warnings.push(ValidationWarning {
                question: Some(label(i, q)),
                message: "options contain duplicates".into(),
            });
        }

        if q.explanation.trim().is_empty() {
            warnings.push(ValidationWarning {
                question: Some(label(i, q)),
                message: "explanation is empty".into(),
            });
        }

        if q.options.len() > MAX_KEYED_OPTIONS {
            warnings.push(ValidationWarning {
                question: Some(label(i, q)),
                message: format!(
                    "{} options; only the first {MAX_KEYED_OPTIONS} can be chosen by number",
                    q.options.len()
                ),
            });
        }
    }

    warnings
}
