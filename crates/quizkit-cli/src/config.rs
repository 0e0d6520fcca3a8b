//! CLI configuration file loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizkit_core::config::SessionConfig;

/// Top-level quizkit configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizkitConfig {
    /// Default question bank (file or directory).
    #[serde(default)]
    pub bank: Option<PathBuf>,
    /// Per-session settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Where `play` writes reports when no explicit path is given.
    #[serde(default)]
    pub report_dir: Option<PathBuf>,
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    let mut pos = 0;
    while let Some(offset) = result[pos..].find("${") {
        let start = pos + offset;
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let var_name = &result[start + 2..start + end];
        let value = std::env::var(var_name).unwrap_or_default();
        result = format!(
            "{}{}{}",
            &result[..start],
            value,
            &result[start + end + 1..]
        );
        pos = start + value.len();
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `quizkit.toml` in the current directory
/// 2. `~/.config/quizkit/config.toml`
///
/// Environment variable overrides: `QUIZKIT_BANK`, `QUIZKIT_QUESTION_COUNT`,
/// `QUIZKIT_SECONDS_PER_QUESTION`.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizkitConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizkit.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizkitConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizkitConfig::default(),
    };
    if let Some(path) = &config_path {
        tracing::debug!("loaded config from {}", path.display());
    }

    // Apply env var overrides
    if let Ok(bank) = std::env::var("QUIZKIT_BANK") {
        config.bank = Some(PathBuf::from(bank));
    }
    if let Ok(count) = std::env::var("QUIZKIT_QUESTION_COUNT") {
        config.session.question_count = count
            .trim()
            .parse()
            .with_context(|| format!("invalid QUIZKIT_QUESTION_COUNT: '{count}'"))?;
    }
    if let Ok(secs) = std::env::var("QUIZKIT_SECONDS_PER_QUESTION") {
        config.session.seconds_per_question = secs
            .trim()
            .parse()
            .with_context(|| format!("invalid QUIZKIT_SECONDS_PER_QUESTION: '{secs}'"))?;
    }

    config.bank = config.bank.as_deref().map(resolve_path);
    config.report_dir = config.report_dir.as_deref().map(resolve_path);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizkit"))
}
