//! The `quizkit play` command.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use rand::Rng;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

use quizkit_core::parser;
use quizkit_core::{
    BankSummary, QuestionSampler, QuizSession, SessionError, SessionReport, TickOutcome,
};

use crate::config::load_config_from;
use crate::input::{self, Command, Effect};
use crate::render;

/// How the interactive loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// The player typed `q`.
    Quit,
    /// Input closed.
    EndOfInput,
}

#[allow(clippy::too_many_arguments)]
pub async fn execute(
    bank_path: Option<PathBuf>,
    count: Option<usize>,
    seconds: Option<u32>,
    no_timer: bool,
    seed: Option<u64>,
    tags: Option<String>,
    report_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    // Flags override the config file
    let mut session_config = config.session.clone();
    if let Some(count) = count {
        session_config.question_count = count;
    }
    if let Some(seconds) = seconds {
        session_config.seconds_per_question = seconds;
    }
    if no_timer {
        session_config.timing_enabled = false;
    }
    session_config.validate()?;

    let bank_path = bank_path
        .or(config.bank.clone())
        .context("no question bank given; pass --bank or set `bank` in quizkit.toml")?;
    let banks = parser::load_banks(&bank_path)?;
    let mut bank = parser::merge_banks(banks)
        .with_context(|| format!("no question banks found in {}", bank_path.display()))?;

    if let Some(filter_tags) = &tags {
        let tags: Vec<&str> = filter_tags.split(',').map(|s| s.trim()).collect();
        bank.retain_tags(&tags);
    }
    anyhow::ensure!(
        !bank.questions.is_empty(),
        "bank '{}' has no questions to play",
        bank.name
    );

    let sampler = match seed {
        Some(seed) => QuestionSampler::seeded(seed),
        None => QuestionSampler::from_os_rng(),
    };
    let mut session = QuizSession::with_sampler(bank.questions.clone(), session_config, sampler)?;
    eprintln!(
        "quizkit v{} | {} | {} of {} questions",
        env!("CARGO_PKG_VERSION"),
        bank.name,
        session.total(),
        bank.questions.len()
    );

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    let exit = run_loop(&mut session, stdin, &mut stdout, Duration::from_secs(1)).await?;
    tracing::debug!(?exit, "session loop ended");

    if !session.outcomes().is_empty() {
        println!("\n{}", render::summary_table(session.outcomes()));
        render::final_result(&session, &mut stdout)?;
    }

    let report = SessionReport::from_session(&session, BankSummary::from(&bank));
    let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S");
    let report_path = report_path.or_else(|| {
        config
            .report_dir
            .as_ref()
            .map(|dir| dir.join(format!("session-{timestamp}.json")))
    });
    if let Some(path) = report_path {
        report.save_json(&path)?;
        eprintln!("Report saved to: {}", path.display());
    }

    Ok(())
}

fn ticker(period: Duration) -> Interval {
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

/// Drive a session from line input and a one-tick-per-`period` clock.
///
/// Both sources are polled on this task, so every session call is
/// serialized. The clock restarts whenever a new question is shown.
/// Lines are split on raw bytes; invalid UTF-8 is decoded lossily and
/// treated like any other unrecognised input.
pub async fn run_loop<R, I, W>(
    session: &mut QuizSession<R>,
    input: I,
    out: &mut W,
    period: Duration,
) -> Result<LoopExit>
where
    R: Rng,
    I: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.split(b'\n');
    let mut clock = ticker(period);
    render::question(session, out)?;

    loop {
        tokio::select! {
            segment = lines.next_segment() => {
                let Some(raw) = segment.context("failed to read input")? else {
                    return Ok(LoopExit::EndOfInput);
                };
                let line = String::from_utf8_lossy(&raw);
                let Some(command) = input::parse(&line) else {
                    writeln!(
                        out,
                        "Unrecognised input {:?}. Use 1-9, Enter, t, r or q.",
                        line.trim()
                    )?;
                    continue;
                };
                if command == Command::Quit {
                    return Ok(LoopExit::Quit);
                }
                match input::apply(session, command) {
                    Ok(Some(effect)) => show_effect(session, out, effect, &mut clock)?,
                    Ok(None) => {}
                    Err(SessionError::LastQuestion) => {
                        writeln!(out, "The quiz is over. Press r to play again or q to quit.")?;
                    }
                    Err(e) => {
                        tracing::debug!("rejected input {line:?}: {e}");
                        writeln!(out, "({e})")?;
                    }
                }
            }
            _ = clock.tick() => {
                match session.tick() {
                    TickOutcome::TimedOut => render::feedback(session, out, false, true)?,
                    TickOutcome::Counting { remaining }
                        if remaining <= 5 || remaining % 10 == 0 =>
                    {
                        writeln!(out, "{remaining}s left")?;
                    }
                    _ => {}
                }
            }
        }
    }
}

fn show_effect<R, W: Write>(
    session: &QuizSession<R>,
    out: &mut W,
    effect: Effect,
    clock: &mut Interval,
) -> Result<()> {
    match effect {
        Effect::Selected(index) => {
            writeln!(out, "Selected {}. Press Enter to confirm.", index + 1)?;
        }
        Effect::Answered { correct } => render::feedback(session, out, correct, false)?,
        Effect::Advanced | Effect::Reset => {
            clock.reset();
            render::question(session, out)?;
        }
        Effect::TimerToggled { enabled } => {
            if enabled {
                clock.reset();
            }
            writeln!(out, "Timer {}.", if enabled { "on" } else { "off" })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizkit_core::{AnswerState, Question, SessionConfig};
    use tokio::io::AsyncWriteExt;

    fn bank(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| {
                Question::new(
                    format!("question {i}"),
                    vec!["right".into(), "wrong".into()],
                    0,
                    format!("fact {i}"),
                )
            })
            .collect()
    }

    fn session(config: SessionConfig) -> QuizSession {
        QuizSession::with_sampler(bank(3), config, QuestionSampler::seeded(4)).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn scripted_perfect_game() {
        let config = SessionConfig {
            timing_enabled: false,
            ..SessionConfig::default()
        };
        let mut s = session(config);
        let script = "1\n\n\n1\n\n\n1\n\n\nq\n";
        let mut out = Vec::new();

        let exit = run_loop(&mut s, script.as_bytes(), &mut out, Duration::from_secs(1))
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(exit, LoopExit::Quit);
        assert!(s.finished());
        assert_eq!(s.score(), 3);
        assert!(text.contains("Question 3 of 3"));
        assert!(text.contains("You scored 3 of 3. Perfect!"));
        assert!(text.contains("The quiz is over."));
    }

    #[tokio::test(start_paused = true)]
    async fn confirm_without_selection_is_reported() {
        let mut s = session(SessionConfig {
            timing_enabled: false,
            ..SessionConfig::default()
        });
        let mut out = Vec::new();

        let exit = run_loop(&mut s, "\nbanana\n".as_bytes(), &mut out, Duration::from_secs(1))
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(exit, LoopExit::EndOfInput);
        assert!(text.contains("(no option selected)"));
        assert!(text.contains("Unrecognised input \"banana\""));
        assert_eq!(s.answer_state(), AnswerState::Unanswered);
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_utf8_line_does_not_end_the_game() {
        let mut s = session(SessionConfig {
            timing_enabled: false,
            ..SessionConfig::default()
        });
        let script: &[u8] = b"1\n\n\xe9\n\nq\n";
        let mut out = Vec::new();

        let exit = run_loop(&mut s, script, &mut out, Duration::from_secs(1))
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(exit, LoopExit::Quit);
        assert!(text.contains("Unrecognised input"));
        assert!(text.contains("Question 2 of 3"));
        assert_eq!(s.score(), 1);
        assert_eq!(s.current_index(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn crlf_line_endings_are_accepted() {
        let mut s = session(SessionConfig {
            timing_enabled: false,
            ..SessionConfig::default()
        });
        let mut out = Vec::new();

        run_loop(&mut s, "1\r\n\r\nq\r\n".as_bytes(), &mut out, Duration::from_secs(1))
            .await
            .unwrap();

        assert_eq!(s.score(), 1);
        assert_eq!(s.outcomes().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn clock_times_out_question_then_advance_restarts_budget() {
        let mut s = session(SessionConfig {
            seconds_per_question: 3,
            ..SessionConfig::default()
        });
        let (mut client, server) = tokio::io::duplex(64);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(3_500)).await;
            client.write_all(b"\n").await.unwrap();
            client.write_all(b"q\n").await.unwrap();
        });
        let mut out = Vec::new();

        let exit = run_loop(
            &mut s,
            tokio::io::BufReader::new(server),
            &mut out,
            Duration::from_secs(1),
        )
        .await
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(exit, LoopExit::Quit);
        assert!(text.contains("Time's up!"));
        assert!(text.contains("Question 2 of 3"));
        assert!(s.outcomes()[0].timed_out);
        assert_eq!(s.score(), 0);
        assert_eq!(s.current_index(), 1);
        assert_eq!(s.time_remaining(), 3);
    }
}
