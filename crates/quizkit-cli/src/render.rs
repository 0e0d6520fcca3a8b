//! Plain-text rendering of the session for the terminal.

use std::io::{self, Write};

use comfy_table::{Cell, Table};

use quizkit_core::{QuestionOutcome, QuizSession};

/// Print the current question with its options and the status line.
pub fn question<R, W: Write>(session: &QuizSession<R>, out: &mut W) -> io::Result<()> {
    let q = session.current_question();
    let timer = if session.timing_enabled() {
        format!("{}s left", session.time_remaining())
    } else {
        "timer off".to_string()
    };

    writeln!(out)?;
    writeln!(
        out,
        "Question {} of {} | score {} | {:.0}% | {}",
        session.current_index() + 1,
        session.total(),
        session.score(),
        session.progress() * 100.0,
        timer
    )?;
    writeln!(out, "{}", q.text)?;
    for (i, option) in q.options.iter().enumerate() {
        let marker = if session.selected_option() == Some(i) { ">" } else { " " };
        writeln!(out, " {marker} {}. {option}", i + 1)?;
    }
    writeln!(out, "Pick 1-{} and press Enter to confirm.", q.options.len())?;
    out.flush()
}

/// Print the feedback for a question that just resolved.
pub fn feedback<R, W: Write>(
    session: &QuizSession<R>,
    out: &mut W,
    correct: bool,
    timed_out: bool,
) -> io::Result<()> {
    let q = session.current_question();
    let headline = if correct {
        "Correct!"
    } else if timed_out {
        "Time's up!"
    } else {
        "Not quite."
    };
    writeln!(out, "{headline} {}", q.explanation)?;
    if !correct {
        writeln!(
            out,
            "The answer was {}. {}",
            q.correct_index + 1,
            q.correct_option()
        )?;
    }
    if session.finished() {
        writeln!(out, "That was the last question.")?;
        final_result(session, out)?;
        writeln!(out, "Press r to play again or q to quit.")?;
    } else {
        writeln!(out, "Press Enter for the next question.")?;
    }
    out.flush()
}

/// Print the score line and verdict.
pub fn final_result<R, W: Write>(session: &QuizSession<R>, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "You scored {} of {}. {}",
        session.score(),
        session.total(),
        session.verdict().message()
    )
}

/// Build a per-question summary table.
pub fn summary_table(outcomes: &[QuestionOutcome]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Your answer", "Correct", "Result", "Time"]);

    for (i, o) in outcomes.iter().enumerate() {
        let result = if o.correct {
            "correct"
        } else if o.timed_out {
            "timed out"
        } else {
            "wrong"
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&o.question),
            Cell::new(o.selected.map(|s| (s + 1).to_string()).unwrap_or_else(|| "-".into())),
            Cell::new(o.correct_index + 1),
            Cell::new(result),
            Cell::new(format!("{}s", o.elapsed_secs)),
        ]);
    }

    table
}
