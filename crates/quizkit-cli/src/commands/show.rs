//! The `quizkit show` command.

use std::path::PathBuf;

use anyhow::Result;

use quizkit_core::SessionReport;

use crate::render;

pub fn execute(report_path: PathBuf, format: String) -> Result<()> {
    let report = SessionReport::load_json(&report_path)?;

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            // text format
            println!(
                "{} | {} | {}",
                report.bank.name,
                report.created_at.format("%Y-%m-%d %H:%M"),
                if report.timing_enabled { "timed" } else { "untimed" }
            );
            println!("{}", render::summary_table(&report.outcomes));
            println!(
                "Score: {}/{} ({:.0}%), {} timeout(s), {}s total",
                report.score,
                report.total,
                report.ratio() * 100.0,
                report.timeouts(),
                report.elapsed_secs
            );
            println!("{}", report.verdict.message());
        }
    }

    Ok(())
}
