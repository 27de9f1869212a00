use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Serialize;
use wave_survivor_core::{EndCause, SessionSummary};
use wave_survivor_session::GameOver;

/// JSON document written when a session ends.
#[derive(Debug, Serialize)]
struct SummaryReport {
    seed: u64,
    cause: EndCause,
    #[serde(flatten)]
    summary: SessionSummary,
}

fn render(seed: u64, signal: &GameOver) -> Result<String> {
    let report = SummaryReport {
        seed,
        cause: signal.cause,
        summary: signal.summary,
    };
    serde_json::to_string_pretty(&report).context("failed to serialise session summary")
}

/// Writes the game-over summary to `path`, or to stdout when `path` is `-`.
pub(crate) fn write(path: &Path, seed: u64, signal: &GameOver) -> Result<()> {
    let json = render(seed, signal)?;
    if path == Path::new("-") {
        println!("{json}");
        return Ok(());
    }
    fs::write(path, json)
        .with_context(|| format!("failed to write session summary to {}", path.display()))
}
