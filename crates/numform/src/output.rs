//! Output formatting helpers for the `numform` CLI.

use std::io::{self, Write};

use numform_engine::ComputeOutcome;
use numform_ui::grid::render_grid;
use numform_ui::styles::{render_fail_icon, render_muted};
use numform_ui::terminal::{is_tty, terminal_width};
use serde::Serialize;

/// Print a value as pretty-printed JSON to stdout.
///
/// Terminates the process with exit code 1 if serialization fails.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            // Ignore broken pipe errors (e.g., piped to `head`)
            let _ = writeln!(handle, "{}", json);
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print a simple table with headers and rows.
///
/// Column widths are computed from the data for alignment.
pub fn output_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        return;
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let _ = writeln!(handle, "{}", format_row(headers.iter().copied(), &widths));
    let _ = writeln!(
        handle,
        "{}",
        format_row(widths.iter().map(|w| "-".repeat(*w)), &widths)
    );
    for row in rows {
        let _ = writeln!(handle, "{}", format_row(row.iter(), &widths));
    }
}

fn format_row<I, S>(cells: I, widths: &[usize]) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    cells
        .into_iter()
        .enumerate()
        .map(|(i, cell)| match widths.get(i) {
            Some(w) => format!("{:<w$}", cell.as_ref()),
            None => cell.as_ref().to_string(),
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// One-line description of a blocked outcome.
pub fn format_blocked(outcome: &ComputeOutcome) -> String {
    let mut line = format!("Blocked: {}", outcome.reason.as_deref().unwrap_or("unknown reason"));
    if let Some(step) = &outcome.step {
        line.push_str(&format!(" at step {step}"));
    }
    if let Some(estimate) = outcome.estimate {
        line.push_str(&format!(" (estimate {estimate})"));
    }
    line
}

/// Print a compute outcome: JSON as-is, otherwise results on stdout and
/// a blocked notice on stderr.
pub fn output_outcome(outcome: &ComputeOutcome, json: bool) {
    if json {
        output_json(outcome);
        return;
    }
    if outcome.is_blocked() {
        eprintln!("{} {}", render_fail_icon(), format_blocked(outcome));
        return;
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if is_tty() {
        for line in render_grid(&outcome.data, terminal_width()) {
            let _ = writeln!(handle, "{line}");
        }
        let noun = if outcome.data.len() == 1 { "result" } else { "results" };
        let _ = writeln!(handle, "{}", render_muted(&format!("{} {noun}", outcome.data.len())));
    } else {
        for item in &outcome.data {
            let _ = writeln!(handle, "{item}");
        }
    }
}
