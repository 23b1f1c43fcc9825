//! Human-readable console lines for tracker effects.
//!
//! Informational only; nothing parses these.

use std::time::Duration;

use colored::*;

use crate::domain::{OutageEnd, OutageRecord, ProbeOutcome, format_timestamp};
use crate::tracker::Effect;

/// Render `1h 2m 3s` style durations, dropping leading zero units
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    match (h, m) {
        (0, 0) => format!("{}s", s),
        (0, _) => format!("{}m {}s", m, s),
        _ => format!("{}h {}m {}s", h, m, s),
    }
}

/// Console line for an effect, if it has one
pub fn render(effect: &Effect, target: &str) -> Option<String> {
    match effect {
        Effect::None => None,
        Effect::LogInterruption { at } => Some(format!(
            "{} at {}.",
            "Connection lost".red().bold(),
            format_timestamp(at)
        )),
        Effect::LogRestoration { record } => Some(render_restoration(record)),
        Effect::EmitVerbose { at, outcome } => Some(match outcome {
            ProbeOutcome::Success { latency } => format!(
                "{}: {} {:.3}ms",
                format_timestamp(at),
                target,
                latency.as_secs_f64() * 1000.0
            ),
            ProbeOutcome::Failure => format!("{}: {} {}", format_timestamp(at), target, "unreachable".red()),
        }),
    }
}

fn render_restoration(record: &OutageRecord) -> String {
    let at = match record.end() {
        OutageEnd::At(end) => format_timestamp(&end),
        OutageEnd::Unterminated => OutageEnd::Unterminated.as_field(),
    };
    match record.duration() {
        Some(down) => format!(
            "{} at {}. (down for {})",
            "Connection restored".green().bold(),
            at,
            format_duration(down)
        ),
        None => format!("{} at {}.", "Connection restored".green().bold(), at),
    }
}

/// Console line for an outage flushed at shutdown
pub fn render_shutdown(record: &OutageRecord) -> String {
    format!(
        "{} during outage started at {}; recorded with open end.",
        "Interrupted".yellow().bold(),
        format_timestamp(&record.start())
    )
}

/// Print an effect's line to stdout
pub fn print_effect(effect: &Effect, target: &str) {
    if let Some(line) = render(effect, target) {
        println!("{}", line);
    }
}
