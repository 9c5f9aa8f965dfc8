//! Console output helpers for the annoforest binaries.

use std::time::{Duration, Instant};

use colored::Colorize;

pub fn banner(subtitle: &str) {
    eprintln!();
    eprintln!("{} {}", "annoforest".bold().cyan(), subtitle.dimmed());
    eprintln!();
}

pub fn section(title: &str) {
    let bar = "─".repeat(50);
    eprintln!("{} {}", title.bold().blue(), bar.dimmed());
}

pub fn kv(key: &str, value: &str) {
    eprintln!("  {:<20} {}", key.dimmed(), value);
}

pub fn success(msg: &str) {
    eprintln!("  {} {}", "✓".green().bold(), msg);
}

pub fn warning(msg: &str) {
    eprintln!("  {} {}", "⚠".yellow(), msg.yellow());
}

pub fn failure(msg: &str) {
    eprintln!("  {} {}", "✗".red().bold(), msg.red());
}

pub fn print_summary(start: Instant) {
    eprintln!();
    eprintln!(
        "{}  {}",
        "Time".dimmed(),
        format_elapsed(start.elapsed()).bold()
    );
    eprintln!();
}

/// Formats a duration as HH:MM:SS.d (tenths of a second).
#[must_use]
pub fn format_elapsed(d: Duration) -> String {
    let total_secs = d.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    let tenths = d.subsec_millis() / 100;
    format!("{hours:02}:{minutes:02}:{seconds:02}.{tenths}")
}
