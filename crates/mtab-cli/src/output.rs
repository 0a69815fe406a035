// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! CLI output formatting with colors and styling.
//!
//! Respects NO_COLOR and FORCE_COLOR environment variables.

use colored::{ColoredString, Colorize};
use mtab_core::MirandaKind;

/// Initialize color support based on environment.
/// Call once at startup.
pub fn init() {
    if std::env::var("NO_COLOR").is_ok() {
        colored::control::set_override(false);
    } else if std::env::var("FORCE_COLOR").is_ok() {
        colored::control::set_override(true);
    }
}

// === Error Output ===

pub fn error_label() -> ColoredString {
    "error".red().bold()
}

pub fn note_label() -> ColoredString {
    "note".cyan()
}

pub fn hint_equals() -> ColoredString {
    "=".cyan()
}

pub fn banner_ok(phase: &str) -> String {
    format!(
        "{} {} {}",
        "===".dimmed(),
        format!("{} OK", phase).green().bold(),
        "===".dimmed()
    )
}

pub fn banner_fail(phase: &str, count: usize) -> String {
    let msg = if count == 1 {
        format!("{} FAILED: 1 error", phase)
    } else {
        format!("{} FAILED: {} errors", phase, count)
    };
    format!("{} {} {}", "===".dimmed(), msg.red().bold(), "===".dimmed())
}

// === Tables ===

pub fn type_header(kind: &str, name: &str) -> String {
    format!("{} {}", kind.dimmed(), name.bold())
}

pub fn package(name: &str) -> ColoredString {
    format!("({})", name).dimmed()
}

pub fn section_header(header: &str) -> ColoredString {
    header.yellow().bold()
}

pub fn slot_index(n: usize) -> ColoredString {
    format!("{:3}", n).blue().bold()
}

/// Tag printed after a slot or miranda; empty for a plain default.
pub fn kind_tag(kind: MirandaKind) -> ColoredString {
    match kind {
        MirandaKind::Default => "".normal(),
        MirandaKind::Abstract => "abstract".yellow(),
        MirandaKind::Ambiguous => "ambiguous".red(),
    }
}

pub fn miranda_kind(kind: MirandaKind) -> ColoredString {
    match kind {
        MirandaKind::Default => "default".green(),
        other => kind_tag(other),
    }
}

// === Help Output ===

pub fn title(name: &str) -> ColoredString {
    name.bold()
}

pub fn version(v: &str) -> ColoredString {
    v.dimmed()
}

pub fn command(name: &str) -> ColoredString {
    name.green()
}

pub fn arg(name: &str) -> ColoredString {
    name.cyan()
}
