//! UI helpers for consistent output formatting.

use console::Style;

/// Single-character Unicode glyphs used as status indicators.
pub mod indicators {
    /// Error indicator (✖).
    pub const ERROR: &str = "✖";
    /// Warning indicator (⚠).
    pub const WARNING: &str = "⚠";
    /// Informational indicator (ℹ).
    pub const INFO: &str = "ℹ";
    /// Success indicator (✓).
    pub const SUCCESS: &str = "✓";
    /// Addition indicator (+).
    pub const ADDED: &str = "+";
    /// Empty-result indicator (○).
    pub const NONE: &str = "○";
}

/// Semantic colour palette for terminal output.
pub mod colors {
    use console::Style;

    /// Red - errors.
    pub const fn error() -> Style {
        Style::new().red()
    }

    /// Yellow - warnings.
    pub const fn warning() -> Style {
        Style::new().yellow()
    }

    /// Cyan - informational messages.
    pub const fn info() -> Style {
        Style::new().cyan()
    }

    /// Green - success messages.
    pub const fn success() -> Style {
        Style::new().green()
    }

    /// Light grey - secondary descriptive text.
    pub const fn secondary() -> Style {
        Style::new().color256(252)
    }

    /// Dark grey - muted/contextual text.
    pub const fn muted() -> Style {
        Style::new().color256(243)
    }

    /// Cyan - accent highlights (ids, commands).
    pub const fn accent() -> Style {
        Style::new().cyan()
    }

    /// White - emphasised inline text.
    pub const fn emphasis() -> Style {
        Style::new().white()
    }
}

/// Process exit codes.
pub mod exit {
    /// An unrecoverable error occurred.
    pub const ERROR: i32 = 2;
}

const SEVERITY_HIGH_COLOR: u8 = 208;
const SEVERITY_MEDIUM_COLOR: u8 = 220;
const SEVERITY_LOW_COLOR: u8 = 75;

/// Returns the terminal colour style for a server-reported severity name.
#[must_use]
pub fn severity_style(severity: Option<&str>) -> Style {
    match severity.map(str::to_ascii_lowercase).as_deref() {
        Some("critical" | "high") => Style::new().color256(SEVERITY_HIGH_COLOR).bold(),
        Some("medium") => Style::new().color256(SEVERITY_MEDIUM_COLOR),
        Some("low") => Style::new().color256(SEVERITY_LOW_COLOR),
        _ => colors::muted(),
    }
}

/// Prints a styled `sca <command>` header with surrounding blank lines.
pub fn print_command_header(command: &str) {
    println!();
    println!(
        "{} {}",
        colors::accent().bold().apply_to("sca"),
        colors::muted().apply_to(command)
    );
    println!();
}

/// Prints a red error message to stderr.
pub fn print_error(message: &str) {
    eprintln!(
        "{} {}",
        colors::error().apply_to(indicators::ERROR),
        colors::secondary().apply_to(message)
    );
}

/// Prints a yellow warning message to stderr.
pub fn print_warning(message: &str) {
    eprintln!(
        "{} {}",
        colors::warning().apply_to(indicators::WARNING),
        colors::secondary().apply_to(message)
    );
}

/// Prints a cyan informational message to stdout.
pub fn print_info(message: &str) {
    println!(
        "{} {}",
        colors::info().apply_to(indicators::INFO),
        colors::secondary().apply_to(message)
    );
}

/// Prints a green success message to stdout.
pub fn print_success(message: &str) {
    println!(
        "{} {}",
        colors::success().apply_to(indicators::SUCCESS),
        colors::secondary().apply_to(message)
    );
}

/// Prints a muted "nothing found" line.
pub fn print_none(what: &str) {
    println!(
        "{} {}",
        colors::muted().apply_to(indicators::NONE),
        colors::secondary().apply_to(format!("no {what}"))
    );
}

/// Prints a muted `N things` count line.
pub fn print_count(count: usize, singular: &str, plural: &str) {
    println!(
        "{}",
        colors::muted().apply_to(format!("{count} {}", pluralise_word(count, singular, plural)))
    );
}

/// Returns `singular` when `count` is 1, otherwise `plural`.
#[must_use]
pub const fn pluralise_word<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}

/// Truncates a string to `max_chars`, appending an ellipsis if shortened.
#[must_use]
pub fn truncate_with_ellipsis(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{truncated}…")
    }
}

/// Formats an optional timestamp as `YYYY-MM-DD HH:MM`, or `-`.
#[must_use]
pub fn format_timestamp(timestamp: Option<chrono::DateTime<chrono::Utc>>) -> String {
    timestamp.map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string())
}

/// Returns the shared clap colour theme used by all CLI subcommands.
#[must_use]
pub fn clap_styles() -> clap::builder::Styles {
    use clap::builder::styling::{AnsiColor, Effects, Style};

    clap::builder::Styles::styled()
        .header(
            Style::new()
                .fg_color(Some(AnsiColor::Cyan.into()))
                .effects(Effects::BOLD),
        )
        .usage(
            Style::new()
                .fg_color(Some(AnsiColor::Cyan.into()))
                .effects(Effects::BOLD),
        )
        .literal(Style::new().fg_color(Some(AnsiColor::Cyan.into())))
        .placeholder(Style::new().fg_color(Some(AnsiColor::BrightBlack.into())))
        .valid(Style::new().fg_color(Some(AnsiColor::Green.into())))
        .invalid(Style::new().fg_color(Some(AnsiColor::Red.into())))
        .error(
            Style::new()
                .fg_color(Some(AnsiColor::Red.into()))
                .effects(Effects::BOLD),
        )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_indicators_are_single_chars() {
        assert_eq!(indicators::ERROR.chars().count(), 1);
        assert_eq!(indicators::WARNING.chars().count(), 1);
        assert_eq!(indicators::INFO.chars().count(), 1);
        assert_eq!(indicators::SUCCESS.chars().count(), 1);
        assert_eq!(indicators::ADDED.chars().count(), 1);
        assert_eq!(indicators::NONE.chars().count(), 1);
    }

    #[test]
    fn test_pluralise_word() {
        assert_eq!(pluralise_word(0, "project", "projects"), "projects");
        assert_eq!(pluralise_word(1, "project", "projects"), "project");
        assert_eq!(pluralise_word(2, "project", "projects"), "projects");
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("short", 10), "short");
        assert_eq!(truncate_with_ellipsis("longer text", 6), "longe…");
    }

    #[test]
    fn test_format_timestamp() {
        let t = chrono::Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 0).unwrap();
        assert_eq!(format_timestamp(Some(t)), "2024-03-05 14:07");
        assert_eq!(format_timestamp(None), "-");
    }
}
