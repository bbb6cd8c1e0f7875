//! Terminal output helpers shared by every command.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: success
//! - Red: errors
//! - Yellow: warnings
//! - Cyan: paths, key names, hints
//! - Bold: headers, important values
//! - Dimmed: secondary info

use colored::{ColoredString, Colorize};
use std::fmt::Display;
use std::io::{self, Write as IoWrite};

const RULE_WIDTH: usize = 56;

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var("NO_COLOR").is_err()
}

/// Apply `style` unless colors are disabled.
fn paint(text: &str, style: impl Fn(&str) -> ColoredString) -> String {
    if colors_enabled() {
        style(text).to_string()
    } else {
        text.to_string()
    }
}

/// Example: `✓ created foo.yaml (2 keys)`
pub fn success(msg: &str) {
    println!("{} {}", paint("✓", |s| s.green()), msg);
}

/// Print an error message to stderr.
///
/// Example: `✗ file not found: foo.yaml`
pub fn error(msg: &str) {
    eprintln!("{} {}", paint("✗", |s| s.red()), msg);
}

/// Example: `⚠ could not decode key 'cert'`
pub fn warn(msg: &str) {
    println!("{} {}", paint("⚠", |s| s.yellow()), msg);
}

/// Print a hint to stderr, under an error.
///
/// Example: `→ pass --skip-check to bypass the tool check`
pub fn hint(msg: &str) {
    eprintln!("{} {}", paint("→", |s| s.cyan()), paint(msg, |s| s.cyan()));
}

pub fn header(title: &str) {
    println!("{}", paint(title, |s| s.bold()));
}

/// Example: `  backup:  foo.yaml.backup`
pub fn kv(label: &str, value: impl Display) {
    println!(
        "  {}  {}",
        paint(label, |s| s.dimmed()),
        paint(&value.to_string(), |s| s.bold())
    );
}

/// Example: `  • password`
pub fn list_item(item: &str) {
    println!("  • {}", item);
}

pub fn rule() {
    println!("{}", paint(&"─".repeat(RULE_WIDTH), |s| s.dimmed()));
}

/// A path, colored for inline use.
pub fn path(p: &str) -> String {
    paint(p, |s| s.cyan())
}

/// A key name, colored for inline use.
pub fn key(k: &str) -> String {
    paint(k, |s| s.cyan())
}

/// `1 key`, `3 keys`.
pub fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{} {}", n, noun)
    } else {
        format!("{} {}s", n, noun)
    }
}

/// Start a progress line in the format `Label... `.
///
/// Call `progress_done()` to finish the line.
pub fn progress(label: &str) {
    print!("{}... ", paint(label, |s| s.dimmed()));
    let _ = io::stdout().flush();
}

pub fn progress_done(ok: bool) {
    if ok {
        println!("{}", paint("ok", |s| s.green()));
    } else {
        println!("{}", paint("failed", |s| s.red()));
    }
}

/// Example: `no matching SealedSecret files found locally`
pub fn dimmed(msg: &str) {
    println!("{}", paint(msg, |s| s.dimmed()));
}

/// Print a section header with a separator line.
///
/// Example:
/// ```text
/// Existing keys
/// ────────────────────────────────────────────────────────
/// ```
pub fn section(title: &str) {
    println!();
    header(title);
    rule();
}
