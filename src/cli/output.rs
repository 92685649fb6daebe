//! Shared CLI output helpers.
//!
//! Color scheme (respects NO_COLOR):
//! - Red: errors
//! - Cyan: names, hints
//! - Bold: headers, values
//! - Dimmed: secondary info

use colored::Colorize;
use std::fmt::Display;

/// Characters of a secret shown before the mask.
const MASK_VISIBLE: usize = 2;

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var("NO_COLOR").is_err()
}

/// Print an error message to stderr (red).
///
/// Example: `✗ no secret set with name STRIPE_KEY`
pub fn error(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", "✗".red(), msg);
    } else {
        eprintln!("✗ {}", msg);
    }
}

/// Print a hint message to stderr (cyan).
///
/// Example: `→ npx sst secrets set STRIPE_KEY <value> --stage prod`
pub fn hint(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", "→".cyan(), msg.cyan());
    } else {
        eprintln!("→ {}", msg);
    }
}

/// Print a bold section header.
pub fn header(title: &str) {
    if colors_enabled() {
        println!("{}", title.bold());
    } else {
        println!("{}", title);
    }
}

/// Print a key-value pair (label cyan, value bold).
///
/// Example: `  STRIPE_KEY  sk**********`
pub fn kv(label: &str, value: impl Display) {
    if colors_enabled() {
        println!("  {}  {}", label.cyan(), value.to_string().bold());
    } else {
        println!("  {}  {}", label, value);
    }
}

/// Print a dimmed/secondary message.
///
/// Example: `no secrets bound`
pub fn dimmed(msg: &str) {
    if colors_enabled() {
        println!("{}", msg.dimmed());
    } else {
        println!("{}", msg);
    }
}

/// Mask a secret value, keeping only its first characters.
pub fn mask(value: &str) -> String {
    let visible: String = value.chars().take(MASK_VISIBLE).collect();
    let hidden = value.chars().count().saturating_sub(MASK_VISIBLE);
    format!("{}{}", visible, "*".repeat(hidden))
}
