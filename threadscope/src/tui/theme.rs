//! TUI color theme
//!
//! Green-on-black palette; health tiers map onto the alert colors.

use ratatui::style::Color;

use crate::classification::Health;

pub const SCOPE_GREEN: Color = Color::Rgb(0, 255, 0);
pub const CRITICAL_RED: Color = Color::Rgb(255, 0, 0);
pub const CAUTION_AMBER: Color = Color::Rgb(255, 191, 0);
pub const INFO_DIM: Color = Color::Rgb(0, 180, 0);
pub const BACKGROUND: Color = Color::Rgb(0, 20, 0);

/// Selection brackets around the highlighted row
pub const SEL_LEFT: &str = "<";
pub const SEL_RIGHT: &str = ">";

/// Row color for a health tier.
#[must_use]
pub fn health_color(health: Health) -> Color {
    match health {
        Health::Blocked | Health::Hot => CRITICAL_RED,
        Health::Active => CAUTION_AMBER,
        Health::Idle => INFO_DIM,
    }
}

/// Fixed-width marker shown before each thread row.
#[must_use]
pub fn health_marker(health: Health) -> &'static str {
    match health {
        Health::Blocked => "[X]",
        Health::Hot => "[!]",
        Health::Active => "[>]",
        Health::Idle => "[-]",
    }
}

/// Text gauge such as `[||||      ]` for a 0-100 percentage.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn gauge_bar(percentage: f64, width: usize) -> String {
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "|".repeat(filled), " ".repeat(width - filled))
}
