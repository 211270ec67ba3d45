//! Responsive layout engine for the TUI.
//!
//! The thread list always gets the most room; the summary and lock panels
//! drop out as the terminal shrinks.

use ratatui::layout::Constraint;

const WIDTH_SINGLE_COLUMN: u16 = 60;
const WIDTH_NARROW: u16 = 100;

const HEIGHT_MINIMAL: u16 = 16;
const HEIGHT_COMPACT: u16 = 24;

/// Terminal size classification for layout decisions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TerminalSize {
    /// Height < 16: header + thread list only
    Minimal,
    /// Height 16-24: no lock panel
    Compact,
    /// Height > 24: every panel
    Normal,
}

/// Computed layout configuration based on terminal dimensions.
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct LayoutConfig {
    pub size: TerminalSize,

    /// Summary counters (top-left)
    pub show_status_panel: bool,

    /// Contended locks (bottom-left)
    pub show_locks_panel: bool,

    /// Key hints (bottom)
    pub show_status_bar: bool,

    /// Left column hidden entirely, list spans the full width
    pub single_column: bool,

    pub left_col_pct: u16,
    pub right_col_pct: u16,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            size: TerminalSize::Normal,
            show_status_panel: true,
            show_locks_panel: true,
            show_status_bar: true,
            single_column: false,
            left_col_pct: 30,
            right_col_pct: 70,
        }
    }
}

impl LayoutConfig {
    /// Column constraints for the left panels / thread list split.
    #[must_use]
    pub fn col_constraints(&self) -> [Constraint; 2] {
        [Constraint::Percentage(self.left_col_pct), Constraint::Percentage(self.right_col_pct)]
    }

    /// True when any left-column panel is visible.
    #[must_use]
    pub fn has_side_panels(&self) -> bool {
        !self.single_column && (self.show_status_panel || self.show_locks_panel)
    }
}

/// Compute layout configuration based on terminal dimensions.
///
/// | Terminal Size | Behavior |
/// |---------------|----------|
/// | Width < 60    | Thread list only |
/// | Width 60-100  | 25/75 split |
/// | Width > 100   | 30/70 split |
/// | Height < 16   | Header + thread list only |
/// | Height 16-24  | Lock panel hidden |
/// | Height > 24   | Full layout |
#[must_use]
pub fn compute_layout(width: u16, height: u16) -> LayoutConfig {
    let mut config = LayoutConfig::default();

    if width < WIDTH_SINGLE_COLUMN {
        config.single_column = true;
        config.show_status_panel = false;
        config.show_locks_panel = false;
    } else if width <= WIDTH_NARROW {
        config.left_col_pct = 25;
        config.right_col_pct = 75;
    }

    if height < HEIGHT_MINIMAL {
        config.size = TerminalSize::Minimal;
        config.show_status_panel = false;
        config.show_locks_panel = false;
        config.show_status_bar = false;
    } else if height <= HEIGHT_COMPACT {
        config.size = TerminalSize::Compact;
        config.show_locks_panel = false;
    }

    config
}
