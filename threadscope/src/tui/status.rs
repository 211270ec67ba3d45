use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::theme::{gauge_bar, health_color, CAUTION_AMBER, SCOPE_GREEN, INFO_DIM};
use crate::analysis::DumpSummary;
use crate::classification::Health;

/// Summary panel: thread counts by state and health
pub struct StatusPanel {
    summary: DumpSummary,
    contended_locks: usize,
}

impl StatusPanel {
    pub fn new(summary: DumpSummary, contended_locks: usize) -> Self {
        Self { summary, contended_locks }
    }

    fn has_warnings(&self) -> bool {
        self.summary.has_warnings() || self.contended_locks > 0
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let (status_text, status_color) = if self.has_warnings() {
            ("[!] CAUTION", CAUTION_AMBER)
        } else {
            ("[-] NOMINAL", SCOPE_GREEN)
        };

        let mut lines = vec![
            Line::from(Span::styled(
                format!(" {status_text}"),
                Style::default().fg(status_color).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            count_line("Threads ", self.summary.total, SCOPE_GREEN),
            count_line("Runnable", self.summary.runnable, SCOPE_GREEN),
            count_line("Blocked ", self.summary.blocked, health_color(Health::Blocked)),
            count_line("Waiting ", self.summary.waiting, INFO_DIM),
            count_line("Timed   ", self.summary.timed_waiting, INFO_DIM),
            count_line("Daemon  ", self.summary.daemon, INFO_DIM),
            Line::from(""),
        ];

        let hot = self.summary.hot();
        let hot_pct = if self.summary.total > 0 {
            #[allow(clippy::cast_precision_loss)]
            let pct = hot as f64 / self.summary.total as f64 * 100.0;
            pct
        } else {
            0.0
        };
        let hot_color = if hot > 0 { health_color(Health::Hot) } else { SCOPE_GREEN };
        lines.push(count_line("Hot     ", hot, hot_color));
        lines.push(Line::from(vec![
            Span::raw(" "),
            Span::styled(gauge_bar(hot_pct, 10), Style::default().fg(hot_color)),
            Span::styled(format!(" {hot_pct:.0}%"), Style::default().fg(hot_color)),
        ]));

        if self.contended_locks > 0 {
            lines.push(count_line("Locks   ", self.contended_locks, CAUTION_AMBER));
        }

        let border_color = if self.has_warnings() { CAUTION_AMBER } else { SCOPE_GREEN };
        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Summary")
                .border_style(Style::default().fg(border_color)),
        );

        f.render_widget(paragraph, area);
    }
}

fn count_line(label: &'static str, count: usize, color: ratatui::style::Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {label} "), Style::default().fg(INFO_DIM)),
        Span::styled(count.to_string(), Style::default().fg(color)),
    ])
}
