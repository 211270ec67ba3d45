//! Locks panel - monitors that have threads queued on them.
//!
//! ```text
//! [ LOCKS ]
//! <0x76ab2c1d8> 3w  Object
//!   owner: Worker-1
//! ```
//!
//! Sorted with the longest queue first, so a deadlock or a hot monitor
//! shows up on the first line.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{block::BorderType, Block, Borders, Paragraph},
    Frame,
};

use super::theme::{CAUTION_AMBER, CRITICAL_RED, SCOPE_GREEN, INFO_DIM};
use crate::analysis::LockContention;

pub struct LocksPanel {
    contended: Vec<LockContention>,
}

impl LocksPanel {
    pub fn new(contended: Vec<LockContention>) -> Self {
        Self { contended }
    }

    pub fn len(&self) -> usize {
        self.contended.len()
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();

        if self.contended.is_empty() {
            lines.push(Line::from(Span::styled(" no contended locks", Style::default().fg(INFO_DIM))));
        }

        for lock in &self.contended {
            let color = if lock.owners.is_empty() { CAUTION_AMBER } else { CRITICAL_RED };
            let mut head = vec![
                Span::styled(format!(" <{}>", lock.identity), Style::default().fg(color)),
                Span::styled(format!(" {}w", lock.waiters.len()), Style::default().fg(color)),
            ];
            if let Some(descriptor) = &lock.descriptor {
                head.push(Span::styled(format!("  {}", short_class(descriptor)), Style::default().fg(INFO_DIM)));
            }
            lines.push(Line::from(head));

            let owner = lock.owners.first().map_or("-", String::as_str);
            lines.push(Line::from(vec![
                Span::styled("   owner: ", Style::default().fg(INFO_DIM)),
                Span::styled(owner.to_string(), Style::default().fg(SCOPE_GREEN)),
            ]));
        }

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Plain)
                .title("[ LOCKS ]")
                .border_style(Style::default().fg(SCOPE_GREEN)),
        );

        f.render_widget(paragraph, area);
    }
}

/// Strip the package from a descriptor like `a java.util.concurrent.locks.ReentrantLock$NonfairSync`.
fn short_class(descriptor: &str) -> &str {
    let class = descriptor.rsplit(' ').next().unwrap_or(descriptor);
    class.rsplit('.').next().unwrap_or(class)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_class() {
        assert_eq!(short_class("a java.lang.Object"), "Object");
        assert_eq!(
            short_class("a java.util.concurrent.locks.ReentrantLock$NonfairSync"),
            "ReentrantLock$NonfairSync"
        );
        assert_eq!(short_class("Plain"), "Plain");
    }
}
