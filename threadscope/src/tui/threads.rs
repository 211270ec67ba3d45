//! Thread list panel - every thread of the dump, busiest first.
//!
//! # Rendering Pattern
//!
//! Each thread takes 2 lines:
//! ```text
//! Line 1: [marker] thread name                 42.3%
//! Line 2:          STATE detail  nid=0x1a2b  cpu=1234.50ms
//! ```
//!
//! The marker encodes the health tier: `[X]` blocked, `[!]` hot,
//! `[>]` active, `[-]` idle.
//!
//! The view never owns thread records. It keeps indices into the slice the
//! [`App`](super::App) holds, so applying a filter is a rebuild of a
//! `Vec<usize>`.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{block::BorderType, Block, Borders, Paragraph},
    Frame,
};

use super::theme::{health_color, health_marker, CAUTION_AMBER, SCOPE_GREEN, INFO_DIM, SEL_LEFT, SEL_RIGHT};
use crate::analysis::ThreadFilter;
use crate::thread_data::ThreadRecord;

/// Truncate a string for display, adding "..." if too long
pub(crate) fn truncate_for_display(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Calculate scroll offset to keep selected item visible
fn visible_scroll_offset(selected: usize, current_offset: usize, visible_count: usize) -> usize {
    if selected < current_offset {
        selected
    } else if selected >= current_offset + visible_count {
        selected.saturating_sub(visible_count - 1)
    } else {
        current_offset
    }
}

/// Calculate how many items fit in the visible area (2 lines per item)
fn visible_item_count(area: Rect, total_items: usize) -> usize {
    let available_height = area.height.saturating_sub(2) as usize;
    (available_height / 2).max(1).min(total_items.max(1))
}

/// CPU column text; threads from dumps without `cpu=`/`elapsed=` show a dash.
fn cpu_column(thread: &ThreadRecord) -> String {
    thread.cpu_percent().map_or_else(|| "    -".to_string(), |pct| format!("{pct:>5.1}%"))
}

fn render_item_line(is_selected: bool, thread: &ThreadRecord, max_name_len: usize) -> Line<'static> {
    let (sel_l, sel_r) = if is_selected { (SEL_LEFT, SEL_RIGHT) } else { (" ", " ") };
    let color = health_color(thread.health());
    let base_style = Style::default().fg(color);
    let name_style = if is_selected {
        base_style.add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        base_style
    };
    let mut name = truncate_for_display(thread.name(), max_name_len);
    if thread.daemon() {
        name.push_str(" (d)");
    }

    Line::from(vec![
        Span::styled(sel_l, Style::default().fg(CAUTION_AMBER)),
        Span::styled(health_marker(thread.health()), base_style),
        Span::raw(" "),
        Span::styled(name, name_style),
        Span::styled(format!(" {}", cpu_column(thread)), base_style),
        Span::styled(sel_r, Style::default().fg(CAUTION_AMBER)),
    ])
}

fn detail_line(thread: &ThreadRecord, max_len: usize) -> Line<'static> {
    let mut detail = thread.state().to_string();
    if !thread.state_detail().is_empty() {
        detail.push(' ');
        detail.push_str(thread.state_detail());
    }
    if let Some(nid) = thread.native_id_hex() {
        detail.push_str(&format!("  nid={nid}"));
    }
    if let Some(cpu) = thread.cpu_ms() {
        detail.push_str(&format!("  cpu={cpu:.2}ms"));
    }

    Line::from(vec![
        Span::raw("        "),
        Span::styled(truncate_for_display(&detail, max_len), Style::default().fg(INFO_DIM)),
    ])
}

/// Scrollable, filterable list of threads.
pub struct ThreadListView {
    scroll_offset: usize,
    /// Position within `visible`
    pub selected_index: usize,
    /// Indices into the full thread slice that pass the current filter
    pub visible: Vec<usize>,
    total: usize,
}

impl ThreadListView {
    #[must_use]
    pub fn new(threads: &[ThreadRecord]) -> Self {
        Self {
            scroll_offset: 0,
            selected_index: 0,
            visible: (0..threads.len()).collect(),
            total: threads.len(),
        }
    }

    /// Rebuild the visible rows; selection returns to the top.
    pub fn apply_filter(&mut self, filter: &ThreadFilter, threads: &[ThreadRecord]) {
        self.visible = threads
            .iter()
            .enumerate()
            .filter(|(_, thread)| filter.matches(thread))
            .map(|(idx, _)| idx)
            .collect();
        self.total = threads.len();
        self.selected_index = 0;
        self.scroll_offset = 0;
    }

    #[must_use]
    pub fn is_filtered(&self) -> bool {
        self.visible.len() != self.total
    }

    pub fn scroll_up(&mut self) {
        self.move_by(-1);
    }

    pub fn scroll_down(&mut self) {
        self.move_by(1);
    }

    pub fn page_up(&mut self, page: usize) {
        self.selected_index = self.selected_index.saturating_sub(page.max(1));
    }

    pub fn page_down(&mut self, page: usize) {
        self.selected_index = (self.selected_index + page.max(1)).min(self.visible.len().saturating_sub(1));
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.visible.len().saturating_sub(1);
    }

    fn move_by(&mut self, delta: isize) {
        let max_index = self.visible.len().saturating_sub(1);
        self.selected_index = self.selected_index.saturating_add_signed(delta).min(max_index);
    }

    /// Index of the selected thread in the full slice.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.visible.get(self.selected_index).copied()
    }

    /// Keep the selection in view for a panel of the given size.
    pub fn follow_selection(&mut self, area: Rect) {
        let display_count = visible_item_count(area, self.visible.len());
        self.scroll_offset = visible_scroll_offset(self.selected_index, self.scroll_offset, display_count);
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, threads: &[ThreadRecord]) {
        self.follow_selection(area);
        let max_name_len = (area.width as usize).saturating_sub(22).min(60);
        let max_detail_len = (area.width as usize).saturating_sub(12);
        let display_count = visible_item_count(area, self.visible.len());

        let mut lines = Vec::with_capacity(display_count * 2);
        for (display_idx, &thread_idx) in
            self.visible.iter().skip(self.scroll_offset).take(display_count).enumerate()
        {
            let Some(thread) = threads.get(thread_idx) else { continue };
            let is_selected = self.scroll_offset + display_idx == self.selected_index;
            lines.push(render_item_line(is_selected, thread, max_name_len));
            lines.push(detail_line(thread, max_detail_len));
        }

        if self.visible.is_empty() {
            lines.push(Line::from(Span::styled(
                "  no threads match the current filter (c to clear)",
                Style::default().fg(INFO_DIM),
            )));
        }

        let title = if self.is_filtered() {
            format!("[ THREADS {}/{} ]", self.visible.len(), self.total)
        } else {
            format!("[ THREADS {} ]", self.total)
        };

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Plain)
                .title(title)
                .border_style(Style::default().fg(SCOPE_GREEN)),
        );

        f.render_widget(paragraph, area);
    }
}
