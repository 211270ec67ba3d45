//! # Terminal User Interface (TUI)
//!
//! Interactive browser over the parsed threads of one dump.
//!
//! ## View Modes
//!
//! - **Browse** - Summary, contended locks and the thread list (default)
//! - **Detail** - Every header field, lock info and the scrollable stack
//! - **Search** - Text input filtering threads by name
//! - **Help** - Keyboard shortcuts
//!
//! ## Filters
//!
//! Search text, a health tier (`h` cycles) and a thread state (`s` cycles
//! through the states present in the dump) combine; `c` clears all three.
//!
//! ## Sub-Modules
//!
//! - `threads` - Thread list, selection and scrolling
//! - `status` - Summary counters
//! - `locks` - Contended monitors
//! - `layout` - Size breakpoints
//! - `theme` - Colors and health markers

// Rendering code is long and casts terminal sizes freely
#![allow(
    clippy::cast_possible_truncation,
    clippy::too_many_lines,
    clippy::needless_pass_by_value
)]

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, warn};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Terminal,
};
use std::io;
use std::time::Duration;

mod layout;
mod locks;
mod status;
mod theme;
pub mod threads; // Public for testing

use crate::analysis::{analyze_lock_contention, distinct_states, DumpSummary, ThreadFilter};
use crate::classification::Health;
use crate::domain::TuiError;
use crate::thread_data::ThreadRecord;
use layout::compute_layout;
use locks::LocksPanel;
use status::StatusPanel;
use theme::{health_color, BACKGROUND, CAUTION_AMBER, SCOPE_GREEN, INFO_DIM};
use threads::ThreadListView;

const STYLE_HEADING: Style = Style::new().fg(SCOPE_GREEN).add_modifier(Modifier::BOLD);
const STYLE_LABEL: Style = Style::new().fg(CAUTION_AMBER).add_modifier(Modifier::BOLD);
const STYLE_DIM: Style = Style::new().fg(INFO_DIM);
const STYLE_KEY: Style = Style::new().fg(CAUTION_AMBER);
const STYLE_TEXT: Style = Style::new().fg(ratatui::style::Color::White);

/// Lines moved by PageUp/PageDown in the thread list
const LIST_PAGE: usize = 10;
/// Lines moved by PageUp/PageDown in the stack trace
const STACK_PAGE: u16 = 20;

/// Current view mode determines what's displayed and how keys are handled
#[derive(Debug, Clone, Copy, PartialEq)]
enum ViewMode {
    Browse,
    /// Full record of the selected thread
    Detail,
    /// Text input for filtering threads by name
    Search,
    Help,
}

/// Next value of a filter that cycles `None -> options[0] -> ... -> None`.
fn cycle<T: Clone + PartialEq>(current: Option<&T>, options: &[T]) -> Option<T> {
    match current {
        None => options.first().cloned(),
        Some(value) => {
            let pos = options.iter().position(|o| o == value)?;
            options.get(pos + 1).cloned()
        }
    }
}

/// Place a stack trace on the system clipboard.
fn copy_to_clipboard(text: &str) -> Result<(), TuiError> {
    let mut clipboard = arboard::Clipboard::new().map_err(|e| TuiError::Clipboard(e.to_string()))?;
    clipboard.set_text(text.to_owned()).map_err(|e| TuiError::Clipboard(e.to_string()))
}

/// Interactive thread browser.
///
/// Create with [`App::new`] and start with [`App::run`]. The threads are
/// shown in the order given, so callers pass them already sorted.
pub struct App {
    threads: Vec<ThreadRecord>,
    /// Shown in the header bar (file name or `stdin`)
    source: String,
    states: Vec<String>,

    status_panel: StatusPanel,
    locks_panel: LocksPanel,
    thread_list: ThreadListView,

    view_mode: ViewMode,
    filter: ThreadFilter,
    search_query: String,
    detail_scroll: u16,
    /// One-shot message in the status bar (clipboard result)
    flash: Option<String>,
    should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(threads: Vec<ThreadRecord>, source: impl Into<String>) -> Self {
        let summary = DumpSummary::from_threads(&threads);
        let contended = analyze_lock_contention(&threads);
        let locks_panel = LocksPanel::new(contended);
        let status_panel = StatusPanel::new(summary, locks_panel.len());
        let thread_list = ThreadListView::new(&threads);
        let states = distinct_states(&threads);

        Self {
            threads,
            source: source.into(),
            states,
            status_panel,
            locks_panel,
            thread_list,
            view_mode: ViewMode::Browse,
            filter: ThreadFilter::default(),
            search_query: String::new(),
            detail_scroll: 0,
            flash: None,
            should_quit: false,
        }
    }

    fn selected_thread(&self) -> Option<&ThreadRecord> {
        self.thread_list.selected().and_then(|idx| self.threads.get(idx))
    }

    fn refilter(&mut self) {
        self.thread_list.apply_filter(&self.filter, &self.threads);
    }

    fn yank_selected(&mut self) {
        let Some(thread) = self.selected_thread() else { return };
        let name = thread.name().to_string();
        let result = copy_to_clipboard(thread.stack_trace());
        self.flash = Some(match result {
            Ok(()) => {
                info!("Copied stack trace of \"{name}\" to clipboard");
                format!("copied stack of \"{name}\"")
            }
            Err(e) => {
                warn!("{e}");
                e.to_string()
            }
        });
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: KeyCode) {
        self.flash = None;
        match self.view_mode {
            ViewMode::Browse => match key {
                KeyCode::Char('q' | 'Q') => self.should_quit = true,
                KeyCode::Up | KeyCode::Char('k') => self.thread_list.scroll_up(),
                KeyCode::Down | KeyCode::Char('j') => self.thread_list.scroll_down(),
                KeyCode::PageUp => self.thread_list.page_up(LIST_PAGE),
                KeyCode::PageDown => self.thread_list.page_down(LIST_PAGE),
                KeyCode::Home => self.thread_list.select_first(),
                KeyCode::End => self.thread_list.select_last(),
                KeyCode::Enter => {
                    if self.selected_thread().is_some() {
                        self.detail_scroll = 0;
                        self.view_mode = ViewMode::Detail;
                    }
                }
                KeyCode::Char('/') => {
                    self.search_query = self.filter.search.clone().unwrap_or_default();
                    self.view_mode = ViewMode::Search;
                }
                KeyCode::Char('h' | 'H') => {
                    self.filter.health = cycle(self.filter.health.as_ref(), &Health::ALL);
                    self.refilter();
                }
                KeyCode::Char('s' | 'S') => {
                    self.filter.state = cycle(self.filter.state.as_ref(), &self.states);
                    self.refilter();
                }
                KeyCode::Char('c' | 'C') => {
                    self.filter = ThreadFilter::default();
                    self.search_query.clear();
                    self.refilter();
                }
                KeyCode::Char('y' | 'Y') => self.yank_selected(),
                KeyCode::Char('?') => self.view_mode = ViewMode::Help,
                _ => {}
            },
            ViewMode::Help => {
                // Any key closes help
                self.view_mode = ViewMode::Browse;
            }
            ViewMode::Detail => match key {
                KeyCode::Esc | KeyCode::Char('q' | 'Q') | KeyCode::Backspace => {
                    self.view_mode = ViewMode::Browse;
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.detail_scroll = self.detail_scroll.saturating_sub(1);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.detail_scroll = self.detail_scroll.saturating_add(1);
                }
                KeyCode::PageUp => self.detail_scroll = self.detail_scroll.saturating_sub(STACK_PAGE),
                KeyCode::PageDown => self.detail_scroll = self.detail_scroll.saturating_add(STACK_PAGE),
                KeyCode::Home => self.detail_scroll = 0,
                KeyCode::Char('y' | 'Y') => self.yank_selected(),
                _ => {}
            },
            ViewMode::Search => match key {
                KeyCode::Esc => {
                    self.search_query.clear();
                    self.view_mode = ViewMode::Browse;
                }
                KeyCode::Enter => {
                    self.view_mode = ViewMode::Browse;
                    let query = self.search_query.trim();
                    self.filter.search = (!query.is_empty()).then(|| query.to_string());
                    self.refilter();
                }
                KeyCode::Backspace => {
                    self.search_query.pop();
                }
                KeyCode::Char(c) => self.search_query.push(c),
                _ => {}
            },
        }
    }

    /// Run the TUI event loop
    ///
    /// # Errors
    /// Returns an error if terminal setup or rendering fails
    pub fn run(mut self) -> Result<(), TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Restore the terminal even when the loop failed
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<(), TuiError> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    fn draw(&mut self, f: &mut ratatui::Frame) {
        let area = f.area();
        let config = compute_layout(area.width, area.height);

        let mut rows = vec![Constraint::Length(3), Constraint::Min(0)];
        if config.show_status_bar {
            rows.push(Constraint::Length(3));
        }
        let outer_layout = Layout::default().direction(Direction::Vertical).constraints(rows).split(area);

        f.render_widget(self.header(), outer_layout[0]);

        let main_area = outer_layout[1];
        let list_area = if config.has_side_panels() {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(config.col_constraints())
                .split(main_area);

            match (config.show_status_panel, config.show_locks_panel) {
                (true, true) => {
                    let left = Layout::default()
                        .direction(Direction::Vertical)
                        .constraints([Constraint::Length(15), Constraint::Min(0)])
                        .split(cols[0]);
                    self.status_panel.render(f, left[0]);
                    self.locks_panel.render(f, left[1]);
                }
                (true, false) => self.status_panel.render(f, cols[0]),
                (false, _) => self.locks_panel.render(f, cols[0]),
            }
            cols[1]
        } else {
            main_area
        };
        self.thread_list.render(f, list_area, &self.threads);

        match self.view_mode {
            ViewMode::Browse => {}
            ViewMode::Detail => self.render_detail(f, main_area),
            ViewMode::Search => render_search_overlay(f, main_area, &self.search_query),
            ViewMode::Help => render_help_overlay(f, main_area),
        }

        if config.show_status_bar {
            let status = Paragraph::new(vec![self.status_line()]).block(
                Block::default().borders(Borders::ALL).border_style(Style::default().fg(SCOPE_GREEN)),
            );
            f.render_widget(status, outer_layout[2]);
        }
    }

    fn header(&self) -> Paragraph<'static> {
        let mut spans = vec![
            Span::styled("THREADSCOPE", STYLE_HEADING),
            Span::styled(" | ", STYLE_DIM),
            Span::styled(self.source.clone(), Style::new().fg(CAUTION_AMBER)),
            Span::styled(" | ", STYLE_DIM),
            Span::styled(format!("{} threads", self.threads.len()), Style::new().fg(SCOPE_GREEN)),
        ];
        if let Some(health) = self.filter.health {
            spans.push(Span::styled(" | ", STYLE_DIM));
            spans.push(Span::styled(format!("health={health}"), Style::new().fg(health_color(health))));
        }
        if let Some(state) = &self.filter.state {
            spans.push(Span::styled(" | ", STYLE_DIM));
            spans.push(Span::styled(format!("state={state}"), Style::new().fg(CAUTION_AMBER)));
        }
        if let Some(search) = &self.filter.search {
            spans.push(Span::styled(" | ", STYLE_DIM));
            spans.push(Span::styled(format!("/{search}"), Style::new().fg(CAUTION_AMBER)));
        }

        Paragraph::new(vec![Line::from(spans)])
            .block(Block::default().borders(Borders::ALL).border_style(Style::new().fg(SCOPE_GREEN)))
    }

    fn status_line(&self) -> Line<'static> {
        let key = |k: &'static str, label: &'static str| {
            [Span::styled(k, STYLE_KEY), Span::styled(label, STYLE_DIM)]
        };

        let mut spans: Vec<Span<'static>> = match self.view_mode {
            ViewMode::Browse => {
                let mut spans: Vec<Span<'static>> = [
                    key("Q", ":Quit "),
                    key("/", ":Search "),
                    key("H", ":Health "),
                    key("S", ":State "),
                    key("C", ":Clear "),
                    key("Y", ":Yank "),
                    key("?", ":Help "),
                ]
                .into_iter()
                .flatten()
                .collect();
                spans.push(if self.filter.is_empty() {
                    Span::styled("[Ready]", Style::default().fg(SCOPE_GREEN))
                } else {
                    Span::styled("[Filtered]", Style::default().fg(CAUTION_AMBER))
                });
                spans
            }
            ViewMode::Detail => {
                let mut spans: Vec<Span<'static>> =
                    [key("ESC", ":Back "), key("↑↓", ":Scroll "), key("Y", ":Yank ")]
                        .into_iter()
                        .flatten()
                        .collect();
                spans.push(Span::styled("[Detail]", Style::default().fg(CAUTION_AMBER)));
                spans
            }
            ViewMode::Search => {
                let mut spans: Vec<Span<'static>> =
                    [key("Enter", ":Apply "), key("ESC", ":Cancel ")].into_iter().flatten().collect();
                spans.push(Span::styled("[Search]", Style::default().fg(CAUTION_AMBER)));
                spans
            }
            ViewMode::Help => {
                let mut spans: Vec<Span<'static>> = key("Any key", ":Close ").into_iter().collect();
                spans.push(Span::styled("[Help]", Style::default().fg(SCOPE_GREEN)));
                spans
            }
        };

        if let Some(message) = &self.flash {
            spans.push(Span::styled(format!("  {message}"), STYLE_TEXT));
        }
        Line::from(spans)
    }

    /// Render the detail overlay for the selected thread
    fn render_detail(&self, f: &mut ratatui::Frame, area: Rect) {
        let Some(thread) = self.selected_thread() else { return };
        let popup_area = centered_popup(area, 90, area.height.saturating_sub(2));
        let separator = "─".repeat(popup_area.width.saturating_sub(4) as usize);
        let health_style = Style::new().fg(health_color(thread.health())).add_modifier(Modifier::BOLD);

        let field = |label: &'static str, value: String| {
            Line::from(vec![Span::styled(label, STYLE_LABEL), Span::styled(value, STYLE_TEXT)])
        };
        let or_dash = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());

        let mut lines = vec![
            Line::from(vec![
                Span::styled(thread.name().to_string(), STYLE_HEADING),
                Span::raw("  "),
                Span::styled(thread.health().to_string(), health_style),
            ]),
            Line::from(separator.clone()),
            field(
                "State:      ",
                if thread.state_detail().is_empty() {
                    thread.state().to_string()
                } else {
                    format!("{} {}", thread.state(), thread.state_detail())
                },
            ),
            field("Thread:     ", or_dash(thread.thread_number().map(|n| n.to_string()))),
            field("Daemon:     ", if thread.daemon() { "yes" } else { "no" }.to_string()),
            field(
                "Priority:   ",
                format!(
                    "{} (os {})",
                    or_dash(thread.priority().map(|p| p.to_string())),
                    or_dash(thread.os_priority().map(|p| p.to_string()))
                ),
            ),
            field(
                "Native id:  ",
                match (thread.native_id_hex(), thread.native_id_decimal()) {
                    (Some(hex), Some(dec)) => format!("{hex} ({dec})"),
                    _ => "-".to_string(),
                },
            ),
            field("VM tid:     ", or_dash(thread.vm_thread_id().map(str::to_string))),
            field(
                "CPU:        ",
                format!(
                    "{} of {} elapsed ({})",
                    or_dash(thread.cpu_ms().map(|v| format!("{v:.2}ms"))),
                    or_dash(thread.elapsed_ms().map(|v| format!("{v:.2}ms"))),
                    or_dash(thread.cpu_percent().map(|v| format!("{v:.2}%")))
                ),
            ),
        ];

        if !thread.locks().is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("Locks", STYLE_HEADING)));
            for lock in thread.locks() {
                lines.push(Line::from(Span::styled(format!("  {lock}"), STYLE_TEXT)));
            }
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Stack Trace", STYLE_HEADING)));
        if thread.stack_trace().is_empty() {
            lines.push(Line::from(Span::styled("  (no frames)", STYLE_DIM)));
        }
        for frame in thread.stack_trace().lines() {
            lines.push(Line::from(Span::styled(format!("  {frame}"), STYLE_DIM)));
        }

        let widget = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((self.detail_scroll, 0))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Thread ")
                    .style(Style::new().bg(BACKGROUND).fg(SCOPE_GREEN)),
            );

        f.render_widget(Clear, popup_area);
        f.render_widget(widget, popup_area);
    }
}

// =============================================================================
// OVERLAY RENDERERS
// =============================================================================

/// Render the help overlay explaining health tiers and keyboard shortcuts
fn render_help_overlay(f: &mut ratatui::Frame, area: Rect) {
    let popup_area = centered_popup(area, 80, 24);

    let tier = |health: Health, text: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<8}", health.as_str()), Style::new().fg(health_color(health))),
            Span::styled(text, STYLE_DIM),
        ])
    };

    let help_text = vec![
        Line::from(""),
        Line::from(Span::styled("  Health Tiers", STYLE_HEADING)),
        tier(Health::Blocked, "Waiting to enter a monitor another thread holds."),
        tier(Health::Hot, "Runnable and on CPU for over half its lifetime."),
        tier(Health::Active, "Runnable, moderate or unknown CPU."),
        tier(Health::Idle, "Waiting, sleeping or parked."),
        Line::from(""),
        Line::from(Span::styled("  Reading It", STYLE_HEADING)),
        Line::from(Span::styled(
            "  Threads are sorted by CPU time. Start at the top, then check LOCKS",
            STYLE_DIM,
        )),
        Line::from(Span::styled(
            "  for monitors with a queue and the thread that owns them.",
            STYLE_DIM,
        )),
        Line::from(""),
        Line::from(Span::styled("  Keys", STYLE_HEADING)),
        Line::from(vec![
            Span::styled("  ↑↓", STYLE_KEY),
            Span::styled(" Select   ", STYLE_TEXT),
            Span::styled("Enter", STYLE_KEY),
            Span::styled(" Inspect   ", STYLE_TEXT),
            Span::styled("/", STYLE_KEY),
            Span::styled(" Search   ", STYLE_TEXT),
            Span::styled("Y", STYLE_KEY),
            Span::styled(" Copy stack", STYLE_TEXT),
        ]),
        Line::from(vec![
            Span::styled("  H", STYLE_KEY),
            Span::styled(" Health filter   ", STYLE_TEXT),
            Span::styled("S", STYLE_KEY),
            Span::styled(" State filter   ", STYLE_TEXT),
            Span::styled("C", STYLE_KEY),
            Span::styled(" Clear   ", STYLE_TEXT),
            Span::styled("Q", STYLE_KEY),
            Span::styled(" Quit", STYLE_TEXT),
        ]),
        Line::from(""),
        Line::from(Span::styled("  Press any key to close", STYLE_DIM)),
    ];

    let help_widget = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .style(Style::new().bg(ratatui::style::Color::Black).fg(SCOPE_GREEN)),
    );

    f.render_widget(Clear, popup_area);
    f.render_widget(help_widget, popup_area);
}

fn render_search_overlay(f: &mut ratatui::Frame, area: Rect, query: &str) {
    let popup_area = centered_popup(area, 60, 3);

    let search_widget = Paragraph::new(format!("Search: {query}_"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Filter Threads")
                .style(Style::default().bg(ratatui::style::Color::Black).fg(SCOPE_GREEN)),
        )
        .style(Style::default().fg(CAUTION_AMBER));

    f.render_widget(Clear, popup_area);
    f.render_widget(search_widget, popup_area);
}

/// Create a centered popup area with given width percentage and height in lines
fn centered_popup(area: Rect, width_percent: u16, height_lines: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(height_lines), Constraint::Fill(1)])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width_percent) / 2),
            Constraint::Percentage(width_percent),
            Constraint::Percentage((100 - width_percent) / 2),
        ])
        .split(vertical[1])[1]
}
