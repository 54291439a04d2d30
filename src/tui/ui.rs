//! Drawing for the interactive browser. Reads the session and store, never
//! changes them.

use crate::engine::looks_like_regex;
use crate::tui::session::{NavigationSession, View};
use crate::types::{ScanOutcome, ScanResultStore, Snippet};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

const LIST_HELP: &str = "↑/↓: Navigate | Enter: Details | q: Quit";
const DETAIL_HELP: &str =
    "↑/↓: Scroll | b: Back | →: Next pattern | ←: Previous pattern | q: Quit";

/// Draw the current screen.
pub fn draw(frame: &mut Frame, session: &NavigationSession, store: &ScanResultStore, include_all: bool) {
    match session.view() {
        View::List => draw_list(frame, session, store),
        View::Detail => draw_detail(frame, session, store, include_all),
    }
}

fn accent() -> Style {
    Style::default().fg(Color::Cyan)
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn rule(symbol: &str, area: Rect) -> Paragraph<'static> {
    Paragraph::new(symbol.repeat(area.width.saturating_sub(1) as usize)).style(accent())
}

fn draw_list(frame: &mut Frame, session: &NavigationSession, store: &ScanResultStore) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Help
            Constraint::Length(1), // Rule
            Constraint::Min(0),    // Targets
            Constraint::Length(1), // Status
        ])
        .split(frame.area());

    frame.render_widget(Paragraph::new("Scanned URLs").style(bold()), chunks[0]);
    frame.render_widget(Paragraph::new(LIST_HELP).style(accent()), chunks[1]);
    frame.render_widget(rule("─", chunks[2]), chunks[2]);

    let offset = session.list_offset();
    let items: Vec<ListItem> = store
        .iter()
        .skip(offset)
        .take(session.list_rows())
        .map(|entry| {
            let style = match &entry.outcome {
                ScanOutcome::Error { .. } => Style::default().fg(Color::Red),
                ScanOutcome::Findings { findings } if findings.is_empty() => {
                    Style::default().fg(Color::Green)
                }
                ScanOutcome::Findings { .. } => Style::default().fg(Color::Yellow),
            };
            ListItem::new(Line::styled(format!(" {} ", entry.target), style))
        })
        .collect();

    let list = List::new(items).highlight_style(
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD),
    );
    let mut state = ListState::default()
        .with_selected((!store.is_empty()).then(|| session.selected_target() - offset));
    frame.render_stateful_widget(list, chunks[3], &mut state);

    let status = if store.is_empty() {
        "No URLs scanned".to_string()
    } else {
        format!("URL {}/{}", session.selected_target() + 1, store.len())
    };
    frame.render_widget(status_bar(status, chunks[4]), chunks[4]);
}

fn draw_detail(
    frame: &mut Frame,
    session: &NavigationSession,
    store: &ScanResultStore,
    include_all: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Target
            Constraint::Length(1), // Help
            Constraint::Length(1), // Rule
            Constraint::Length(1), // Pattern heading or outcome
            Constraint::Length(1), // Rule
            Constraint::Min(0),    // Snippets
            Constraint::Length(1), // Status
        ])
        .split(frame.area());

    let Some(entry) = store.get(session.selected_target()) else {
        return;
    };

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Results for: ", bold()),
            Span::styled(entry.target.as_str(), bold().fg(Color::Green)),
        ])),
        chunks[0],
    );
    frame.render_widget(Paragraph::new(DETAIL_HELP).style(accent()), chunks[1]);
    frame.render_widget(rule("═", chunks[2]), chunks[2]);

    match &entry.outcome {
        ScanOutcome::Error { message } => {
            frame.render_widget(
                Paragraph::new(format!("⚠ Error: {}", message)).style(bold().fg(Color::Red)),
                chunks[3],
            );
            return;
        }
        ScanOutcome::Findings { findings } if findings.is_empty() => {
            frame.render_widget(
                Paragraph::new("✔ No sensitive occurrences.").style(bold().fg(Color::Green)),
                chunks[3],
            );
            return;
        }
        ScanOutcome::Findings { .. } => {}
    }

    let Some(pattern) = session.current_pattern() else {
        return;
    };
    let position = session.selected_pattern() + 1;
    let total = session.active_patterns().len();
    let counter = format!("[{}/{}]", position, total);
    let heading = if looks_like_regex(pattern) {
        Span::styled(format!("🔍 Pattern {}: ", counter), bold().fg(Color::Magenta))
    } else {
        Span::styled(format!("👁 Keyword {}: ", counter), bold().fg(Color::Blue))
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![heading, Span::styled(pattern, bold())])),
        chunks[3],
    );
    frame.render_widget(rule("─", chunks[4]), chunks[4]);

    let snippets = session.current_snippets(store);
    let body = snippet_lines(snippets, session.pattern_offset(), include_all, chunks[5].width);
    frame.render_widget(Paragraph::new(body).wrap(Wrap { trim: false }), chunks[5]);

    let status = format!(
        "Pattern {}/{} | Occurrences: {}",
        position,
        total,
        snippets.len()
    );
    frame.render_widget(status_bar(status, chunks[6]), chunks[6]);
}

fn snippet_lines(
    snippets: &[Snippet],
    offset: usize,
    include_all: bool,
    width: u16,
) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    let count = snippets.len();

    for (i, snippet) in snippets.iter().enumerate().skip(offset) {
        let (before, hit, after) = snippet.parts();
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("{}. ", i + 1), bold()),
            Span::raw(before),
            Span::styled(hit, bold().fg(Color::Yellow)),
            Span::raw(after),
        ]));
        if include_all && i + 1 < count {
            let dots = "· ".repeat(width.saturating_sub(4) as usize / 2);
            lines.push(Line::styled(format!("  {}", dots), accent()));
        }
        lines.push(Line::default());
    }

    lines
}

fn status_bar(text: String, area: Rect) -> Paragraph<'static> {
    let padded = format!("{:<width$}", text, width = area.width.saturating_sub(1) as usize);
    Paragraph::new(padded).style(accent().add_modifier(Modifier::REVERSED))
}
