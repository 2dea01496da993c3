//! Dashboard view: Main overview screen.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::application::HistorySummary;
use crate::domain::RiskLevel;
use crate::tui::styles::Theme;

/// Dashboard state for rendering.
pub struct DashboardState {
    pub storage_ready: bool,
    pub screening_count: usize,
    pub db_label: String,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            storage_ready: false,
            screening_count: 0,
            db_label: "in-memory".to_string(),
        }
    }
}

/// Render the main dashboard view.
pub fn render_dashboard(f: &mut Frame, area: Rect, state: &DashboardState, recent: &HistorySummary) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
        ])
        .split(area);

    render_header(f, chunks[0]);
    render_main_content(f, chunks[1], state, recent);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", Theme::text()),
        Span::styled("CycleSense", Theme::title()),
        Span::styled(" │ ", Theme::text_muted()),
        Span::styled(
            "Explainable PCOS/PCOD Symptom Screening",
            Theme::text_secondary(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border()),
    );

    f.render_widget(header, area);
}

fn render_main_content(f: &mut Frame, area: Rect, state: &DashboardState, recent: &HistorySummary) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40), // Status panels
            Constraint::Percentage(60), // Recent screenings
        ])
        .split(area);

    render_status_panels(f, chunks[0], state);
    render_recent_summary(f, chunks[1], recent);
}

fn render_status_panels(f: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // System status
            Constraint::Min(0),    // Quick actions
        ])
        .margin(1)
        .split(area);

    let status_items = vec![
        format_status_item("History Storage", state.storage_ready),
        Line::from(vec![
            Span::styled("  Database: ", Theme::text_secondary()),
            Span::styled(state.db_label.clone(), Theme::text_muted()),
        ]),
        Line::from(vec![
            Span::styled("  Screenings: ", Theme::text_secondary()),
            Span::styled(state.screening_count.to_string(), Theme::text()),
        ]),
    ];

    let status_block = Block::default()
        .title(Span::styled(" System Status ", Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let status_list = Paragraph::new(status_items).block(status_block);
    f.render_widget(status_list, chunks[0]);

    let actions = vec![
        Line::from(vec![
            Span::styled("[N] ", Theme::key_hint()),
            Span::styled("New Screening", Theme::key_desc()),
        ]),
        Line::from(vec![
            Span::styled("[V] ", Theme::key_hint()),
            Span::styled("View Last Result", Theme::key_desc()),
        ]),
        Line::from(vec![
            Span::styled("[C] ", Theme::key_hint()),
            Span::styled("Clear History", Theme::key_desc()),
        ]),
        Line::from(vec![
            Span::styled("[Q] ", Theme::key_hint()),
            Span::styled("Quit", Theme::key_desc()),
        ]),
    ];

    let actions_block = Block::default()
        .title(Span::styled(" Quick Actions ", Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let actions_list = Paragraph::new(actions).block(actions_block);
    f.render_widget(actions_list, chunks[1]);
}

fn format_status_item(label: &str, ok: bool) -> Line<'static> {
    let (icon, style) = if ok {
        ("OK", Theme::success())
    } else {
        ("FAIL", Theme::danger())
    };

    Line::from(vec![
        Span::styled(format!("  {icon} "), style),
        Span::styled(label.to_string(), Theme::text()),
    ])
}

fn render_recent_summary(f: &mut Frame, area: Rect, recent: &HistorySummary) {
    let block = Block::default()
        .title(Span::styled(" Recent Screenings ", Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Theme::border());

    if recent.total == 0 {
        let empty_msg = Paragraph::new(Line::from(vec![Span::styled(
            "No screenings yet. Press [N] to start.",
            Theme::text_muted(),
        )]))
        .block(block);
        f.render_widget(empty_msg, area);
        return;
    }

    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines = vec![
        Line::from(vec![
            Span::styled("Last ", Theme::text_secondary()),
            Span::styled(recent.total.to_string(), Theme::text()),
            Span::styled(" screenings", Theme::text_muted()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Low: ", Theme::text_secondary()),
            Span::styled(recent.low.to_string(), Theme::risk_level(RiskLevel::Low)),
            Span::styled("  ", Theme::text()),
            Span::styled("Moderate: ", Theme::text_secondary()),
            Span::styled(
                recent.moderate.to_string(),
                Theme::risk_level(RiskLevel::Moderate),
            ),
            Span::styled("  ", Theme::text()),
            Span::styled("High: ", Theme::text_secondary()),
            Span::styled(recent.high.to_string(), Theme::risk_level(RiskLevel::High)),
        ]),
        Line::from(vec![
            Span::styled("Consultation recommended: ", Theme::text_secondary()),
            Span::styled(recent.consult_recommended.to_string(), Theme::info()),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "History stores assessments only, never the reported answers.",
            Theme::text_muted(),
        )]),
    ];

    let p = Paragraph::new(lines).block(Block::default());
    f.render_widget(p, inner);
}
