//! Screening results view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::application::contributing_factors;
use crate::domain::{
    QuestionnaireAnswers, RiskLevel, ScreeningRecord, RISK_DISPLAY_CEILING,
    SIGNAL_DISPLAY_CEILING,
};
use crate::tui::styles::Theme;

/// Results state
#[derive(Debug, Clone)]
pub enum ResultsState {
    /// No screening yet
    Idle,
    /// Completed screening with the answers that produced it
    Complete {
        record: ScreeningRecord,
        answers: Box<QuestionnaireAnswers>,
    },
    /// Error occurred
    Error { message: String },
}

impl Default for ResultsState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Render the results view
pub fn render_results(f: &mut Frame, area: Rect, state: &ResultsState, export_notice: Option<&str>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_results_header(f, chunks[0]);
    render_results_content(f, chunks[1], state);
    render_results_footer(f, chunks[2], state, export_notice);
}

fn render_results_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", Theme::text()),
        Span::styled("Screening Results", Theme::title()),
        Span::styled(" │ Explainable Risk Assessment", Theme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border()),
    );

    f.render_widget(header, area);
}

fn render_results_content(f: &mut Frame, area: Rect, state: &ResultsState) {
    match state {
        ResultsState::Idle => render_idle(f, area),
        ResultsState::Complete { record, .. } => render_assessment(f, area, record),
        ResultsState::Error { message } => render_error(f, area, message),
    }
}

fn render_idle(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "No screening completed yet",
            Theme::text_secondary(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Fill in the questionnaire to see results here",
            Theme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border()),
    );

    f.render_widget(content, area);
}

fn render_assessment(f: &mut Frame, area: Rect, record: &ScreeningRecord) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_verdict_panel(f, columns[0], record);
    render_signals_panel(f, columns[1], record);
}

fn render_verdict_panel(f: &mut Frame, area: Rect, record: &ScreeningRecord) {
    let assessment = &record.assessment;
    let block = Block::default()
        .title(Span::styled(" Assessment ", Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Theme::border_focused());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Risk level
            Constraint::Length(3), // Risk score gauge
            Constraint::Length(1), // Confidence
            Constraint::Length(4), // Pattern + explanation
            Constraint::Min(0),    // Consultation
        ])
        .margin(1)
        .split(inner);

    let risk_style = Theme::risk_level(assessment.risk_level);
    let risk_icon = match assessment.risk_level {
        RiskLevel::Low => "OK",
        RiskLevel::Moderate => "!",
        RiskLevel::High => "!",
    };

    let risk_display = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{} {}", risk_icon, assessment.risk_level),
            risk_style.add_modifier(ratatui::style::Modifier::BOLD),
        )),
        Line::from(Span::styled(
            assessment.risk_level.description(),
            Theme::text_secondary(),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(risk_display, chunks[0]);

    let fraction =
        (f64::from(assessment.risk_score) / f64::from(RISK_DISPLAY_CEILING)).min(1.0);
    let score_gauge = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(" Risk Score ", Theme::text_secondary()))
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        )
        .gauge_style(risk_style)
        .ratio(fraction)
        .label(format!(
            "{} / {}",
            assessment.risk_score, RISK_DISPLAY_CEILING
        ));
    f.render_widget(score_gauge, chunks[1]);

    let confidence = Paragraph::new(Line::from(vec![
        Span::styled("Confidence: ", Theme::text_secondary()),
        Span::styled(format!("{:.1}%", assessment.confidence), Theme::text()),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(confidence, chunks[2]);

    let pattern = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Pattern: ", Theme::text_secondary()),
            Span::styled(assessment.pattern.label(), Theme::info()),
        ]),
        Line::from(Span::styled(
            assessment.explanation.clone(),
            Theme::text_muted(),
        )),
    ])
    .wrap(Wrap { trim: true });
    f.render_widget(pattern, chunks[3]);

    render_consultation(f, chunks[4], record);
}

fn render_consultation(f: &mut Frame, area: Rect, record: &ScreeningRecord) {
    let assessment = &record.assessment;

    let (title_style, border_style) = if assessment.doctor_needed {
        (Theme::warning(), Theme::warning())
    } else {
        (Theme::success(), Theme::border())
    };

    let mut lines = Vec::new();
    if assessment.doctor_needed {
        lines.push(Line::from(Span::styled(
            "A clinical consultation is recommended:",
            Theme::text(),
        )));
        for reason in &assessment.doctor_reasons {
            lines.push(Line::from(vec![
                Span::styled("  • ", Theme::warning()),
                Span::styled(reason.clone(), Theme::text_secondary()),
            ]));
        }
    } else {
        lines.push(Line::from(Span::styled(
            "No immediate consultation indicated.",
            Theme::text_secondary(),
        )));
        lines.push(Line::from(Span::styled(
            "Re-screen if symptoms change or persist.",
            Theme::text_muted(),
        )));
    }

    let panel = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(Span::styled(" Consultation ", title_style))
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    f.render_widget(panel, area);
}

fn render_signals_panel(f: &mut Frame, area: Rect, record: &ScreeningRecord) {
    let assessment = &record.assessment;
    let block = Block::default()
        .title(Span::styled(" Symptom Signals ", Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let entries = assessment.signals.entries();
    let constraints: Vec<Constraint> = entries
        .iter()
        .map(|_| Constraint::Length(2))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(inner);

    for (i, (name, value)) in entries.iter().enumerate() {
        let fraction = (f64::from(*value) / f64::from(SIGNAL_DISPLAY_CEILING)).min(1.0);
        let gauge = Gauge::default()
            .gauge_style(Theme::score_gauge(fraction))
            .ratio(fraction)
            .label(format!("{name}: {value} / {SIGNAL_DISPLAY_CEILING}"));
        f.render_widget(gauge, chunks[i]);
    }

    let factors = contributing_factors(assessment);
    let mut lines = vec![Line::from(Span::styled(
        "Contributing factors",
        Theme::text_secondary(),
    ))];
    if factors.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No signal group stands out.",
            Theme::text_muted(),
        )));
    } else {
        for factor in factors {
            lines.push(Line::from(vec![
                Span::styled("  ↑ ", Theme::warning()),
                Span::styled(factor, Theme::text()),
            ]));
        }
    }

    let factor_list = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(factor_list, chunks[entries.len()]);
}

fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("! Error", Theme::danger())),
        Line::from(""),
        Line::from(Span::styled(message, Theme::text())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::danger()),
    );

    f.render_widget(content, area);
}

fn render_results_footer(
    f: &mut Frame,
    area: Rect,
    state: &ResultsState,
    export_notice: Option<&str>,
) {
    let content = match state {
        ResultsState::Complete { .. } => {
            if let Some(notice) = export_notice {
                Line::from(vec![
                    Span::styled("✓ ", Theme::success()),
                    Span::styled(notice.to_string(), Theme::success()),
                ])
            } else {
                Line::from(vec![
                    Span::styled("[Enter] ", Theme::key_hint()),
                    Span::styled("Dashboard ", Theme::key_desc()),
                    Span::styled("[N] ", Theme::key_hint()),
                    Span::styled("New Screening ", Theme::key_desc()),
                    Span::styled("[R] ", Theme::key_hint()),
                    Span::styled("Export Reports", Theme::key_desc()),
                ])
            }
        }
        ResultsState::Error { .. } => Line::from(vec![
            Span::styled("[Enter] ", Theme::key_hint()),
            Span::styled("Back to Questionnaire ", Theme::key_desc()),
            Span::styled("[Esc] ", Theme::key_hint()),
            Span::styled("Dashboard", Theme::key_desc()),
        ]),
        ResultsState::Idle => Line::from(vec![
            Span::styled("[Esc] ", Theme::key_hint()),
            Span::styled("Dashboard", Theme::key_desc()),
        ]),
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Theme::border()),
    );

    f.render_widget(footer, area);
}
