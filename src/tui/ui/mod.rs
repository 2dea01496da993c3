//! UI module: View components for the TUI.

pub mod dashboard;
pub mod questionnaire;
pub mod results;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::Theme;

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![
		Line::from(vec![Span::styled(
			"DISCLAIMER: This screening is informational and is not a medical diagnosis.",
			Theme::text_muted(),
		)]),
		Line::from(vec![Span::styled(
			"Only a clinician can diagnose PCOS/PCOD, typically via ultrasound and hormone panels.",
			Theme::text_muted(),
		)]),
	];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Theme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}
