//! Questionnaire input form.
//!
//! Collects the answers as raw strings/numbers; validation and
//! normalization happen in `AnswersDraft::finalize`, not here.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::domain::{AnswersDraft, QuestionnaireAnswers};
use crate::tui::styles::Theme;

/// Identifies which answer a form field feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Age,
    CycleLength,
    PeriodPain,
    MissedPeriods,
    WeightChange,
    SugarCravings,
    FacialHair,
    Acne,
    HairLoss,
    StressLevel,
    SleepQuality,
    MoodChanges,
    Anxiety,
    ActivityLevel,
    DietPattern,
    FamilyHistory,
}

/// Field input widget kind.
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// Fixed set of options; arrows cycle through them.
    Choice {
        options: &'static [&'static str],
        selected: Option<usize>,
    },
    /// Free numeric entry.
    Numeric { buffer: String },
}

/// One questionnaire form field.
#[derive(Debug, Clone)]
pub struct FormField {
    pub id: FieldId,
    pub label: &'static str,
    pub hint: &'static str,
    pub required: bool,
    pub kind: FieldKind,
}

impl FormField {
    fn choice(
        id: FieldId,
        label: &'static str,
        required: bool,
        options: &'static [&'static str],
    ) -> Self {
        Self {
            id,
            label,
            hint: if required { "required" } else { "optional" },
            required,
            kind: FieldKind::Choice {
                options,
                selected: None,
            },
        }
    }

    fn numeric(id: FieldId, label: &'static str, hint: &'static str, required: bool) -> Self {
        Self {
            id,
            label,
            hint,
            required,
            kind: FieldKind::Numeric {
                buffer: String::new(),
            },
        }
    }

    fn value_string(&self) -> Option<String> {
        match &self.kind {
            FieldKind::Choice { options, selected } => {
                selected.map(|i| options[i].to_string())
            }
            FieldKind::Numeric { buffer } => {
                if buffer.is_empty() {
                    None
                } else {
                    Some(buffer.clone())
                }
            }
        }
    }
}

/// Questionnaire form state.
pub struct QuestionnaireFormState {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
    pub error_message: Option<String>,
}

impl Default for QuestionnaireFormState {
    fn default() -> Self {
        Self {
            fields: vec![
                FormField::numeric(FieldId::Age, "Age", "years (13-50), optional", false),
                FormField::choice(
                    FieldId::CycleLength,
                    "Cycle regularity",
                    true,
                    &[
                        "Regular (25–35 days)",
                        "Irregular (varies frequently)",
                        "Absent for months",
                    ],
                ),
                FormField::choice(
                    FieldId::PeriodPain,
                    "Severe period pain",
                    true,
                    &["No", "Sometimes", "Often"],
                ),
                FormField::choice(
                    FieldId::MissedPeriods,
                    "Missed periods (6 months)",
                    false,
                    &[
                        "No",
                        "Occasionally (once or twice)",
                        "Frequently (three or more times)",
                        "Haven't had a period",
                    ],
                ),
                FormField::choice(
                    FieldId::WeightChange,
                    "Unexplained weight change",
                    true,
                    &["No", "Weight gain", "Weight loss", "Fluctuates"],
                ),
                FormField::choice(
                    FieldId::SugarCravings,
                    "Sugar cravings",
                    true,
                    &["No", "Occasionally", "Frequently"],
                ),
                FormField::choice(
                    FieldId::FacialHair,
                    "Facial/body hair growth",
                    true,
                    &["No", "Mild", "Noticeable", "Significant"],
                ),
                FormField::choice(
                    FieldId::Acne,
                    "Acne",
                    false,
                    &["No", "Mild", "Moderate", "Severe"],
                ),
                FormField::choice(
                    FieldId::HairLoss,
                    "Hair thinning or loss",
                    false,
                    &["No", "Mild", "Noticeable"],
                ),
                FormField::numeric(
                    FieldId::StressLevel,
                    "Stress level",
                    "0-10, last 3 months",
                    true,
                ),
                FormField::choice(
                    FieldId::SleepQuality,
                    "Sleep quality",
                    true,
                    &["Good", "Disturbed", "Insomnia / very poor"],
                ),
                FormField::choice(
                    FieldId::MoodChanges,
                    "Mood swings / burnout",
                    true,
                    &["No", "Occasionally", "Frequently"],
                ),
                FormField::choice(
                    FieldId::Anxiety,
                    "Anxiety",
                    false,
                    &["No", "Occasionally", "Frequently"],
                ),
                FormField::choice(
                    FieldId::ActivityLevel,
                    "Physical activity",
                    false,
                    &[
                        "Sedentary",
                        "Lightly active",
                        "Moderately active",
                        "Very active",
                    ],
                ),
                FormField::choice(
                    FieldId::DietPattern,
                    "Diet pattern",
                    false,
                    &[
                        "Balanced",
                        "High sugar / processed",
                        "Low-carb / controlled",
                        "Irregular",
                    ],
                ),
                FormField::choice(
                    FieldId::FamilyHistory,
                    "Family history of PCOS/PCOD",
                    false,
                    &["No", "Not sure", "Yes"],
                ),
            ],
            selected_field: 0,
            error_message: None,
        }
    }
}

impl QuestionnaireFormState {
    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Cycle the current choice field forward.
    pub fn next_option(&mut self) {
        if let FieldKind::Choice { options, selected } =
            &mut self.fields[self.selected_field].kind
        {
            *selected = Some(selected.map_or(0, |i| (i + 1) % options.len()));
            self.error_message = None;
        }
    }

    /// Cycle the current choice field backward.
    pub fn prev_option(&mut self) {
        if let FieldKind::Choice { options, selected } =
            &mut self.fields[self.selected_field].kind
        {
            *selected = Some(selected.map_or(options.len() - 1, |i| {
                if i == 0 {
                    options.len() - 1
                } else {
                    i - 1
                }
            }));
            self.error_message = None;
        }
    }

    /// Add a digit to the current numeric field.
    pub fn input_char(&mut self, c: char) {
        if let FieldKind::Numeric { buffer } = &mut self.fields[self.selected_field].kind {
            if c.is_ascii_digit() {
                buffer.push(c);
                self.error_message = None;
            }
        }
    }

    /// Delete the last character of the current numeric field.
    pub fn delete_char(&mut self) {
        if let FieldKind::Numeric { buffer } = &mut self.fields[self.selected_field].kind {
            buffer.pop();
        }
    }

    /// Clear the current field back to unanswered.
    pub fn clear_field(&mut self) {
        match &mut self.fields[self.selected_field].kind {
            FieldKind::Choice { selected, .. } => *selected = None,
            FieldKind::Numeric { buffer } => buffer.clear(),
        }
    }

    /// Wipe all answer buffers from memory and reset the form.
    ///
    /// Called right after a submission so self-reported values do not
    /// persist in UI state.
    pub fn clear_sensitive(&mut self) {
        for field in &mut self.fields {
            match &mut field.kind {
                FieldKind::Choice { selected, .. } => *selected = None,
                FieldKind::Numeric { buffer } => buffer.zeroize(),
            }
        }
        self.error_message = None;
        self.selected_field = 0;
    }

    /// Collect the raw draft from the current field values.
    fn to_draft(&self) -> Result<AnswersDraft, String> {
        let mut draft = AnswersDraft::default();

        for field in &self.fields {
            let value = field.value_string();
            match field.id {
                FieldId::Age => draft.age = parse_number(field, value.as_deref())?,
                FieldId::StressLevel => {
                    draft.stress_level = parse_number(field, value.as_deref())?;
                }
                FieldId::CycleLength => draft.cycle_length = value,
                FieldId::PeriodPain => draft.period_pain = value,
                FieldId::MissedPeriods => draft.missed_periods = value,
                FieldId::WeightChange => draft.weight_change = value,
                FieldId::SugarCravings => draft.sugar_cravings = value,
                FieldId::FacialHair => draft.facial_hair = value,
                FieldId::Acne => draft.acne = value,
                FieldId::HairLoss => draft.hair_loss = value,
                FieldId::SleepQuality => draft.sleep_quality = value,
                FieldId::MoodChanges => draft.mood_changes = value,
                FieldId::Anxiety => draft.anxiety = value,
                FieldId::ActivityLevel => draft.activity_level = value,
                FieldId::DietPattern => draft.diet_pattern = value,
                FieldId::FamilyHistory => draft.family_history = value,
            }
        }

        Ok(draft)
    }

    /// Validate and convert to a typed answer record.
    pub fn to_answers(&self) -> Result<QuestionnaireAnswers, String> {
        let draft = self.to_draft()?;
        draft.finalize().map_err(|e| e.to_string())
    }

    /// Load sample data for demos.
    pub fn load_sample_data(&mut self) {
        for field in &mut self.fields {
            match (&field.id, &mut field.kind) {
                (FieldId::Age, FieldKind::Numeric { buffer }) => *buffer = "24".to_string(),
                (FieldId::StressLevel, FieldKind::Numeric { buffer }) => {
                    *buffer = "8".to_string();
                }
                (FieldId::CycleLength, FieldKind::Choice { selected, .. }) => {
                    *selected = Some(1); // Irregular
                }
                (FieldId::SleepQuality, FieldKind::Choice { selected, .. }) => {
                    *selected = Some(1); // Disturbed
                }
                (FieldId::MoodChanges, FieldKind::Choice { selected, .. }) => {
                    *selected = Some(2); // Frequently
                }
                (_, FieldKind::Choice { selected, .. }) => *selected = Some(0),
                _ => {}
            }
        }
        self.error_message = None;
    }
}

fn parse_number(field: &FormField, value: Option<&str>) -> Result<Option<i64>, String> {
    match value {
        None => Ok(None),
        Some(s) => s
            .parse::<i64>()
            .map(Some)
            .map_err(|_| format!("{}: Invalid number", field.label)),
    }
}

/// Render the questionnaire form.
pub fn render_questionnaire(f: &mut Frame, area: Rect, state: &QuestionnaireFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_form_header(f, chunks[0]);
    render_form_fields(f, chunks[1], state);
    render_form_footer(f, chunks[2], state);
}

fn render_form_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", Theme::text()),
        Span::styled("Health Check", Theme::title()),
        Span::styled(
            " │ Structured Symptom Questionnaire",
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

fn render_form_fields(f: &mut Frame, area: Rect, state: &QuestionnaireFormState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = (state.fields.len() + 1) / 2;

    render_field_column(f, columns[0], &state.fields[..mid], 0, state.selected_field);
    render_field_column(
        f,
        columns[1],
        &state.fields[mid..],
        mid,
        state.selected_field,
    );
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[FormField],
    offset: usize,
    selected: usize,
) {
    let field_height = 3;
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(field_height))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = offset + i == selected;
        let border_style = if is_selected {
            Theme::border_focused()
        } else {
            Theme::border()
        };

        let title_style = if is_selected {
            Theme::focused()
        } else {
            Theme::text_secondary()
        };

        let marker = if field.required { "*" } else { "" };
        let block = Block::default()
            .title(Span::styled(
                format!(" {}{} ", field.label, marker),
                title_style,
            ))
            .borders(Borders::ALL)
            .border_style(border_style);

        let value = field.value_string();
        let mut spans = vec![Span::raw(" ")];
        match (&field.kind, value) {
            (FieldKind::Choice { .. }, Some(v)) => {
                if is_selected {
                    spans.push(Span::styled("◂ ", Theme::key_hint()));
                    spans.push(Span::styled(v, Theme::selected()));
                    spans.push(Span::styled(" ▸", Theme::key_hint()));
                } else {
                    spans.push(Span::styled(v, Theme::text()));
                }
            }
            (FieldKind::Numeric { .. }, Some(v)) => {
                spans.push(Span::styled(v, Theme::text()));
                if is_selected {
                    spans.push(Span::styled("▌", Theme::focused()));
                }
            }
            (_, None) => {
                spans.push(Span::styled(field.hint, Theme::text_muted()));
            }
        }

        let content = Paragraph::new(Line::from(spans)).block(block);
        f.render_widget(content, chunks[i]);
    }
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &QuestionnaireFormState) {
    let content = if let Some(err) = &state.error_message {
        Line::from(vec![
            Span::styled("! ", Theme::danger()),
            Span::styled(err.clone(), Theme::danger()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", Theme::key_hint()),
            Span::styled("Navigate ", Theme::key_desc()),
            Span::styled("[←→] ", Theme::key_hint()),
            Span::styled("Change Answer ", Theme::key_desc()),
            Span::styled("[Del] ", Theme::key_hint()),
            Span::styled("Skip ", Theme::key_desc()),
            Span::styled("[Enter] ", Theme::key_hint()),
            Span::styled("Analyze ", Theme::key_desc()),
            Span::styled("[S] ", Theme::key_hint()),
            Span::styled("Sample ", Theme::key_desc()),
            Span::styled("[Esc] ", Theme::key_hint()),
            Span::styled("Cancel", Theme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Theme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CycleLength, SleepQuality};

    fn answer_required(state: &mut QuestionnaireFormState) {
        for field in &mut state.fields {
            if !field.required {
                continue;
            }
            match &mut field.kind {
                FieldKind::Choice { selected, .. } => *selected = Some(0),
                FieldKind::Numeric { buffer } => *buffer = "3".to_string(),
            }
        }
    }

    #[test]
    fn test_empty_form_is_rejected() {
        let state = QuestionnaireFormState::default();
        let err = state.to_answers().unwrap_err();
        assert!(err.contains("Missing required field"));
    }

    #[test]
    fn test_required_answers_produce_record() {
        let mut state = QuestionnaireFormState::default();
        answer_required(&mut state);

        let answers = state.to_answers().expect("Should validate");
        assert_eq!(answers.cycle_length, CycleLength::Regular);
        assert_eq!(answers.sleep_quality, SleepQuality::Good);
        assert_eq!(answers.stress_level, 3);
        assert!(answers.age.is_none());
        assert!(answers.family_history.is_none());
    }

    #[test]
    fn test_sample_data_validates() {
        let mut state = QuestionnaireFormState::default();
        state.load_sample_data();

        let answers = state.to_answers().expect("Sample should validate");
        assert_eq!(answers.cycle_length, CycleLength::Irregular);
        assert_eq!(answers.stress_level, 8);
        assert_eq!(answers.age, Some(24));
    }

    #[test]
    fn test_clear_sensitive_wipes_buffers() {
        let mut state = QuestionnaireFormState::default();
        state.load_sample_data();
        state.clear_sensitive();

        for field in &state.fields {
            assert!(field.value_string().is_none());
        }
    }

    #[test]
    fn test_option_cycling_wraps() {
        let mut state = QuestionnaireFormState::default();
        state.selected_field = 2; // period pain: 3 options
        state.next_option();
        state.next_option();
        state.next_option();
        state.next_option();
        if let FieldKind::Choice { selected, .. } = &state.fields[2].kind {
            assert_eq!(*selected, Some(0));
        } else {
            panic!("Expected choice field");
        }

        state.prev_option();
        if let FieldKind::Choice { selected, .. } = &state.fields[2].kind {
            assert_eq!(*selected, Some(2));
        } else {
            panic!("Expected choice field");
        }
    }
}
