//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Service integration
//!
//! Evaluation is synchronous: the rules engine is a handful of integer
//! comparisons, so there is no background worker.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::sqlite::SqliteStorage;
use crate::application::{generate_summary, HistorySummary, ScreeningService};

use super::ui::{
    dashboard::{render_dashboard, DashboardState},
    questionnaire::{render_questionnaire, QuestionnaireFormState},
    render_disclaimer,
    results::{render_results, ResultsState},
};

/// Current screen/view in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Questionnaire,
    Results,
}

/// Main application state
pub struct App {
    /// Current screen
    screen: Screen,

    /// Whether the app should quit
    should_quit: bool,

    /// Screening service
    screening_service: ScreeningService<SqliteStorage>,

    /// Dashboard state
    dashboard_state: DashboardState,

    /// Questionnaire form state
    form_state: QuestionnaireFormState,

    /// Results state
    results_state: ResultsState,

    /// One-shot notice after exporting reports
    export_notice: Option<String>,

    /// Where exported reports are written
    report_dir: PathBuf,
}

impl App {
    /// Create a new application instance using default adapters.
    ///
    /// # Errors
    /// Returns error if storage cannot be initialized.
    pub fn new() -> Result<Self> {
        let db_path = std::env::var("CYCLESENSE_DB_PATH")
            .unwrap_or_else(|_| "cyclesense.db".to_string());
        let storage = Arc::new(
            SqliteStorage::new(&db_path)
                .with_context(|| format!("Failed to open history database at {db_path:?}"))?,
        );

        let report_dir = std::env::var("CYCLESENSE_REPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        let mut app = Self::with_dependencies(ScreeningService::new(storage), report_dir)?;
        app.dashboard_state.db_label = db_path;
        Ok(app)
    }

    /// Create application with an injected service (Composition Root pattern).
    ///
    /// # Errors
    /// Returns error if initialization fails.
    pub fn with_dependencies(
        screening_service: ScreeningService<SqliteStorage>,
        report_dir: PathBuf,
    ) -> Result<Self> {
        Ok(Self {
            screen: Screen::Dashboard,
            should_quit: false,
            screening_service,
            dashboard_state: DashboardState::default(),
            form_state: QuestionnaireFormState::default(),
            results_state: ResultsState::default(),
            export_notice: None,
            report_dir,
        })
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        self.update_dashboard_state();

        let result = self.main_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| {
                let area = f.area();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(area);

                let content_area = chunks[0];
                let disclaimer_area = chunks[1];

                match self.screen {
                    Screen::Dashboard => {
                        // Fetch only for render and drop immediately after.
                        let recent = self
                            .screening_service
                            .history_summary(10)
                            .unwrap_or_else(|_| HistorySummary::default());
                        render_dashboard(f, content_area, &self.dashboard_state, &recent);
                    }
                    Screen::Questionnaire => {
                        render_questionnaire(f, content_area, &self.form_state);
                    }
                    Screen::Results => render_results(
                        f,
                        content_area,
                        &self.results_state,
                        self.export_notice.as_deref(),
                    ),
                }

                render_disclaimer(f, disclaimer_area);
            })?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code, key.modifiers);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Dashboard => self.handle_dashboard_key(key),
            Screen::Questionnaire => self.handle_questionnaire_key(key),
            Screen::Results => self.handle_results_key(key),
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.form_state = QuestionnaireFormState::default();
                self.screen = Screen::Questionnaire;
            }
            KeyCode::Char('v') | KeyCode::Char('V') => {
                self.export_notice = None;
                self.screen = Screen::Results;
            }
            KeyCode::Char('c') | KeyCode::Char('C') => {
                if let Err(e) = self.screening_service.clear_history() {
                    tracing::error!("Failed to clear history: {}", e);
                }
                self.update_dashboard_state();
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_questionnaire_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.form_state.clear_sensitive();
                self.screen = Screen::Dashboard;
            }
            KeyCode::Up => {
                self.form_state.prev_field();
            }
            KeyCode::Down | KeyCode::Tab => {
                self.form_state.next_field();
            }
            KeyCode::Left => {
                self.form_state.prev_option();
            }
            KeyCode::Right => {
                self.form_state.next_option();
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.form_state.load_sample_data();
            }
            KeyCode::Char(c) => {
                self.form_state.input_char(c);
            }
            KeyCode::Backspace => {
                self.form_state.delete_char();
            }
            KeyCode::Delete => {
                self.form_state.clear_field();
            }
            KeyCode::Enter => {
                self.submit_questionnaire();
            }
            _ => {}
        }
    }

    fn handle_results_key(&mut self, key: KeyCode) {
        match &self.results_state {
            ResultsState::Complete { .. } => match key {
                KeyCode::Enter | KeyCode::Esc => {
                    self.export_notice = None;
                    self.update_dashboard_state();
                    self.screen = Screen::Dashboard;
                }
                KeyCode::Char('n') | KeyCode::Char('N') => {
                    self.export_notice = None;
                    self.form_state = QuestionnaireFormState::default();
                    self.screen = Screen::Questionnaire;
                }
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    self.export_reports();
                }
                _ => {}
            },
            ResultsState::Error { .. } => match key {
                KeyCode::Enter => {
                    self.screen = Screen::Questionnaire;
                }
                KeyCode::Esc => {
                    self.screen = Screen::Dashboard;
                }
                _ => {}
            },
            ResultsState::Idle => {
                if key == KeyCode::Esc || key == KeyCode::Enter {
                    self.screen = Screen::Dashboard;
                }
            }
        }
    }

    fn submit_questionnaire(&mut self) {
        match self.form_state.to_answers() {
            Ok(answers) => {
                match self.screening_service.run_screening(&answers) {
                    Ok(record) => {
                        self.results_state = ResultsState::Complete {
                            record,
                            answers: Box::new(answers),
                        };
                    }
                    Err(e) => {
                        self.results_state = ResultsState::Error {
                            message: e.to_string(),
                        };
                    }
                }

                // Clear reported answers from the form immediately.
                self.form_state.clear_sensitive();
                self.export_notice = None;
                self.screen = Screen::Results;
            }
            Err(e) => {
                self.form_state.error_message = Some(e);
            }
        }
    }

    fn export_reports(&mut self) {
        let ResultsState::Complete { record, answers } = &self.results_state else {
            return;
        };

        let reports = generate_summary(record, answers);
        let user_path = self.report_dir.join("cyclesense_user_report.txt");
        let clinician_path = self.report_dir.join("cyclesense_clinician_summary.txt");

        let outcome = std::fs::write(&user_path, &reports.user_report)
            .and_then(|()| std::fs::write(&clinician_path, &reports.clinician_summary));

        match outcome {
            Ok(()) => {
                tracing::info!("Reports exported to {:?}", self.report_dir);
                self.export_notice = Some(format!(
                    "Reports written to {} and {}",
                    user_path.display(),
                    clinician_path.display()
                ));
            }
            Err(e) => {
                tracing::error!("Failed to export reports: {}", e);
                self.export_notice = Some(format!("Export failed: {e}"));
            }
        }
    }

    fn update_dashboard_state(&mut self) {
        match self.screening_service.screening_count() {
            Ok(count) => {
                self.dashboard_state.storage_ready = true;
                self.dashboard_state.screening_count = count;
            }
            Err(e) => {
                tracing::error!("History storage unavailable: {}", e);
                self.dashboard_state.storage_ready = false;
            }
        }
    }
}
