//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation, gated by the operator session flag
//! - Input event handling
//! - Service integration
//!
//! Every user action resolves synchronously; prediction is an in-memory
//! tree walk, so there is no background work to manage.

use std::io;
use std::time::Duration;

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

use crate::adapters::credentials::StaticCredentials;
use crate::adapters::forest::RandomForest;
use crate::application::{
    initialize, AnalyticsService, AuthService, ChargesHistogram, ChurnBreakdown, EngineConfig,
    EngineContext, PredictionService, DEFAULT_BINS,
};
use crate::Result;

use super::ui::{
    insights::render_insights,
    login::{render_login, LoginState},
    prediction::{render_prediction, PredictionFormState},
    render_tagline,
};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Login,
    Prediction,
    Insights,
}

/// Main application state
pub struct App {
    /// Current screen
    screen: Screen,

    /// Whether the app should quit
    should_quit: bool,

    /// Dataset + fitted model, built once at startup
    context: EngineContext,

    /// Prediction pipeline over the shared fitted model
    prediction_service: PredictionService<RandomForest>,

    /// Operator session state
    auth_service: AuthService<StaticCredentials>,

    /// Chart data, aggregated once (the dataset never changes)
    breakdown: ChurnBreakdown,
    histogram: ChargesHistogram,

    /// Login form state
    login_state: LoginState,

    /// Prediction form state
    form_state: PredictionFormState,
}

impl App {
    /// Create a new application instance from the environment.
    ///
    /// Generates the dataset and fits the model; that is the one-shot
    /// startup cost. For injected dependencies, use `with_context()`.
    ///
    /// # Errors
    /// Returns an error if model fitting fails; there is no fallback model.
    pub fn new() -> Result<Self> {
        let config = EngineConfig::from_env();
        let context = initialize(&config)?;
        let auth_service = AuthService::new(StaticCredentials::from_env());

        Self::with_context(context, auth_service)
    }

    /// Create the application over an already-initialized engine context
    /// (Composition Root pattern, also used by tests).
    pub fn with_context(
        context: EngineContext,
        auth_service: AuthService<StaticCredentials>,
    ) -> Result<Self> {
        let analytics = AnalyticsService::new(context.dataset.clone());
        let breakdown = analytics.churn_by_contract();
        let histogram = analytics.charges_histogram(DEFAULT_BINS);
        let prediction_service = PredictionService::new(context.model.clone());

        Ok(Self {
            screen: Screen::Login,
            should_quit: false,
            context,
            prediction_service,
            auth_service,
            breakdown,
            histogram,
            login_state: LoginState::default(),
            form_state: PredictionFormState::default(),
        })
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns an error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Main loop
        let result = self.main_loop(&mut terminal);

        // Restore terminal
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
            // Draw current screen
            terminal.draw(|f| {
                let area = f.area();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(2)])
                    .split(area);

                match self.screen {
                    Screen::Login => render_login(f, chunks[0], &self.login_state),
                    Screen::Prediction => render_prediction(f, chunks[0], &self.form_state),
                    Screen::Insights => render_insights(
                        f,
                        chunks[0],
                        &self.breakdown,
                        &self.histogram,
                        self.context.dataset.len(),
                        self.context.dataset.seed,
                    ),
                }

                render_tagline(f, chunks[1]);
            })?;

            // Handle input (short poll to stay responsive)
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

        // The session flag, not the screen value, gates the protected
        // screens.
        if !self.auth_service.is_authenticated() {
            self.screen = Screen::Login;
        }

        match self.screen {
            Screen::Login => self.handle_login_key(key),
            Screen::Prediction => self.handle_prediction_key(key),
            Screen::Insights => self.handle_insights_key(key),
        }
    }

    fn handle_login_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => {
                self.login_state.toggle_field();
            }
            KeyCode::Backspace => {
                self.login_state.delete_char();
            }
            KeyCode::Enter => {
                self.submit_login();
            }
            KeyCode::Char(c) => {
                self.login_state.input_char(c);
            }
            _ => {}
        }
    }

    fn handle_prediction_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::BackTab => {
                self.form_state.prev_field();
            }
            KeyCode::Down | KeyCode::Tab => {
                self.form_state.next_field();
            }
            KeyCode::Left => {
                self.form_state.cycle_prev();
            }
            KeyCode::Right => {
                self.form_state.cycle_next();
            }
            KeyCode::Backspace => {
                self.form_state.delete_char();
            }
            KeyCode::Enter => {
                self.submit_prediction();
            }
            // The numeric fields only accept digits and '.', so letters are
            // free to act as commands.
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.form_state.load_sample();
            }
            KeyCode::Char('i') | KeyCode::Char('I') => {
                self.screen = Screen::Insights;
            }
            KeyCode::Char('l') | KeyCode::Char('L') => {
                self.logout();
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char(c) => {
                self.form_state.input_char(c);
            }
            _ => {}
        }
    }

    fn handle_insights_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P') => {
                self.screen = Screen::Prediction;
            }
            KeyCode::Char('l') | KeyCode::Char('L') => {
                self.logout();
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn submit_login(&mut self) {
        let granted = self
            .auth_service
            .login(&self.login_state.username, &self.login_state.password);

        if granted {
            self.login_state.clear_sensitive();
            self.form_state = PredictionFormState::default();
            self.screen = Screen::Prediction;
        } else {
            self.login_state.clear_password();
            self.login_state.error_message = Some("Invalid credentials".to_string());
        }
    }

    fn submit_prediction(&mut self) {
        let profile = match self.form_state.to_profile() {
            Ok(profile) => profile,
            Err(message) => {
                self.form_state.error_message = Some(message);
                return;
            }
        };

        match self.prediction_service.predict_risk(&profile) {
            Ok(assessment) => {
                self.form_state.result = Some(assessment);
                self.form_state.error_message = None;
            }
            Err(e) => {
                tracing::error!("Prediction failed: {}", e);
                self.form_state.error_message = Some(e.to_string());
            }
        }
    }

    fn logout(&mut self) {
        self.auth_service.logout();
        self.login_state = LoginState::default();
        self.form_state = PredictionFormState::default();
        self.screen = Screen::Login;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        let context = initialize(&EngineConfig {
            seed: 42,
            rows: 60,
            trees: 5,
        })
        .expect("startup should succeed");

        App::with_context(context, AuthService::new(StaticCredentials::default()))
            .expect("app construction should succeed")
    }

    fn press(app: &mut App, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE);
    }

    fn login(app: &mut App) {
        app.login_state.username = "admin".to_string();
        app.login_state.password = "admin123".to_string();
        press(app, KeyCode::Enter);
    }

    #[test]
    fn test_protected_screens_require_session() {
        let mut app = test_app();

        // Navigation keys land in the login form, not on other screens.
        press(&mut app, KeyCode::Char('i'));
        assert_eq!(app.screen, Screen::Login);
        assert_eq!(app.login_state.username, "i");
    }

    #[test]
    fn test_login_grants_session_and_navigates() {
        let mut app = test_app();
        login(&mut app);

        assert!(app.auth_service.is_authenticated());
        assert_eq!(app.screen, Screen::Prediction);
        // Sensitive buffers are wiped after the attempt.
        assert!(app.login_state.password.is_empty());
        assert!(app.login_state.username.is_empty());
    }

    #[test]
    fn test_rejected_login_shows_error_and_stays() {
        let mut app = test_app();
        app.login_state.username = "admin".to_string();
        app.login_state.password = "letmein".to_string();
        press(&mut app, KeyCode::Enter);

        assert!(!app.auth_service.is_authenticated());
        assert_eq!(app.screen, Screen::Login);
        assert_eq!(
            app.login_state.error_message.as_deref(),
            Some("Invalid credentials")
        );
        assert!(app.login_state.password.is_empty());
    }

    #[test]
    fn test_enter_runs_prediction_on_default_form() {
        let mut app = test_app();
        login(&mut app);

        press(&mut app, KeyCode::Enter);
        let assessment = app.form_state.result.expect("default form is valid");
        assert!((0.0..=100.0).contains(&assessment.probability_percent));
    }

    #[test]
    fn test_invalid_form_never_reaches_the_pipeline() {
        let mut app = test_app();
        login(&mut app);

        app.form_state.tenure = "90".to_string();
        press(&mut app, KeyCode::Enter);
        assert!(app.form_state.result.is_none());
        assert!(app.form_state.error_message.is_some());
    }

    #[test]
    fn test_insights_navigation_and_logout() {
        let mut app = test_app();
        login(&mut app);

        press(&mut app, KeyCode::Char('i'));
        assert_eq!(app.screen, Screen::Insights);

        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.screen, Screen::Prediction);

        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.screen, Screen::Login);
        assert!(!app.auth_service.is_authenticated());

        // The dropped flag gates the shortcuts again.
        press(&mut app, KeyCode::Char('i'));
        assert_eq!(app.screen, Screen::Login);
    }

    #[test]
    fn test_ctrl_q_quits_from_any_screen() {
        let mut app = test_app();
        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    #[test]
    fn test_chart_data_matches_dataset() {
        let app = test_app();
        assert_eq!(app.breakdown.total() as usize, app.context.dataset.len());
        assert_eq!(app.histogram.bins(), DEFAULT_BINS);
    }
}
