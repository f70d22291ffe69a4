//! Prediction screen: customer detail form and risk result panel.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::domain::{Contract, CustomerProfile, InternetService, RiskAssessment, RiskCategory};
use crate::tui::styles::PortalTheme;

const TENURE_MAX: u32 = 72;
const CHARGES_MAX: f64 = 150.0;

/// Prediction form state.
pub struct PredictionFormState {
    pub tenure: String,
    pub charges: String,
    pub contract_idx: usize,
    pub internet_idx: usize,
    /// 0 = tenure, 1 = charges, 2 = contract, 3 = internet service
    pub selected_field: usize,
    pub error_message: Option<String>,
    pub result: Option<RiskAssessment>,
}

impl Default for PredictionFormState {
    fn default() -> Self {
        // Defaults describe a plausible mid-tenure customer.
        Self {
            tenure: "24".to_string(),
            charges: "65.0".to_string(),
            contract_idx: 0,
            internet_idx: 0,
            selected_field: 0,
            error_message: None,
            result: None,
        }
    }
}

impl PredictionFormState {
    /// Move to the next field.
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % 4;
    }

    /// Move to the previous field.
    pub fn prev_field(&mut self) {
        self.selected_field = (self.selected_field + 3) % 4;
    }

    /// Add a character to the current numeric field.
    pub fn input_char(&mut self, c: char) {
        match self.selected_field {
            0 if c.is_ascii_digit() => self.tenure.push(c),
            1 if c.is_ascii_digit() || c == '.' => self.charges.push(c),
            _ => return,
        }
        self.error_message = None;
    }

    /// Delete the last character of the current numeric field.
    pub fn delete_char(&mut self) {
        match self.selected_field {
            0 => {
                self.tenure.pop();
            }
            1 => {
                self.charges.pop();
            }
            _ => {}
        }
    }

    /// Cycle the current closed-set field forward.
    pub fn cycle_next(&mut self) {
        match self.selected_field {
            2 => self.contract_idx = (self.contract_idx + 1) % Contract::ALL.len(),
            3 => self.internet_idx = (self.internet_idx + 1) % InternetService::ALL.len(),
            _ => {}
        }
    }

    /// Cycle the current closed-set field backward.
    pub fn cycle_prev(&mut self) {
        match self.selected_field {
            2 => {
                self.contract_idx =
                    (self.contract_idx + Contract::ALL.len() - 1) % Contract::ALL.len();
            }
            3 => {
                self.internet_idx = (self.internet_idx + InternetService::ALL.len() - 1)
                    % InternetService::ALL.len();
            }
            _ => {}
        }
    }

    /// Load the walkthrough sample customer.
    pub fn load_sample(&mut self) {
        self.tenure = "24".to_string();
        self.charges = "65.0".to_string();
        self.contract_idx = 0; // Month-to-month
        self.internet_idx = 1; // Fiber optic
        self.error_message = None;
    }

    /// Selected contract value.
    #[must_use]
    pub fn contract(&self) -> Contract {
        Contract::ALL[self.contract_idx]
    }

    /// Selected internet service value.
    #[must_use]
    pub fn internet_service(&self) -> InternetService {
        InternetService::ALL[self.internet_idx]
    }

    /// Validate and convert to a customer profile.
    ///
    /// The enum fields cannot be invalid; only the numeric ranges are
    /// checked here, so the pipeline never sees out-of-range input.
    pub fn to_profile(&self) -> Result<CustomerProfile, String> {
        let tenure: u32 = self
            .tenure
            .parse()
            .map_err(|_| "Tenure: invalid number".to_string())?;
        if tenure > TENURE_MAX {
            return Err(format!("Tenure: value must be between 0 and {TENURE_MAX}"));
        }

        let monthly_charges: f64 = self
            .charges
            .parse()
            .map_err(|_| "Monthly charges: invalid number".to_string())?;
        if !(0.0..=CHARGES_MAX).contains(&monthly_charges) {
            return Err(format!(
                "Monthly charges: value must be between 0 and {CHARGES_MAX}"
            ));
        }

        Ok(CustomerProfile {
            tenure,
            monthly_charges,
            contract: self.contract(),
            internet_service: self.internet_service(),
        })
    }
}

/// Render the prediction screen.
pub fn render_prediction(f: &mut Frame, area: Rect, state: &PredictionFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(9), // Form
            Constraint::Min(7),    // Result
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_header(f, chunks[0]);
    render_form(f, chunks[1], state);
    render_result(f, chunks[2], state);
    render_footer(f, chunks[3], state);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", PortalTheme::text()),
        Span::styled("Churn Prediction Engine", PortalTheme::title()),
        Span::styled(
            " \u{2502} Enter customer details to predict risk",
            PortalTheme::text_secondary(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(PortalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_form(f: &mut Frame, area: Rect, state: &PredictionFormState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(0)])
        .split(columns[0]);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(0)])
        .split(columns[1]);

    render_text_field(
        f,
        left[0],
        "Tenure (months)",
        &state.tenure,
        "0-72",
        state.selected_field == 0,
    );
    render_text_field(
        f,
        left[1],
        "Monthly charges ($)",
        &state.charges,
        "0-150",
        state.selected_field == 1,
    );
    render_choice_field(
        f,
        right[0],
        "Contract type",
        state.contract().label(),
        state.selected_field == 2,
    );
    render_choice_field(
        f,
        right[1],
        "Internet service",
        state.internet_service().label(),
        state.selected_field == 3,
    );
}

fn field_block(label: &str, is_selected: bool) -> Block<'static> {
    let border_style = if is_selected {
        PortalTheme::border_focused()
    } else {
        PortalTheme::border()
    };
    let title_style = if is_selected {
        PortalTheme::focused()
    } else {
        PortalTheme::text_secondary()
    };

    Block::default()
        .title(Span::styled(format!(" {label} "), title_style))
        .borders(Borders::ALL)
        .border_style(border_style)
}

fn render_text_field(
    f: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    hint: &str,
    is_selected: bool,
) {
    let value_display = if value.is_empty() {
        Span::styled(hint.to_string(), PortalTheme::text_muted())
    } else {
        Span::styled(value.to_string(), PortalTheme::text())
    };

    let content = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        value_display,
        if is_selected {
            Span::styled("\u{258c}", PortalTheme::focused())
        } else {
            Span::raw("")
        },
    ]))
    .block(field_block(label, is_selected));

    f.render_widget(content, area);
}

fn render_choice_field(f: &mut Frame, area: Rect, label: &str, value: &str, is_selected: bool) {
    let arrows_style = if is_selected {
        PortalTheme::focused()
    } else {
        PortalTheme::text_muted()
    };

    let content = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled("\u{2039} ", arrows_style),
        Span::styled(value.to_string(), PortalTheme::text()),
        Span::styled(" \u{203a}", arrows_style),
    ]))
    .block(field_block(label, is_selected));

    f.render_widget(content, area);
}

fn render_result(f: &mut Frame, area: Rect, state: &PredictionFormState) {
    let block = Block::default()
        .title(Span::styled(" Risk Assessment ", PortalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(PortalTheme::border());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(assessment) = &state.result else {
        let placeholder = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No assessment yet",
                PortalTheme::text_muted(),
            )),
            Line::from(Span::styled(
                "Press [Enter] to analyze the customer",
                PortalTheme::text_secondary(),
            )),
        ])
        .alignment(Alignment::Center);
        f.render_widget(placeholder, inner);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Category
            Constraint::Length(3), // Probability gauge
            Constraint::Length(1), // Strategy caption
            Constraint::Min(0),
        ])
        .margin(1)
        .split(inner);

    let marker = match assessment.category {
        RiskCategory::HighRisk => "\u{26a0} ",
        RiskCategory::Safe => "\u{2713} ",
    };
    let category_line = Paragraph::new(Line::from(vec![
        Span::styled(marker, PortalTheme::risk(assessment.category)),
        Span::styled(
            assessment.category.to_string(),
            PortalTheme::risk(assessment.category),
        ),
        Span::styled(
            format!(" \u{2502} {}", assessment.category.description()),
            PortalTheme::text_secondary(),
        ),
    ]));
    f.render_widget(category_line, chunks[0]);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(
                    " Churn probability ",
                    PortalTheme::text_secondary(),
                ))
                .borders(Borders::ALL)
                .border_style(PortalTheme::border()),
        )
        .gauge_style(PortalTheme::risk(assessment.category))
        .ratio((assessment.probability_percent / 100.0).clamp(0.0, 1.0))
        .label(format!("{:.1}%", assessment.probability_percent));
    f.render_widget(gauge, chunks[1]);

    let strategy_style = match assessment.category {
        RiskCategory::HighRisk => PortalTheme::danger(),
        RiskCategory::Safe => PortalTheme::text_muted(),
    };
    let strategy = Paragraph::new(Line::from(vec![
        Span::styled("Strategy: ", PortalTheme::text_secondary()),
        Span::styled(assessment.category.retention_strategy(), strategy_style),
    ]));
    f.render_widget(strategy, chunks[2]);
}

fn render_footer(f: &mut Frame, area: Rect, state: &PredictionFormState) {
    let content = if let Some(err) = &state.error_message {
        Line::from(vec![
            Span::styled("! ", PortalTheme::danger()),
            Span::styled(err.clone(), PortalTheme::danger()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[\u{2191}\u{2193}] ", PortalTheme::key_hint()),
            Span::styled("Field ", PortalTheme::key_desc()),
            Span::styled("[\u{2190}\u{2192}] ", PortalTheme::key_hint()),
            Span::styled("Option ", PortalTheme::key_desc()),
            Span::styled("[Enter] ", PortalTheme::key_hint()),
            Span::styled("Analyze ", PortalTheme::key_desc()),
            Span::styled("[S] ", PortalTheme::key_hint()),
            Span::styled("Sample ", PortalTheme::key_desc()),
            Span::styled("[I] ", PortalTheme::key_hint()),
            Span::styled("Insights ", PortalTheme::key_desc()),
            Span::styled("[L] ", PortalTheme::key_hint()),
            Span::styled("Logout ", PortalTheme::key_desc()),
            Span::styled("[Q] ", PortalTheme::key_hint()),
            Span::styled("Quit", PortalTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(PortalTheme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_fields_filter_input() {
        let mut state = PredictionFormState::default();
        state.tenure.clear();
        state.input_char('3');
        state.input_char('.');
        state.input_char('x');
        assert_eq!(state.tenure, "3");

        state.next_field();
        state.charges.clear();
        state.input_char('7');
        state.input_char('.');
        state.input_char('5');
        state.input_char('x');
        assert_eq!(state.charges, "7.5");
    }

    #[test]
    fn test_choice_fields_cycle_through_closed_set() {
        let mut state = PredictionFormState::default();
        state.selected_field = 2;

        assert_eq!(state.contract(), Contract::MonthToMonth);
        state.cycle_next();
        assert_eq!(state.contract(), Contract::OneYear);
        state.cycle_next();
        state.cycle_next();
        assert_eq!(state.contract(), Contract::MonthToMonth);
        state.cycle_prev();
        assert_eq!(state.contract(), Contract::TwoYear);
    }

    #[test]
    fn test_to_profile_validates_ranges() {
        let mut state = PredictionFormState::default();
        state.load_sample();

        let profile = state.to_profile().expect("sample should be valid");
        assert_eq!(profile.tenure, 24);
        assert!((profile.monthly_charges - 65.0).abs() < f64::EPSILON);
        assert_eq!(profile.contract, Contract::MonthToMonth);
        assert_eq!(profile.internet_service, InternetService::FiberOptic);

        state.tenure = "90".to_string();
        assert!(state.to_profile().is_err());

        state.tenure = "12".to_string();
        state.charges = "200".to_string();
        assert!(state.to_profile().is_err());

        state.charges = "abc".to_string();
        assert!(state.to_profile().is_err());
    }

    #[test]
    fn test_field_navigation_wraps() {
        let mut state = PredictionFormState::default();
        state.prev_field();
        assert_eq!(state.selected_field, 3);
        state.next_field();
        assert_eq!(state.selected_field, 0);
    }
}
