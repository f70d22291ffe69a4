//! Operator login form.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::tui::styles::PortalTheme;

/// Login form state.
pub struct LoginState {
    pub username: String,
    pub password: String,
    /// 0 = username, 1 = password
    pub selected_field: usize,
    pub error_message: Option<String>,
}

impl Default for LoginState {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            selected_field: 0,
            error_message: None,
        }
    }
}

impl LoginState {
    /// Switch between the username and password fields.
    pub fn toggle_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % 2;
    }

    /// Add a character to the current field.
    pub fn input_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        if self.selected_field == 0 {
            self.username.push(c);
        } else {
            self.password.push(c);
        }
        self.error_message = None;
    }

    /// Delete the last character of the current field.
    pub fn delete_char(&mut self) {
        if self.selected_field == 0 {
            self.username.pop();
        } else {
            self.password.pop();
        }
    }

    /// Wipe the password buffer and reset the form.
    ///
    /// Called after a login attempt so the plaintext does not persist in
    /// UI state.
    pub fn clear_sensitive(&mut self) {
        self.password.zeroize();
        self.password.clear();
        self.username.clear();
        self.error_message = None;
        self.selected_field = 0;
    }

    /// Wipe the password buffer only, keeping the typed username.
    pub fn clear_password(&mut self) {
        self.password.zeroize();
        self.password.clear();
        self.selected_field = 1;
    }
}

/// Render the login screen.
pub fn render_login(f: &mut Frame, area: Rect, state: &LoginState) {
    // Center column, 1:2:1 split.
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(50),
            Constraint::Percentage(25),
        ])
        .split(area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(16),
            Constraint::Min(1),
        ])
        .split(columns[1]);

    render_login_box(f, rows[1], state);
}

fn render_login_box(f: &mut Frame, area: Rect, state: &LoginState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(PortalTheme::border());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(2), // Info
            Constraint::Length(3), // Username
            Constraint::Length(3), // Password
            Constraint::Length(2), // Error
            Constraint::Min(1),    // Hints
        ])
        .margin(1)
        .split(inner);

    let title = Paragraph::new(Line::from(Span::styled(
        "Analytics Portal",
        PortalTheme::title(),
    )))
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let info = Paragraph::new(Line::from(Span::styled(
        "System restricted to authorized personnel",
        PortalTheme::info(),
    )))
    .alignment(Alignment::Center);
    f.render_widget(info, chunks[1]);

    render_field(f, chunks[2], "Username", &state.username, false, state.selected_field == 0);
    render_field(f, chunks[3], "Password", &state.password, true, state.selected_field == 1);

    if let Some(err) = &state.error_message {
        let error = Paragraph::new(Line::from(vec![
            Span::styled("! ", PortalTheme::danger()),
            Span::styled(err.clone(), PortalTheme::danger()),
        ]))
        .alignment(Alignment::Center);
        f.render_widget(error, chunks[4]);
    }

    let hints = Paragraph::new(Line::from(vec![
        Span::styled("[Tab] ", PortalTheme::key_hint()),
        Span::styled("Switch ", PortalTheme::key_desc()),
        Span::styled("[Enter] ", PortalTheme::key_hint()),
        Span::styled("Login ", PortalTheme::key_desc()),
        Span::styled("[Esc] ", PortalTheme::key_hint()),
        Span::styled("Quit", PortalTheme::key_desc()),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(hints, chunks[5]);
}

fn render_field(
    f: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    mask: bool,
    is_selected: bool,
) {
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

    let block = Block::default()
        .title(Span::styled(format!(" {label} "), title_style))
        .borders(Borders::ALL)
        .border_style(border_style);

    let shown = if mask {
        "\u{2022}".repeat(value.chars().count())
    } else {
        value.to_string()
    };

    let content = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(shown, PortalTheme::text()),
        if is_selected {
            Span::styled("\u{258c}", PortalTheme::focused())
        } else {
            Span::raw("")
        },
    ]))
    .block(block);

    f.render_widget(content, area);
}
