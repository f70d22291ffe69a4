//! UI module: View components for the TUI.

pub mod insights;
pub mod login;
pub mod prediction;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::PortalTheme;

pub fn render_tagline(f: &mut Frame, area: Rect) {
    let text = vec![Line::from(vec![Span::styled(
        "Synthetic demonstration data, regenerated at every start. Not real customer records.",
        PortalTheme::text_muted(),
    )])];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(PortalTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}
