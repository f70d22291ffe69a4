//! Insights screen: descriptive charts over the training data.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Sparkline},
    Frame,
};

use crate::application::{ChargesHistogram, ChurnBreakdown};
use crate::domain::{ChurnLabel, Contract};
use crate::tui::styles::PortalTheme;

/// Render the insights screen.
pub fn render_insights(
    f: &mut Frame,
    area: Rect,
    breakdown: &ChurnBreakdown,
    histogram: &ChargesHistogram,
    rows: usize,
    seed: u64,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),      // Header
            Constraint::Percentage(50), // Churn by contract
            Constraint::Min(8),         // Charges distribution
            Constraint::Length(3),      // Footer
        ])
        .split(area);

    render_header(f, chunks[0], rows, seed);
    render_contract_chart(f, chunks[1], breakdown);
    render_charges_chart(f, chunks[2], histogram);
    render_footer(f, chunks[3]);
}

fn render_header(f: &mut Frame, area: Rect, rows: usize, seed: u64) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", PortalTheme::text()),
        Span::styled("Data Insights", PortalTheme::title()),
        Span::styled(
            format!(" \u{2502} {rows} synthetic customers \u{00b7} seed {seed}"),
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

/// Which contract type churns the most? Grouped bars, churned vs retained.
fn render_contract_chart(f: &mut Frame, area: Rect, breakdown: &ChurnBreakdown) {
    let block = Block::default()
        .title(Span::styled(
            " Churn by Contract Type ",
            PortalTheme::subtitle(),
        ))
        .borders(Borders::ALL)
        .border_style(PortalTheme::border());

    let mut chart = BarChart::default()
        .block(block)
        .bar_width(5)
        .bar_gap(1)
        .group_gap(4);

    for contract in Contract::ALL {
        let churned = breakdown.count(contract, ChurnLabel::Yes);
        let retained = breakdown.count(contract, ChurnLabel::No);

        let group = BarGroup::default()
            .label(Line::from(Span::styled(
                contract.label(),
                PortalTheme::text_secondary(),
            )))
            .bars(&[
                Bar::default()
                    .value(u64::from(churned))
                    .label(Line::from("Yes"))
                    .style(PortalTheme::danger()),
                Bar::default()
                    .value(u64::from(retained))
                    .label(Line::from("No"))
                    .style(PortalTheme::success()),
            ]);
        chart = chart.data(group);
    }

    f.render_widget(chart, area);
}

/// Does price affect churn? Binned charge distribution per label.
fn render_charges_chart(f: &mut Frame, area: Rect, histogram: &ChargesHistogram) {
    let block = Block::default()
        .title(Span::styled(
            " Monthly Charges Distribution ",
            PortalTheme::subtitle(),
        ))
        .borders(Borders::ALL)
        .border_style(PortalTheme::border());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let (range_lo, _) = histogram.bin_range(0);
    let (_, range_hi) = histogram.bin_range(histogram.bins().saturating_sub(1));
    let range = format!(" ${range_lo:.0} to ${range_hi:.0}, {} bins ", histogram.bins());

    let churned = Sparkline::default()
        .block(
            Block::default()
                .title(Span::styled(
                    format!(" Churned \u{2502}{range}"),
                    PortalTheme::text_secondary(),
                ))
                .borders(Borders::ALL)
                .border_style(PortalTheme::border()),
        )
        .data(histogram.churned.iter().map(|&c| u64::from(c)))
        .style(PortalTheme::danger());
    f.render_widget(churned, halves[0]);

    let retained = Sparkline::default()
        .block(
            Block::default()
                .title(Span::styled(
                    format!(" Retained \u{2502}{range}"),
                    PortalTheme::text_secondary(),
                ))
                .borders(Borders::ALL)
                .border_style(PortalTheme::border()),
        )
        .data(histogram.retained.iter().map(|&c| u64::from(c)))
        .style(PortalTheme::success());
    f.render_widget(retained, halves[1]);
}

fn render_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("[P] ", PortalTheme::key_hint()),
        Span::styled("Prediction ", PortalTheme::key_desc()),
        Span::styled("[L] ", PortalTheme::key_hint()),
        Span::styled("Logout ", PortalTheme::key_desc()),
        Span::styled("[Q] ", PortalTheme::key_hint()),
        Span::styled("Quit", PortalTheme::key_desc()),
    ]))
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(PortalTheme::border()),
    );

    f.render_widget(footer, area);
}
