//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides an analytics-portal interface for:
//! - Operator login
//! - Live churn-risk prediction
//! - Descriptive charts over the training data

mod app;
mod styles;
mod ui;

pub use app::App;
pub use styles::PortalTheme;
