//! # Churnscope
//!
//! Telco churn analytics portal for a single operator.
//!
//! This crate provides:
//! - Seeded synthetic customer data generation
//! - Random forest churn-risk scoring, fitted once at startup
//! - Terminal UI with login, live prediction, and descriptive charts
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (customer records, feature encoding, risk categories)
//! - `ports`: Trait definitions for the classifier backend and the credential check
//! - `adapters`: Concrete implementations (random forest, synthetic generator, static credentials)
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{CustomerProfile, RiskAssessment, RiskCategory};

/// Result type for Churnscope operations
pub type Result<T> = std::result::Result<T, ChurnscopeError>;

/// Main error type for Churnscope
#[derive(Debug, thiserror::Error)]
pub enum ChurnscopeError {
    #[error("Model operation failed: {0}")]
    Model(#[from] ports::ModelError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
