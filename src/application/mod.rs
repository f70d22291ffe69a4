//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the core use cases of the application.

mod analytics;
mod auth;
pub mod bootstrap;
mod prediction;

pub use analytics::{AnalyticsService, ChargesHistogram, ChurnBreakdown, DEFAULT_BINS};
pub use auth::AuthService;
pub use bootstrap::{initialize, EngineConfig, EngineContext};
pub use prediction::PredictionService;
