//! Adapters layer: Concrete implementations of ports.
//!
//! - `forest`: random forest classifier backend
//! - `synthetic`: seeded synthetic dataset generation
//! - `credentials`: static operator credential pair

pub mod credentials;
pub mod forest;
pub mod synthetic;
