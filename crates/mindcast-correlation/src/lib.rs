//! # mindcast-correlation
//!
//! Detects time-windowed relationships between a user's episodes, scores and
//! classifies them, persists the significant ones, and turns recurring ones
//! into patterns and insights.
//!
//! ## Scoring
//!
//! | Component | Weight |
//! |-----------|--------|
//! | Registry base strength for the type pair | 0.4 |
//! | Time proximity | 0.2 |
//! | Severity proximity | 0.2 |
//! | Shared trigger category | +0.1 flat |
//! | Historical average for the type pair | 0.1 |
//!
//! Confidence is a step function of how many prior rows share the same
//! (user, primary type, related type, correlation type).

pub mod ai;
pub mod engine;
pub mod insights;
pub mod locks;
pub mod maintenance;
pub mod patterns;
pub mod report;
pub mod risk_factors;
pub mod scoring;

pub use engine::CorrelationEngine;
pub use report::{DetectionSummary, MaintenanceReport, SkipReason};
pub use scoring::{score_pair, PairHistory};
