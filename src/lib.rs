//! Scoring and grouping engine for golf tournaments: handicap allocation, Stableford points,
//! scorecard aggregation, leaderboard ranking and preference-aware group generation.
//!
//! Every operation is a pure function over its arguments, so one engine can serve many
//! tournaments from many threads without synchronization.

/// Scoring configuration and engine settings.
pub mod config;
/// Feed and rendering shapes.
pub mod dto;
/// Engine error type.
pub mod error;
/// Course, player and score domain types.
pub mod model;
/// Scoring, ranking and grouping logic.
pub mod services;

pub use config::{EngineSettings, ScoringFormat, StablefordPointsConfig, TournamentConfig};
pub use error::{EngineError, EngineResult};
pub use services::tournament::TournamentEngine;
