//! Shapes exchanged with the persistence and rendering collaborators.

/// Inbound tournament feeds from persistence.
pub mod feeds;
/// Leaderboard rows for display and export.
pub mod leaderboard;
/// Custom validators shared by feed types.
pub mod validation;

pub use feeds::{
    HoleInput, PlayerInput, ScoreInput, TeamInput, TournamentConfigInput, TournamentFeed,
};
pub use leaderboard::{LeaderboardRow, LeaderboardView};
