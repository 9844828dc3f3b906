use serde::Serialize;

use crate::services::leaderboard::{Leaderboard, RankedEntry, RankingMetric, format_to_par};

/// Leaderboard row handed to rendering and export collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardRow {
    /// 1-based rank.
    pub position: usize,
    /// Display name.
    pub name: String,
    /// Points, or strokes for stroke-based metrics.
    pub score: i64,
    /// `E`, `+n` or `-n`; absent for Stableford.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_par: Option<String>,
    /// Holes with a recorded score.
    pub holes_completed: usize,
}

impl From<&RankedEntry> for LeaderboardRow {
    fn from(ranked: &RankedEntry) -> Self {
        Self {
            position: ranked.position,
            name: ranked.entry.name.clone(),
            score: ranked.score,
            to_par: ranked.to_par.map(format_to_par),
            holes_completed: ranked.entry.holes_completed,
        }
    }
}

/// Rendered leaderboard snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardView {
    /// Total the rows are ordered on.
    pub metric: RankingMetric,
    /// Ranked competitors that have started.
    pub rows: Vec<LeaderboardRow>,
    /// Names of competitors yet to record a hole, in roster order.
    pub not_started: Vec<String>,
}

impl From<&Leaderboard> for LeaderboardView {
    fn from(board: &Leaderboard) -> Self {
        Self {
            metric: board.metric,
            rows: board.ranked.iter().map(LeaderboardRow::from).collect(),
            not_started: board
                .not_started
                .iter()
                .map(|entry| entry.name.clone())
                .collect(),
        }
    }
}
