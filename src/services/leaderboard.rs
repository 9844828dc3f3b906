use std::cmp::Ordering;

use serde::Serialize;

use crate::{
    config::ScoringFormat,
    model::player::Competitor,
    services::scorecard::{ScoreBasis, Scorecard},
};

/// Aggregated totals for one competitor, as ranked on the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    /// Owner of the entry.
    pub competitor: Competitor,
    /// Display name.
    pub name: String,
    /// Gross strokes over completed holes.
    pub total_gross: u32,
    /// Net strokes over completed holes.
    pub total_net: i32,
    /// Stableford points over completed holes.
    pub total_points: u32,
    /// Holes with a recorded score.
    pub holes_completed: usize,
    /// Gross relative to the par of completed holes.
    pub gross_to_par: i32,
    /// Net relative to the par of completed holes.
    pub net_to_par: i32,
    /// Whether the net column reflects handicap strokes.
    pub basis: ScoreBasis,
}

impl From<&Scorecard> for LeaderboardEntry {
    fn from(card: &Scorecard) -> Self {
        Self {
            competitor: card.competitor,
            name: card.name.clone(),
            total_gross: card.total.gross,
            total_net: card.total.net,
            total_points: card.total.points,
            holes_completed: card.holes_completed,
            gross_to_par: card.gross_to_par(),
            net_to_par: card.net_to_par(),
            basis: card.basis,
        }
    }
}

/// Which total a leaderboard is ordered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMetric {
    /// Highest Stableford points first.
    Points,
    /// Lowest net strokes first.
    Net,
    /// Lowest gross strokes first.
    Gross,
}

impl RankingMetric {
    /// Metric used for `format`. Stroke play only ranks on net when some competitor in the
    /// tournament has handicap data; scramble is always gross.
    pub fn for_format(format: ScoringFormat, has_handicap_data: bool) -> Self {
        match format {
            ScoringFormat::Stableford => RankingMetric::Points,
            ScoringFormat::StrokePlay if has_handicap_data => RankingMetric::Net,
            ScoringFormat::StrokePlay | ScoringFormat::Scramble => RankingMetric::Gross,
        }
    }

    /// Score shown for `entry` under this metric.
    pub fn score(self, entry: &LeaderboardEntry) -> i64 {
        match self {
            RankingMetric::Points => i64::from(entry.total_points),
            RankingMetric::Net => i64::from(entry.total_net),
            RankingMetric::Gross => i64::from(entry.total_gross),
        }
    }

    /// Relative score to par under this metric; points have none.
    pub fn to_par(self, entry: &LeaderboardEntry) -> Option<i32> {
        match self {
            RankingMetric::Points => None,
            RankingMetric::Net => Some(entry.net_to_par),
            RankingMetric::Gross => Some(entry.gross_to_par),
        }
    }

    fn compare(self, a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
        let primary = match self {
            RankingMetric::Points => b.total_points.cmp(&a.total_points),
            RankingMetric::Net => a.total_net.cmp(&b.total_net),
            RankingMetric::Gross => a.total_gross.cmp(&b.total_gross),
        };
        primary.then_with(|| b.holes_completed.cmp(&a.holes_completed))
    }
}

/// A placed leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    /// 1-based position; ties still receive distinct consecutive positions.
    pub position: usize,
    /// Score under the leaderboard metric.
    pub score: i64,
    /// Score relative to par, rendered with [`format_to_par`] by display surfaces.
    pub to_par: Option<i32>,
    /// The ranked totals.
    pub entry: LeaderboardEntry,
}

/// Ranked leaderboard plus the competitors yet to record a hole.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leaderboard {
    /// Metric the ranking was ordered on.
    pub metric: RankingMetric,
    /// Started competitors in ranked order.
    pub ranked: Vec<RankedEntry>,
    /// Competitors with zero holes completed, in roster order.
    pub not_started: Vec<LeaderboardEntry>,
}

/// Rank `entries` (in roster order) under `metric`.
///
/// Ties on score fall back to more holes completed; remaining ties keep input order.
pub fn rank_entries(entries: Vec<LeaderboardEntry>, metric: RankingMetric) -> Leaderboard {
    let (mut started, not_started): (Vec<_>, Vec<_>) = entries
        .into_iter()
        .partition(|entry| entry.holes_completed > 0);

    started.sort_by(|a, b| metric.compare(a, b));

    let ranked = started
        .into_iter()
        .enumerate()
        .map(|(index, entry)| RankedEntry {
            position: index + 1,
            score: metric.score(&entry),
            to_par: metric.to_par(&entry),
            entry,
        })
        .collect();

    Leaderboard {
        metric,
        ranked,
        not_started,
    }
}

/// Render a to-par value the way scoreboards do: `E`, `+3`, `-2`.
pub fn format_to_par(to_par: i32) -> String {
    match to_par.cmp(&0) {
        Ordering::Equal => "E".to_owned(),
        Ordering::Greater => format!("+{to_par}"),
        Ordering::Less => to_par.to_string(),
    }
}
