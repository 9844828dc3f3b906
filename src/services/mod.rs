/// Course handicap and per-hole stroke allocation.
pub mod handicap;
/// Leaderboard ordering per scoring format.
pub mod leaderboard;
/// Roster partitioning honoring play-together requests.
pub mod pairing;
/// Unique access PINs for generated groups.
pub mod pin;
/// Per-hole rows and out/in/total subtotals.
pub mod scorecard;
/// Stableford points per hole.
pub mod stableford;
/// Tournament-level facade over the scoring pipeline and grouping.
pub mod tournament;
