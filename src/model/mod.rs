/// Course layout: holes, par and stroke indices.
pub mod course;
/// Players, scramble teams and scorecard owners.
pub mod player;
/// Upsertable hole-by-hole score storage.
pub mod score;

pub use course::{Course, Hole};
pub use player::{Competitor, Player, PlayerId, Team, TeamId};
pub use score::{HoleScores, ScoreBook};
