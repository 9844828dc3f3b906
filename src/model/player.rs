use serde::Serialize;
use uuid::Uuid;

use crate::{config::TournamentConfig, model::course::Course, services::handicap};

/// Identifier of a registered player.
pub type PlayerId = Uuid;
/// Identifier of a playing group (the scoring unit in scramble).
pub type TeamId = Uuid;

/// Player registered for a tournament.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    /// Stable player identifier.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// USGA handicap index; takes precedence over the flat handicap when present.
    pub handicap_index: Option<f64>,
    /// Flat course handicap used in simple mode.
    pub handicap: i32,
}

impl Player {
    /// Whether the player carries any handicap at all.
    ///
    /// Players without an index and with a flat handicap of zero or less are scored gross.
    pub fn has_handicap(&self) -> bool {
        self.handicap_index.is_some() || self.handicap > 0
    }

    /// Course handicap for this player on `course` under `config`.
    ///
    /// May be negative for plus handicaps; see [`handicap::allocatable_strokes`].
    pub fn course_handicap(&self, config: &TournamentConfig, course: &Course) -> i32 {
        match self.handicap_index {
            Some(index) => {
                let total_par = course.total_par();
                handicap::compute_course_handicap(
                    index,
                    config.slope_rating,
                    config.resolved_course_rating(total_par),
                    total_par,
                )
            }
            None => self.handicap,
        }
    }
}

/// Scramble team; scores are keyed by the team rather than its members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Team {
    /// Stable group identifier.
    pub id: TeamId,
    /// Display name, e.g. "Group 3".
    pub name: String,
}

/// Owner of a scorecard: a player in individual formats, a team in scramble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Competitor {
    /// Individual player.
    Player(PlayerId),
    /// Scramble team.
    Team(TeamId),
}

impl std::fmt::Display for Competitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Competitor::Player(id) => write!(f, "player `{id}`"),
            Competitor::Team(id) => write!(f, "team `{id}`"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::course::Hole;

    fn course() -> Course {
        Course::new(
            (1..=18)
                .map(|number| Hole {
                    number,
                    par: 4,
                    stroke_index: Some(number),
                })
                .collect(),
        )
        .unwrap()
    }

    fn player(handicap_index: Option<f64>, handicap: i32) -> Player {
        Player {
            id: Uuid::from_u128(1),
            name: "Ada".into(),
            handicap_index,
            handicap,
        }
    }

    #[test]
    fn index_takes_precedence_over_flat_handicap() {
        let config = TournamentConfig {
            course_rating: Some(73.0),
            ..TournamentConfig::default()
        };
        let p = player(Some(10.0), 30);
        // 10 * 113/113 + (73 - 72) = 11
        assert_eq!(p.course_handicap(&config, &course()), 11);
    }

    #[test]
    fn flat_handicap_used_without_index() {
        let p = player(None, 7);
        assert_eq!(p.course_handicap(&TournamentConfig::default(), &course()), 7);
        assert!(p.has_handicap());
    }

    #[test]
    fn no_index_and_non_positive_flat_is_gross_only() {
        assert!(!player(None, 0).has_handicap());
        assert!(!player(None, -2).has_handicap());
        assert!(player(Some(0.0), 0).has_handicap());
    }
}
