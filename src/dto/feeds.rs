use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::{
    config::{
        DEFAULT_SLOPE_RATING, EngineSettings, ScoringFormat, TournamentConfig,
        parse_stableford_config,
    },
    dto::validation::{validate_score_owner, validate_strokes},
    error::{EngineError, EngineResult},
    model::{Competitor, Hole, Player, Team},
    services::pairing::PairingPreference,
};

/// Hole as supplied by course setup.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct HoleInput {
    /// Hole number, from 1.
    #[validate(range(min = 1))]
    pub number: u32,
    /// Par for the hole.
    #[validate(range(min = 1))]
    pub par: u32,
    /// Difficulty rank, 1 = hardest.
    #[serde(default)]
    #[validate(range(min = 1))]
    pub stroke_index: Option<u32>,
}

impl From<HoleInput> for Hole {
    fn from(value: HoleInput) -> Self {
        Self {
            number: value.number,
            par: value.par,
            stroke_index: value.stroke_index,
        }
    }
}

/// Registered player with either a handicap index or a flat handicap.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PlayerInput {
    /// Player id.
    pub id: Uuid,
    /// Display name, trimmed on conversion.
    #[validate(length(min = 1))]
    pub name: String,
    /// WHS handicap index.
    #[serde(default)]
    #[validate(range(max = 54.0))]
    pub handicap_index: Option<f64>,
    /// Flat handicap used in simple mode; ignored when an index is present.
    #[serde(default)]
    pub handicap: i32,
}

impl From<PlayerInput> for Player {
    fn from(value: PlayerInput) -> Self {
        Self {
            id: value.id,
            name: value.name.trim().to_owned(),
            handicap_index: value.handicap_index,
            handicap: value.handicap,
        }
    }
}

/// Playing group registered as a scramble team.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TeamInput {
    /// Group id; scramble scores reference it as `group_id`.
    pub id: Uuid,
    /// Display name, trimmed on conversion.
    #[validate(length(min = 1))]
    pub name: String,
}

impl From<TeamInput> for Team {
    fn from(value: TeamInput) -> Self {
        Self {
            id: value.id,
            name: value.name.trim().to_owned(),
        }
    }
}

/// Strokes recorded on one hole by a player or, in scramble, by a group.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreInput {
    /// Scoring player, for individual formats.
    #[serde(default)]
    pub player_id: Option<Uuid>,
    /// Scoring group, for scramble.
    #[serde(default)]
    pub group_id: Option<Uuid>,
    /// Hole the score was recorded on.
    pub hole_number: u32,
    /// Gross strokes, at least 1.
    pub strokes: u32,
}

impl ScoreInput {
    /// Owner of the score; exactly one of player/group must be set.
    pub fn competitor(&self) -> EngineResult<Competitor> {
        match (self.player_id, self.group_id) {
            (Some(player), None) => Ok(Competitor::Player(player)),
            (None, Some(group)) => Ok(Competitor::Team(group)),
            _ => Err(EngineError::AmbiguousScoreOwner),
        }
    }
}

impl Validate for ScoreInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_score_owner(self.player_id, self.group_id) {
            errors.add("player_id", e);
        }

        if let Err(e) = validate_strokes(self.strokes) {
            errors.add("strokes", e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Tournament scoring settings as stored; the points table is untyped.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TournamentConfigInput {
    /// Slope rating; standard difficulty when absent.
    #[serde(default)]
    #[validate(range(min = 55.0, max = 155.0))]
    pub slope_rating: Option<f64>,
    /// Course rating; total par when absent.
    #[serde(default)]
    pub course_rating: Option<f64>,
    /// Parsed leniently; invalid fields fall back to their defaults.
    #[serde(default)]
    pub stableford_points_config: Value,
    /// Ranking format.
    #[serde(default)]
    pub format: ScoringFormat,
    /// Target group size; the engine default when absent.
    #[serde(default)]
    #[validate(range(min = 3, max = 5))]
    pub group_size: Option<usize>,
}

impl TournamentConfigInput {
    /// Resolve every default into an explicit [`TournamentConfig`].
    pub fn into_config(self, settings: &EngineSettings) -> TournamentConfig {
        TournamentConfig {
            slope_rating: self.slope_rating.unwrap_or(DEFAULT_SLOPE_RATING),
            course_rating: self.course_rating,
            stableford: parse_stableford_config(Some(&self.stableford_points_config)),
            format: self.format,
            group_size: self.group_size.unwrap_or(settings.default_group_size),
        }
    }
}

/// Everything the engine reads from the persistence layer for one tournament.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TournamentFeed {
    /// Course holes, in any order.
    #[validate(nested)]
    pub holes: Vec<HoleInput>,
    /// Registered players, in roster order.
    #[serde(default)]
    #[validate(nested)]
    pub players: Vec<PlayerInput>,
    /// Groups scored as teams in scramble.
    #[serde(default)]
    #[validate(nested)]
    pub teams: Vec<TeamInput>,
    /// Recorded hole scores.
    #[serde(default)]
    #[validate(nested)]
    pub scores: Vec<ScoreInput>,
    /// Pairing requests, in feed order.
    #[serde(default)]
    pub preferences: Vec<PairingPreference>,
    /// Tournament scoring settings.
    #[serde(default)]
    #[validate(nested)]
    pub config: TournamentConfigInput,
}
