//! Single entry point every surface (scorecard page, admin monitor, live leaderboard,
//! scorecard emails) uses instead of re-deriving handicap and points math.

use std::collections::HashSet;

use rand::Rng;
use tracing::debug;
use validator::Validate;

use crate::{
    config::{EngineSettings, ScoringFormat, TournamentConfig},
    dto::feeds::{ScoreInput, TournamentFeed},
    error::{EngineError, EngineResult},
    model::{Competitor, Course, Hole, Player, PlayerId, ScoreBook, Team},
    services::{
        leaderboard::{self, Leaderboard, LeaderboardEntry, RankingMetric},
        pairing::{GeneratedGroup, GroupMatcher, PairingPreference},
        pin::{self, GroupAssignment, PinAllocator},
        scorecard::{self, Scorecard},
    },
};

/// Scoring and grouping state for one tournament.
#[derive(Debug, Clone)]
pub struct TournamentEngine {
    course: Course,
    players: Vec<Player>,
    teams: Vec<Team>,
    preferences: Vec<PairingPreference>,
    config: TournamentConfig,
    scores: ScoreBook,
}

impl TournamentEngine {
    /// Build an engine from explicit parts with an empty score book.
    pub fn new(
        course: Course,
        players: Vec<Player>,
        teams: Vec<Team>,
        config: TournamentConfig,
    ) -> EngineResult<Self> {
        let mut ids = HashSet::with_capacity(players.len() + teams.len());
        for competitor in players
            .iter()
            .map(|p| Competitor::Player(p.id))
            .chain(teams.iter().map(|t| Competitor::Team(t.id)))
        {
            if !ids.insert(competitor) {
                return Err(EngineError::InvalidInput(format!("duplicate {competitor}")));
            }
        }

        Ok(Self {
            course,
            players,
            teams,
            preferences: Vec::new(),
            config,
            scores: ScoreBook::new(),
        })
    }

    /// Validate a full persistence feed and load its scores.
    pub fn from_feed(feed: TournamentFeed, settings: &EngineSettings) -> EngineResult<Self> {
        feed.validate()?;

        let TournamentFeed {
            holes,
            players,
            teams,
            scores,
            preferences,
            config,
        } = feed;

        let course = Course::new(holes.into_iter().map(Hole::from).collect())?;
        let mut engine = Self::new(
            course,
            players.into_iter().map(Player::from).collect(),
            teams.into_iter().map(Team::from).collect(),
            config.into_config(settings),
        )?;
        engine.preferences = preferences;

        for score in scores {
            engine.record_score(&score)?;
        }
        debug!(
            holes = engine.course.hole_count(),
            players = engine.players.len(),
            teams = engine.teams.len(),
            "tournament feed loaded"
        );
        Ok(engine)
    }

    /// Course being played.
    pub fn course(&self) -> &Course {
        &self.course
    }

    /// Resolved tournament configuration.
    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    /// Recorded scores.
    pub fn scores(&self) -> &ScoreBook {
        &self.scores
    }

    /// Replace the pairing requests used by [`Self::generate_groups`].
    pub fn set_preferences(&mut self, preferences: Vec<PairingPreference>) {
        self.preferences = preferences;
    }

    /// Record or overwrite a hole score. Returns the previous strokes, if any.
    pub fn record_score(&mut self, score: &ScoreInput) -> EngineResult<Option<u32>> {
        let competitor = score.competitor()?;
        if !self.is_registered(&competitor) {
            return Err(EngineError::UnknownCompetitor(competitor.to_string()));
        }
        self.scores
            .record(&self.course, competitor, score.hole_number, score.strokes)
    }

    fn is_registered(&self, competitor: &Competitor) -> bool {
        match competitor {
            Competitor::Player(id) => self.players.iter().any(|p| p.id == *id),
            Competitor::Team(id) => self.teams.iter().any(|t| t.id == *id),
        }
    }

    /// Whether any player carries handicap data; stroke play ranks gross otherwise.
    pub fn has_handicap_data(&self) -> bool {
        self.players.iter().any(Player::has_handicap)
    }

    fn player_card(&self, player: &Player) -> Scorecard {
        let course_handicap = player
            .has_handicap()
            .then(|| player.course_handicap(&self.config, &self.course));
        scorecard::aggregate_scorecard(
            Competitor::Player(player.id),
            &player.name,
            &self.course,
            self.scores.scores_for(&Competitor::Player(player.id)),
            course_handicap,
            &self.config.stableford,
        )
    }

    fn team_card(&self, team: &Team) -> Scorecard {
        scorecard::aggregate_scorecard(
            Competitor::Team(team.id),
            &team.name,
            &self.course,
            self.scores.scores_for(&Competitor::Team(team.id)),
            None,
            &self.config.stableford,
        )
    }

    /// Scorecard for a single player or team.
    pub fn scorecard(&self, competitor: &Competitor) -> EngineResult<Scorecard> {
        let card = match competitor {
            Competitor::Player(id) => self
                .players
                .iter()
                .find(|p| p.id == *id)
                .map(|p| self.player_card(p)),
            Competitor::Team(id) => self
                .teams
                .iter()
                .find(|t| t.id == *id)
                .map(|t| self.team_card(t)),
        };
        card.ok_or_else(|| EngineError::UnknownCompetitor(competitor.to_string()))
    }

    /// Scorecards of every competitor in the tournament format, in roster order.
    ///
    /// Scramble scores teams; every other format scores individual players.
    pub fn scorecards(&self) -> Vec<Scorecard> {
        match self.config.format {
            ScoringFormat::Scramble => self.teams.iter().map(|t| self.team_card(t)).collect(),
            ScoringFormat::Stableford | ScoringFormat::StrokePlay => {
                self.players.iter().map(|p| self.player_card(p)).collect()
            }
        }
    }

    /// Ranked leaderboard for the tournament format.
    pub fn leaderboard(&self) -> Leaderboard {
        let metric = RankingMetric::for_format(self.config.format, self.has_handicap_data());
        let entries = self
            .scorecards()
            .iter()
            .map(LeaderboardEntry::from)
            .collect();
        leaderboard::rank_entries(entries, metric)
    }

    /// Partition the roster with `matcher` using the configured group size.
    pub fn generate_groups<M: GroupMatcher + ?Sized>(
        &self,
        matcher: &M,
    ) -> EngineResult<Vec<GeneratedGroup>> {
        let roster: Vec<PlayerId> = self.players.iter().map(|p| p.id).collect();
        matcher.generate_groups(&roster, &self.preferences, self.config.group_size)
    }

    /// Generate groups and attach a PIN unique among `existing_pins`.
    pub fn generate_groups_with_pins<M, R>(
        &self,
        matcher: &M,
        existing_pins: impl IntoIterator<Item = String>,
        settings: &EngineSettings,
        rng: &mut R,
    ) -> EngineResult<Vec<GroupAssignment>>
    where
        M: GroupMatcher + ?Sized,
        R: Rng + ?Sized,
    {
        let groups = self.generate_groups(matcher)?;
        let mut allocator = PinAllocator::new(existing_pins, settings.pin_length);
        pin::assign_pins(groups, &mut allocator, rng)
    }
}
