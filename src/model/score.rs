use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::{
    error::{EngineError, EngineResult},
    model::{course::Course, player::Competitor},
};

/// Gross strokes recorded per hole number for one competitor.
pub type HoleScores = BTreeMap<u32, u32>;

/// In-memory upsert store of hole-by-hole strokes.
///
/// Every write is checked against the course so downstream aggregation never meets
/// a score for an unknown hole or a non-positive stroke count.
#[derive(Debug, Clone, Default)]
pub struct ScoreBook {
    entries: IndexMap<Competitor, HoleScores>,
}

impl ScoreBook {
    /// Create an empty score book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record strokes for `competitor` on `hole_number`, overwriting any earlier entry.
    ///
    /// Returns the previous value when the hole had already been scored.
    pub fn record(
        &mut self,
        course: &Course,
        competitor: Competitor,
        hole_number: u32,
        strokes: u32,
    ) -> EngineResult<Option<u32>> {
        if course.hole(hole_number).is_none() {
            return Err(EngineError::UnknownHole(hole_number));
        }
        if strokes < 1 {
            return Err(EngineError::InvalidStrokes {
                hole: hole_number,
                strokes,
            });
        }
        Ok(self
            .entries
            .entry(competitor)
            .or_default()
            .insert(hole_number, strokes))
    }

    /// Strokes recorded for `competitor`, if any.
    pub fn scores_for(&self, competitor: &Competitor) -> Option<&HoleScores> {
        self.entries.get(competitor)
    }

    /// Strokes for a single hole.
    pub fn strokes(&self, competitor: &Competitor, hole_number: u32) -> Option<u32> {
        self.entries
            .get(competitor)
            .and_then(|scores| scores.get(&hole_number).copied())
    }

    /// Competitors with at least one recorded hole, in first-entry order.
    pub fn competitors(&self) -> impl Iterator<Item = &Competitor> {
        self.entries.keys()
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::model::course::Hole;

    fn course() -> Course {
        Course::new(
            (1..=3)
                .map(|number| Hole {
                    number,
                    par: 3,
                    stroke_index: None,
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn re_entry_overwrites() {
        let course = course();
        let mut book = ScoreBook::new();
        let who = Competitor::Player(Uuid::from_u128(7));

        assert_eq!(book.record(&course, who, 2, 5).unwrap(), None);
        assert_eq!(book.record(&course, who, 2, 4).unwrap(), Some(5));
        assert_eq!(book.strokes(&who, 2), Some(4));
        assert_eq!(book.scores_for(&who).unwrap().len(), 1);
    }

    #[test]
    fn rejects_unknown_hole_and_zero_strokes() {
        let course = course();
        let mut book = ScoreBook::new();
        let who = Competitor::Team(Uuid::from_u128(1));

        assert_eq!(
            book.record(&course, who, 4, 3).unwrap_err(),
            EngineError::UnknownHole(4)
        );
        assert_eq!(
            book.record(&course, who, 1, 0).unwrap_err(),
            EngineError::InvalidStrokes {
                hole: 1,
                strokes: 0
            }
        );
        assert_eq!(book.competitors().count(), 0);
    }
}
