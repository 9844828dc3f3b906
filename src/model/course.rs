use std::collections::HashSet;

use serde::Serialize;

use crate::error::{EngineError, EngineResult};

/// A single hole of the tournament course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hole {
    /// Hole number, unique within the course and at least 1.
    pub number: u32,
    /// Par for the hole.
    pub par: u32,
    /// Difficulty rank (1 = hardest); holes without one never receive remainder strokes.
    pub stroke_index: Option<u32>,
}

/// Validated, number-ordered hole list. Immutable once a round starts.
///
/// Numbers only order the holes and need not be contiguous; halves and stroke-index ranges
/// are positional over that order, so holes `1, 2, 5` count as a three-hole course.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Course {
    holes: Vec<Hole>,
}

impl Course {
    /// Build a course from raw holes, ordering them by number.
    ///
    /// Rejects hole number 0, duplicate hole numbers, and stroke indices that repeat or fall
    /// outside `1..=hole_count`, since either breaks exact handicap allocation.
    pub fn new(mut holes: Vec<Hole>) -> EngineResult<Self> {
        holes.sort_by_key(|hole| hole.number);

        let hole_count = holes.len();
        let mut numbers = HashSet::with_capacity(hole_count);
        let mut indices = HashSet::with_capacity(hole_count);
        for hole in &holes {
            if hole.number == 0 {
                return Err(EngineError::InvalidHoleNumber(hole.number));
            }
            if !numbers.insert(hole.number) {
                return Err(EngineError::DuplicateHole(hole.number));
            }
            if let Some(index) = hole.stroke_index {
                if index == 0 || index as usize > hole_count {
                    return Err(EngineError::StrokeIndexOutOfRange { index, hole_count });
                }
                if !indices.insert(index) {
                    return Err(EngineError::DuplicateStrokeIndex(index));
                }
            }
        }

        Ok(Self { holes })
    }

    /// Holes in playing order.
    pub fn holes(&self) -> &[Hole] {
        &self.holes
    }

    /// Look up a hole by its number.
    pub fn hole(&self, number: u32) -> Option<&Hole> {
        self.holes.iter().find(|hole| hole.number == number)
    }

    /// Number of holes on the course.
    pub fn hole_count(&self) -> usize {
        self.holes.len()
    }

    /// Sum of par across every hole.
    pub fn total_par(&self) -> u32 {
        self.holes
            .iter()
            .fold(0u32, |sum, hole| sum.saturating_add(hole.par))
    }

    /// Split point between the outward and inward halves (`floor(hole_count / 2)`), as a
    /// position in [`Self::holes`] rather than a hole number.
    pub fn midpoint(&self) -> usize {
        self.holes.len() / 2
    }
}
