use std::ops::AddAssign;

use serde::Serialize;

use crate::{
    config::StablefordPointsConfig,
    model::{course::Course, player::Competitor, score::HoleScores},
    services::{handicap, stableford},
};

/// Whether a scorecard's net column actually reflects handicap strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBasis {
    /// Handicap strokes were applied (rendered as "NET").
    Net,
    /// No handicap: net mirrors gross (rendered as "GRS").
    Gross,
}

impl ScoreBasis {
    /// Short column label used by scorecards and emails.
    pub fn label(self) -> &'static str {
        match self {
            ScoreBasis::Net => "NET",
            ScoreBasis::Gross => "GRS",
        }
    }
}

/// One hole of an aggregated scorecard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoleRow {
    /// Hole number.
    pub hole_number: u32,
    /// Par of the hole.
    pub par: u32,
    /// Gross strokes, when recorded.
    pub raw: Option<u32>,
    /// Handicap strokes received on the hole.
    pub strokes_received: u32,
    /// `raw - strokes_received`, when recorded.
    pub net: Option<i32>,
    /// Stableford points, when recorded.
    pub points: Option<u32>,
}

/// Summed gross, net and points over a run of holes. Unplayed holes contribute 0.
///
/// Sums saturate at the bounds of their types instead of wrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Subtotal {
    /// Gross strokes.
    pub gross: u32,
    /// Net strokes.
    pub net: i32,
    /// Stableford points.
    pub points: u32,
}

impl AddAssign<&HoleRow> for Subtotal {
    fn add_assign(&mut self, row: &HoleRow) {
        self.gross = self.gross.saturating_add(row.raw.unwrap_or(0));
        self.net = self.net.saturating_add(row.net.unwrap_or(0));
        self.points = self.points.saturating_add(row.points.unwrap_or(0));
    }
}

/// Front and back subtotals split at the course midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NineSplit {
    /// Holes `1..=midpoint`.
    pub out: Subtotal,
    /// Holes `midpoint+1..=hole_count`.
    #[serde(rename = "in")]
    pub inward: Subtotal,
}

/// Aggregated scorecard for a player or a scramble team.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scorecard {
    /// Owner of the card.
    pub competitor: Competitor,
    /// Display name.
    pub name: String,
    /// Net or gross-only semantics.
    pub basis: ScoreBasis,
    /// Course handicap before clamping, for handicapped cards.
    pub course_handicap: Option<i32>,
    /// Per-hole rows in playing order.
    pub rows: Vec<HoleRow>,
    /// Out/in subtotals; absent when the round cannot be split.
    pub split: Option<NineSplit>,
    /// Whole-round subtotal.
    pub total: Subtotal,
    /// Holes with a recorded score.
    pub holes_completed: usize,
    /// Par of the completed holes only.
    pub par_played: u32,
}

impl Scorecard {
    /// Gross strokes relative to the par of completed holes.
    pub fn gross_to_par(&self) -> i32 {
        saturate(i64::from(self.total.gross) - i64::from(self.par_played))
    }

    /// Net strokes relative to the par of completed holes.
    pub fn net_to_par(&self) -> i32 {
        saturate(i64::from(self.total.net) - i64::from(self.par_played))
    }

    /// Whether any hole has been scored.
    pub fn has_started(&self) -> bool {
        self.holes_completed > 0
    }
}

/// Build the scorecard for one competitor.
///
/// `course_handicap` of `None` means the competitor carries no handicap, so strokes received
/// are forced to zero and net mirrors gross. Negative course handicaps receive no strokes.
pub fn aggregate_scorecard(
    competitor: Competitor,
    name: &str,
    course: &Course,
    scores: Option<&HoleScores>,
    course_handicap: Option<i32>,
    points: &StablefordPointsConfig,
) -> Scorecard {
    let allocatable = course_handicap.map_or(0, handicap::allocatable_strokes);
    let hole_count = course.hole_count();

    let rows: Vec<HoleRow> = course
        .holes()
        .iter()
        .map(|hole| {
            let strokes_received = match course_handicap {
                Some(_) => {
                    handicap::get_strokes_on_hole(allocatable, hole.stroke_index, hole_count)
                }
                None => 0,
            };
            let raw = scores.and_then(|scores| scores.get(&hole.number).copied());
            HoleRow {
                hole_number: hole.number,
                par: hole.par,
                raw,
                strokes_received,
                net: raw.map(|raw| saturate(i64::from(raw) - i64::from(strokes_received))),
                points: raw.map(|raw| {
                    stableford::compute_stableford_points(raw, hole.par, strokes_received, points)
                }),
            }
        })
        .collect();

    let midpoint = course.midpoint();
    let split = (midpoint > 0 && hole_count > midpoint).then(|| {
        let (front, back) = rows.split_at(midpoint);
        NineSplit {
            out: subtotal(front),
            inward: subtotal(back),
        }
    });

    let played = rows.iter().filter(|row| row.raw.is_some());
    let holes_completed = played.clone().count();
    let par_played = played.fold(0u32, |sum, row| sum.saturating_add(row.par));

    Scorecard {
        competitor,
        name: name.to_owned(),
        basis: if course_handicap.is_some() {
            ScoreBasis::Net
        } else {
            ScoreBasis::Gross
        },
        course_handicap,
        total: subtotal(&rows),
        split,
        rows,
        holes_completed,
        par_played,
    }
}

fn saturate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

fn subtotal(rows: &[HoleRow]) -> Subtotal {
    let mut sum = Subtotal::default();
    for row in rows {
        sum += row;
    }
    sum
}
