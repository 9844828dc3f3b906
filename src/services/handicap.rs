use crate::{config::DEFAULT_SLOPE_RATING, model::course::Course};

/// Course handicap from a handicap index using the USGA formula.
///
/// `round(index * slope / 113 + (course_rating - total_par))`, halves rounded up. Callers
/// resolve slope and course rating defaults beforehand; nothing is defaulted here.
pub fn compute_course_handicap(
    handicap_index: f64,
    slope_rating: f64,
    course_rating: f64,
    total_par: u32,
) -> i32 {
    let raw = handicap_index * (slope_rating / DEFAULT_SLOPE_RATING)
        + (course_rating - f64::from(total_par));
    (raw + 0.5).floor() as i32
}

/// Clamp a course handicap to the number of strokes that can be handed out.
///
/// Plus handicaps (negative values) receive no strokes.
pub fn allocatable_strokes(course_handicap: i32) -> u32 {
    course_handicap.max(0).unsigned_abs()
}

/// Strokes received on one hole.
///
/// Every hole gets `course_handicap / hole_count`; the remaining `course_handicap % hole_count`
/// go to the holes whose stroke index is at most that remainder. Returns 0 when the course
/// has no holes or the hole carries no stroke index.
pub fn get_strokes_on_hole(
    course_handicap: u32,
    stroke_index: Option<u32>,
    hole_count: usize,
) -> u32 {
    let Some(stroke_index) = stroke_index else {
        return 0;
    };
    if hole_count == 0 {
        return 0;
    }

    let holes = hole_count as u32;
    let base = course_handicap / holes;
    let remainder = course_handicap % holes;
    base + u32::from(stroke_index <= remainder)
}

/// Strokes received on every hole of `course`, in playing order.
pub fn allocate_strokes(course_handicap: u32, course: &Course) -> Vec<u32> {
    course
        .holes()
        .iter()
        .map(|hole| get_strokes_on_hole(course_handicap, hole.stroke_index, course.hole_count()))
        .collect()
}
