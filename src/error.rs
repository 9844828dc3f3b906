use thiserror::Error;
use validator::ValidationErrors;

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Precondition violations raised by the scoring and grouping engine.
///
/// Missing data (no stroke index, no handicap, no recorded score) is never an error; it
/// resolves to a neutral value inside the component that meets it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// Pairing was requested for an empty roster.
    #[error("no players to group")]
    EmptyRoster,
    /// Target group size must be at least one.
    #[error("invalid target group size {0}: must be at least 1")]
    InvalidGroupSize(usize),
    /// A score references a hole that is not part of the course.
    #[error("hole {0} does not exist on this course")]
    UnknownHole(u32),
    /// Strokes must be a positive integer.
    #[error("invalid strokes {strokes} on hole {hole}: must be at least 1")]
    InvalidStrokes {
        /// Hole the score was recorded on.
        hole: u32,
        /// Rejected stroke count.
        strokes: u32,
    },
    /// A score must name exactly one of a player or a team.
    #[error("score must reference exactly one of player_id or group_id")]
    AmbiguousScoreOwner,
    /// Hole numbers start at 1.
    #[error("invalid hole number {0}: must be at least 1")]
    InvalidHoleNumber(u32),
    /// Two holes share the same number.
    #[error("duplicate hole number {0}")]
    DuplicateHole(u32),
    /// Two holes share the same stroke index.
    #[error("duplicate stroke index {0}")]
    DuplicateStrokeIndex(u32),
    /// A stroke index falls outside 1..=hole_count.
    #[error("stroke index {index} out of range for a {hole_count}-hole course")]
    StrokeIndexOutOfRange {
        /// Rejected stroke index.
        index: u32,
        /// Holes on the course.
        hole_count: usize,
    },
    /// A player or team referenced by a score is not registered.
    #[error("unknown competitor: {0}")]
    UnknownCompetitor(String),
    /// An external feed failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Every PIN of the configured length is already taken.
    #[error("no free {0}-digit access PIN left")]
    PinSpaceExhausted(u32),
}

impl From<ValidationErrors> for EngineError {
    fn from(err: ValidationErrors) -> Self {
        EngineError::InvalidInput(format!("validation failed: {}", err))
    }
}
