//! Validation helpers for feed DTOs.

use uuid::Uuid;
use validator::ValidationError;

/// Validates that a score names exactly one owner: a player, or a group for scramble.
pub fn validate_score_owner(
    player_id: Option<Uuid>,
    group_id: Option<Uuid>,
) -> Result<(), ValidationError> {
    match (player_id, group_id) {
        (Some(_), None) | (None, Some(_)) => Ok(()),
        (Some(_), Some(_)) => {
            let mut err = ValidationError::new("score_owner_ambiguous");
            err.message = Some("Score must not reference both a player and a group".into());
            Err(err)
        }
        (None, None) => {
            let mut err = ValidationError::new("score_owner_missing");
            err.message = Some("Score must reference a player or a group".into());
            Err(err)
        }
    }
}

/// Validates that a stroke count is a positive integer.
pub fn validate_strokes(strokes: u32) -> Result<(), ValidationError> {
    if strokes < 1 {
        let mut err = ValidationError::new("strokes_min");
        err.message = Some(format!("Strokes must be at least 1 (got {strokes})").into());
        return Err(err);
    }
    Ok(())
}
