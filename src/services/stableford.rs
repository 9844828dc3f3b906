pub use crate::config::{StablefordPointsConfig, parse_stableford_config};

/// Stableford points for one hole.
///
/// The net score relative to par picks a tier; anything three or more under par collapses
/// to `albatross` and anything two or more over collapses to `double_bogey_or_worse`. The
/// configured value is returned as is.
pub fn compute_stableford_points(
    gross_score: u32,
    par: u32,
    strokes_received: u32,
    points: &StablefordPointsConfig,
) -> u32 {
    let net = i64::from(gross_score) - i64::from(strokes_received);
    match net - i64::from(par) {
        ..=-3 => points.albatross,
        -2 => points.eagle,
        -1 => points.birdie,
        0 => points.par,
        1 => points.bogey,
        _ => points.double_bogey_or_worse,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: StablefordPointsConfig = StablefordPointsConfig {
        albatross: 60,
        eagle: 50,
        birdie: 40,
        par: 30,
        bogey: 20,
        double_bogey_or_worse: 10,
    };

    #[test]
    fn each_tier_maps_to_its_key() {
        assert_eq!(compute_stableford_points(2, 5, 0, &TABLE), 60);
        assert_eq!(compute_stableford_points(3, 5, 0, &TABLE), 50);
        assert_eq!(compute_stableford_points(3, 4, 0, &TABLE), 40);
        assert_eq!(compute_stableford_points(4, 4, 0, &TABLE), 30);
        assert_eq!(compute_stableford_points(5, 4, 0, &TABLE), 20);
        assert_eq!(compute_stableford_points(6, 4, 0, &TABLE), 10);
    }

    #[test]
    fn extremes_collapse_into_end_tiers() {
        // relative -4
        assert_eq!(compute_stableford_points(1, 5, 0, &TABLE), TABLE.albatross);
        // relative +5
        assert_eq!(compute_stableford_points(9, 4, 0, &TABLE), TABLE.double_bogey_or_worse);
    }

    #[test]
    fn strokes_received_lower_the_net() {
        // gross bogey with one stroke is a net par
        assert_eq!(compute_stableford_points(5, 4, 1, &TABLE), TABLE.par);
        // received strokes beyond the gross still land in the best tier
        assert_eq!(compute_stableford_points(1, 3, 4, &TABLE), TABLE.albatross);
    }

    #[test]
    fn zero_points_are_returned_verbatim() {
        let table = StablefordPointsConfig {
            par: 0,
            ..StablefordPointsConfig::DEFAULT
        };
        assert_eq!(compute_stableford_points(4, 4, 0, &table), 0);
        assert_eq!(compute_stableford_points(7, 4, 0, &StablefordPointsConfig::DEFAULT), 0);
    }
}
