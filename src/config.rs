//! Tournament-scoped scoring configuration and host-level engine settings.

use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

/// Slope rating of a course of standard difficulty.
pub const DEFAULT_SLOPE_RATING: f64 = 113.0;
/// Foursomes unless configured otherwise.
pub const DEFAULT_GROUP_SIZE: usize = 4;
/// Number of digits in a group access PIN.
pub const DEFAULT_PIN_LENGTH: u32 = 4;
/// Longest access PIN the allocator will generate.
pub const MAX_PIN_LENGTH: u32 = 9;
/// Largest value accepted for a single Stableford tier; larger values fall back to the default.
pub const MAX_STABLEFORD_POINTS: u32 = 1_000;

/// Default location on disk where the host looks for engine settings.
const DEFAULT_SETTINGS_PATH: &str = "config/engine.json";
/// Environment variable that overrides [`DEFAULT_SETTINGS_PATH`].
const SETTINGS_PATH_ENV: &str = "GOLF_ENGINE_CONFIG_PATH";

/// Points awarded per net outcome tier in Stableford.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct StablefordPointsConfig {
    /// Net three under par or better.
    pub albatross: u32,
    /// Net two under par.
    pub eagle: u32,
    /// Net one under par.
    pub birdie: u32,
    /// Net par.
    pub par: u32,
    /// Net one over par.
    pub bogey: u32,
    /// Net two over par or worse.
    pub double_bogey_or_worse: u32,
}

impl StablefordPointsConfig {
    /// Modified-Stableford scale used when a tournament configures nothing.
    pub const DEFAULT: Self = Self {
        albatross: 20,
        eagle: 10,
        birdie: 5,
        par: 3,
        bogey: 1,
        double_bogey_or_worse: 0,
    };
}

impl Default for StablefordPointsConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<Value> for StablefordPointsConfig {
    fn from(value: Value) -> Self {
        parse_stableford_config(Some(&value))
    }
}

/// Parse a loosely-typed points table, never failing.
///
/// `None` (absent), `null`, arrays and scalars yield the full default table. For objects each
/// of the six keys is checked on its own: only integers in `0..=MAX_STABLEFORD_POINTS` are kept,
/// anything else falls back to that key's default while valid siblings survive.
pub fn parse_stableford_config(raw: Option<&Value>) -> StablefordPointsConfig {
    let Some(Value::Object(map)) = raw else {
        if raw.is_some_and(|value| !value.is_null()) {
            debug!("stableford config is not an object; using defaults");
        }
        return StablefordPointsConfig::DEFAULT;
    };

    let defaults = StablefordPointsConfig::DEFAULT;
    StablefordPointsConfig {
        albatross: points_field(map, "albatross", defaults.albatross),
        eagle: points_field(map, "eagle", defaults.eagle),
        birdie: points_field(map, "birdie", defaults.birdie),
        par: points_field(map, "par", defaults.par),
        bogey: points_field(map, "bogey", defaults.bogey),
        double_bogey_or_worse: points_field(
            map,
            "double_bogey_or_worse",
            defaults.double_bogey_or_worse,
        ),
    }
}

/// Read one points value, accepting only bounded non-negative integers (including `5.0`).
fn points_field(map: &Map<String, Value>, key: &str, default: u32) -> u32 {
    let Some(value) = map.get(key) else {
        return default;
    };

    let max = f64::from(MAX_STABLEFORD_POINTS);
    let parsed = match value {
        Value::Number(number) => number
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .or_else(|| {
                number.as_f64().and_then(|f| {
                    (f.is_finite() && f.fract() == 0.0 && (0.0..=max).contains(&f))
                        .then_some(f as u32)
                })
            })
            .filter(|points| *points <= MAX_STABLEFORD_POINTS),
        _ => None,
    };

    parsed.unwrap_or_else(|| {
        debug!(key, value = %value, default, "invalid stableford points value; using default");
        default
    })
}

/// Scoring format of a tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringFormat {
    /// Highest points wins.
    Stableford,
    /// Lowest net (or gross) strokes wins.
    #[default]
    StrokePlay,
    /// Lowest team gross wins; scores are keyed by group.
    Scramble,
}

/// Immutable, per-tournament scoring configuration passed explicitly into the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct TournamentConfig {
    /// Slope rating (55..=155).
    pub slope_rating: f64,
    /// Course rating; total par is used when absent.
    pub course_rating: Option<f64>,
    /// Points table for Stableford.
    pub stableford: StablefordPointsConfig,
    /// Ranking format.
    pub format: ScoringFormat,
    /// Target size for generated groups.
    pub group_size: usize,
}

impl TournamentConfig {
    /// Course rating to feed the handicap formula, defaulting to `total_par`.
    pub fn resolved_course_rating(&self, total_par: u32) -> f64 {
        self.course_rating.unwrap_or(f64::from(total_par))
    }
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            slope_rating: DEFAULT_SLOPE_RATING,
            course_rating: None,
            stableford: StablefordPointsConfig::DEFAULT,
            format: ScoringFormat::default(),
            group_size: DEFAULT_GROUP_SIZE,
        }
    }
}

/// Host-level defaults shared by every tournament an engine instance serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// Group size used when a tournament does not specify one.
    pub default_group_size: usize,
    /// Digits per group access PIN.
    pub pin_length: u32,
}

impl EngineSettings {
    /// Load settings from `GOLF_ENGINE_CONFIG_PATH` (or `config/engine.json`), falling back to
    /// built-in defaults.
    pub fn load() -> Self {
        Self::load_from(&resolve_settings_path())
    }

    /// Load settings from `path`. A missing or unreadable file yields the defaults, as does
    /// a file that is not valid JSON; out-of-range fields fall back one by one.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<RawSettings>(&contents) {
                Ok(raw) => {
                    let settings: Self = raw.into();
                    info!(
                        path = %path.display(),
                        group_size = settings.default_group_size,
                        pin_length = settings.pin_length,
                        "loaded engine settings"
                    );
                    settings
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse engine settings; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(
                    path = %path.display(),
                    "engine settings not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read engine settings; falling back to defaults"
                );
                Self::default()
            }
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            default_group_size: DEFAULT_GROUP_SIZE,
            pin_length: DEFAULT_PIN_LENGTH,
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the settings file located at [`DEFAULT_SETTINGS_PATH`].
struct RawSettings {
    #[serde(default)]
    default_group_size: Option<usize>,
    #[serde(default)]
    pin_length: Option<u32>,
}

impl From<RawSettings> for EngineSettings {
    fn from(value: RawSettings) -> Self {
        let defaults = Self::default();
        Self {
            default_group_size: value
                .default_group_size
                .filter(|size| (3..=5).contains(size))
                .unwrap_or(defaults.default_group_size),
            pin_length: value
                .pin_length
                .filter(|len| (1..=MAX_PIN_LENGTH).contains(len))
                .unwrap_or(defaults.pin_length),
        }
    }
}

/// Resolve the settings path taking the environment override into account.
fn resolve_settings_path() -> PathBuf {
    env::var_os(SETTINGS_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH))
}
