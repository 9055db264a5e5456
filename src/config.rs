//! Per-deployment configuration for the matcher.
//!
//! Options are plain values, constructed once and shared read-only between
//! requests. Per-request state, such as the estimated transition scale, is
//! derived from them into [`Parameters`](crate::transition::Parameters)
//! and never written back.

use std::env;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of candidates fetched for every observation.
pub const DEFAULT_CANDIDATES: usize = 10;

/// Candidate search radius around each observation, in meters.
pub const DEFAULT_SEARCH_DISTANCE: f64 = 100.0;

/// Standard deviation of the GPS measurement noise, in meters.
pub const DEFAULT_SIGMA_Z: f64 = 4.07;

/// Lower bound on the transition scale, in meters. Zero applies no bound.
pub const DEFAULT_MIN_BETA: f64 = 0.0;

/// Transition scale used when a trace yields no measurable, non-zero delta.
pub const DEFAULT_FALLBACK_BETA: f64 = 1.0;

const ENV_CANDIDATES: &str = "ROUTERS_MATCH_CANDIDATES";
const ENV_SEARCH_DISTANCE: &str = "ROUTERS_MATCH_SEARCH_DISTANCE";
const ENV_SIGMA_Z: &str = "ROUTERS_MATCH_SIGMA_Z";
const ENV_MIN_BETA: &str = "ROUTERS_MATCH_MIN_BETA";
const ENV_FALLBACK_BETA: &str = "ROUTERS_MATCH_FALLBACK_BETA";
const ENV_DIAGNOSTICS: &str = "ROUTERS_MATCH_DIAGNOSTICS";
const ENV_PARALLEL: &str = "ROUTERS_MATCH_PARALLEL";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("could not parse {key}={value}")]
    Unparsable { key: &'static str, value: String },

    #[error("candidate count must be non-zero")]
    NoCandidates,

    #[error("{field} must be finite and positive, given {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must be finite and non-negative, given {value}")]
    Negative { field: &'static str, value: f64 },
}

/// Options which control how a trace is matched.
///
/// ### Example
///
/// ```rust
/// use routers_match::MatchOptions;
///
/// let options = MatchOptions::default()
///     .with_candidates(5)
///     .with_diagnostics(true);
///
/// assert!(options.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchOptions {
    /// The fixed state size, `K`, of every candidate list.
    ///
    /// Each observation must resolve to exactly this many candidates,
    /// otherwise the request is rejected.
    pub candidates: usize,

    /// The radius, in meters, within which candidates are searched for.
    pub search_distance: f64,

    /// The emission noise, σ, in meters.
    pub sigma_z: f64,

    /// The smallest transition scale, β, the estimator may produce.
    ///
    /// Unbounded by default, so β stays `median / ln(2)`.
    pub min_beta: f64,

    /// The transition scale, β, used if no delta could be measured, or the
    /// median delta is zero.
    pub fallback_beta: f64,

    /// Attach the raw candidate lists and per-step deltas to the result.
    pub diagnostics: bool,

    /// Fan candidate lookup and pairwise routing out over the rayon pool.
    pub parallel: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        MatchOptions {
            candidates: DEFAULT_CANDIDATES,
            search_distance: DEFAULT_SEARCH_DISTANCE,
            sigma_z: DEFAULT_SIGMA_Z,
            min_beta: DEFAULT_MIN_BETA,
            fallback_beta: DEFAULT_FALLBACK_BETA,
            diagnostics: false,
            parallel: true,
        }
    }
}

impl MatchOptions {
    /// Loads options from the environment (and a `.env` file, if present),
    /// falling back to the defaults for anything unset.
    ///
    /// | Variable | Field |
    /// |---|---|
    /// | `ROUTERS_MATCH_CANDIDATES` | [`candidates`](#structfield.candidates) |
    /// | `ROUTERS_MATCH_SEARCH_DISTANCE` | [`search_distance`](#structfield.search_distance) |
    /// | `ROUTERS_MATCH_SIGMA_Z` | [`sigma_z`](#structfield.sigma_z) |
    /// | `ROUTERS_MATCH_MIN_BETA` | [`min_beta`](#structfield.min_beta) |
    /// | `ROUTERS_MATCH_FALLBACK_BETA` | [`fallback_beta`](#structfield.fallback_beta) |
    /// | `ROUTERS_MATCH_DIAGNOSTICS` | [`diagnostics`](#structfield.diagnostics) |
    /// | `ROUTERS_MATCH_PARALLEL` | [`parallel`](#structfield.parallel) |
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenv::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }

        let defaults = MatchOptions::default();
        let options = MatchOptions {
            candidates: read(ENV_CANDIDATES)?.unwrap_or(defaults.candidates),
            search_distance: read(ENV_SEARCH_DISTANCE)?.unwrap_or(defaults.search_distance),
            sigma_z: read(ENV_SIGMA_Z)?.unwrap_or(defaults.sigma_z),
            min_beta: read(ENV_MIN_BETA)?.unwrap_or(defaults.min_beta),
            fallback_beta: read(ENV_FALLBACK_BETA)?.unwrap_or(defaults.fallback_beta),
            diagnostics: read(ENV_DIAGNOSTICS)?.unwrap_or(defaults.diagnostics),
            parallel: read(ENV_PARALLEL)?.unwrap_or(defaults.parallel),
        };

        options.validate()?;
        Ok(options)
    }

    pub fn with_candidates(self, candidates: usize) -> Self {
        MatchOptions { candidates, ..self }
    }

    pub fn with_search_distance(self, search_distance: f64) -> Self {
        MatchOptions {
            search_distance,
            ..self
        }
    }

    pub fn with_sigma_z(self, sigma_z: f64) -> Self {
        MatchOptions { sigma_z, ..self }
    }

    pub fn with_min_beta(self, min_beta: f64) -> Self {
        MatchOptions { min_beta, ..self }
    }

    pub fn with_diagnostics(self, diagnostics: bool) -> Self {
        MatchOptions {
            diagnostics,
            ..self
        }
    }

    pub fn with_parallel(self, parallel: bool) -> Self {
        MatchOptions { parallel, ..self }
    }

    /// Checks the options describe a solvable model.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.candidates == 0 {
            return Err(ConfigError::NoCandidates);
        }

        if !(self.min_beta.is_finite() && self.min_beta >= 0.0) {
            return Err(ConfigError::Negative {
                field: "min_beta",
                value: self.min_beta,
            });
        }

        [
            ("search_distance", self.search_distance),
            ("sigma_z", self.sigma_z),
            ("fallback_beta", self.fallback_beta),
        ]
        .into_iter()
        .try_for_each(|(field, value)| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::NonPositive { field, value })
            }
        })
    }
}

fn read<T: FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Unparsable { key, value }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let options = MatchOptions::default();

        assert_eq!(options.candidates, 10);
        assert_eq!(options.sigma_z, 4.07);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn rejects_zero_candidates() {
        let options = MatchOptions::default().with_candidates(0);
        assert_eq!(options.validate(), Err(ConfigError::NoCandidates));
    }

    #[test]
    fn rejects_non_positive_parameters() {
        let options = MatchOptions::default().with_sigma_z(0.0);
        assert!(matches!(
            options.validate(),
            Err(ConfigError::NonPositive {
                field: "sigma_z",
                ..
            })
        ));

        let options = MatchOptions::default().with_min_beta(f64::NAN);
        assert!(options.validate().is_err());

        let options = MatchOptions::default().with_min_beta(-1.0);
        assert!(matches!(
            options.validate(),
            Err(ConfigError::Negative {
                field: "min_beta",
                ..
            })
        ));
    }

    #[test]
    fn beta_is_unbounded_by_default() {
        let options = MatchOptions::default();

        assert_eq!(options.min_beta, 0.0);
        assert!(options.with_min_beta(0.0).validate().is_ok());
    }

    #[test]
    fn reads_unparsable_value_as_error() {
        // SAFETY: The variable is unique to this test.
        unsafe { env::set_var("ROUTERS_MATCH_TEST_UNPARSABLE", "ten") };

        let value = read::<usize>("ROUTERS_MATCH_TEST_UNPARSABLE");
        assert!(matches!(value, Err(ConfigError::Unparsable { .. })));

        let missing = read::<usize>("ROUTERS_MATCH_TEST_MISSING");
        assert_eq!(missing, Ok(None));
    }
}
