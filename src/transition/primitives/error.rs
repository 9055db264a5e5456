use crate::config::ConfigError;
use crate::geo::GeoError;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    #[error("at least two points are required to match, {given} given")]
    TooFewPoints { given: usize },

    #[error("point {index} is not a valid coordinate: {source}")]
    InvalidCoordinate { index: usize, source: GeoError },

    #[error("invalid options: {0}")]
    InvalidOptions(#[from] ConfigError),

    #[error("no candidates found for point {index}")]
    NoCandidates { index: usize },

    #[error("point {index} has {found} candidates, {required} required")]
    InsufficientCandidates {
        index: usize,
        found: usize,
        required: usize,
    },

    #[error("point {index} has {found} candidates, at most {required} expected")]
    ExcessCandidates {
        index: usize,
        found: usize,
        required: usize,
    },

    #[error("{observations} points were given for {layers} candidate lists")]
    MismatchedLayers { observations: usize, layers: usize },

    #[error("point {index} has no candidate at position {candidate}")]
    UnknownCandidate { index: usize, candidate: usize },

    #[error("could not route between matched points {from} and {to}")]
    RouteAssembly { from: usize, to: usize },
}
