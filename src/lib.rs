#![doc = include_str!("../README.md")]

#[cfg(feature = "mimalloc")]
use mimalloc::MiMalloc;
#[cfg_attr(feature = "mimalloc", global_allocator)]
#[cfg(feature = "mimalloc")]
static GLOBAL: MiMalloc = MiMalloc;

pub mod config;
pub mod geo;
pub mod graph;
pub mod transition;
pub mod util;

#[doc(inline)]
pub use crate::config::MatchOptions;
#[doc(inline)]
pub use crate::geo::Coordinate;
#[doc(inline)]
pub use crate::graph::{Graph, Match, Route, Scan};
#[doc(inline)]
pub use crate::transition::{MatchOutcome, Matcher};

use thiserror::Error;

/// Any error raised by the crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Geo(crate::geo::GeoError),

    #[error(transparent)]
    Graph(crate::graph::GraphError),

    #[error(transparent)]
    Config(crate::config::ConfigError),

    #[error(transparent)]
    Match(crate::transition::MatchError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl_err!(crate::geo::GeoError, Geo);
impl_err!(crate::graph::GraphError, Graph);
impl_err!(crate::config::ConfigError, Config);
impl_err!(crate::transition::MatchError, Match);
