//! A Hidden-Markov-Model (HMM) matching
//! transition module that allows for
//! matching raw data to an underlying
//! network.
//!
//! Each observation of a trace resolves to a fixed number of
//! [candidates](CandidateList), the hidden states of the model. Candidates
//! are scored by the [costing](costing) strategies, decoded through a
//! [`Trellis`] by the [`ViterbiSolver`], and assembled into a route by
//! the [`Matcher`].

pub mod candidate;
pub mod costing;
pub mod matcher;
pub mod parameters;
pub mod primitives;
pub mod result;
pub mod solver;
pub mod trellis;

// Re-Exports
#[doc(inline)]
pub use candidate::*;
#[doc(inline)]
pub use costing::*;
#[doc(inline)]
pub use parameters::*;
#[doc(inline)]
pub use primitives::*;
#[doc(inline)]
pub use solver::*;
#[doc(inline)]
pub use trellis::*;

pub use matcher::*;
pub use result::*;
