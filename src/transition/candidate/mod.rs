//! Candidates are the projections of an observation onto the network.
//!
//! Each observation resolves to a [`CandidateList`] of exactly `K` entries,
//! collected into [`CandidateLists`] which form the layers of the trellis.

#[doc(hidden)]
pub mod entry;
#[doc(hidden)]
pub mod list;

#[doc(inline)]
pub use entry::*;
#[doc(inline)]
pub use list::*;
