//! The road network, as the matcher sees it.
//!
//! Matching consumes the network only through two traits: [`Scan`], which
//! finds the candidates of an observation, and [`Route`], which measures and
//! draws the path between two of them. Anything implementing both can be
//! matched against through [`Match`].
//!
//! [`Graph`] is an in-memory network implementing both, over a petgraph
//! [`DiGraphMap`](petgraph::prelude::DiGraphMap) and an rstar
//! [`RTree`](rstar::RTree) of its edges.

#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod item;
pub mod traits;

#[doc(inline)]
pub use error::GraphError;
#[doc(inline)]
pub use item::*;
#[doc(inline)]
pub use traits::*;
