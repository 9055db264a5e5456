//! Geographic primitives for the matcher.
//!
//! Observations arrive as fixed-precision [`Coordinate`]s, which are
//! validated before any matching begins and converted into [`geo::Point`]s
//! for distance calculations.

#[doc(hidden)]
pub mod coord;
#[doc(hidden)]
pub mod error;

#[doc(inline)]
pub use coord::*;
#[doc(inline)]
pub use error::GeoError;
