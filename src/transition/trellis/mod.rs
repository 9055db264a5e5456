//! The dynamic-programming table of the decoder.
//!
//! A [`Trellis`] is a flat arena of `K × T` [`Cell`]s, addressed by
//! `(timestamp, candidate)`. Backpointers are plain candidate indices into
//! the previous row, so the whole table can be serialized and inspected.

#[doc(hidden)]
pub mod table;

#[doc(inline)]
pub use table::*;
