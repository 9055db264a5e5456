#[doc(hidden)]
pub mod methods;
#[doc(hidden)]
pub mod model;
#[doc(hidden)]
pub mod viterbi;

#[doc(inline)]
pub use methods::*;
#[doc(inline)]
pub use model::*;
#[doc(inline)]
pub use viterbi::*;
