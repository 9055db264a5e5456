pub mod error;
pub use error::*;

pub mod cache;
#[doc(inline)]
pub use cache::*;
