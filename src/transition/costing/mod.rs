//! You may override individual costing strategies
//! in order to apply custom functionality to the
//! decoder. See the [`Strategy`] trait.
//!
//! ## Structure
//! Strategies are joined onto the aggregate [`CostingStrategies`]
//! structure, which is then supplied to the [`Matcher`](crate::Matcher).
//!
//! ```rust
//! use routers_match::transition::CostingStrategies;
//!
//! // Create default strategies, a gaussian emission
//! // and an exponential transition model.
//! let costing = CostingStrategies::default();
//! ```
//!
//! ### Creating your own strategy
//!
//! Implement [`Strategy`] for your structure, with the context of the
//! model you need to override. The higher-order traits, like
//! [`TransitionStrategy`], are auto-derived for all which implement
//! [`Strategy<TransitionContext>`].
//!
//! ```rust
//! use routers_match::transition::{Strategy, EmissionContext};
//!
//! struct Uniform;
//!
//! impl<'a> Strategy<EmissionContext<'a>> for Uniform {
//!     fn calculate(&self, _: EmissionContext<'a>) -> Option<f64> {
//!         Some(1.0)
//!     }
//! }
//! ```
//!
//! ### Probability domain
//! Strategies return plain probabilities (or relative densities). The
//! decoder only ever consumes their base-2 logarithm, through
//! [`Strategy::log_probability`], so long traces never underflow. A
//! strategy whose density itself underflows far from its peak overrides
//! [`Strategy::log_calculate`] to stay finite there.
//!
//! ### Default Strategies:
//! - [`GaussianEmission`]: Emission Model
//! - [`ExponentialTransition`]: Transition Model

#[doc(hidden)]
pub mod default;
#[doc(hidden)]
pub mod emission;
#[doc(hidden)]
pub mod transition;
#[doc(hidden)]
pub mod util;

#[doc(inline)]
pub use default::*;
#[doc(inline)]
pub use emission::*;
#[doc(inline)]
pub use transition::*;
#[doc(inline)]
pub use util::*;
