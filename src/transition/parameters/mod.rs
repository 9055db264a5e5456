//! Per-request model parameters.
//!
//! The emission noise `σ` is a deployment constant, read from
//! [`MatchOptions`](crate::MatchOptions). The transition scale `β` is
//! estimated from each trace, and lives only as long as its request.

#[doc(hidden)]
pub mod estimator;
#[cfg(test)]
mod test;

#[doc(inline)]
pub use estimator::*;

use serde::{Deserialize, Serialize};

/// The parameters of the emission and transition models for one request.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Emission noise, `σ`, in meters.
    pub sigma_z: f64,
    /// Transition scale, `β`, in meters.
    pub beta: f64,
}

impl Parameters {
    pub const fn new(sigma_z: f64, beta: f64) -> Self {
        Self { sigma_z, beta }
    }
}
