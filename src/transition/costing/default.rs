pub mod emission {
    use crate::transition::*;
    use std::f64::consts::{LN_2, PI};

    /// Calculates the emission probability of a candidate from the
    /// distance to its observation.
    ///
    /// ## Calculation
    ///
    /// A zero-mean gaussian density with standard deviation `σ`
    /// ([`Parameters::sigma_z`]), the typical GPS measurement error.
    ///
    /// ```math
    /// p(d) = (1 / (√(2π) · σ)) · e^(-0.5 · (d / σ)²)
    /// ```
    ///
    /// A distance of zero gives the peak of the density, not `1`. The
    /// value is a relative score for maximum-likelihood comparison only.
    pub struct GaussianEmission;

    impl<'a> Strategy<EmissionContext<'a>> for GaussianEmission {
        fn calculate(&self, context: EmissionContext<'a>) -> Option<f64> {
            Some(emission_probability(
                context.distance,
                context.parameters.sigma_z,
            ))
        }

        fn log_calculate(&self, context: EmissionContext<'a>) -> Option<f64> {
            Some(log_emission_probability(
                context.distance,
                context.parameters.sigma_z,
            ))
        }
    }

    /// The gaussian emission density of `distance` for noise `sigma_z`.
    #[inline]
    pub fn emission_probability(distance: f64, sigma_z: f64) -> f64 {
        (1.0 / ((2.0 * PI).sqrt() * sigma_z)) * (-0.5 * (distance / sigma_z).powi(2)).exp()
    }

    /// The base-2 log of [`emission_probability`], computed without
    /// leaving the log domain.
    ///
    /// ```math
    /// log2 p(d) = -log2(√(2π) · σ) - 0.5 · (d / σ)² / ln(2)
    /// ```
    #[inline]
    pub fn log_emission_probability(distance: f64, sigma_z: f64) -> f64 {
        -((2.0 * PI).sqrt() * sigma_z).log2() - 0.5 * (distance / sigma_z).powi(2) / LN_2
    }
}

pub mod transition {
    use crate::transition::*;
    use std::f64::consts::LN_2;

    /// Calculates the transition probability between two candidates.
    ///
    /// # Calculation
    ///
    /// The larger the discrepancy between the great circle distance of
    /// the observations and the network distance of the candidates, the
    /// less plausible the transition. This is an exponential decay with
    /// scale `β` ([`Parameters::beta`]), estimated once per trace.
    ///
    /// ```math
    /// delta = |great_circle(o_t-1, o_t) - network(c_t-1, c_t)|
    /// p(delta) = (1 / β) · e^(-delta / β)
    /// ```
    pub struct ExponentialTransition;

    impl<'a> Strategy<TransitionContext<'a>> for ExponentialTransition {
        fn calculate(&self, context: TransitionContext<'a>) -> Option<f64> {
            context.network?;
            Some(transition_probability(
                context.delta(),
                context.parameters.beta,
            ))
        }

        fn log_calculate(&self, context: TransitionContext<'a>) -> Option<f64> {
            context.network?;
            Some(log_transition_probability(
                context.delta(),
                context.parameters.beta,
            ))
        }
    }

    /// The exponential transition density of `delta` for scale `beta`.
    #[inline]
    pub fn transition_probability(delta: f64, beta: f64) -> f64 {
        decay(delta, beta)
    }

    /// The base-2 log of [`transition_probability`], computed without
    /// leaving the log domain.
    ///
    /// ```math
    /// log2 p(delta) = -log2(β) - delta / (β · ln(2))
    /// ```
    ///
    /// A degenerate scale is impossible, as with [`decay`].
    #[inline]
    pub fn log_transition_probability(delta: f64, beta: f64) -> f64 {
        if !(beta.is_finite() && beta > 0.0) {
            return f64::NEG_INFINITY;
        }

        -beta.log2() - delta / (beta * LN_2)
    }
}

pub mod costing {
    use super::{ExponentialTransition, GaussianEmission};
    use crate::transition::*;

    pub struct CostingStrategies<E, T>
    where
        E: EmissionStrategy,
        T: TransitionStrategy,
    {
        emission: E,
        transition: T,
    }

    impl<E, T> CostingStrategies<E, T>
    where
        E: EmissionStrategy,
        T: TransitionStrategy,
    {
        pub fn new(emission: E, transition: T) -> Self {
            Self {
                emission,
                transition,
            }
        }
    }

    impl Default for CostingStrategies<GaussianEmission, ExponentialTransition> {
        fn default() -> Self {
            CostingStrategies::new(GaussianEmission, ExponentialTransition)
        }
    }

    impl<E, T> Costing<E, T> for CostingStrategies<E, T>
    where
        E: EmissionStrategy,
        T: TransitionStrategy,
    {
        #[inline]
        fn emission(&self, context: EmissionContext) -> f64 {
            self.emission.log_probability(context)
        }

        #[inline]
        fn transition(&self, context: TransitionContext) -> f64 {
            self.transition.log_probability(context)
        }
    }
}

#[doc(hidden)]
pub use costing::*;
#[doc(hidden)]
pub use emission::*;
#[doc(hidden)]
pub use transition::*;
