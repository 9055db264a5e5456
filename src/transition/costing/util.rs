use crate::transition::*;

pub trait Strategy<Ctx> {
    /// The probability (or relative density) of the context.
    ///
    /// Returning `None` marks the context as impossible, which is
    /// equivalent to a probability of zero.
    fn calculate(&self, context: Ctx) -> Option<f64>;

    /// The sanitised probability of the context.
    ///
    /// Any non-finite or non-positive value is treated as zero.
    #[inline(always)]
    fn probability(&self, ctx: Ctx) -> f64 {
        self.calculate(ctx)
            .filter(|value| value.is_finite() && *value > 0.0)
            .unwrap_or(0.0)
    }

    /// The base-2 log of [`calculate`](Strategy::calculate).
    ///
    /// Strategies whose density underflows for plausible contexts should
    /// override this and compute the logarithm directly.
    #[inline]
    fn log_calculate(&self, context: Ctx) -> Option<f64> {
        self.calculate(context).map(f64::log2)
    }

    /// The sanitised base-2 log of the probability of the context.
    ///
    /// Anything other than a finite value yields negative infinity, which
    /// the decoder treats as an impossible state or move.
    #[inline(always)]
    fn log_probability(&self, ctx: Ctx) -> f64 {
        self.log_calculate(ctx)
            .filter(|value| value.is_finite())
            .unwrap_or(f64::NEG_INFINITY)
    }
}

pub trait Costing<Emission, Transition>
where
    Emission: EmissionStrategy,
    Transition: TransitionStrategy,
{
    /// The log2 emission score of a candidate.
    fn emission(&self, context: EmissionContext) -> f64;

    /// The log2 transition score between two candidates.
    fn transition(&self, context: TransitionContext) -> f64;
}

/// An exponential decay, `(1 / β) · e^(-value / β)`.
///
/// For a non-positive or non-finite `beta` the decay is undefined, and zero
/// is returned.
#[inline]
pub fn decay(value: f64, beta: f64) -> f64 {
    if !(beta.is_finite() && beta > 0.0) {
        return 0.0;
    }

    (1.0 / beta) * (-value / beta).exp()
}

/// Translates a distance, in meters, into how likely it is the
/// observation truly belongs to the candidate.
///
/// This is a logistic falloff centred on `35m`, independent of the
/// model parameters, giving a bounded `[0, 1]` confidence for a
/// matched point. Negative distances are never likely.
///
/// ```math
/// confidence(d) = 1 - 1 / (1 + e^((35 - d) / 6))
/// ```
#[inline]
pub fn distance_to_probability(distance: f64) -> f64 {
    if distance < 0.0 {
        return 0.0;
    }

    1.0 - 1.0 / (1.0 + ((-distance + 35.0) / 6.0).exp())
}
