use crate::transition::*;

pub trait TransitionStrategy: for<'a> Strategy<TransitionContext<'a>> {}
impl<T> TransitionStrategy for T where T: for<'a> Strategy<TransitionContext<'a>> {}

#[derive(Clone, Copy, Debug)]
pub struct TransitionContext<'a> {
    /// The great circle distance between the two raw observations.
    pub great_circle: f64,

    /// The network (shortest-path) distance between the two candidates.
    ///
    /// This is `None` if the target is unreachable from the source.
    pub network: Option<f64>,

    /// The model parameters of the current request.
    pub parameters: &'a Parameters,
}

impl<'a> TransitionContext<'a> {
    pub fn new(great_circle: f64, network: Option<f64>, parameters: &'a Parameters) -> Self {
        Self {
            great_circle,
            network,
            parameters,
        }
    }

    /// The discrepancy between the distance "as the crow flies" and the
    /// distance "as actually driven".
    ///
    /// ```math
    /// delta = |great_circle - network|
    /// ```
    ///
    /// An unreachable candidate pair has an infinite delta.
    #[inline]
    pub fn delta(&self) -> f64 {
        self.network
            .map_or(f64::INFINITY, |network| (self.great_circle - network).abs())
    }
}
