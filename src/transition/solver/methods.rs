use crate::transition::*;

/// The most likely sequence of candidates through a [`Trellis`].
#[derive(Clone, Debug)]
pub struct CollapsedPath {
    /// The base-2 log probability of the sequence.
    ///
    /// This value is not actionable by the consumer, but indicative of
    /// how confident the model is in the chosen sequence.
    pub score: f64,

    /// One candidate index per timestamp, in chronological order.
    pub route: Vec<usize>,

    /// The solved trellis the route was read from.
    pub trellis: Trellis,
}

/// The outcome of decoding a [`Model`].
#[derive(Clone, Debug)]
pub enum Decoding {
    Solved(CollapsedPath),
    Unsolvable(NoMatchReason),
}

impl Decoding {
    pub fn solved(self) -> Option<CollapsedPath> {
        match self {
            Decoding::Solved(path) => Some(path),
            Decoding::Unsolvable(_) => None,
        }
    }
}

/// Defines a structure which can decode a [`Model`] into its most
/// likely sequence of candidates.
///
/// Functionality is implemented using the [`Solver::solve`] method.
pub trait Solver {
    /// Finds the maximum-likelihood sequence through the model.
    ///
    /// A model without any viable sequence is not an error, but
    /// [`Decoding::Unsolvable`] with the reason decoding stopped.
    fn solve<N, E, T>(&self, model: &Model<N, E, T>) -> Decoding
    where
        N: Phantom,
        E: EmissionStrategy,
        T: TransitionStrategy;
}
