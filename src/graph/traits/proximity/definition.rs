use crate::geo::Coordinate;
use crate::transition::{Candidate, Phantom};

/// Finds the candidate positions of an observation upon a network.
pub trait Scan<N>
where
    N: Phantom,
{
    /// Returns at most `k` candidates within `distance` meters of the
    /// `coordinate`, ordered closest first.
    ///
    /// An empty result signals the coordinate has no nearby network.
    /// The matcher requires exactly `k` candidates for every observation,
    /// and rejects a trace if any list falls short.
    fn find_candidates(&self, coordinate: &Coordinate, k: usize, distance: f64)
    -> Vec<Candidate<N>>;
}
