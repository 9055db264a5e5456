use crate::graph::Route;
use crate::transition::{CandidateLists, Phantom};

use log::debug;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt::{Debug, Formatter};

/// A per-request table of network distances between candidate pairs.
///
/// Every transition in the trellis needs the network distance between a
/// candidate of one observation and a candidate of the next, `K²` pairs per
/// step. The table is filled once, in a single batch, before parameter
/// estimation and decoding, and both read from it. No pair is queried
/// against the [`Route`] collaborator more than once.
///
/// An unreachable pair is stored as `None`.
pub struct DistanceTable<N>
where
    N: Phantom,
{
    distances: FxHashMap<(N, N), Option<f64>>,
}

impl<N> Debug for DistanceTable<N>
where
    N: Phantom,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let reachable = self.distances.values().filter(|v| v.is_some()).count();
        write!(
            f,
            "DistanceTable {{ pairs: {}, reachable: {reachable} }}",
            self.distances.len()
        )
    }
}

impl<N> Default for DistanceTable<N>
where
    N: Phantom,
{
    fn default() -> Self {
        Self {
            distances: FxHashMap::default(),
        }
    }
}

impl<N> DistanceTable<N>
where
    N: Phantom,
{
    /// Queries the distance of every candidate pair between consecutive
    /// observations.
    ///
    /// Pairs are de-duplicated before any query is made. If `parallel` is
    /// set, the queries fan out over the rayon pool. Results are reassembled
    /// by key, so the table is identical either way.
    pub fn populate<R>(router: &R, candidates: &CandidateLists<N>, parallel: bool) -> Self
    where
        R: Route<N> + Sync,
    {
        let pairs = Self::pairs(candidates);
        debug!("Querying {} distinct candidate pairs", pairs.len());

        let distances = if parallel {
            pairs
                .into_par_iter()
                .map(|(a, b)| ((a, b), router.distance(&a, &b)))
                .collect::<Vec<_>>()
        } else {
            pairs
                .into_iter()
                .map(|(a, b)| ((a, b), router.distance(&a, &b)))
                .collect::<Vec<_>>()
        };

        Self {
            distances: distances.into_iter().collect(),
        }
    }

    /// The distinct `(source, target)` pairs between consecutive layers,
    /// in first-seen order.
    fn pairs(candidates: &CandidateLists<N>) -> Vec<(N, N)> {
        let mut seen = FxHashSet::default();

        candidates
            .layers()
            .windows(2)
            .flat_map(|layers| {
                layers[0].iter().flat_map(move |source| {
                    layers[1].iter().map(move |target| (source.node, target.node))
                })
            })
            .filter(|pair| seen.insert(*pair))
            .collect()
    }

    /// Inserts (or replaces) the distance between a pair.
    pub fn insert(&mut self, source: N, target: N, distance: Option<f64>) {
        self.distances.insert((source, target), distance);
    }

    /// The network distance from `source` to `target`.
    ///
    /// Returns `None` if the pair is unreachable, or was never queried.
    #[inline]
    pub fn distance(&self, source: &N, target: &N) -> Option<f64> {
        self.distances.get(&(*source, *target)).copied().flatten()
    }

    /// The number of distinct pairs held.
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}
