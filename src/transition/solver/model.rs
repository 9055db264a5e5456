use crate::geo::Coordinate;
use crate::transition::*;

/// The hidden markov model of a single request.
///
/// Binds the candidate layers of a trace to the costing strategies, the
/// estimated [`Parameters`] and the precomputed [`DistanceTable`]. Every
/// score is base-2 logarithmic, with negative infinity marking an
/// impossible state or move.
pub struct Model<'a, N, E, T>
where
    N: Phantom,
    E: EmissionStrategy,
    T: TransitionStrategy,
{
    pub candidates: &'a CandidateLists<N>,
    pub distances: &'a DistanceTable<N>,
    pub costing: &'a CostingStrategies<E, T>,
    pub parameters: Parameters,

    /// Great circle distance between observation `t` and `t + 1`.
    segments: Vec<f64>,
}

impl<'a, N, E, T> Model<'a, N, E, T>
where
    N: Phantom,
    E: EmissionStrategy,
    T: TransitionStrategy,
{
    pub fn new(
        trace: &[Coordinate],
        candidates: &'a CandidateLists<N>,
        distances: &'a DistanceTable<N>,
        costing: &'a CostingStrategies<E, T>,
        parameters: Parameters,
    ) -> Result<Self, MatchError> {
        if trace.len() != candidates.timestamps() {
            return Err(MatchError::MismatchedLayers {
                observations: trace.len(),
                layers: candidates.timestamps(),
            });
        }

        let segments = trace
            .windows(2)
            .map(|pair| pair[0].distance(&pair[1]))
            .collect();

        Ok(Model {
            candidates,
            distances,
            costing,
            parameters,
            segments,
        })
    }

    pub fn timestamps(&self) -> usize {
        self.candidates.timestamps()
    }

    pub fn state_size(&self) -> usize {
        self.candidates.state_size()
    }

    /// The emission score of candidate `k` at timestamp `t`.
    #[inline]
    pub fn emission(&self, t: usize, k: usize) -> f64 {
        match self.candidates.candidate(t, k) {
            Some(candidate) => self
                .costing
                .emission(EmissionContext::new(candidate.distance, &self.parameters)),
            None => f64::NEG_INFINITY,
        }
    }

    /// The transition score from candidate `from` at `t - 1` to
    /// candidate `to` at `t`.
    #[inline]
    pub fn transition(&self, t: usize, from: usize, to: usize) -> f64 {
        let Some(great_circle) = t.checked_sub(1).and_then(|step| self.segments.get(step)) else {
            return f64::NEG_INFINITY;
        };

        let (Some(source), Some(target)) = (
            self.candidates.candidate(t - 1, from),
            self.candidates.candidate(t, to),
        ) else {
            return f64::NEG_INFINITY;
        };

        let network = self.distances.distance(&source.node, &target.node);
        self.costing.transition(TransitionContext::new(
            *great_circle,
            network,
            &self.parameters,
        ))
    }

    /// Scores a complete sequence of candidate indices, one per timestamp.
    ///
    /// Terms accumulate in the same order as the decoder, so scoring a
    /// decoded path reproduces its terminal score exactly.
    pub fn score(&self, path: &[usize]) -> f64 {
        let Some((&first, _)) = path.split_first() else {
            return f64::NEG_INFINITY;
        };

        if path.len() != self.timestamps() {
            return f64::NEG_INFINITY;
        }

        path.windows(2)
            .enumerate()
            .fold(self.emission(0, first), |score, (step, pair)| {
                let t = step + 1;
                (score + self.transition(t, pair[0], pair[1])) + self.emission(t, pair[1])
            })
    }
}
