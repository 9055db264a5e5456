use crate::config::MatchOptions;
use crate::geo::Coordinate;
use crate::graph::{Route, Scan};
use crate::transition::*;

use geo::{Coord, LineString};
use log::{debug, info, warn};
use measure_time::debug_time;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use std::marker::PhantomData;

#[cfg(feature = "tracing")]
use tracing::Level;

/// Matches traces onto a map, one request at a time.
///
/// The map is borrowed read-only, so one map may serve any number of
/// matchers, on any number of threads. All per-request state (candidate
/// lists, distances, parameters and the trellis) is owned by the call
/// to [`Matcher::r#match`] and dropped with it.
///
/// ```rust
/// use routers_match::{Coordinate, Graph, MatchOptions, Matcher};
/// use routers_match::graph::NodeIx;
///
/// let mut graph = Graph::default();
/// graph.insert_node(NodeIx(1), Coordinate::from_degree(0.0, 0.000).unwrap());
/// graph.insert_node(NodeIx(2), Coordinate::from_degree(0.0, 0.005).unwrap());
/// graph.insert_way(&[NodeIx(1), NodeIx(2)], false).unwrap();
///
/// let options = MatchOptions::default().with_candidates(1);
/// let matcher = Matcher::new(&graph, options);
///
/// let trace = [
///     Coordinate::from_degree(0.00002, 0.001).unwrap(),
///     Coordinate::from_degree(0.00002, 0.003).unwrap(),
/// ];
///
/// let outcome = matcher.r#match(&trace).unwrap();
/// assert!(outcome.is_matched());
/// ```
pub struct Matcher<'a, G, N, E = GaussianEmission, T = ExponentialTransition>
where
    G: Scan<N> + Route<N> + Sync,
    N: Phantom,
    E: EmissionStrategy,
    T: TransitionStrategy,
{
    map: &'a G,
    costing: CostingStrategies<E, T>,
    options: MatchOptions,

    _node: PhantomData<N>,
}

impl<'a, G, N> Matcher<'a, G, N>
where
    G: Scan<N> + Route<N> + Sync,
    N: Phantom,
{
    /// Creates a matcher with the default costing strategies.
    pub fn new(map: &'a G, options: MatchOptions) -> Self {
        Matcher::with_costing(map, CostingStrategies::default(), options)
    }
}

impl<'a, G, N, E, T> Matcher<'a, G, N, E, T>
where
    G: Scan<N> + Route<N> + Sync,
    N: Phantom,
    E: EmissionStrategy,
    T: TransitionStrategy,
{
    pub fn with_costing(map: &'a G, costing: CostingStrategies<E, T>, options: MatchOptions) -> Self {
        Matcher {
            map,
            costing,
            options,
            _node: PhantomData,
        }
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Matches an ordered trace of observations onto the map.
    ///
    /// Malformed input (invalid options, fewer than two observations or
    /// an invalid coordinate) is rejected before the map is consulted.
    /// A well-formed trace which no sequence of candidates can explain
    /// yields [`MatchOutcome::NoMatch`].
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, level = Level::INFO))]
    pub fn r#match(&self, trace: &[Coordinate]) -> Result<MatchOutcome<N>, MatchError> {
        self.validate(trace)?;
        info!("Finding matched route for {} positions", trace.len());
        debug_time!("match of {} positions", trace.len());

        let candidates = self.candidates(trace)?;
        let distances = {
            debug_time!("distance batch");
            DistanceTable::populate(self.map, &candidates, self.options.parallel)
        };
        debug!("Populated {distances:?}");

        let (parameters, steps) = Parameters::estimate(trace, &candidates, &distances, &self.options);
        let model = Model::new(trace, &candidates, &distances, &self.costing, parameters)?;

        let decoding = {
            debug_time!("viterbi decode");
            ViterbiSolver.solve(&model)
        };

        let diagnostics = self.options.diagnostics.then(|| Diagnostics {
            candidates: candidates.layers().to_vec(),
            steps,
        });

        let path = match decoding {
            Decoding::Solved(path) => path,
            Decoding::Unsolvable(reason) => {
                warn!("No viable path through {} positions: {reason}", trace.len());
                return Ok(MatchOutcome::NoMatch(NoMatch {
                    reason,
                    parameters,
                    diagnostics,
                }));
            }
        };

        let matched = Self::reconstruct(&candidates, &path.route)?;
        let route = self.assemble(&matched)?;

        Ok(MatchOutcome::Matched(MatchResult {
            score: path.score,
            parameters,
            matched,
            route,
            diagnostics,
        }))
    }

    fn validate(&self, trace: &[Coordinate]) -> Result<(), MatchError> {
        self.options.validate()?;

        if trace.len() < 2 {
            return Err(MatchError::TooFewPoints { given: trace.len() });
        }

        trace
            .iter()
            .enumerate()
            .try_for_each(|(index, coordinate)| {
                coordinate
                    .validate()
                    .map_err(|source| MatchError::InvalidCoordinate { index, source })
            })
    }

    /// Looks up the candidates of every observation.
    ///
    /// Lists are reassembled in trace order, and checked in that order,
    /// so the first offending observation is the one reported.
    fn candidates(&self, trace: &[Coordinate]) -> Result<CandidateLists<N>, MatchError> {
        debug_time!("candidate lookup");
        let (map, size, radius) = (self.map, self.options.candidates, self.options.search_distance);

        let lookup = |coordinate: &Coordinate| -> CandidateList<N> {
            map.find_candidates(coordinate, size, radius)
                .into_iter()
                .collect()
        };

        let layers = if self.options.parallel {
            trace.par_iter().map(lookup).collect::<Vec<_>>()
        } else {
            trace.iter().map(lookup).collect::<Vec<_>>()
        };

        CandidateLists::new(layers, size)
    }

    /// Resolves a decoded sequence of candidate indices.
    pub(crate) fn reconstruct(
        candidates: &CandidateLists<N>,
        route: &[usize],
    ) -> Result<Vec<MatchedPoint<N>>, MatchError> {
        route
            .iter()
            .enumerate()
            .map(|(index, &candidate_index)| {
                let candidate = candidates.candidate(index, candidate_index).ok_or(
                    MatchError::UnknownCandidate {
                        index,
                        candidate: candidate_index,
                    },
                )?;

                Ok(MatchedPoint {
                    index,
                    candidate_index,
                    candidate: *candidate,
                    confidence: distance_to_probability(candidate.distance),
                })
            })
            .collect()
    }

    /// Routes between every consecutive pair of matched candidates.
    fn assemble(&self, matched: &[MatchedPoint<N>]) -> Result<MatchedRoute, MatchError> {
        debug_time!("route assembly");

        let legs = matched
            .windows(2)
            .map(|pair| {
                let (from, to) = (&pair[0], &pair[1]);
                self.map
                    .route(&from.candidate.node, &to.candidate.node)
                    .ok_or(MatchError::RouteAssembly {
                        from: from.index,
                        to: to.index,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut coordinates: Vec<Coord> = Vec::new();
        for coordinate in legs.iter().flat_map(|leg| leg.geometry.coords()) {
            if coordinates.last() != Some(coordinate) {
                coordinates.push(*coordinate);
            }
        }

        Ok(MatchedRoute {
            cost: legs.iter().map(|leg| leg.cost).sum(),
            distance: legs.iter().map(|leg| leg.distance).sum(),
            geometry: LineString::new(coordinates),
        })
    }
}
