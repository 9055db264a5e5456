use crate::config::MatchOptions;
use crate::geo::Coordinate;
use crate::transition::{CandidateLists, DistanceTable, Parameters, Phantom};

use itertools::Itertools;
use log::{debug, warn};
use serde::Serialize;
use std::f64::consts::LN_2;

/// The representative delta between two consecutive observations.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StepDelta {
    /// Great circle distance between the two observations.
    pub great_circle: f64,
    /// Median network distance over every reachable candidate pair.
    pub median: Option<f64>,
    /// Mean network distance over every reachable candidate pair.
    pub mean: Option<f64>,
    /// `|great_circle - median|`, or `None` if no pair was reachable.
    pub delta: Option<f64>,
}

impl StepDelta {
    /// Summarises the network distances of one step against the
    /// great circle distance of its observations.
    ///
    /// Unreachable pairs are excluded, they carry no information
    /// about the scale of the trace.
    pub fn new(great_circle: f64, distances: impl IntoIterator<Item = Option<f64>>) -> Self {
        let mut reachable = distances
            .into_iter()
            .flatten()
            .filter(|distance| distance.is_finite())
            .collect_vec();

        let mean = match reachable.len() {
            0 => None,
            len => Some(reachable.iter().sum::<f64>() / len as f64),
        };

        let median = median(&mut reachable);

        StepDelta {
            great_circle,
            median,
            mean,
            delta: median.map(|median| (great_circle - median).abs()),
        }
    }
}

/// The upper median of `values`, reordering them in place.
///
/// For an even count this is the greater of the two middle values,
/// the element at `len / 2` once ordered.
pub fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let middle = values.len() / 2;
    let (_, median, _) = values.select_nth_unstable_by(middle, f64::total_cmp);
    Some(*median)
}

/// Computes the [`StepDelta`] of each consecutive pair of observations.
pub fn step_deltas<N>(
    trace: &[Coordinate],
    candidates: &CandidateLists<N>,
    distances: &DistanceTable<N>,
) -> Vec<StepDelta>
where
    N: Phantom,
{
    trace
        .iter()
        .tuple_windows()
        .zip(candidates.layers().iter().tuple_windows())
        .map(|((from, to), (sources, targets))| {
            let pairwise = sources
                .iter()
                .cartesian_product(targets.iter())
                .map(|(source, target)| distances.distance(&source.node, &target.node));

            StepDelta::new(from.distance(to), pairwise)
        })
        .collect()
}

/// Estimates the transition scale, `β`, from the deltas of a trace.
///
/// ```math
/// β = median(deltas) / ln(2)
/// ```
///
/// The estimate is bounded below by [`MatchOptions::min_beta`], which is
/// unbounded by default. A zero median would collapse the transition model,
/// so it uses [`MatchOptions::fallback_beta`], as does a trace without any
/// measurable delta.
pub fn estimate_beta(steps: &[StepDelta], options: &MatchOptions) -> f64 {
    let mut deltas = steps.iter().filter_map(|step| step.delta).collect_vec();

    match median(&mut deltas) {
        Some(median) if median > 0.0 => {
            let beta = (median / LN_2).max(options.min_beta);
            debug!("Estimated beta={beta} from median delta {median}");
            beta
        }
        Some(_) => {
            debug!(
                "Median delta is zero, using fallback beta={}",
                options.fallback_beta
            );
            options.fallback_beta
        }
        None => {
            warn!(
                "No measurable deltas across {} steps, using fallback beta={}",
                steps.len(),
                options.fallback_beta
            );
            options.fallback_beta
        }
    }
}

impl Parameters {
    /// Derives the parameters of a single request.
    ///
    /// Returns the per-step deltas alongside, for diagnostics.
    pub fn estimate<N>(
        trace: &[Coordinate],
        candidates: &CandidateLists<N>,
        distances: &DistanceTable<N>,
        options: &MatchOptions,
    ) -> (Parameters, Vec<StepDelta>)
    where
        N: Phantom,
    {
        let steps = step_deltas(trace, candidates, distances);
        let beta = estimate_beta(&steps, options);

        (Parameters::new(options.sigma_z, beta), steps)
    }
}
