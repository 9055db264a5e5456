use crate::transition::{Candidate, CandidateList, Parameters, Phantom, StepDelta};

use geo::LineString;
use serde::Serialize;
use strum::Display;
use wkt::ToWkt;

/// The outcome of matching a trace.
///
/// A trace the model cannot explain is not an error, it is a
/// [`NoMatch`], distinguishable from any successful match.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MatchOutcome<N>
where
    N: Phantom,
{
    Matched(MatchResult<N>),
    NoMatch(NoMatch<N>),
}

impl<N> MatchOutcome<N>
where
    N: Phantom,
{
    pub fn is_matched(&self) -> bool {
        matches!(self, MatchOutcome::Matched(_))
    }

    pub fn matched(self) -> Option<MatchResult<N>> {
        match self {
            MatchOutcome::Matched(result) => Some(result),
            MatchOutcome::NoMatch(_) => None,
        }
    }

    pub fn no_match(self) -> Option<NoMatch<N>> {
        match self {
            MatchOutcome::Matched(_) => None,
            MatchOutcome::NoMatch(no_match) => Some(no_match),
        }
    }
}

/// A successfully matched trace.
#[derive(Clone, Debug, Serialize)]
pub struct MatchResult<N>
where
    N: Phantom,
{
    /// The base-2 log probability of the matched sequence.
    pub score: f64,

    /// The parameters the trace was decoded with.
    pub parameters: Parameters,

    /// One matched candidate per observation, in trace order.
    pub matched: Vec<MatchedPoint<N>>,

    /// The route through every matched candidate.
    pub route: MatchedRoute,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<Diagnostics<N>>,
}

impl<N> MatchResult<N>
where
    N: Phantom,
{
    /// The chosen candidate index of every observation.
    pub fn indices(&self) -> Vec<usize> {
        self.matched.iter().map(|point| point.candidate_index).collect()
    }

    /// The phantom node of every observation.
    pub fn nodes(&self) -> Vec<N> {
        self.matched.iter().map(|point| point.candidate.node).collect()
    }
}

/// The candidate chosen for a single observation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MatchedPoint<N>
where
    N: Phantom,
{
    /// The index of the observation in the trace.
    pub index: usize,

    /// The index of the candidate within the observation's list.
    pub candidate_index: usize,

    pub candidate: Candidate<N>,

    /// A bounded `[0, 1]` confidence the observation belongs to the
    /// candidate, from [`distance_to_probability`](crate::transition::distance_to_probability).
    pub confidence: f64,
}

/// The route assembled between the matched candidates.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchedRoute {
    /// The summed routing cost of every leg.
    pub cost: f64,
    /// The driven distance, in meters.
    pub distance: f64,
    pub geometry: LineString,
}

impl MatchedRoute {
    /// The route geometry as well-known text.
    pub fn wkt(&self) -> String {
        self.geometry.wkt_string()
    }
}

/// Raw decoder inputs, attached when
/// [`MatchOptions::diagnostics`](crate::MatchOptions::diagnostics) is set.
#[derive(Clone, Debug, Serialize)]
pub struct Diagnostics<N>
where
    N: Phantom,
{
    /// Every candidate list, with distances, in trace order.
    pub candidates: Vec<CandidateList<N>>,
    /// The representative delta of every step.
    pub steps: Vec<StepDelta>,
}

/// Why a trace could not be matched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NoMatchReason {
    /// Every state of the observation at `index` became impossible.
    EmptyLayer { index: usize },
    /// The final observation has no possible state.
    NoTerminalState,
}

/// A trace no sequence of candidates can explain.
#[derive(Clone, Debug, Serialize)]
pub struct NoMatch<N>
where
    N: Phantom,
{
    #[serde(flatten)]
    pub reason: NoMatchReason,
    pub parameters: Parameters,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<Diagnostics<N>>,
}
