use crate::transition::{Candidate, MatchError, Phantom};

use serde::Serialize;
use std::ops::Deref;

/// All candidates of one observation, closest first.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CandidateList<N>
where
    N: Phantom,
{
    candidates: Vec<Candidate<N>>,
}

impl<N> CandidateList<N>
where
    N: Phantom,
{
    pub fn new(candidates: Vec<Candidate<N>>) -> Self {
        Self { candidates }
    }

    pub fn into_inner(self) -> Vec<Candidate<N>> {
        self.candidates
    }
}

impl<N> FromIterator<Candidate<N>> for CandidateList<N>
where
    N: Phantom,
{
    fn from_iter<I: IntoIterator<Item = Candidate<N>>>(iter: I) -> Self {
        CandidateList::new(iter.into_iter().collect())
    }
}

impl<N> Deref for CandidateList<N>
where
    N: Phantom,
{
    type Target = [Candidate<N>];

    fn deref(&self) -> &Self::Target {
        &self.candidates
    }
}

/// The candidate lists of an entire trace, one per observation.
///
/// Every list holds exactly [`state_size`](CandidateLists::state_size)
/// candidates. This is checked on construction, so the decoder may index
/// any `(timestamp, candidate)` pair within bounds.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CandidateLists<N>
where
    N: Phantom,
{
    layers: Vec<CandidateList<N>>,
    state_size: usize,
}

impl<N> CandidateLists<N>
where
    N: Phantom,
{
    /// Validates that every list holds exactly `state_size` candidates.
    ///
    /// A list without any candidates is reported as
    /// [`NoCandidates`](MatchError::NoCandidates), a short list as
    /// [`InsufficientCandidates`](MatchError::InsufficientCandidates).
    /// Lists are never padded.
    pub fn new(layers: Vec<CandidateList<N>>, state_size: usize) -> Result<Self, MatchError> {
        for (index, layer) in layers.iter().enumerate() {
            check_layer(index, layer, state_size)?;
        }

        Ok(Self { layers, state_size })
    }

    /// The fixed cardinality, `K`, of every list.
    pub fn state_size(&self) -> usize {
        self.state_size
    }

    /// The number of observations, `T`.
    pub fn timestamps(&self) -> usize {
        self.layers.len()
    }

    pub fn layers(&self) -> &[CandidateList<N>] {
        &self.layers
    }

    /// The candidate `k` of observation `t`.
    #[inline]
    pub fn candidate(&self, t: usize, k: usize) -> Option<&Candidate<N>> {
        self.layers.get(t)?.get(k)
    }

    pub fn into_inner(self) -> Vec<CandidateList<N>> {
        self.layers
    }
}

/// Checks a single list against the required cardinality.
pub(crate) fn check_layer<N: Phantom>(
    index: usize,
    layer: &CandidateList<N>,
    required: usize,
) -> Result<(), MatchError> {
    match layer.len() {
        0 => Err(MatchError::NoCandidates { index }),
        found if found < required => Err(MatchError::InsufficientCandidates {
            index,
            found,
            required,
        }),
        found if found > required => Err(MatchError::ExcessCandidates {
            index,
            found,
            required,
        }),
        _ => Ok(()),
    }
}
