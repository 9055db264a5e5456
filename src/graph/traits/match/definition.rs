use crate::MatchOptions;
use crate::geo::Coordinate;
use crate::transition::{MatchError, MatchOutcome, Phantom};

pub trait Match<N>
where
    N: Phantom,
{
    /// Matches an ordered trace of coordinates against the map,
    /// with the default [options](MatchOptions).
    ///
    /// Matching involves the use of a hidden markov model
    /// using the [`Matcher`](crate::Matcher) to collapse
    /// the given input onto the map, finding the most
    /// likely candidate for each input value.
    fn r#match(&self, trace: &[Coordinate]) -> Result<MatchOutcome<N>, MatchError> {
        self.match_with(trace, MatchOptions::default())
    }

    /// Matches an ordered trace of coordinates against the map.
    fn match_with(
        &self,
        trace: &[Coordinate],
        options: MatchOptions,
    ) -> Result<MatchOutcome<N>, MatchError>;
}
