use crate::geo::Coordinate;
use crate::graph::{Match, Route, Scan};
use crate::transition::{MatchError, MatchOutcome, Matcher, Phantom};
use crate::MatchOptions;

impl<G, N> Match<N> for G
where
    G: Scan<N> + Route<N> + Sync,
    N: Phantom,
{
    fn match_with(
        &self,
        trace: &[Coordinate],
        options: MatchOptions,
    ) -> Result<MatchOutcome<N>, MatchError> {
        Matcher::new(self, options).r#match(trace)
    }
}
