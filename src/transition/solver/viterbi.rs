use crate::transition::*;

use log::{debug, trace};

/// Decodes a model with the Viterbi algorithm, in log space.
///
/// Each cell `(t, k)` holds the best cumulative score of any sequence
/// ending at candidate `k` of observation `t`:
///
/// ```math
/// score(0, k)  = emission(0, k)
/// score(t, k') = max_k [ score(t-1, k) + transition(k → k') ] + emission(t, k')
/// ```
///
/// Ties resolve to the first maximum encountered, at every cell and at
/// termination, so identical inputs always decode to the same sequence.
#[derive(Clone, Copy, Debug, Default)]
pub struct ViterbiSolver;

impl ViterbiSolver {
    /// The best parent of candidate `to` at timestamp `t`.
    #[inline]
    fn best_parent<N, E, T>(
        model: &Model<N, E, T>,
        previous: &[Cell],
        t: usize,
        to: usize,
    ) -> Option<(usize, f64)>
    where
        N: Phantom,
        E: EmissionStrategy,
        T: TransitionStrategy,
    {
        previous
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_possible())
            .map(|(from, cell)| (from, cell.score + model.transition(t, from, to)))
            .filter(|(_, score)| *score > f64::NEG_INFINITY)
            .fold(None, |best, (from, score)| match best {
                Some((_, current)) if current >= score => best,
                _ => Some((from, score)),
            })
    }
}

impl Solver for ViterbiSolver {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    fn solve<N, E, T>(&self, model: &Model<N, E, T>) -> Decoding
    where
        N: Phantom,
        E: EmissionStrategy,
        T: TransitionStrategy,
    {
        let (size, timestamps) = (model.state_size(), model.timestamps());
        let mut trellis = Trellis::new(size, timestamps);

        for k in 0..size {
            let score = model.emission(0, k);
            if let Some(candidate) = model.candidates.candidate(0, k) {
                debug!(
                    "Candidate {k} at distance {:.2}m: emission={:e}, log2={score}",
                    candidate.distance,
                    score.exp2()
                );
            }

            trellis.set(0, k, Cell::new(score, k));
        }

        if !trellis.row(0).iter().any(Cell::is_possible) {
            debug!("No possible candidate for the first observation");
            return Decoding::Unsolvable(NoMatchReason::EmptyLayer { index: 0 });
        }

        for t in 1..timestamps {
            let mut possible = false;

            for to in 0..size {
                let emission = model.emission(t, to);
                if emission == f64::NEG_INFINITY {
                    continue;
                }

                let Some((parent, score)) = Self::best_parent(model, trellis.row(t - 1), t, to)
                else {
                    continue;
                };

                let score = score + emission;
                trace!("Cell ({t}, {to}) = {score} via {parent}");

                if score > f64::NEG_INFINITY {
                    possible = true;
                    trellis.set(t, to, Cell::new(score, parent));
                }
            }

            if !possible {
                debug!("Trellis collapsed at observation {t}");
                return Decoding::Unsolvable(NoMatchReason::EmptyLayer { index: t });
            }
        }

        let Some(terminal) = trellis.best_terminal() else {
            return Decoding::Unsolvable(NoMatchReason::NoTerminalState);
        };

        let score = trellis
            .cell(timestamps - 1, terminal)
            .map_or(f64::NEG_INFINITY, |cell| cell.score);
        let route = trellis.backtrack(terminal);

        debug!("Decoded {} observations with score {score}", route.len());
        Decoding::Solved(CollapsedPath {
            score,
            route,
            trellis,
        })
    }
}
