use serde::Serialize;

/// The best cumulative score of any path ending in a state.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Cell {
    /// Cumulative base-2 log probability. Negative infinity is impossible.
    pub score: f64,
    /// The candidate index at the previous timestamp achieving `score`.
    ///
    /// Cells in the first row point to themselves.
    pub parent: usize,
}

impl Cell {
    pub const IMPOSSIBLE: Cell = Cell {
        score: f64::NEG_INFINITY,
        parent: 0,
    };

    pub fn new(score: f64, parent: usize) -> Self {
        Self { score, parent }
    }

    #[inline]
    pub fn is_possible(&self) -> bool {
        self.score > f64::NEG_INFINITY
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Trellis {
    cells: Vec<Cell>,
    state_size: usize,
    timestamps: usize,
}

impl Trellis {
    /// Allocates a trellis of `state_size × timestamps` impossible cells.
    pub fn new(state_size: usize, timestamps: usize) -> Self {
        Trellis {
            cells: vec![Cell::IMPOSSIBLE; state_size * timestamps],
            state_size,
            timestamps,
        }
    }

    pub fn state_size(&self) -> usize {
        self.state_size
    }

    pub fn timestamps(&self) -> usize {
        self.timestamps
    }

    #[inline]
    fn index(&self, t: usize, k: usize) -> Option<usize> {
        (t < self.timestamps && k < self.state_size).then_some(t * self.state_size + k)
    }

    #[inline]
    pub fn cell(&self, t: usize, k: usize) -> Option<&Cell> {
        self.index(t, k).map(|index| &self.cells[index])
    }

    /// Writes a cell, ignoring any position outside the trellis.
    #[inline]
    pub fn set(&mut self, t: usize, k: usize, cell: Cell) {
        if let Some(index) = self.index(t, k) {
            self.cells[index] = cell;
        }
    }

    /// All cells of the timestamp `t`.
    pub fn row(&self, t: usize) -> &[Cell] {
        if t >= self.timestamps {
            return &[];
        }

        let start = t * self.state_size;
        &self.cells[start..start + self.state_size]
    }

    /// The candidate index of the best final state.
    ///
    /// Ties resolve to the first maximum. Returns `None` if the final row
    /// holds no possible state.
    pub fn best_terminal(&self) -> Option<usize> {
        let last = self.timestamps.checked_sub(1)?;

        self.row(last)
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_possible())
            .fold(None, |best: Option<(usize, f64)>, (k, cell)| match best {
                Some((_, score)) if score >= cell.score => best,
                _ => Some((k, cell.score)),
            })
            .map(|(k, _)| k)
    }

    /// Walks the backpointers from `terminal` in the final row.
    ///
    /// Returns one candidate index per timestamp, in chronological order.
    /// The result is empty if `terminal` lies outside the final row.
    pub fn backtrack(&self, terminal: usize) -> Vec<usize> {
        if terminal >= self.state_size || self.timestamps == 0 {
            return vec![];
        }

        let mut path = Vec::with_capacity(self.timestamps);
        let mut current = terminal;

        for t in (0..self.timestamps).rev() {
            path.push(current);
            current = self.row(t)[current].parent;
        }

        path.reverse();
        path
    }
}
