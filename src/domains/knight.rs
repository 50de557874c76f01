//! A single knight travelling between two squares of a square board.

use crate::search::{Heuristic, HeuristicValue, Problem, Result, SearchError};

pub type Square = (i32, i32);

const MOVES: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (1, -2),
    (-2, 1),
    (-1, 2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

#[derive(Debug, Clone)]
pub struct KnightProblem {
    size: i32,
    from: Square,
    to: Square,
}

impl KnightProblem {
    pub fn new(size: i32, from: Square, to: Square) -> Result<Self> {
        if size < 1 {
            return Err(SearchError::InvalidConfig(format!(
                "board size must be positive, got {}",
                size
            )));
        }
        let problem = Self { size, from, to };
        for square in [from, to] {
            if !problem.on_board(square) {
                return Err(SearchError::InvalidConfig(format!(
                    "square {:?} is off a {}x{} board",
                    square, size, size
                )));
            }
        }
        Ok(problem)
    }

    fn on_board(&self, (x, y): Square) -> bool {
        (0..self.size).contains(&x) && (0..self.size).contains(&y)
    }
}

impl Problem for KnightProblem {
    type State = Square;
    /// The square the knight jumps to.
    type Action = Square;

    fn initial_state(&self) -> Square {
        self.from
    }

    fn actions(&self, &(x, y): &Square) -> Vec<Square> {
        MOVES
            .iter()
            .filter_map(|&(dx, dy)| Some((x.checked_add(dx)?, y.checked_add(dy)?)))
            .filter(|&square| self.on_board(square))
            .collect()
    }

    fn result(&self, _state: &Square, action: &Square) -> Square {
        *action
    }

    fn goal(&self) -> Option<&Square> {
        Some(&self.to)
    }
}

/// Manhattan distance divided by three, rounded up. A jump changes the
/// Manhattan distance by at most three so this never overestimates.
#[derive(Debug, Clone)]
pub struct KnightDistance {
    goal: Square,
}

impl KnightDistance {
    pub fn new(goal: Square) -> Self {
        Self { goal }
    }
}

impl Heuristic<Square> for KnightDistance {
    fn evaluate(&mut self, &(x, y): &Square) -> HeuristicValue {
        let manhattan = (i64::from(x) - i64::from(self.goal.0)).abs()
            + (i64::from(y) - i64::from(self.goal.1)).abs();
        ((manhattan as f64 / 3.).ceil()).into()
    }
}
