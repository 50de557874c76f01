//! The 3x3 sliding tile puzzle.

use crate::search::{Heuristic, HeuristicValue, Problem, Result, SearchError};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// Tiles in row-major order, 0 is the blank.
pub type Tiles = [u8; 9];

pub const GOAL_TILES: Tiles = [1, 2, 3, 4, 5, 6, 7, 8, 0];

const WIDTH: usize = 3;

/// Direction in which the blank moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Slide {
    Up,
    Down,
    Left,
    Right,
}

impl Slide {
    fn offset(&self) -> (isize, isize) {
        match self {
            Slide::Up => (-1, 0),
            Slide::Down => (1, 0),
            Slide::Left => (0, -1),
            Slide::Right => (0, 1),
        }
    }
}

fn blank(tiles: &Tiles) -> usize {
    tiles.iter().position(|&tile| tile == 0).unwrap_or(0)
}

fn inversions(tiles: &Tiles) -> usize {
    let values: Vec<u8> = tiles.iter().copied().filter(|&tile| tile != 0).collect();
    (0..values.len())
        .map(|i| values[i + 1..].iter().filter(|&&later| later < values[i]).count())
        .sum()
}

/// On a board of odd width a configuration can reach another exactly when
/// their inversion counts have the same parity.
pub fn is_solvable(tiles: &Tiles, goal: &Tiles) -> bool {
    inversions(tiles) % 2 == inversions(goal) % 2
}

fn check_permutation(tiles: &Tiles) -> Result<()> {
    let mut seen = [false; 9];
    for &tile in tiles {
        match seen.get_mut(tile as usize) {
            Some(slot) if !*slot => *slot = true,
            _ => {
                return Err(SearchError::InvalidConfig(format!(
                    "{:?} is not a permutation of 0..9",
                    tiles
                )))
            }
        }
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct EightPuzzle {
    start: Tiles,
    goal: Tiles,
}

impl EightPuzzle {
    /// A puzzle to be solved towards [`GOAL_TILES`].
    pub fn new(start: Tiles) -> Result<Self> {
        Self::with_goal(start, GOAL_TILES)
    }

    pub fn with_goal(start: Tiles, goal: Tiles) -> Result<Self> {
        check_permutation(&start)?;
        check_permutation(&goal)?;
        if !is_solvable(&start, &goal) {
            return Err(SearchError::InvalidConfig(format!(
                "{:?} cannot reach {:?}",
                start, goal
            )));
        }
        Ok(Self { start, goal })
    }

    /// Parse nine digits, e.g. `"123456780"` or `"1 2 3 4 5 6 7 8 0"`.
    pub fn parse_tiles(text: &str) -> Result<Tiles> {
        let digits: Vec<u8> = text
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .map(|c| {
                c.to_digit(10).map(|d| d as u8).ok_or_else(|| {
                    SearchError::InvalidConfig(format!("unexpected character {:?} in tiles", c))
                })
            })
            .collect::<Result<_>>()?;
        let tiles: Tiles = digits.try_into().map_err(|digits: Vec<u8>| {
            SearchError::InvalidConfig(format!("expected 9 tiles, got {}", digits.len()))
        })?;
        check_permutation(&tiles)?;
        Ok(tiles)
    }

    pub fn goal_tiles(&self) -> &Tiles {
        &self.goal
    }
}

impl Problem for EightPuzzle {
    type State = Tiles;
    type Action = Slide;

    fn initial_state(&self) -> Tiles {
        self.start
    }

    fn actions(&self, state: &Tiles) -> Vec<Slide> {
        let position = blank(state);
        let (row, col) = ((position / WIDTH) as isize, (position % WIDTH) as isize);
        Slide::iter()
            .filter(|slide| {
                let (dr, dc) = slide.offset();
                (0..WIDTH as isize).contains(&(row + dr)) && (0..WIDTH as isize).contains(&(col + dc))
            })
            .collect()
    }

    fn result(&self, state: &Tiles, action: &Slide) -> Tiles {
        let position = blank(state);
        let (dr, dc) = action.offset();
        let row = (position / WIDTH) as isize + dr;
        let col = (position % WIDTH) as isize + dc;
        let mut next = *state;
        next.swap(position, row as usize * WIDTH + col as usize);
        next
    }

    fn goal(&self) -> Option<&Tiles> {
        Some(&self.goal)
    }
}

/// Number of tiles out of place, blank excluded.
#[derive(Debug, Clone)]
pub struct MisplacedTiles {
    goal: Tiles,
}

impl MisplacedTiles {
    pub fn new() -> Self {
        Self::for_goal(GOAL_TILES)
    }

    pub fn for_goal(goal: Tiles) -> Self {
        Self { goal }
    }
}

impl Default for MisplacedTiles {
    fn default() -> Self {
        Self::new()
    }
}

impl Heuristic<Tiles> for MisplacedTiles {
    fn evaluate(&mut self, state: &Tiles) -> HeuristicValue {
        let misplaced = state
            .iter()
            .zip(self.goal.iter())
            .filter(|(&tile, &goal)| tile != 0 && tile != goal)
            .count();
        (misplaced as f64).into()
    }
}

/// Sum over tiles of the Manhattan distance to their goal square. Consistent
/// for unit-cost slides.
#[derive(Debug, Clone)]
pub struct ManhattanDistance {
    /// goal square of each tile
    target: [usize; 9],
}

impl ManhattanDistance {
    pub fn new() -> Self {
        Self::for_goal(GOAL_TILES)
    }

    pub fn for_goal(goal: Tiles) -> Self {
        let mut target = [0; 9];
        for (square, &tile) in goal.iter().enumerate() {
            target[tile as usize] = square;
        }
        Self { target }
    }
}

impl Default for ManhattanDistance {
    fn default() -> Self {
        Self::new()
    }
}

impl Heuristic<Tiles> for ManhattanDistance {
    fn evaluate(&mut self, state: &Tiles) -> HeuristicValue {
        let distance: usize = state
            .iter()
            .enumerate()
            .filter(|(_, &tile)| tile != 0)
            .map(|(square, &tile)| {
                let target = self.target[tile as usize];
                (square / WIDTH).abs_diff(target / WIDTH) + (square % WIDTH).abs_diff(target % WIDTH)
            })
            .sum();
        (distance as f64).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_blank_has_two_moves() {
        let puzzle = EightPuzzle::new(GOAL_TILES).unwrap();
        assert_eq!(puzzle.actions(&GOAL_TILES), vec![Slide::Up, Slide::Left]);
        let centre = [1, 2, 3, 4, 0, 5, 6, 7, 8];
        assert_eq!(puzzle.actions(&centre).len(), 4);
    }

    #[test]
    fn sliding_swaps_blank() {
        let puzzle = EightPuzzle::new(GOAL_TILES).unwrap();
        assert_eq!(
            puzzle.result(&GOAL_TILES, &Slide::Left),
            [1, 2, 3, 4, 5, 6, 7, 0, 8]
        );
        assert_eq!(
            puzzle.result(&GOAL_TILES, &Slide::Up),
            [1, 2, 3, 4, 5, 0, 7, 8, 6]
        );
    }

    #[test]
    fn unsolvable_start_is_rejected() {
        assert!(EightPuzzle::new([2, 1, 3, 4, 5, 6, 7, 8, 0]).is_err());
        assert!(EightPuzzle::new([1, 1, 3, 4, 5, 6, 7, 8, 0]).is_err());
    }

    #[test]
    fn parse_tiles_accepts_separators() {
        assert_eq!(
            EightPuzzle::parse_tiles("1 2 3, 4 5 6, 7 8 0").unwrap(),
            GOAL_TILES
        );
        assert!(EightPuzzle::parse_tiles("12345678").is_err());
        assert!(EightPuzzle::parse_tiles("12345678x").is_err());
    }

    #[test]
    fn heuristics_on_known_state() {
        let state = [1, 2, 3, 5, 0, 6, 4, 7, 8];
        assert_eq!(MisplacedTiles::new().evaluate(&state), 4.0);
        assert_eq!(ManhattanDistance::new().evaluate(&state), 4.0);
        assert_eq!(ManhattanDistance::new().evaluate(&GOAL_TILES), 0.0);
    }
}
