//! Example problems the engines can be run on.

mod eight_puzzle;
mod graph;
mod knight;
mod river_crossing;

pub use eight_puzzle::{
    is_solvable, EightPuzzle, ManhattanDistance, MisplacedTiles, Slide, Tiles, GOAL_TILES,
};
pub use graph::{Adjacency, GraphProblem, GraphSpec};
pub use knight::{KnightDistance, KnightProblem, Square};
pub use river_crossing::{Banks, Crossing, RiverCrossing, Side};
