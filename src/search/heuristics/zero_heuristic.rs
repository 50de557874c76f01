use crate::search::{Heuristic, HeuristicValue};

/// h(n) = 0 everywhere. Turns A* into uniform-cost search.
#[derive(Clone, Debug, Default)]
pub struct ZeroHeuristic {}

impl ZeroHeuristic {
    pub fn new() -> Self {
        ZeroHeuristic {}
    }
}

impl<S> Heuristic<S> for ZeroHeuristic {
    fn evaluate(&mut self, _state: &S) -> HeuristicValue {
        (0.).into()
    }
}
