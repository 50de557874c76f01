use ordered_float::OrderedFloat;
use std::fmt::Debug;

pub type HeuristicValue = OrderedFloat<f64>;

/// An estimate of the remaining cost from a state to the nearest goal. The
/// engines assume values are non-negative. Admissibility and consistency are
/// not checked, an inadmissible heuristic silently costs optimality.
pub trait Heuristic<S>: Debug {
    /// Evaluate the given state.
    fn evaluate(&mut self, state: &S) -> HeuristicValue;

    /// Evaluate a batch of states. The default implementation simply calls
    /// `evaluate` for each state sequentially. This method should be
    /// overridden if a more efficient implementation is possible.
    fn evaluate_batch(&mut self, states: &[S]) -> Vec<HeuristicValue> {
        states.iter().map(|state| self.evaluate(state)).collect()
    }
}

impl<S, H> Heuristic<S> for &mut H
where
    H: Heuristic<S> + ?Sized,
{
    fn evaluate(&mut self, state: &S) -> HeuristicValue {
        (**self).evaluate(state)
    }

    fn evaluate_batch(&mut self, states: &[S]) -> Vec<HeuristicValue> {
        (**self).evaluate_batch(states)
    }
}

impl<S, H> Heuristic<S> for Box<H>
where
    H: Heuristic<S> + ?Sized,
{
    fn evaluate(&mut self, state: &S) -> HeuristicValue {
        (**self).evaluate(state)
    }

    fn evaluate_batch(&mut self, states: &[S]) -> Vec<HeuristicValue> {
        (**self).evaluate_batch(states)
    }
}
