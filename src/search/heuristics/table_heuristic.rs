use crate::search::{Heuristic, HeuristicValue};
use std::{collections::HashMap, fmt::Debug, hash::Hash};

/// A heuristic given as an explicit lookup table, as is usual for small
/// hand-made graphs. States missing from the table are estimated at 0, which
/// keeps the heuristic admissible for them.
#[derive(Clone, Debug)]
pub struct TableHeuristic<S>
where
    S: Eq + Hash,
{
    values: HashMap<S, f64>,
}

impl<S> TableHeuristic<S>
where
    S: Eq + Hash,
{
    pub fn new(values: HashMap<S, f64>) -> Self {
        Self { values }
    }

    pub fn get(&self, state: &S) -> f64 {
        self.values.get(state).copied().unwrap_or(0.)
    }
}

impl<S> FromIterator<(S, f64)> for TableHeuristic<S>
where
    S: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<S> Heuristic<S> for TableHeuristic<S>
where
    S: Eq + Hash + Debug,
{
    fn evaluate(&mut self, state: &S) -> HeuristicValue {
        self.get(state).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_entries_are_zero() {
        let mut heuristic: TableHeuristic<&str> = [("S", 5.), ("A", 4.)].into_iter().collect();
        assert_eq!(heuristic.evaluate(&"S"), 5.0);
        assert_eq!(heuristic.evaluate(&"A"), 4.0);
        assert_eq!(heuristic.evaluate(&"Z"), 0.0);
    }

    #[test]
    fn batch_matches_single_evaluation() {
        let mut heuristic: TableHeuristic<&str> = [("S", 5.), ("B", 3.)].into_iter().collect();
        let values = heuristic.evaluate_batch(&["B", "S", "X"]);
        assert_eq!(values, vec![HeuristicValue::from(3.), 5.0.into(), 0.0.into()]);
    }
}
