//! Helpers shared by the engines for pricing edges and paths.

use crate::search::{Cost, Problem, Result, SearchError};
use itertools::Itertools;

/// Cost of a single transition, rejecting negative and NaN weights.
pub fn step_cost<P: Problem>(
    problem: &P,
    state: &P::State,
    action: &P::Action,
    next: &P::State,
) -> Result<Cost> {
    let cost = problem.action_cost(state, action, next);
    // also catches NaN
    if !(cost >= 0.) {
        return Err(SearchError::InvalidActionCost {
            cost,
            state: format!("{:?}", state),
            action: format!("{:?}", action),
        });
    }
    Ok(cost.into())
}

/// Replay `actions` along `path` and sum their costs. Fails if replaying an
/// action does not reproduce the next state on the path, which means the
/// problem is not deterministic.
pub fn path_cost<P: Problem>(problem: &P, path: &[P::State], actions: &[P::Action]) -> Result<Cost> {
    if path.is_empty() {
        return Err(SearchError::InconsistentProblem(
            "cannot price an empty path".to_string(),
        ));
    }
    if path.len() != actions.len() + 1 {
        return Err(SearchError::InconsistentProblem(format!(
            "path has {} states but {} actions",
            path.len(),
            actions.len()
        )));
    }

    let mut total = Cost::from(0.);
    for ((state, next), action) in path.iter().tuple_windows().zip(actions) {
        let replayed = problem.result(state, action);
        if &replayed != next {
            return Err(SearchError::InconsistentProblem(format!(
                "action {:?} from {:?} led to {:?} during search but to {:?} on replay",
                action, state, next, replayed
            )));
        }
        total += step_cost(problem, state, action, next)?;
    }
    Ok(total)
}

/// Check that the cost a depth-first engine accumulated matches a replay of
/// the path it found.
pub(crate) fn confirm_path_cost<P: Problem>(
    problem: &P,
    path: &[P::State],
    actions: &[P::Action],
    accumulated: Cost,
) -> Result<Cost> {
    let replayed = path_cost(problem, path, actions)?;
    if replayed != accumulated {
        return Err(SearchError::InconsistentProblem(format!(
            "path cost was {} during search but {} on replay",
            accumulated, replayed
        )));
    }
    Ok(replayed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domains::GraphProblem, test_utils::*};
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn path_cost_sums_edges() {
        let problem = sample_graph();
        let cost = path_cost(&problem, &states(&["S", "B", "E", "G"]), &states(&["B", "E", "G"]))
            .unwrap();
        assert_approx_eq!(cost.into_inner(), 5.);
    }

    #[test]
    fn single_state_path_is_free() {
        let problem = sample_graph();
        assert_eq!(path_cost(&problem, &states(&["S"]), &[]).unwrap(), 0.0);
    }

    #[test]
    fn disconnected_step_is_inconsistent() {
        let problem = sample_graph();
        let result = path_cost(&problem, &states(&["S", "G"]), &states(&["E"]));
        assert!(matches!(result, Err(SearchError::InconsistentProblem(_))));
    }

    #[test]
    fn negative_cost_is_rejected() {
        let problem = GraphProblem::from_edges("a", "b", [("a", "b", -1.)]);
        let result = step_cost(&problem, &"a".to_string(), &"b".to_string(), &"b".to_string());
        assert!(matches!(result, Err(SearchError::InvalidActionCost { .. })));
    }

    #[test]
    fn mismatched_accumulated_cost_is_inconsistent() {
        let problem = sample_graph();
        let result = confirm_path_cost(
            &problem,
            &states(&["S", "B"]),
            &states(&["B"]),
            3.0.into(),
        );
        assert!(matches!(result, Err(SearchError::InconsistentProblem(_))));
    }
}
