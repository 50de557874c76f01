use crate::search::{path::path_cost, Cost, Problem, SearchError, SearchResult};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("result is not solved, nothing to validate")]
    NotSolved,

    #[error("path starts in {found} instead of the initial state {expected}")]
    WrongStart { expected: String, found: String },

    #[error("action {action} is not applicable in state {state}")]
    NotApplicable { step: usize, state: String, action: String },

    #[error("path does not reach a goal, final state is {0}")]
    GoalNotReached(String),

    #[error("reported cost {reported} does not match the path cost {actual}")]
    CostMismatch { reported: Cost, actual: Cost },

    #[error(transparent)]
    Replay(#[from] SearchError),
}

/// Check a solved result against the problem: the path must start in the
/// initial state, every action must be applicable where it is taken, the last
/// state must be a goal and the reported cost must match a replay.
pub fn validate<P>(
    problem: &P,
    result: &SearchResult<P::State, P::Action>,
) -> Result<(), ValidationError>
where
    P: Problem,
    P::Action: PartialEq,
{
    if !result.is_solved() {
        return Err(ValidationError::NotSolved);
    }
    let (Some(first), Some(last)) = (result.path.first(), result.path.last()) else {
        return Err(ValidationError::NotSolved);
    };

    let initial_state = problem.initial_state();
    if first != &initial_state {
        return Err(ValidationError::WrongStart {
            expected: format!("{:?}", initial_state),
            found: format!("{:?}", first),
        });
    }

    for (step, (state, action)) in result.path.iter().zip(&result.actions).enumerate() {
        if !problem.actions(state).contains(action) {
            return Err(ValidationError::NotApplicable {
                step,
                state: format!("{:?}", state),
                action: format!("{:?}", action),
            });
        }
    }

    if !problem.is_goal(last) {
        return Err(ValidationError::GoalNotReached(format!("{:?}", last)));
    }

    let actual = path_cost(problem, &result.path, &result.actions)?;
    if actual != result.cost {
        return Err(ValidationError::CostMismatch {
            reported: result.cost,
            actual,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        search::{search_engines::BestFirstSearch, SearchConfig, SearchEngine, ZeroHeuristic},
        test_utils::*,
    };

    fn solved_sample() -> SearchResult<String, String> {
        BestFirstSearch::astar(SearchConfig::default())
            .search(&sample_graph(), &mut sample_heuristic())
            .unwrap()
    }

    #[test]
    fn validate_good_path_ok() {
        assert!(validate(&sample_graph(), &solved_sample()).is_ok());
    }

    #[test]
    fn validate_unsolved_result() {
        let problem = sample_graph_with_isolated_goal();
        let result = BestFirstSearch::astar(SearchConfig::default())
            .search(&problem, &mut ZeroHeuristic::new())
            .unwrap();
        assert!(matches!(
            validate(&problem, &result),
            Err(ValidationError::NotSolved)
        ));
    }

    #[test]
    fn validate_bad_path_not_applicable() {
        let mut result = solved_sample();
        result.path = states(&["S", "E", "G"]);
        result.actions = states(&["E", "G"]);
        assert!(matches!(
            validate(&sample_graph(), &result),
            Err(ValidationError::NotApplicable { step: 0, .. })
        ));
    }

    #[test]
    fn validate_bad_path_incomplete() {
        let mut result = solved_sample();
        result.path.pop();
        result.actions.pop();
        assert!(matches!(
            validate(&sample_graph(), &result),
            Err(ValidationError::GoalNotReached(_))
        ));
    }

    #[test]
    fn validate_bad_cost() {
        let mut result = solved_sample();
        result.cost = 4.0.into();
        assert!(matches!(
            validate(&sample_graph(), &result),
            Err(ValidationError::CostMismatch { .. })
        ));
    }
}
