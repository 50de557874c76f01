//! Breadth first search

use crate::search::{
    path::step_cost,
    search_engines::{SearchEngine, SearchOutcome, SearchResult},
    Heuristic, Problem, Result, SearchConfig, SearchSpace, SearchStatistics, TerminationCondition,
};
use std::collections::{HashSet, VecDeque};

/// Breadth-first graph search on a plain FIFO queue. Since every edge counts
/// the same, a state is final the first time it is generated and the goal
/// test can happen at generation time. The returned path has the fewest
/// edges, its cost is the sum of the actual action costs along it.
#[derive(Debug, Clone)]
pub struct BreadthFirstSearch {
    config: SearchConfig,
}

impl BreadthFirstSearch {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }
}

impl SearchEngine for BreadthFirstSearch {
    fn name(&self) -> String {
        "BFS".to_string()
    }

    fn search<P, H>(&self, problem: &P, _heuristic: &mut H) -> Result<SearchResult<P::State, P::Action>>
    where
        P: Problem,
        H: Heuristic<P::State> + ?Sized,
    {
        self.config.validate()?;
        let mut statistics = SearchStatistics::new(self.name());
        let mut termination = TerminationCondition::new(&self.config);
        let initial_state = problem.initial_state();
        let mut search_space: SearchSpace<P::State, P::Action> =
            SearchSpace::new(initial_state.clone());
        let root_id = search_space.get_root_node().get_node_id();
        statistics.increment_generated_nodes(1);
        statistics.observe_frontier(1);

        if problem.is_goal(&initial_state) {
            termination.finalise();
            return Ok(SearchResult::solved(
                vec![initial_state],
                vec![],
                0.0.into(),
                statistics,
            ));
        }

        let mut visited = HashSet::from([initial_state]);
        let mut queue = VecDeque::from([root_id]);

        while let Some(node_id) = queue.pop_front() {
            if termination.should_terminate(statistics.expanded_nodes()) {
                termination.finalise();
                return Ok(SearchResult::failed(
                    SearchOutcome::ResourceExhausted,
                    statistics,
                ));
            }
            statistics.increment_expanded_nodes();
            let state = search_space.get_state(node_id).clone();
            let g = search_space.get_node(node_id).get_g();

            for action in problem.actions(&state) {
                let successor = problem.result(&state, &action);
                let child_g = g + step_cost(problem, &state, &action, &successor)?;
                if !visited.insert(successor.clone()) {
                    continue;
                }
                let is_goal = problem.is_goal(&successor);
                let child_id = search_space.insert_node(successor, action, node_id, child_g);
                statistics.increment_generated_nodes(1);
                if is_goal {
                    let (path, actions) = search_space.extract_path(child_id);
                    termination.finalise();
                    return Ok(SearchResult::solved(path, actions, child_g, statistics));
                }
                queue.push_back(child_id);
                statistics.observe_frontier(queue.len());
            }
        }

        termination.finalise();
        Ok(SearchResult::failed(SearchOutcome::Unreachable, statistics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domains::{EightPuzzle, KnightProblem, RiverCrossing},
        search::ZeroHeuristic,
        test_utils::*,
    };

    #[test]
    fn finds_fewest_edges_path() {
        let problem = second_sample_graph();
        let result = BreadthFirstSearch::new(SearchConfig::default())
            .search(&problem, &mut ZeroHeuristic::new())
            .unwrap();
        // A-B-D-G and A-B-E-G both have three edges, D is generated first
        assert_eq!(result.path, states(&["A", "B", "D", "G"]));
        assert_eq!(result.cost, 7.0);
        assert_eq!(result.statistics.algorithm(), "BFS");
    }

    #[test]
    fn solves_river_crossing_in_seven_trips() {
        let problem = RiverCrossing::new();
        let result = BreadthFirstSearch::new(SearchConfig::default())
            .search(&problem, &mut ZeroHeuristic::new())
            .unwrap();
        assert!(result.is_solved());
        assert_eq!(result.actions.len(), 7);
        assert_eq!(result.cost, 7.0);
    }

    #[test]
    fn solves_knight_corner_to_corner() {
        let problem = KnightProblem::new(8, (0, 0), (7, 7)).unwrap();
        let result = BreadthFirstSearch::new(SearchConfig::default())
            .search(&problem, &mut ZeroHeuristic::new())
            .unwrap();
        assert_eq!(result.actions.len(), 6);
    }

    #[test]
    fn solves_shallow_eight_puzzle() {
        let problem = EightPuzzle::new([1, 2, 3, 4, 5, 6, 0, 7, 8]).unwrap();
        let result = BreadthFirstSearch::new(SearchConfig::default())
            .search(&problem, &mut ZeroHeuristic::new())
            .unwrap();
        assert_eq!(result.actions.len(), 2);
    }

    #[test]
    fn unreachable_goal() {
        let problem = sample_graph_with_isolated_goal();
        let result = BreadthFirstSearch::new(SearchConfig::default())
            .search(&problem, &mut ZeroHeuristic::new())
            .unwrap();
        assert_eq!(result.outcome(), SearchOutcome::Unreachable);
        assert!(result.path.is_empty());
    }
}
