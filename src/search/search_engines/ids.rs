//! Iterative deepening depth-first search: depth-limited passes with the
//! limit raised by one edge each time. Like BFS it returns a path with the
//! fewest edges, but only the current path is kept in memory.

use crate::search::{
    path::{confirm_path_cost, step_cost},
    search_engines::{SearchEngine, SearchOutcome, SearchResult},
    Cost, Heuristic, Problem, Result, SearchConfig, SearchStatistics, TerminationCondition,
};
use std::collections::{HashMap, HashSet};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct IterativeDeepening {
    config: SearchConfig,
}

impl IterativeDeepening {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }
}

enum Descent {
    /// The goal was reached with the given path cost. The solution is left
    /// on the pass stack.
    Found(Cost),
    /// No goal within the depth limit. `cut_off` is set when some path was
    /// stopped by the limit, so a deeper pass might still succeed.
    Failed { cut_off: bool },
    Exhausted,
}

struct Pass<'a, P: Problem> {
    problem: &'a P,
    statistics: SearchStatistics,
    termination: TerminationCondition,
    limit: usize,
    path: Vec<P::State>,
    actions: Vec<P::Action>,
    on_path: HashSet<P::State>,
    /// Shallowest depth each state was expanded at in the current pass
    best_depth: HashMap<P::State, usize>,
}

impl<'a, P: Problem> Pass<'a, P> {
    fn push(&mut self, state: P::State, action: P::Action) {
        self.on_path.insert(state.clone());
        self.path.push(state);
        self.actions.push(action);
        self.statistics.observe_frontier(self.path.len());
    }

    fn pop(&mut self) {
        if let Some(state) = self.path.pop() {
            self.on_path.remove(&state);
        }
        self.actions.pop();
    }

    fn reset(&mut self, initial_state: &P::State) {
        self.path = vec![initial_state.clone()];
        self.actions.clear();
        self.on_path = HashSet::from([initial_state.clone()]);
        self.best_depth.clear();
    }

    fn descend(&mut self, g: Cost) -> Result<Descent> {
        let Some(state) = self.path.last().cloned() else {
            return Ok(Descent::Failed { cut_off: false });
        };
        if self.problem.is_goal(&state) {
            return Ok(Descent::Found(g));
        }
        let depth = self.path.len() - 1;
        if depth >= self.limit {
            return Ok(Descent::Failed { cut_off: true });
        }

        // an earlier visit at this depth or shallower had at least as much
        // budget left below it
        if self.best_depth.get(&state).is_some_and(|&best| best <= depth) {
            return Ok(Descent::Failed { cut_off: false });
        }
        self.best_depth.insert(state.clone(), depth);

        if self.termination.should_terminate(self.statistics.expanded_nodes()) {
            return Ok(Descent::Exhausted);
        }
        self.statistics.increment_expanded_nodes();

        let mut children = vec![];
        for action in self.problem.actions(&state) {
            let child = self.problem.result(&state, &action);
            let child_g = g + step_cost(self.problem, &state, &action, &child)?;
            if self.on_path.contains(&child) {
                continue;
            }
            children.push((action, child, child_g));
        }
        self.statistics.increment_generated_nodes(children.len());

        let mut cut_off = false;
        for (action, child, child_g) in children {
            self.push(child, action);
            match self.descend(child_g)? {
                Descent::Found(cost) => return Ok(Descent::Found(cost)),
                Descent::Failed { cut_off: deeper } => cut_off |= deeper,
                Descent::Exhausted => return Ok(Descent::Exhausted),
            }
            self.pop();
        }
        Ok(Descent::Failed { cut_off })
    }
}

impl SearchEngine for IterativeDeepening {
    fn name(&self) -> String {
        "IDS".to_string()
    }

    fn search<P, H>(&self, problem: &P, _heuristic: &mut H) -> Result<SearchResult<P::State, P::Action>>
    where
        P: Problem,
        H: Heuristic<P::State> + ?Sized,
    {
        self.config.validate()?;
        let mut statistics = SearchStatistics::new(self.name());
        statistics.increment_generated_nodes(1);
        statistics.observe_frontier(1);

        let initial_state = problem.initial_state();
        let mut pass = Pass {
            problem,
            statistics,
            termination: TerminationCondition::new(&self.config),
            limit: 0,
            path: vec![],
            actions: vec![],
            on_path: HashSet::new(),
            best_depth: HashMap::new(),
        };

        let mut outcome = SearchOutcome::ResourceExhausted;
        for iteration in 1..=self.config.max_iterations {
            if iteration > 1 {
                pass.statistics.increment_iterations();
            }
            debug!(iteration, limit = pass.limit, "starting pass");
            pass.reset(&initial_state);

            match pass.descend(Cost::from(0.))? {
                Descent::Found(g) => {
                    let Pass {
                        path,
                        actions,
                        statistics,
                        mut termination,
                        ..
                    } = pass;
                    termination.finalise();
                    let cost = confirm_path_cost(problem, &path, &actions, g)?;
                    return Ok(SearchResult::solved(path, actions, cost, statistics));
                }
                Descent::Failed { cut_off: true } => pass.limit += 1,
                Descent::Failed { cut_off: false } => {
                    outcome = SearchOutcome::Unreachable;
                    break;
                }
                Descent::Exhausted => break,
            }
        }

        pass.termination.finalise();
        Ok(SearchResult::failed(outcome, pass.statistics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domains::{GraphProblem, RiverCrossing},
        search::{search_engines::BreadthFirstSearch, SearchError, ZeroHeuristic},
        test_utils::*,
    };

    #[test]
    fn finds_fewest_edges_path() {
        let problem = second_sample_graph();
        let result = IterativeDeepening::new(SearchConfig::default())
            .search(&problem, &mut ZeroHeuristic::new())
            .unwrap();
        assert_eq!(result.path, states(&["A", "B", "D", "G"]));
        assert_eq!(result.cost, 7.0);
        assert_eq!(result.statistics.algorithm(), "IDS");
        assert_eq!(result.statistics.iterations(), 4);
    }

    #[test]
    fn prefers_fewer_edges_over_lower_cost() {
        let problem =
            GraphProblem::from_edges("S", "G", [("S", "G", 10.), ("S", "A", 1.), ("A", "G", 1.)]);
        let result = IterativeDeepening::new(SearchConfig::default())
            .search(&problem, &mut ZeroHeuristic::new())
            .unwrap();
        assert_eq!(result.path, states(&["S", "G"]));
        assert_eq!(result.cost, 10.0);
        assert_eq!(result.statistics.iterations(), 2);
    }

    #[test]
    fn matches_bfs_depth_on_river_crossing() {
        let problem = RiverCrossing::new();
        let bfs = BreadthFirstSearch::new(SearchConfig::default())
            .search(&problem, &mut ZeroHeuristic::new())
            .unwrap();
        let ids = IterativeDeepening::new(SearchConfig::default())
            .search(&problem, &mut ZeroHeuristic::new())
            .unwrap();
        assert_eq!(ids.actions.len(), bfs.actions.len());
        assert_eq!(ids.cost, 7.0);
        // memory is bounded by the solution depth
        assert_eq!(ids.statistics.max_frontier(), 8);
    }

    #[test]
    fn disconnected_goal_is_unreachable() {
        let problem = sample_graph_with_isolated_goal();
        let result = IterativeDeepening::new(SearchConfig::default())
            .search(&problem, &mut ZeroHeuristic::new())
            .unwrap();
        assert_eq!(result.outcome(), SearchOutcome::Unreachable);
        assert!(result.path.is_empty());
        assert!(result.cost.into_inner().is_infinite());
    }

    #[test]
    fn pass_ceiling_is_resource_exhaustion() {
        let problem = romania();
        let config = SearchConfig {
            max_iterations: 1,
            ..SearchConfig::default()
        };
        let result = IterativeDeepening::new(config)
            .search(&problem, &mut ZeroHeuristic::new())
            .unwrap();
        assert_eq!(result.outcome(), SearchOutcome::ResourceExhausted);
        assert_eq!(result.statistics.iterations(), 1);
        assert_eq!(result.statistics.expanded_nodes(), 0);
    }

    #[test]
    fn nondeterministic_problem_fails_fast() {
        let problem = FlakyProblem::default();
        let result = IterativeDeepening::new(SearchConfig::default())
            .search(&problem, &mut ZeroHeuristic::new());
        assert!(matches!(result, Err(SearchError::InconsistentProblem(_))));
    }
}
