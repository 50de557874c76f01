//! The general best-first search driver. Breadth-first (by depth),
//! uniform-cost, greedy best-first, A* and weighted A* differ only in the
//! [`Evaluation`] used to order the frontier.

use crate::search::{
    path::step_cost,
    search_engines::{SearchEngine, SearchOutcome, SearchResult},
    Cost, Frontier, Heuristic, HeuristicValue, NodeId, Problem, ReachedTable, Reconciliation,
    Result, SearchConfig, SearchError, SearchSpace, SearchStatistics, TerminationCondition,
    MIN_WEIGHT,
};
use std::{collections::HashMap, hash::Hash};
use tracing::debug;

/// The evaluation function f(n) ordering the frontier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluation {
    /// f = number of edges from the root, i.e. breadth-first
    Depth,
    /// f = g, i.e. uniform-cost search
    PathCost,
    /// f = h, i.e. greedy best-first search
    Heuristic,
    /// f = g + weight * h, A* for weight 1 and weighted A* above
    AStar { weight: f64 },
}

impl Evaluation {
    pub fn uses_heuristic(&self) -> bool {
        matches!(self, Evaluation::Heuristic | Evaluation::AStar { .. })
    }

    fn key(&self, g: Cost, h: HeuristicValue, depth: usize) -> Cost {
        match *self {
            Evaluation::Depth => Cost::from(depth as f64),
            Evaluation::PathCost => g,
            Evaluation::Heuristic => h,
            Evaluation::AStar { weight } => g + h * weight,
        }
    }

    /// What competing paths to the same state are compared on in the
    /// reached table. Breadth-first keeps the shallowest path, not the
    /// cheapest.
    fn rank(&self, g: Cost, depth: usize) -> Cost {
        match *self {
            Evaluation::Depth => Cost::from(depth as f64),
            _ => g,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BestFirstSearch {
    evaluation: Evaluation,
    config: SearchConfig,
}

impl BestFirstSearch {
    pub fn new(evaluation: Evaluation, config: SearchConfig) -> Self {
        Self { evaluation, config }
    }

    pub fn uniform_cost(config: SearchConfig) -> Self {
        Self::new(Evaluation::PathCost, config)
    }

    pub fn greedy(config: SearchConfig) -> Self {
        Self::new(Evaluation::Heuristic, config)
    }

    pub fn astar(config: SearchConfig) -> Self {
        Self::new(Evaluation::AStar { weight: 1. }, config)
    }

    /// Weighted A* taking its weight from the configuration.
    pub fn weighted_astar(config: SearchConfig) -> Self {
        let weight = config.weight;
        Self::new(Evaluation::AStar { weight }, config)
    }

    fn validate(&self) -> Result<()> {
        self.config.validate()?;
        if let Evaluation::AStar { weight } = self.evaluation {
            if !weight.is_finite() || weight < MIN_WEIGHT {
                return Err(SearchError::InvalidWeight {
                    weight,
                    minimum: MIN_WEIGHT,
                });
            }
        }
        Ok(())
    }
}

/// Heuristic values are cached per state, so a state reached along several
/// paths is only evaluated once.
struct Evaluator<'a, S, H: ?Sized> {
    evaluation: Evaluation,
    heuristic: &'a mut H,
    cache: HashMap<S, HeuristicValue>,
}

impl<'a, S, H> Evaluator<'a, S, H>
where
    S: Clone + Eq + Hash,
    H: Heuristic<S> + ?Sized,
{
    fn key(
        &mut self,
        state: &S,
        g: Cost,
        depth: usize,
        statistics: &mut SearchStatistics,
    ) -> Cost {
        let h = if self.evaluation.uses_heuristic() {
            match self.cache.get(state) {
                Some(&h) => h,
                None => {
                    let h = self.heuristic.evaluate(state);
                    statistics.register_heuristic_value(h);
                    self.cache.insert(state.clone(), h);
                    h
                }
            }
        } else {
            HeuristicValue::from(0.)
        };
        self.evaluation.key(g, h, depth)
    }
}

impl SearchEngine for BestFirstSearch {
    fn name(&self) -> String {
        match self.evaluation {
            Evaluation::Depth => "BFS (depth-ordered)".to_string(),
            Evaluation::PathCost => "UCS".to_string(),
            Evaluation::Heuristic => "Greedy Best-First".to_string(),
            Evaluation::AStar { weight } if weight == 1. => "A*".to_string(),
            Evaluation::AStar { weight } => format!("Weighted A* (w={})", weight),
        }
    }

    fn search<P, H>(&self, problem: &P, heuristic: &mut H) -> Result<SearchResult<P::State, P::Action>>
    where
        P: Problem,
        H: Heuristic<P::State> + ?Sized,
    {
        self.validate()?;
        let mut statistics = SearchStatistics::new(self.name());
        let mut termination = TerminationCondition::new(&self.config);
        let mut evaluator = Evaluator {
            evaluation: self.evaluation,
            heuristic,
            cache: HashMap::new(),
        };

        let initial_state = problem.initial_state();
        let mut search_space: SearchSpace<P::State, P::Action> =
            SearchSpace::new(initial_state.clone());
        let mut reached = ReachedTable::new();
        let mut frontier = Frontier::new();

        let root_id = search_space.get_root_node().get_node_id();
        let root_key = evaluator.key(&initial_state, Cost::from(0.), 0, &mut statistics);
        reached.record(initial_state, root_id, Cost::from(0.));
        frontier.push(root_id, root_key);
        statistics.increment_generated_nodes(1);
        statistics.observe_frontier(frontier.len());

        while let Some((node_id, _)) = frontier.pop_min() {
            let state = search_space.get_state(node_id).clone();
            if reached.is_stale(&state, node_id) {
                continue;
            }
            if termination.should_terminate(statistics.expanded_nodes()) {
                termination.finalise();
                return Ok(SearchResult::failed(
                    SearchOutcome::ResourceExhausted,
                    statistics,
                ));
            }
            reached.close(state.clone());
            statistics.increment_expanded_nodes();

            let node = search_space.get_node(node_id);
            let g = node.get_g();
            let depth = node.get_depth();

            if problem.is_goal(&state) {
                let (path, actions) = search_space.extract_path(node_id);
                termination.finalise();
                return Ok(SearchResult::solved(path, actions, g, statistics));
            }

            for action in problem.actions(&state) {
                let child = problem.result(&state, &action);
                let child_g = g + step_cost(problem, &state, &action, &child)?;
                let rank = self.evaluation.rank(child_g, depth + 1);

                match reached.reconcile(&child, rank) {
                    Reconciliation::Ignored => continue,
                    Reconciliation::Improved { reopened: true } => {
                        debug!(state = ?child, g = child_g.into_inner(), "reopening closed state");
                        statistics.increment_reopened_nodes();
                    }
                    Reconciliation::New | Reconciliation::Improved { reopened: false } => {}
                }

                let key = evaluator.key(&child, child_g, depth + 1, &mut statistics);
                let child_id: NodeId =
                    search_space.insert_node(child.clone(), action, node_id, child_g);
                reached.record(child, child_id, rank);
                frontier.push(child_id, key);
                statistics.increment_generated_nodes(1);
                statistics.observe_frontier(frontier.len());
            }
        }

        termination.finalise();
        Ok(SearchResult::failed(SearchOutcome::Unreachable, statistics))
    }
}
