//! Iterative deepening A*: repeated depth-first passes bounded by an f-cost
//! threshold. Memory is linear in the depth of the current path, at the price
//! of re-expanding the shallow part of the tree on every pass.

use crate::search::{
    path::{confirm_path_cost, step_cost},
    search_engines::{SearchEngine, SearchOutcome, SearchResult},
    Cost, Heuristic, Problem, Result, SearchConfig, SearchStatistics, TerminationCondition,
    UNREACHABLE,
};
use itertools::izip;
use std::collections::{HashMap, HashSet};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct IdaStar {
    config: SearchConfig,
}

impl IdaStar {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }
}

/// Result of one bounded depth-first descent.
enum Descent {
    /// The goal was reached with the given path cost. The solution is left
    /// on the pass stack.
    Found(Cost),
    /// No goal below the threshold. Carries the smallest f-value that
    /// exceeded it, infinite if nothing did.
    Exceeded(Cost),
    /// The expansion budget ran out.
    Exhausted,
}

struct Pass<'a, P: Problem, H: ?Sized> {
    problem: &'a P,
    heuristic: &'a mut H,
    config: &'a SearchConfig,
    statistics: SearchStatistics,
    termination: TerminationCondition,
    threshold: Cost,
    path: Vec<P::State>,
    actions: Vec<P::Action>,
    on_path: HashSet<P::State>,
    /// Cheapest g seen for each state in the current pass
    best_g: HashMap<P::State, Cost>,
}

impl<'a, P, H> Pass<'a, P, H>
where
    P: Problem,
    H: Heuristic<P::State> + ?Sized,
{
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
        self.best_g.clear();
    }

    /// Depth-first search below the node at the top of the stack, reached
    /// with cost `g` and (monotone) f-value `f`.
    fn descend(&mut self, g: Cost, f: Cost) -> Result<Descent> {
        if f > self.threshold {
            return Ok(Descent::Exceeded(f));
        }
        let state = self.path.last().expect("pass stack is never empty").clone();
        if self.problem.is_goal(&state) {
            return Ok(Descent::Found(g));
        }

        if let Some(&best_g) = self.best_g.get(&state) {
            if g >= best_g {
                return Ok(Descent::Exceeded(UNREACHABLE));
            }
        }
        self.best_g.insert(state.clone(), g);

        if self.termination.should_terminate(self.statistics.expanded_nodes()) {
            return Ok(Descent::Exhausted);
        }
        self.statistics.increment_expanded_nodes();

        let weight = self.config.weight;
        let mut states = vec![];
        let mut edges = vec![];
        for action in self.problem.actions(&state) {
            let child = self.problem.result(&state, &action);
            let child_g = g + step_cost(self.problem, &state, &action, &child)?;
            if self.on_path.contains(&child) {
                continue;
            }
            states.push(child);
            edges.push((action, child_g));
        }
        let h_values = self.heuristic.evaluate_batch(&states);
        let mut children = Vec::with_capacity(states.len());
        for (child, (action, child_g), h) in izip!(states, edges, h_values) {
            self.statistics.register_heuristic_value(h);
            children.push((action, child, child_g, child_g + h * weight));
        }
        self.statistics.increment_generated_nodes(children.len());

        children.sort_by_key(|&(_, _, _, child_f)| child_f);
        let mut min_excess = UNREACHABLE;
        for (action, child, child_g, child_f) in children {
            let child_f = child_f.max(f);
            if child_f > self.threshold {
                min_excess = min_excess.min(child_f);
                continue;
            }
            self.push(child, action);
            match self.descend(child_g, child_f)? {
                Descent::Found(cost) => return Ok(Descent::Found(cost)),
                Descent::Exceeded(excess) => min_excess = min_excess.min(excess),
                Descent::Exhausted => return Ok(Descent::Exhausted),
            }
            self.pop();
        }
        Ok(Descent::Exceeded(min_excess))
    }
}

impl SearchEngine for IdaStar {
    fn name(&self) -> String {
        format!("IDA* (w={})", self.config.weight)
    }

    fn search<P, H>(&self, problem: &P, heuristic: &mut H) -> Result<SearchResult<P::State, P::Action>>
    where
        P: Problem,
        H: Heuristic<P::State> + ?Sized,
    {
        self.config.validate()?;
        let mut statistics = SearchStatistics::new(self.name());
        let initial_state = problem.initial_state();
        let initial_h = heuristic.evaluate(&initial_state);
        statistics.register_heuristic_value(initial_h);
        statistics.increment_generated_nodes(1);
        statistics.observe_frontier(1);

        let root_f = initial_h * self.config.weight;
        let mut pass = Pass {
            problem,
            heuristic,
            config: &self.config,
            statistics,
            termination: TerminationCondition::new(&self.config),
            threshold: root_f,
            path: vec![],
            actions: vec![],
            on_path: HashSet::new(),
            best_g: HashMap::new(),
        };

        let mut outcome = SearchOutcome::ResourceExhausted;
        for iteration in 1..=self.config.max_iterations {
            if iteration > 1 {
                pass.statistics.increment_iterations();
            }
            debug!(iteration, threshold = pass.threshold.into_inner(), "starting pass");
            pass.reset(&initial_state);

            match pass.descend(Cost::from(0.), root_f)? {
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
                Descent::Exceeded(next_threshold) if next_threshold == UNREACHABLE => {
                    outcome = SearchOutcome::Unreachable;
                    break;
                }
                Descent::Exceeded(next_threshold) => pass.threshold = next_threshold,
                Descent::Exhausted => break,
            }
        }

        pass.termination.finalise();
        Ok(SearchResult::failed(outcome, pass.statistics))
    }
}
