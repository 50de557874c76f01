//! Recursive best-first search (Korf, 1993). Behaves like A* while only
//! keeping the current path and the siblings along it in memory. When the
//! best child's subtree turns out worse than the best alternative elsewhere,
//! the recursion unwinds and the subtree's backed-up f-value is remembered
//! on its root.

use crate::search::{
    path::{confirm_path_cost, step_cost},
    search_engines::{SearchEngine, SearchOutcome, SearchResult},
    Cost, Heuristic, Problem, Result, SearchConfig, SearchStatistics, TerminationCondition,
    UNREACHABLE,
};
use itertools::izip;
use std::collections::{HashMap, HashSet};
use tracing::trace;

#[derive(Debug, Clone)]
pub struct Rbfs {
    config: SearchConfig,
}

impl Rbfs {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }
}

enum Descent {
    /// The goal was reached with the given path cost, the solution is left
    /// on the stack.
    Found(Cost),
    /// No goal within the bound. Carries the backed-up f-value of the
    /// subtree.
    Failed(Cost),
    Exhausted,
}

struct Child<S, A> {
    action: A,
    state: S,
    g: Cost,
    f: Cost,
}

struct Recursion<'a, P: Problem, H: ?Sized> {
    problem: &'a P,
    heuristic: &'a mut H,
    config: &'a SearchConfig,
    statistics: SearchStatistics,
    termination: TerminationCondition,
    path: Vec<P::State>,
    actions: Vec<P::Action>,
    on_path: HashSet<P::State>,
    /// Cheapest g seen for each state anywhere in the call tree
    best_g: HashMap<P::State, Cost>,
}

impl<'a, P, H> Recursion<'a, P, H>
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

    fn expand(&mut self, state: &P::State, g: Cost, f: Cost) -> Result<Vec<Child<P::State, P::Action>>> {
        self.statistics.increment_expanded_nodes();
        let weight = self.config.weight;
        let mut states = vec![];
        let mut edges = vec![];
        for action in self.problem.actions(state) {
            let child = self.problem.result(state, &action);
            let child_g = g + step_cost(self.problem, state, &action, &child)?;
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
            children.push(Child {
                action,
                state: child,
                g: child_g,
                // a child is never estimated below its parent
                f: (child_g + h * weight).max(f),
            });
        }
        self.statistics.increment_generated_nodes(children.len());
        Ok(children)
    }

    fn search(&mut self, g: Cost, f: Cost, bound: Cost) -> Result<Descent> {
        if f > bound {
            return Ok(Descent::Failed(f));
        }
        let state = self.path.last().expect("recursion stack is never empty").clone();
        if self.problem.is_goal(&state) {
            return Ok(Descent::Found(g));
        }

        // only strictly worse routes are cut, re-entering a subtree with the
        // same g is how RBFS resumes abandoned work
        if let Some(&best_g) = self.best_g.get(&state) {
            if g > best_g {
                return Ok(Descent::Failed(UNREACHABLE));
            }
        }
        self.best_g.insert(state.clone(), g);

        if self.termination.should_terminate(self.statistics.expanded_nodes()) {
            return Ok(Descent::Exhausted);
        }
        let mut children = self.expand(&state, g, f)?;
        if children.is_empty() {
            return Ok(Descent::Failed(UNREACHABLE));
        }

        loop {
            children.sort_by_key(|child| child.f);
            let best_f = children[0].f;
            if best_f > bound || best_f == UNREACHABLE {
                return Ok(Descent::Failed(best_f));
            }
            let alternative = children.get(1).map_or(UNREACHABLE, |child| child.f);

            self.push(children[0].state.clone(), children[0].action.clone());
            let descent = self.search(children[0].g, best_f, bound.min(alternative))?;
            match descent {
                Descent::Found(cost) => return Ok(Descent::Found(cost)),
                Descent::Failed(backed_up) => {
                    self.pop();
                    trace!(
                        state = ?children[0].state,
                        f = backed_up.into_inner(),
                        "backing up f-value"
                    );
                    children[0].f = backed_up;
                }
                Descent::Exhausted => return Ok(Descent::Exhausted),
            }
        }
    }
}

impl SearchEngine for Rbfs {
    fn name(&self) -> String {
        format!("RBFS (w={})", self.config.weight)
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

        let mut recursion = Recursion {
            problem,
            heuristic,
            config: &self.config,
            statistics,
            termination: TerminationCondition::new(&self.config),
            path: vec![initial_state.clone()],
            actions: vec![],
            on_path: HashSet::from([initial_state]),
            best_g: HashMap::new(),
        };

        let root_f = initial_h * self.config.weight;
        let descent = recursion.search(Cost::from(0.), root_f, UNREACHABLE)?;
        recursion.termination.finalise();
        match descent {
            Descent::Found(g) => {
                let Recursion {
                    path,
                    actions,
                    statistics,
                    ..
                } = recursion;
                let cost = confirm_path_cost(problem, &path, &actions, g)?;
                Ok(SearchResult::solved(path, actions, cost, statistics))
            }
            Descent::Failed(_) => Ok(SearchResult::failed(
                SearchOutcome::Unreachable,
                recursion.statistics,
            )),
            Descent::Exhausted => Ok(SearchResult::failed(
                SearchOutcome::ResourceExhausted,
                recursion.statistics,
            )),
        }
    }
}
