use crate::{
    domains::{GraphProblem, Tiles},
    search::{path::step_cost, Cost, Problem, TableHeuristic},
};
use std::{cell::Cell, collections::HashSet};

pub const SAMPLE_GRAPH_TEXT: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/sample.toml"));

pub const ROMANIA_GRAPH_TEXT: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/romania.toml"));

pub const SEARCH_CONFIG_TEXT: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/search.toml"));

/// Seven-node graph with start S and goal G, optimal cost 5 via B and E.
pub fn sample_graph() -> GraphProblem {
    GraphProblem::from_edges(
        "S",
        "G",
        [
            ("S", "A", 1.),
            ("S", "B", 2.),
            ("A", "S", 1.),
            ("A", "C", 2.),
            ("A", "D", 3.),
            ("B", "S", 2.),
            ("B", "E", 2.),
            ("C", "A", 2.),
            ("C", "G", 3.),
            ("D", "A", 3.),
            ("E", "B", 2.),
            ("E", "G", 1.),
            ("G", "C", 3.),
            ("G", "E", 1.),
        ],
    )
}

pub fn sample_heuristic() -> TableHeuristic<String> {
    [
        ("S", 5.),
        ("A", 4.),
        ("B", 3.),
        ("C", 2.),
        ("D", 6.),
        ("E", 1.),
        ("G", 0.),
    ]
    .into_iter()
    .map(|(node, h)| (node.to_string(), h))
    .collect()
}

/// Small DAG from A to G, optimal cost 4 via B and E.
pub fn second_sample_graph() -> GraphProblem {
    GraphProblem::from_edges(
        "A",
        "G",
        [
            ("A", "B", 1.),
            ("A", "C", 4.),
            ("B", "D", 3.),
            ("B", "E", 1.),
            ("C", "F", 1.),
            ("D", "G", 3.),
            ("E", "G", 2.),
            ("F", "G", 5.),
        ],
    )
}

/// The sample graph with the goal moved to a node without edges.
pub fn sample_graph_with_isolated_goal() -> GraphProblem {
    let mut problem = sample_graph();
    problem.add_node("Z");
    problem.set_goal("Z");
    problem
}

/// Road map of Romania, Arad to Bucharest.
pub fn romania() -> GraphProblem {
    GraphProblem::from_undirected_edges(
        "Arad",
        "Bucharest",
        [
            ("Arad", "Zerind", 75.),
            ("Arad", "Sibiu", 140.),
            ("Arad", "Timisoara", 118.),
            ("Zerind", "Oradea", 71.),
            ("Oradea", "Sibiu", 151.),
            ("Timisoara", "Lugoj", 111.),
            ("Lugoj", "Mehadia", 70.),
            ("Mehadia", "Drobeta", 75.),
            ("Drobeta", "Craiova", 120.),
            ("Craiova", "Rimnicu Vilcea", 146.),
            ("Craiova", "Pitesti", 138.),
            ("Sibiu", "Fagaras", 99.),
            ("Sibiu", "Rimnicu Vilcea", 80.),
            ("Rimnicu Vilcea", "Pitesti", 97.),
            ("Fagaras", "Bucharest", 211.),
            ("Pitesti", "Bucharest", 101.),
            ("Bucharest", "Giurgiu", 90.),
            ("Bucharest", "Urziceni", 85.),
            ("Urziceni", "Hirsova", 98.),
            ("Urziceni", "Vaslui", 142.),
            ("Hirsova", "Eforie", 86.),
            ("Vaslui", "Iasi", 92.),
            ("Iasi", "Neamt", 87.),
        ],
    )
}

/// Straight-line distances to Bucharest.
pub fn romania_heuristic() -> TableHeuristic<String> {
    [
        ("Arad", 366.),
        ("Bucharest", 0.),
        ("Craiova", 160.),
        ("Drobeta", 242.),
        ("Eforie", 161.),
        ("Fagaras", 176.),
        ("Giurgiu", 77.),
        ("Hirsova", 151.),
        ("Iasi", 226.),
        ("Lugoj", 244.),
        ("Mehadia", 241.),
        ("Neamt", 234.),
        ("Oradea", 380.),
        ("Pitesti", 100.),
        ("Rimnicu Vilcea", 193.),
        ("Sibiu", 253.),
        ("Timisoara", 329.),
        ("Urziceni", 80.),
        ("Vaslui", 199.),
        ("Zerind", 374.),
    ]
    .into_iter()
    .map(|(node, h)| (node.to_string(), h))
    .collect()
}

/// Fourteen moves from the goal.
pub const MEDIUM_EIGHT_PUZZLE: Tiles = [8, 1, 3, 4, 0, 2, 7, 6, 5];

pub fn states(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// Cheapest cost to a goal over all simple paths, `None` if there is none.
/// Exponential, only for small graphs.
pub fn brute_force_cost<P: Problem>(problem: &P) -> Option<Cost> {
    fn visit<P: Problem>(
        problem: &P,
        state: &P::State,
        g: Cost,
        on_path: &mut HashSet<P::State>,
        best: &mut Option<Cost>,
    ) {
        if problem.is_goal(state) {
            if best.map_or(true, |best| g < best) {
                *best = Some(g);
            }
            return;
        }
        for action in problem.actions(state) {
            let next = problem.result(state, &action);
            if on_path.contains(&next) {
                continue;
            }
            let cost = step_cost(problem, state, &action, &next).unwrap();
            on_path.insert(next.clone());
            visit(problem, &next, g + cost, on_path, best);
            on_path.remove(&next);
        }
    }

    let initial = problem.initial_state();
    let mut best = None;
    let mut on_path = HashSet::from([initial.clone()]);
    visit(problem, &initial, Cost::from(0.), &mut on_path, &mut best);
    best
}

/// A single edge 0 -> 1 whose cost alternates between 1 and 2 on every
/// query, so that replaying a found path prices it differently.
#[derive(Debug, Default)]
pub struct FlakyProblem {
    queries: Cell<u32>,
}

impl Problem for FlakyProblem {
    type State = u32;
    type Action = u32;

    fn initial_state(&self) -> u32 {
        0
    }

    fn actions(&self, state: &u32) -> Vec<u32> {
        if *state == 0 {
            vec![1]
        } else {
            vec![]
        }
    }

    fn result(&self, _state: &u32, action: &u32) -> u32 {
        *action
    }

    fn is_goal(&self, state: &u32) -> bool {
        *state == 1
    }

    fn action_cost(&self, _state: &u32, _action: &u32, _next: &u32) -> f64 {
        let queries = self.queries.get() + 1;
        self.queries.set(queries);
        if queries % 2 == 1 {
            1.
        } else {
            2.
        }
    }
}
