//! Explicit weighted graphs, as used for the road-map style examples.

use crate::search::{Problem, Result, SearchError, TableHeuristic};
use serde::Deserialize;
use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    fs,
    path::Path,
};

/// Weighted adjacency map. Neighbours are kept sorted by name so that the
/// order of actions, and therefore of expansions, does not depend on
/// insertion order.
pub type Adjacency = BTreeMap<String, BTreeMap<String, f64>>;

/// A search problem over an explicit directed graph. States are node names
/// and the action leading to a neighbour is named after that neighbour.
#[derive(Debug, Clone)]
pub struct GraphProblem {
    adjacency: Adjacency,
    start: String,
    goal: String,
}

impl GraphProblem {
    pub fn new(adjacency: Adjacency, start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            adjacency,
            start: start.into(),
            goal: goal.into(),
        }
    }

    /// Build a graph from directed `(from, to, cost)` edges.
    pub fn from_edges<'e>(
        start: &str,
        goal: &str,
        edges: impl IntoIterator<Item = (&'e str, &'e str, f64)>,
    ) -> Self {
        let mut problem = Self::new(Adjacency::new(), start, goal);
        for (from, to, cost) in edges {
            problem.add_edge(from, to, cost);
        }
        problem
    }

    /// Build a graph where every edge can be travelled both ways at the same
    /// cost.
    pub fn from_undirected_edges<'e>(
        start: &str,
        goal: &str,
        edges: impl IntoIterator<Item = (&'e str, &'e str, f64)>,
    ) -> Self {
        let mut problem = Self::new(Adjacency::new(), start, goal);
        for (from, to, cost) in edges {
            problem.add_edge(from, to, cost);
            problem.add_edge(to, from, cost);
        }
        problem
    }

    pub fn add_edge(&mut self, from: &str, to: &str, cost: f64) {
        self.add_node(to);
        self.adjacency
            .entry(from.to_string())
            .or_default()
            .insert(to.to_string(), cost);
    }

    /// Add a node without any edges, no-op if it already exists.
    pub fn add_node(&mut self, name: &str) {
        self.adjacency.entry(name.to_string()).or_default();
    }

    pub fn set_goal(&mut self, goal: impl Into<String>) {
        self.goal = goal.into();
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    pub fn contains(&self, node: &str) -> bool {
        self.adjacency.contains_key(node)
    }

    pub fn edge_cost(&self, from: &str, to: &str) -> Option<f64> {
        self.adjacency.get(from)?.get(to).copied()
    }
}

impl Problem for GraphProblem {
    type State = String;
    type Action = String;

    fn initial_state(&self) -> String {
        self.start.clone()
    }

    fn actions(&self, state: &String) -> Vec<String> {
        self.adjacency
            .get(state)
            .map(|neighbours| neighbours.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn result(&self, _state: &String, action: &String) -> String {
        action.clone()
    }

    fn goal(&self) -> Option<&String> {
        Some(&self.goal)
    }

    /// NaN for a pair that is not an edge, which the engines reject.
    fn action_cost(&self, state: &String, action: &String, _next: &String) -> f64 {
        self.edge_cost(state, action).unwrap_or(f64::NAN)
    }
}

/// A graph problem as written in a TOML file:
///
/// ```toml
/// start = "S"
/// goal = "G"
/// undirected = false
///
/// [graph]
/// S = { A = 1, B = 2 }
/// A = { C = 2 }
///
/// [heuristic]
/// S = 5
/// A = 4
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct GraphSpec {
    pub start: String,
    pub goal: String,
    #[serde(default)]
    pub undirected: bool,
    pub graph: Adjacency,
    #[serde(default)]
    pub heuristic: HashMap<String, f64>,
}

impl GraphSpec {
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| SearchError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| SearchError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check the description and turn it into a problem and its heuristic.
    pub fn into_problem(self) -> Result<(GraphProblem, TableHeuristic<String>)> {
        let mut nodes: BTreeSet<&str> = self.graph.keys().map(String::as_str).collect();
        for neighbours in self.graph.values() {
            nodes.extend(neighbours.keys().map(String::as_str));
        }
        for (role, node) in [("start", &self.start), ("goal", &self.goal)] {
            if !nodes.contains(node.as_str()) {
                return Err(SearchError::InvalidConfig(format!(
                    "{} node {} does not appear in the graph",
                    role, node
                )));
            }
        }
        if let Some((node, value)) = self.heuristic.iter().find(|(_, value)| !(**value >= 0.)) {
            return Err(SearchError::InvalidConfig(format!(
                "heuristic value {} for {} is negative",
                value, node
            )));
        }

        let mut problem = GraphProblem::new(Adjacency::new(), self.start, self.goal);
        for node in nodes {
            problem.add_node(node);
        }
        for (from, neighbours) in &self.graph {
            for (to, &cost) in neighbours {
                problem.add_edge(from, to, cost);
                if self.undirected {
                    problem.add_edge(to, from, cost);
                }
            }
        }
        Ok((problem, TableHeuristic::new(self.heuristic)))
    }
}
