use crate::search::{HeuristicValue, SearchOutcome};
use ordered_float::Float;
use serde::Serialize;
use std::time::Instant;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct SearchStatistics {
    /// Display name of the engine, including its weight where relevant
    algorithm: String,
    /// How the search terminated
    outcome: SearchOutcome,
    /// Number of nodes expanded
    expanded_nodes: u64,
    /// Number of heuristic evaluations
    evaluated_nodes: u64,
    /// Number of nodes generated, counting the initial node
    generated_nodes: u64,
    /// Number of times a closed state was reopened
    reopened_nodes: u64,
    /// Peak frontier size, or peak recursion depth for the depth-first
    /// engines
    max_frontier: usize,
    /// Number of threshold passes (IDA*), 1 for every other engine
    iterations: u64,
    /// Number of states on the returned path, 0 if there is none
    path_length: usize,
    /// Best heuristic value seen so far
    #[serde(serialize_with = "serialize_value")]
    best_heuristic_value: HeuristicValue,
    /// Wall-clock duration of the search in seconds
    search_duration: f64,
    /// Time when the search started
    #[serde(skip)]
    search_start_time: Instant,
    /// Time when the last log was printed, used for periodic logging
    #[serde(skip)]
    last_log_time: Instant,
}

fn serialize_value<S: serde::Serializer>(
    value: &HeuristicValue,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(value.into_inner())
}

impl SearchStatistics {
    pub fn new(algorithm: impl Into<String>) -> Self {
        let algorithm = algorithm.into();
        info!(algorithm = algorithm.as_str(), "starting search");
        Self {
            algorithm,
            outcome: SearchOutcome::Unreachable,
            expanded_nodes: 0,
            evaluated_nodes: 0,
            generated_nodes: 0,
            reopened_nodes: 0,
            max_frontier: 0,
            iterations: 1,
            path_length: 0,
            best_heuristic_value: HeuristicValue::infinity(),
            search_duration: 0.,
            search_start_time: Instant::now(),
            last_log_time: Instant::now(),
        }
    }

    pub fn register_heuristic_value(&mut self, heuristic_value: HeuristicValue) {
        self.evaluated_nodes += 1;
        if heuristic_value < self.best_heuristic_value {
            self.best_heuristic_value = heuristic_value;
            info!(best_heuristic_value = self.best_heuristic_value.into_inner());
        }
        self.log_if_needed();
    }

    pub fn increment_expanded_nodes(&mut self) {
        self.expanded_nodes += 1;
        self.log_if_needed();
    }

    pub fn increment_generated_nodes(&mut self, num_nodes: usize) {
        self.generated_nodes += num_nodes as u64;
        self.log_if_needed();
    }

    pub fn increment_reopened_nodes(&mut self) {
        self.reopened_nodes += 1;
        self.log_if_needed();
    }

    pub fn increment_iterations(&mut self) {
        self.iterations += 1;
    }

    /// Record the current frontier size (or recursion depth).
    pub fn observe_frontier(&mut self, size: usize) {
        self.max_frontier = self.max_frontier.max(size);
    }

    fn log_if_needed(&mut self) {
        if self.last_log_time.elapsed().as_secs() > 10 {
            self.last_log_time = Instant::now();
            self.log();
        }
    }

    fn log(&self) {
        info!(
            expanded_nodes = self.expanded_nodes,
            evaluated_nodes = self.evaluated_nodes,
            generated_nodes = self.generated_nodes,
            reopened_nodes = self.reopened_nodes,
            max_frontier = self.max_frontier,
            iterations = self.iterations,
            best_heuristic_value = self.best_heuristic_value.into_inner(),
        );
    }

    pub fn finalise_search(&mut self, outcome: SearchOutcome, path_length: usize) {
        self.outcome = outcome;
        self.path_length = path_length;
        self.search_duration = self.search_start_time.elapsed().as_secs_f64();
        info!(outcome = %outcome, "finalising search");
        self.log();
        info!(search_duration = self.search_duration);
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn outcome(&self) -> SearchOutcome {
        self.outcome
    }

    pub fn expanded_nodes(&self) -> u64 {
        self.expanded_nodes
    }

    pub fn evaluated_nodes(&self) -> u64 {
        self.evaluated_nodes
    }

    pub fn generated_nodes(&self) -> u64 {
        self.generated_nodes
    }

    pub fn reopened_nodes(&self) -> u64 {
        self.reopened_nodes
    }

    pub fn max_frontier(&self) -> usize {
        self.max_frontier
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn path_length(&self) -> usize {
        self.path_length
    }

    pub fn search_duration(&self) -> f64 {
        self.search_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_and_finalise() {
        let mut statistics = SearchStatistics::new("A*");
        statistics.increment_generated_nodes(1);
        statistics.increment_expanded_nodes();
        statistics.increment_generated_nodes(3);
        statistics.register_heuristic_value(4.0.into());
        statistics.register_heuristic_value(6.0.into());
        statistics.observe_frontier(3);
        statistics.observe_frontier(2);
        statistics.finalise_search(SearchOutcome::Solved, 4);

        assert_eq!(statistics.algorithm(), "A*");
        assert_eq!(statistics.outcome(), SearchOutcome::Solved);
        assert_eq!(statistics.expanded_nodes(), 1);
        assert_eq!(statistics.generated_nodes(), 4);
        assert_eq!(statistics.evaluated_nodes(), 2);
        assert_eq!(statistics.max_frontier(), 3);
        assert_eq!(statistics.iterations(), 1);
        assert_eq!(statistics.path_length(), 4);
        assert!(statistics.search_duration() >= 0.);
    }

    #[test]
    fn serialises_without_timers() {
        let mut statistics = SearchStatistics::new("UCS");
        statistics.finalise_search(SearchOutcome::Unreachable, 0);
        let json = serde_json::to_value(&statistics).unwrap();
        assert_eq!(json["algorithm"], "UCS");
        assert_eq!(json["outcome"], "unreachable");
        assert!(json.get("search_start_time").is_none());
    }
}
