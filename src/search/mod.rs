mod errors;
mod frontier;
mod heuristics;
pub mod path;
mod problem;
mod reached_table;
mod search_config;
pub mod search_engines;
mod search_node;
mod search_space;
mod search_statistics;
mod termination_condition;
mod validate;
mod verbosity;

pub use errors::{Result, SearchError};
pub use frontier::Frontier;
pub use heuristics::{Heuristic, HeuristicValue, TableHeuristic, ZeroHeuristic};
pub use problem::{Cost, Problem, UNREACHABLE};
pub use reached_table::{ReachedTable, Reconciliation};
pub use search_config::{SearchConfig, MIN_WEIGHT};
pub use search_engines::{SearchEngine, SearchEngineName, SearchOutcome, SearchResult};
pub use search_node::{NodeId, SearchNode, NO_NODE};
pub use search_space::SearchSpace;
pub use search_statistics::SearchStatistics;
pub use termination_condition::TerminationCondition;
pub use validate::{validate, ValidationError};
pub use verbosity::Verbosity;
