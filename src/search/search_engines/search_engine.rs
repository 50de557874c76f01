use crate::search::{
    search_engines::{
        BestFirstSearch, BreadthFirstSearch, Evaluation, IdaStar, IterativeDeepening, Rbfs,
    },
    Cost, Heuristic, Problem, Result, SearchConfig, SearchStatistics, UNREACHABLE,
};
use serde::Serialize;
use strum_macros::{Display, EnumIs, EnumIter};

/// How a search terminated. Configuration problems are reported through
/// [`crate::search::SearchError`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumIs)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SearchOutcome {
    /// A path to a goal was found
    Solved,
    /// The reachable state space was exhausted without meeting a goal
    Unreachable,
    /// The search hit its expansion or iteration ceiling and gave up
    ResourceExhausted,
}

/// The outcome of a search: the path from the initial state to the goal
/// (both inclusive), the actions along it, its cost and the statistics. When
/// no path was found `path` and `actions` are empty and `cost` is infinite.
#[derive(Debug, Clone)]
pub struct SearchResult<S, A> {
    pub path: Vec<S>,
    pub actions: Vec<A>,
    pub cost: Cost,
    pub statistics: SearchStatistics,
}

impl<S, A> SearchResult<S, A> {
    pub(crate) fn solved(
        path: Vec<S>,
        actions: Vec<A>,
        cost: Cost,
        mut statistics: SearchStatistics,
    ) -> Self {
        statistics.finalise_search(SearchOutcome::Solved, path.len());
        Self {
            path,
            actions,
            cost,
            statistics,
        }
    }

    pub(crate) fn failed(outcome: SearchOutcome, mut statistics: SearchStatistics) -> Self {
        debug_assert!(!outcome.is_solved());
        statistics.finalise_search(outcome, 0);
        Self {
            path: vec![],
            actions: vec![],
            cost: UNREACHABLE,
            statistics,
        }
    }

    pub fn outcome(&self) -> SearchOutcome {
        self.statistics.outcome()
    }

    pub fn is_solved(&self) -> bool {
        self.outcome().is_solved()
    }
}

pub trait SearchEngine {
    /// Display name used in statistics and reports.
    fn name(&self) -> String;

    fn search<P, H>(&self, problem: &P, heuristic: &mut H) -> Result<SearchResult<P::State, P::Action>>
    where
        P: Problem,
        H: Heuristic<P::State> + ?Sized;
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[clap(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SearchEngineName {
    #[clap(help = "Breadth-first search on a FIFO queue, ignores costs and heuristic.")]
    Bfs,
    #[clap(help = "Iterative deepening depth-first search, fewest edges in linear memory.")]
    Ids,
    #[clap(help = "Uniform-cost search, f = g.")]
    Ucs,
    #[clap(help = "Greedy best-first search, f = h. Not optimal.")]
    Gbfs,
    #[clap(help = "A*, f = g + h.")]
    Astar,
    #[clap(help = "Weighted A*, f = g + w * h with the configured weight.")]
    Wastar,
    #[clap(help = "Iterative deepening A* with the configured weight.")]
    Idastar,
    #[clap(help = "Recursive best-first search with the configured weight.")]
    Rbfs,
}

impl SearchEngineName {
    pub fn search<P, H>(
        &self,
        problem: &P,
        heuristic: &mut H,
        config: &SearchConfig,
    ) -> Result<SearchResult<P::State, P::Action>>
    where
        P: Problem,
        H: Heuristic<P::State> + ?Sized,
    {
        let config = config.clone();
        match self {
            SearchEngineName::Bfs => BreadthFirstSearch::new(config).search(problem, heuristic),
            SearchEngineName::Ids => IterativeDeepening::new(config).search(problem, heuristic),
            SearchEngineName::Ucs => {
                BestFirstSearch::new(Evaluation::PathCost, config).search(problem, heuristic)
            }
            SearchEngineName::Gbfs => {
                BestFirstSearch::new(Evaluation::Heuristic, config).search(problem, heuristic)
            }
            SearchEngineName::Astar => {
                BestFirstSearch::new(Evaluation::AStar { weight: 1. }, config)
                    .search(problem, heuristic)
            }
            SearchEngineName::Wastar => {
                let weight = config.weight;
                BestFirstSearch::new(Evaluation::AStar { weight }, config).search(problem, heuristic)
            }
            SearchEngineName::Idastar => IdaStar::new(config).search(problem, heuristic),
            SearchEngineName::Rbfs => Rbfs::new(config).search(problem, heuristic),
        }
    }
}
