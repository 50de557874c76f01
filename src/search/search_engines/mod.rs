mod best_first;
mod bfs;
mod ida_star;
mod ids;
mod rbfs;
mod search_engine;

pub use best_first::{BestFirstSearch, Evaluation};
pub use bfs::BreadthFirstSearch;
pub use ida_star::IdaStar;
pub use ids::IterativeDeepening;
pub use rbfs::Rbfs;
pub use search_engine::{SearchEngine, SearchEngineName, SearchOutcome, SearchResult};
