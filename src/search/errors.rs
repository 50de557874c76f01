use std::path::PathBuf;
use thiserror::Error;

/// Conditions under which a search refuses to run or aborts. Not finding a
/// path is *not* an error, see [`crate::search::SearchOutcome`].
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("heuristic weight must be a finite number >= {minimum}, got {weight}")]
    InvalidWeight { weight: f64, minimum: f64 },

    #[error("action {action} in state {state} has invalid cost {cost}, costs must be non-negative")]
    InvalidActionCost {
        cost: f64,
        state: String,
        action: String,
    },

    #[error("problem is inconsistent: {0}")]
    InconsistentProblem(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, SearchError>;
