use thiserror::Error;

/// Everything that can stop a route planning run.
#[derive(Error, Debug)]
pub enum RouteError {
    #[error("at least {required} distinct locations are required, got {found}")]
    InsufficientLocations { found: usize, required: usize },

    #[error("no feasible route found")]
    NoSolutionFound,

    #[error("invalid distance matrix: {0}")]
    InvalidMatrix(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("gazetteer error: {0}")]
    Gazetteer(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
