use thiserror::Error;

/// Errors raised by the alignment and tree-building core.
///
/// Every error is terminal for the operation that raised it: nothing is retried
/// and no partially built result is returned.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed substitution matrix, distance matrix or input shape.
    #[error("Format error: {0}")]
    Format(String),

    /// A residue that is not part of the substitution matrix alphabet.
    #[error("Unknown symbol '{symbol}' not in substitution matrix")]
    UnknownSymbol { symbol: char },

    /// Empty sequence, or too few sequences / names to work with.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// One pair of a score-matrix batch failed; the whole batch is aborted.
    #[error("Alignment of '{a}' and '{b}' failed: {source}")]
    PairFailed {
        a: String,
        b: String,
        #[source]
        source: Box<Error>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, Error>;
