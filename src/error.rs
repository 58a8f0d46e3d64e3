use std::io;

use thiserror::Error;

/// Problem-description parsing errors.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("malformed input at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("failed to read input: {0}")]
    Io(#[source] io::Error),
}

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Linear-solver errors.
///
/// Infeasible or unbounded states inside the simplex are deliberately not
/// represented here: they indicate a defect in the construction of branch
/// constraints and abort the process as assertion failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("basis is not invertible: no pivot available in column {column}")]
    NonInvertible { column: usize },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Solve(#[from] SolveError),
}

pub type Result<T> = std::result::Result<T, Error>;
