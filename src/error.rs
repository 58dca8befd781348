use thiserror::Error;

/// Errors for the LCA engine and its factor configuration.
///
/// Unknown materials, categories and scenario names are not errors: they
/// resolve through the table defaults. Everything here aborts the operation.
#[derive(Debug, Error)]
pub enum LcaError {
    #[error("carbon balance violated: total {total} != reconstructed {reconstructed}")]
    BalanceViolation { total: f64, reconstructed: f64 },
    #[error("end-of-life method `{0}` has no coefficient")]
    UnknownEolMethod(String),
    #[error("{0} table has no `default` entry")]
    MissingDefault(&'static str),
    #[error("scenario table has no `baseline` entry")]
    MissingBaseline,
    #[error("invalid disposal scenario `{name}`: {reason}")]
    InvalidScenario { name: String, reason: String },
    #[error("failed to read factor configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed factor configuration: {0}")]
    Json(#[from] serde_json::Error),
}
