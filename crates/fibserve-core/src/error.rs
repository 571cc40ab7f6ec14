use thiserror::Error;

/// Failure to parse a user-supplied input string into a complex value.
///
/// Always client-facing: the request pipeline maps this to a 400 with
/// the error's display text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A token survived normalization but is not a valid number.
    #[error("invalid number format: '{0}'")]
    InvalidNumber(String),

    /// The input split into a token count other than one or two.
    #[error("unsupported number of components: {0}")]
    ComponentCount(usize),
}

/// A stored cache value could not be parsed back into a complex value.
///
/// Never surfaced to the client; the orchestrator converts it into a
/// fallback-to-compute.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CacheFormatError {
    #[error("invalid cached value: expected 2 components, found {0}")]
    ComponentCount(usize),

    #[error("invalid cached component: '{0}'")]
    InvalidComponent(String),
}

/// The closed-form evaluation produced a NaN or infinite component.
///
/// Extreme-magnitude inputs overflow the complex exponential; rather
/// than returning a clamped or partial value, the evaluator rejects the
/// request with this fixed message.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("numerical instability in Fibonacci computation")]
pub struct InstabilityError;

/// Umbrella error for the request pipeline: the only failures that ever
/// reach a client.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComputeError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Unstable(#[from] InstabilityError),
}

impl ComputeError {
    /// Every variant here is user-input-shaped; there is no 5xx path.
    pub fn is_client_error(&self) -> bool {
        true
    }
}
