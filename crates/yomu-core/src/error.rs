use crate::key::Resource;

/// Failure of a tokenizer or dictionary service call.
///
/// `Clone` because a single failed fetch is handed to every caller that was
/// waiting on it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Service answered {status}: {message}")]
    Rejected { status: String, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    #[error("Empty argument in {0} query key")]
    EmptyArgument(Resource),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}
