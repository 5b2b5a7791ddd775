use thiserror::Error;

/// Failure of a single AI call.
///
/// `InvalidArgument` is the caller's fault, the two `Upstream*` variants are
/// the hosted provider's. Callers map them to distinct HTTP statuses, so new
/// failure modes must land in one of these three buckets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AiError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    UpstreamContractViolation(String),
    #[error("upstream request failed: {0}")]
    UpstreamUnavailable(String),
}

impl AiError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        AiError::InvalidArgument(message.into())
    }

    pub fn contract_violation(message: impl Into<String>) -> Self {
        AiError::UpstreamContractViolation(message.into())
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        AiError::UpstreamUnavailable(message.into())
    }
}
