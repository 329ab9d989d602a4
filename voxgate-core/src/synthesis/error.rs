use thiserror::Error;

use crate::http::interceptor::InterceptionOutcome;

/// Failure of one synthesis call. `Failed` carries the pipeline outcome that
/// triggered it, so callers can branch on the exact class (auth expiry vs
/// transport vs server status) without re-deriving it.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("invalid synthesis request: {0}")]
    InvalidRequest(String),

    #[error("synthesis request failed: {0:?}")]
    Failed(InterceptionOutcome),
}
