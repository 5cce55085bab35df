use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,
    /// Rejected caller input, e.g. a statement upload with no valid lines.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// A load-bearing store read failed. The detection engine treats the
    /// bulk transaction load this way: without it there is nothing to scan,
    /// so the run aborts instead of reporting a partial result.
    #[error("transaction store unavailable: {0}")]
    StoreUnavailable(#[source] anyhow::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
