#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("Doyle system did not converge for p={p}, q={q}: residual {residual:.3e} after {iterations} iterations")]
    Convergence {
        p: i64,
        q: i64,
        residual: f64,
        iterations: usize,
    },

    #[error("Unrecognized arc mode: {0:?}")]
    InvalidMode(String),

    #[error("Family count q must be >= 2, got {0}")]
    FamilyCount(i64),

    #[error("Line spacing must be positive, got {0}")]
    NonPositiveSpacing(f64),
}

pub type Result<T> = std::result::Result<T, Error>;
