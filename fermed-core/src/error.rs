use thiserror::Error;

/// Failure modes shared by every stage of the ED pipeline.
///
/// None of these are retryable: all computations are deterministic.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EdError {
    /// Malformed input detected before any matrix work was done.
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),

    /// The requested correlator order or operator combination has no
    /// implementation.
    #[error("unsupported correlator: {0}")]
    UnsupportedCorrelator(String),

    /// A Lehmann denominator vanished without a limiting branch to handle it.
    #[error("numerical degeneracy: |{denominator}| < {tol} in Lehmann sum term ({n}, {m})")]
    NumericalDegeneracy {
        n: usize,
        m: usize,
        denominator: f64,
        tol: f64,
    },
}

impl EdError {
    pub fn precondition<S: Into<String>>(msg: S) -> Self {
        EdError::PreconditionViolation(msg.into())
    }

    pub fn unsupported<S: Into<String>>(msg: S) -> Self {
        EdError::UnsupportedCorrelator(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, EdError>;
