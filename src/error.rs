use std::fmt;

/// Counter error
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CounterError {
    /// Precision outside of `[4, 16]` range
    InvalidPrecision(usize),
    /// Merged counters were built with different precisions
    PrecisionMismatch { lhs: usize, rhs: usize },
    /// Target standard error outside of `(0, 1)` range
    InvalidErrorRate(f64),
}

impl fmt::Display for CounterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CounterError::InvalidPrecision(precision) => {
                write!(f, "precision must be in [4, 16] range: {}", precision)
            }
            CounterError::PrecisionMismatch { lhs, rhs } => write!(
                f,
                "counters must use the same precision to merge: lhs={}, rhs={}",
                lhs, rhs
            ),
            CounterError::InvalidErrorRate(epsilon) => {
                write!(f, "error rate must be in (0, 1) range: {}", epsilon)
            }
        }
    }
}

impl std::error::Error for CounterError {}
