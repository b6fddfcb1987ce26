//! Error types shared by every solver in the crate.
//!
//! All fatal conditions surface as [`TspError`] values: bad configuration is
//! rejected before a run starts, collaborator contract violations (a tour that
//! is not a permutation, a malformed instance file) abort the run, and an
//! observer that returns an error aborts the run as well. Nothing is retried.
//!
//! # Examples
//!
//! ```
//! use tsp_metaheur::error::{Result, TspError};
//!
//! fn require_cities(n: usize) -> Result<()> {
//!     if n == 0 {
//!         return Err(TspError::EmptyInstance);
//!     }
//!     Ok(())
//! }
//!
//! assert!(require_cities(0).is_err());
//! ```

use thiserror::Error;

/// Errors raised by instances, engines and observers.
#[derive(Error, Debug)]
pub enum TspError {
    /// A configuration value is out of range.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The problem instance contains no cities.
    #[error("Empty instance: the problem must contain at least one city")]
    EmptyInstance,

    /// Simulated annealing was started without any registered move.
    #[error("No moves registered: simulated annealing needs at least one move")]
    NoMoves,

    /// A tour handed to the instance is not a permutation of its cities.
    #[error("Invalid tour: {0}")]
    InvalidTour(String),

    /// An instance file could not be parsed.
    #[error("Parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number where parsing failed (0 when unknown).
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// The exhaustive solver refuses instances above its size limit.
    #[error("Too many cities for exhaustive search: {cities} > {limit}")]
    TooManyCities {
        /// City count of the instance.
        cities: usize,
        /// Configured limit.
        limit: usize,
    },

    /// An observer failed while handling a snapshot.
    #[error("Observer error: {0}")]
    Observer(String),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias with the error fixed to [`TspError`].
pub type Result<T> = std::result::Result<T, TspError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = TspError::Configuration("alpha must be in (0, 1)".into());
        assert_eq!(err.to_string(), "Configuration error: alpha must be in (0, 1)");

        let err = TspError::Parse {
            line: 7,
            message: "missing y coordinate".into(),
        };
        assert_eq!(err.to_string(), "Parse error at line 7: missing y coordinate");

        let err = TspError::TooManyCities {
            cities: 14,
            limit: 11,
        };
        assert!(err.to_string().contains("14 > 11"));
    }

    #[test]
    fn test_io_conversion() {
        fn open() -> Result<()> {
            let err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
            Err(err)?
        }

        match open() {
            Err(TspError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
